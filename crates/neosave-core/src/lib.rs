// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # NeoSave Core
//!
//! Foundational crate for the save-game layer: the keyed, context-scoped
//! writer/reader contract, the in-memory record tree it produces, the
//! formatter registry, and the resumable-operation helpers used by gameplay
//! clients.

#![warn(missing_docs)]

pub mod file;
pub mod math;
pub mod resume;
pub mod serialization;

pub use serialization::{
    ContextId, ContextRecord, Formatter, FormatterRegistry, NodeScope, RecordReader,
    RecordWriter, SaveError, SaveReader, SaveReaderExt, SaveState, SaveValue, SaveWriter,
    SaveWriterExt, SerializationKey, Value,
};
