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

//! The keyed, context-scoped serialization contract.
//!
//! Components never write positional data. Every value lives under a
//! [`SerializationKey`] inside the currently open context, and every read is
//! an independent lookup that falls back to a caller-supplied default. Adding
//! or removing keys between two versions of a component is therefore always
//! safe: old saves miss the new keys, new code stops asking for the old ones.
//!
//! - [`SaveWriter`] / [`SaveReader`]: object-safe writer and reader traits
//! - [`SaveWriterExt`] / [`SaveReaderExt`]: typed helpers on top of them
//! - [`RecordWriter`] / [`RecordReader`]: the in-memory implementation
//!   producing and consuming a [`ContextRecord`] tree
//! - [`Formatter`] / [`FormatterRegistry`]: per-type strategies plugging
//!   engine types into the contract

mod contract;
mod error;
mod formatter;
mod key;
mod reader;
mod record;
mod value;
mod writer;

pub use contract::{SaveReader, SaveReaderExt, SaveWriter, SaveWriterExt};
pub use error::SaveError;
pub use formatter::{
    ErasedFormatter, Formatter, FormatterRegistration, FormatterRegistry, NodeScope, SaveState,
    StateFormatter,
};
pub use key::SerializationKey;
pub use reader::RecordReader;
pub use record::{ChildContext, ContextId, ContextRecord, KeyedValue};
pub use value::{SaveValue, Value};
pub use writer::{DuplicateKeyPolicy, RecordWriter};
