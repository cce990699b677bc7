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

//! On-disk container for save records.
//!
//! A save file is a fixed-size [`SaveHeader`] followed by the encoded
//! [`ContextRecord`](crate::serialization::ContextRecord) payload. The header
//! names the encoding so a loader can pick the right decoder.

mod encoding;
mod error;
mod format;

pub use encoding::SaveEncoding;
pub use error::FormatError;
pub use format::{SaveFile, SaveHeader, FORMAT_VERSION, HEADER_MAGIC_BYTES};
