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

use thiserror::Error;

/// Errors raised while packing or unpacking a save container.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Fewer bytes than a header needs.
    #[error("Not enough bytes to form a header: got {0}, need {1}")]
    TooShort(usize, usize),

    /// The magic bytes do not identify a save file.
    #[error("Invalid magic bytes; not a save file")]
    BadMagic,

    /// The header was written by a newer format version.
    #[error("Unsupported save format version {0}")]
    UnsupportedVersion(u8),

    /// The header names an encoding this build does not know.
    #[error("Unknown payload encoding id {0}")]
    UnknownEncoding(u8),

    /// The payload is shorter than the header declares.
    #[error("Truncated payload: header declares {expected} bytes, found {found}")]
    Truncated {
        /// Declared payload length.
        expected: u64,
        /// Bytes actually present.
        found: usize,
    },

    /// Binary encoding failed.
    #[error("Binary encoding failed: {0}")]
    BinaryEncode(#[from] bincode::error::EncodeError),

    /// Binary decoding failed.
    #[error("Binary decoding failed: {0}")]
    BinaryDecode(#[from] bincode::error::DecodeError),

    /// Text encoding failed.
    #[error("Text encoding failed: {0}")]
    TextEncode(String),

    /// Text decoding failed.
    #[error("Text decoding failed: {0}")]
    TextDecode(String),
}
