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

use serde::{Deserialize, Serialize};

use super::FormatError;
use crate::serialization::ContextRecord;

/// How a record payload is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize)]
pub enum SaveEncoding {
    /// Compact bincode payload.
    #[default]
    Binary,
    /// Human-readable RON payload, handy for debugging saves.
    Text,
}

impl SaveEncoding {
    /// The id stored in the header.
    pub fn id(self) -> u8 {
        match self {
            SaveEncoding::Binary => 0,
            SaveEncoding::Text => 1,
        }
    }

    /// The encoding for a header id.
    pub fn from_id(id: u8) -> Result<Self, FormatError> {
        match id {
            0 => Ok(SaveEncoding::Binary),
            1 => Ok(SaveEncoding::Text),
            other => Err(FormatError::UnknownEncoding(other)),
        }
    }

    /// Encodes a record into payload bytes.
    pub fn encode_record(self, record: &ContextRecord) -> Result<Vec<u8>, FormatError> {
        match self {
            SaveEncoding::Binary => Ok(bincode::serde::encode_to_vec(
                record,
                bincode::config::standard(),
            )?),
            SaveEncoding::Text => {
                let text = ron::ser::to_string_pretty(record, ron::ser::PrettyConfig::default())
                    .map_err(|e| FormatError::TextEncode(e.to_string()))?;
                Ok(text.into_bytes())
            }
        }
    }

    /// Decodes payload bytes into a record.
    pub fn decode_record(self, bytes: &[u8]) -> Result<ContextRecord, FormatError> {
        match self {
            SaveEncoding::Binary => {
                let (record, _len) =
                    bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
                Ok(record)
            }
            SaveEncoding::Text => {
                ron::de::from_bytes(bytes).map_err(|e| FormatError::TextDecode(e.to_string()))
            }
        }
    }
}
