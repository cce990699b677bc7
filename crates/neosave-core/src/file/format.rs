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

use super::{FormatError, SaveEncoding};
use crate::serialization::ContextRecord;

/// Identifies save files ("NEOSAVE\0").
pub const HEADER_MAGIC_BYTES: [u8; 8] = *b"NEOSAVE\0";

/// The container version written by this build.
pub const FORMAT_VERSION: u8 = 1;

/// The fixed-size header at the start of every save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveHeader {
    /// Container version the file was written with.
    pub format_version: u8,
    /// Encoding of the payload.
    pub encoding: SaveEncoding,
    /// Payload length in bytes.
    pub payload_length: u64,
}

// The header is a fixed little-endian layout, read without serde so it can be
// validated before the payload is touched.
impl SaveHeader {
    /// Total header size in bytes.
    pub const SIZE: usize = 8 + 1 + 1 + 8;

    /// Creates a header for the current format version.
    pub fn new(encoding: SaveEncoding, payload_length: u64) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            encoding,
            payload_length,
        }
    }

    /// Serializes the header.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..8].copy_from_slice(&HEADER_MAGIC_BYTES);
        bytes[8] = self.format_version;
        bytes[9] = self.encoding.id();
        bytes[10..Self::SIZE].copy_from_slice(&self.payload_length.to_le_bytes());
        bytes
    }

    /// Parses a header from the beginning of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::TooShort(bytes.len(), Self::SIZE));
        }
        if bytes[0..8] != HEADER_MAGIC_BYTES {
            return Err(FormatError::BadMagic);
        }

        let format_version = bytes[8];
        if format_version == 0 || format_version > FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(format_version));
        }
        let encoding = SaveEncoding::from_id(bytes[9])?;

        let mut length = [0u8; 8];
        length.copy_from_slice(&bytes[10..Self::SIZE]);
        Ok(Self {
            format_version,
            encoding,
            payload_length: u64::from_le_bytes(length),
        })
    }
}

/// A whole save file in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    /// The parsed header.
    pub header: SaveHeader,
    /// The encoded payload.
    pub payload: Vec<u8>,
}

impl SaveFile {
    /// Encodes `record` with `encoding` and wraps it in a header.
    pub fn from_record(record: &ContextRecord, encoding: SaveEncoding) -> Result<Self, FormatError> {
        let payload = encoding.encode_record(record)?;
        Ok(Self {
            header: SaveHeader::new(encoding, payload.len() as u64),
            payload,
        })
    }

    /// Decodes the payload.
    pub fn to_record(&self) -> Result<ContextRecord, FormatError> {
        self.header.encoding.decode_record(&self.payload)
    }

    /// Serializes the header followed by the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SaveHeader::SIZE + self.payload.len());
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Parses a file. Bytes beyond the declared payload are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let header = SaveHeader::from_bytes(bytes)?;
        let body = &bytes[SaveHeader::SIZE..];
        let payload = usize::try_from(header.payload_length)
            .ok()
            .and_then(|length| body.get(..length))
            .ok_or(FormatError::Truncated {
                expected: header.payload_length,
                found: body.len(),
            })?
            .to_vec();
        Ok(Self { header, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quaternion, Vec3};
    use crate::serialization::{RecordWriter, SaveWriterExt, SerializationKey};

    const HEALTH: SerializationKey = SerializationKey::new("health");
    const SPAWN: SerializationKey = SerializationKey::new("spawn");
    const FACING: SerializationKey = SerializationKey::new("facing");
    const TAGS: SerializationKey = SerializationKey::new("tags");
    const NODE: SerializationKey = SerializationKey::new("node");

    fn sample_record() -> ContextRecord {
        let mut writer = RecordWriter::new();
        writer.write_value(&HEALTH, 87).unwrap();
        writer
            .write_context(&NODE, 3, |w| {
                w.write_value(&SPAWN, Vec3::new(1.5, -2.0, 0.25))?;
                w.write_value(&FACING, Quaternion::new(0.0, 0.0, 0.0, 1.0))?;
                w.write_values(&TAGS, &["boss".to_string(), "flying".to_string()])
            })
            .unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_header_round_trip() {
        let header = SaveHeader::new(SaveEncoding::Text, 1234);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..8], b"NEOSAVE\0");
        assert_eq!(SaveHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_binary_and_text_payloads_decode_to_same_record() {
        let record = sample_record();
        for encoding in [SaveEncoding::Binary, SaveEncoding::Text] {
            let bytes = SaveFile::from_record(&record, encoding).unwrap().to_bytes();
            let file = SaveFile::from_bytes(&bytes).unwrap();
            assert_eq!(file.header.encoding, encoding);
            assert_eq!(file.to_record().unwrap(), record);
        }
    }

    #[test]
    fn test_rejects_short_input() {
        assert!(matches!(
            SaveHeader::from_bytes(b"NEOSAVE"),
            Err(FormatError::TooShort(7, 18))
        ));
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = SaveHeader::new(SaveEncoding::Binary, 0).to_bytes();
        bytes[0] = b'X';
        assert!(matches!(
            SaveHeader::from_bytes(&bytes),
            Err(FormatError::BadMagic)
        ));
    }

    #[test]
    fn test_rejects_newer_version_and_unknown_encoding() {
        let mut bytes = SaveHeader::new(SaveEncoding::Binary, 0).to_bytes();
        bytes[8] = FORMAT_VERSION + 1;
        assert!(matches!(
            SaveHeader::from_bytes(&bytes),
            Err(FormatError::UnsupportedVersion(_))
        ));

        let mut bytes = SaveHeader::new(SaveEncoding::Binary, 0).to_bytes();
        bytes[9] = 9;
        assert!(matches!(
            SaveHeader::from_bytes(&bytes),
            Err(FormatError::UnknownEncoding(9))
        ));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let mut bytes = SaveFile::from_record(&sample_record(), SaveEncoding::Binary)
            .unwrap()
            .to_bytes();
        bytes.pop();
        assert!(matches!(
            SaveFile::from_bytes(&bytes),
            Err(FormatError::Truncated { .. })
        ));
    }
}
