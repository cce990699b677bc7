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

//! The in-memory [`SaveReader`] navigating a [`ContextRecord`] tree.

use super::contract::SaveReader;
use super::error::SaveError;
use super::key::SerializationKey;
use super::record::{ContextId, ContextRecord};
use super::value::Value;

/// Reads values back out of a record tree.
///
/// Pushing a context that was never written is a recoverable miss: the push
/// returns `false` and the reader stays where it was.
pub struct RecordReader<'a> {
    root: &'a ContextRecord,
    stack: Vec<(ContextId, &'a ContextRecord)>,
}

impl<'a> RecordReader<'a> {
    /// Creates a reader positioned at the root of `root`.
    pub fn new(root: &'a ContextRecord) -> Self {
        Self {
            root,
            stack: Vec::new(),
        }
    }

    /// The record of the innermost entered context.
    pub fn current(&self) -> &'a ContextRecord {
        self.stack.last().map_or(self.root, |(_, record)| *record)
    }

    /// A readable path of the entered contexts, e.g. `root/node[4]`.
    pub fn context_path(&self) -> String {
        let mut path = String::from("root");
        for (id, _) in &self.stack {
            path.push('/');
            path.push_str(&id.to_string());
        }
        path
    }
}

impl SaveReader for RecordReader<'_> {
    fn read_raw(&self, key: &SerializationKey) -> Option<&Value> {
        self.current().get(key)
    }

    fn push_context(&mut self, kind: &SerializationKey, index: i32) -> bool {
        match self.current().child(kind, index) {
            Some(record) => {
                self.stack.push((ContextId::new(kind.clone(), index), record));
                true
            }
            None => {
                log::debug!(
                    "Context '{}[{}]' not present under '{}'",
                    kind,
                    index,
                    self.context_path()
                );
                false
            }
        }
    }

    fn pop_context(&mut self, kind: &SerializationKey) -> Result<(), SaveError> {
        let (open, _) = self.stack.last().ok_or_else(|| SaveError::ContextUnderflow {
            kind: kind.name().to_owned(),
        })?;
        if open.kind != *kind {
            return Err(SaveError::ContextMismatch {
                open: open.to_string(),
                requested: kind.name().to_owned(),
            });
        }
        self.stack.pop();
        Ok(())
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quaternion, Vec3};
    use crate::serialization::{RecordWriter, SaveReaderExt, SaveWriterExt};

    const LAYER: SerializationKey = SerializationKey::new("layer");
    const STATE: SerializationKey = SerializationKey::new("state");
    const NAME: SerializationKey = SerializationKey::new("name");
    const ROTATION: SerializationKey = SerializationKey::new("rotation");
    const OFFSET: SerializationKey = SerializationKey::new("offset");
    const WAYPOINTS: SerializationKey = SerializationKey::new("waypoints");
    const WEIGHT: SerializationKey = SerializationKey::new("weight");
    const DRIFT: SerializationKey = SerializationKey::new("drift");

    fn layered_record() -> ContextRecord {
        let mut writer = RecordWriter::new();
        writer
            .write_context(&LAYER, 0, |w| w.write_value(&STATE, 10))
            .unwrap();
        writer
            .write_context(&LAYER, 1, |w| w.write_value(&STATE, 20))
            .unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_round_trip_of_every_value_type() {
        let mut writer = RecordWriter::new();
        writer.write_value(&STATE, -7).unwrap();
        writer.write_value(&NAME, String::new()).unwrap();
        writer.write_value(&OFFSET, Vec3::ZERO).unwrap();
        writer
            .write_value(&ROTATION, Quaternion::new(0.0, 0.6, 0.0, 0.8))
            .unwrap();
        writer.write_value(&LAYER, false).unwrap();
        writer.write_value(&WEIGHT, 0.0_f32).unwrap();
        writer.write_value(&DRIFT, -12.75_f32).unwrap();
        let record = writer.finish().unwrap();
        let reader = RecordReader::new(&record);

        let mut state = 0;
        assert!(reader.try_read_value(&STATE, &mut state, 99));
        assert_eq!(state, -7);
        let mut name = String::from("stale");
        assert!(reader.try_read_value(&NAME, &mut name, String::from("default")));
        assert_eq!(name, "");
        assert_eq!(reader.read_value_or(&OFFSET, Vec3::ONE), Vec3::ZERO);
        assert_eq!(
            reader.read_value_or(&ROTATION, Quaternion::IDENTITY),
            Quaternion::new(0.0, 0.6, 0.0, 0.8)
        );
        assert!(!reader.read_value_or(&LAYER, true));
        let mut weight = 1.0_f32;
        assert!(reader.try_read_value(&WEIGHT, &mut weight, 0.5));
        assert_eq!(weight, 0.0);
        assert_eq!(reader.read_value_or(&DRIFT, 3.0_f32), -12.75);
    }

    #[test]
    fn test_missing_key_yields_exact_default() {
        let record = ContextRecord::new();
        let reader = RecordReader::new(&record);
        let mut value = 1.5_f32;
        assert!(!reader.try_read_value(&STATE, &mut value, -3.25));
        assert_eq!(value, -3.25);
    }

    #[test]
    fn test_type_mismatch_yields_default() {
        let mut writer = RecordWriter::new();
        writer.write_value(&STATE, 4.0_f32).unwrap();
        let record = writer.finish().unwrap();
        let reader = RecordReader::new(&record);
        let mut state = 0;
        assert!(!reader.try_read_value(&STATE, &mut state, 8));
        assert_eq!(state, 8);
    }

    #[test]
    fn test_read_into_keeps_live_value_on_miss() {
        let record = ContextRecord::new();
        let reader = RecordReader::new(&record);
        let mut mass = 12.0_f32;
        assert!(!reader.read_into(&STATE, &mut mass));
        assert_eq!(mass, 12.0);
    }

    #[test]
    fn test_contexts_isolate_identical_keys() {
        let record = layered_record();
        let mut reader = RecordReader::new(&record);

        assert_eq!(reader.read_value_or(&STATE, -1), -1);
        assert!(reader.push_context(&LAYER, 1));
        assert_eq!(reader.read_value_or(&STATE, -1), 20);
        reader.pop_context(&LAYER).unwrap();
        assert!(reader.push_context(&LAYER, 0));
        assert_eq!(reader.read_value_or(&STATE, -1), 10);
        reader.pop_context(&LAYER).unwrap();
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn test_missing_context_push_is_a_miss() {
        let record = layered_record();
        let mut reader = RecordReader::new(&record);
        assert!(!reader.push_context(&LAYER, 2));
        assert_eq!(reader.depth(), 0);
        assert!(matches!(
            reader.pop_context(&LAYER),
            Err(SaveError::ContextUnderflow { .. })
        ));
    }

    #[test]
    fn test_read_context_skips_absent_context() {
        let record = layered_record();
        let mut reader = RecordReader::new(&record);
        let missing = reader
            .read_context(&LAYER, 5, |r| Ok(r.read_value_or(&STATE, 0)))
            .unwrap();
        assert_eq!(missing, None);
        let present = reader
            .read_context(&LAYER, 1, |r| Ok(r.read_value_or(&STATE, 0)))
            .unwrap();
        assert_eq!(present, Some(20));
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn test_mismatched_pop_is_rejected() {
        let record = layered_record();
        let mut reader = RecordReader::new(&record);
        assert!(reader.push_context(&LAYER, 0));
        assert!(matches!(
            reader.pop_context(&STATE),
            Err(SaveError::ContextMismatch { .. })
        ));
    }

    #[test]
    fn test_array_length_is_preserved() {
        for len in [0_usize, 1, 7] {
            let points: Vec<Vec3> = (0..len).map(|i| Vec3::new(i as f32, 0.0, -1.0)).collect();
            let mut writer = RecordWriter::new();
            writer.write_values(&WAYPOINTS, &points).unwrap();
            let record = writer.finish().unwrap();
            let reader = RecordReader::new(&record);

            let mut restored = vec![Vec3::ONE; 3];
            assert!(reader.try_read_values(&WAYPOINTS, &mut restored, Vec::new()));
            assert_eq!(restored.len(), len);
            assert_eq!(restored, points);
        }
    }

    #[test]
    fn test_missing_array_yields_default_array() {
        let record = ContextRecord::new();
        let reader = RecordReader::new(&record);
        assert_eq!(reader.read_values_or(&WAYPOINTS, vec![1, 2]), vec![1, 2]);
    }
}
