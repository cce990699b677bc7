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

use neosave_core::{
    Formatter, NodeScope, SaveError, SaveReader, SaveReaderExt, SaveWriter, SaveWriterExt,
    SerializationKey,
};
use neosave_data::components::Transform;

const POSITION: SerializationKey = SerializationKey::new("position");
const ROTATION: SerializationKey = SerializationKey::new("rotation");
const SCALE: SerializationKey = SerializationKey::new("scale");

/// Writes and restores a node's [`Transform`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformFormatter;

impl Formatter for TransformFormatter {
    type Target = Transform;

    fn write(
        &self,
        target: &Transform,
        _scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError> {
        writer.write_value(&POSITION, target.position)?;
        writer.write_value(&ROTATION, target.rotation)?;
        writer.write_value(&SCALE, target.scale)
    }

    fn read(
        &self,
        target: &mut Transform,
        _scope: &NodeScope<'_>,
        reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError> {
        reader.read_into(&POSITION, &mut target.position);
        reader.read_into(&ROTATION, &mut target.rotation);
        reader.read_into(&SCALE, &mut target.scale);
        Ok(())
    }
}
