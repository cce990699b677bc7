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
use neosave_data::components::{Interpolation, RigidBody};

const VELOCITY: SerializationKey = SerializationKey::new("velocity");
const ANGULAR_VELOCITY: SerializationKey = SerializationKey::new("angularVelocity");
const DETECT_COLLISIONS: SerializationKey = SerializationKey::new("detectCollisions");
const INTERPOLATION: SerializationKey = SerializationKey::new("interpolation");
const IS_KINEMATIC: SerializationKey = SerializationKey::new("isKinematic");
const MASS: SerializationKey = SerializationKey::new("mass");
const USE_GRAVITY: SerializationKey = SerializationKey::new("useGravity");

/// Writes and restores the simulation state of a [`RigidBody`].
///
/// Reads keep the live value of any missing field. The cached pose is never
/// saved; after a read it is re-synced from the owning node, whose transform
/// must already have been restored.
#[derive(Debug, Default, Clone, Copy)]
pub struct RigidBodyFormatter;

impl Formatter for RigidBodyFormatter {
    type Target = RigidBody;

    fn write(
        &self,
        target: &RigidBody,
        _scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError> {
        writer.write_value(&VELOCITY, target.velocity)?;
        writer.write_value(&ANGULAR_VELOCITY, target.angular_velocity)?;
        writer.write_value(&DETECT_COLLISIONS, target.detect_collisions)?;
        writer.write_value(&INTERPOLATION, target.interpolation.to_index())?;
        writer.write_value(&IS_KINEMATIC, target.is_kinematic)?;
        writer.write_value(&MASS, target.mass)?;
        writer.write_value(&USE_GRAVITY, target.use_gravity)
    }

    fn read(
        &self,
        target: &mut RigidBody,
        scope: &NodeScope<'_>,
        reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError> {
        reader.read_into(&VELOCITY, &mut target.velocity);
        reader.read_into(&ANGULAR_VELOCITY, &mut target.angular_velocity);
        reader.read_into(&DETECT_COLLISIONS, &mut target.detect_collisions);
        reader.read_into(&IS_KINEMATIC, &mut target.is_kinematic);
        reader.read_into(&MASS, &mut target.mass);
        reader.read_into(&USE_GRAVITY, &mut target.use_gravity);

        if let Some(index) = reader.lookup::<i32>(&INTERPOLATION) {
            match Interpolation::from_index(index) {
                Some(mode) => target.interpolation = mode,
                None => log::debug!(
                    "Unknown interpolation mode {index} on '{}'; keeping {:?}",
                    scope.name,
                    target.interpolation
                ),
            }
        }

        target.sync_pose(scope.position, scope.rotation);
        Ok(())
    }
}
