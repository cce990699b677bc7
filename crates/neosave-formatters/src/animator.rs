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
    ContextId, Formatter, NodeScope, SaveError, SaveReader, SaveReaderExt, SaveWriter,
    SaveWriterExt, SerializationKey,
};
use neosave_data::components::{Animator, AnimatorLayer, AnimatorTransition, ParameterValue};

const PARAMS: SerializationKey = SerializationKey::new("params");
const LAYER: SerializationKey = SerializationKey::new("layer");

const STATE: SerializationKey = SerializationKey::new("state");
const TIME: SerializationKey = SerializationKey::new("time");
const WEIGHT: SerializationKey = SerializationKey::new("weight");
const NEXT_STATE: SerializationKey = SerializationKey::new("next_state");
const NEXT_TIME: SerializationKey = SerializationKey::new("next_time");
const TRANSITION_DURATION: SerializationKey = SerializationKey::new("transition_duration");

/// Writes and restores the runtime state of an [`Animator`].
///
/// Layout inside the component context:
///
/// - `params[-1]`: one key per bool/int/float parameter, named after it.
///   Triggers are transient and never saved.
/// - `layer[i]`: state, normalized time, weight and any in-flight transition
///   of layer `i`. Only layers with a positive weight are written; on read a
///   missing layer gets its weight forced to zero.
///
/// Nothing is written for a disabled animator or an inactive node, and the
/// read path skips them the same way.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnimatorFormatter;

impl AnimatorFormatter {
    fn write_layer(layer: &AnimatorLayer, writer: &mut dyn SaveWriter) -> Result<(), SaveError> {
        writer.write_value(&STATE, layer.state)?;
        writer.write_value(&TIME, layer.normalized_time)?;
        writer.write_value(&WEIGHT, layer.weight)?;
        if let Some(transition) = &layer.transition {
            writer.write_value(&NEXT_STATE, transition.destination_state)?;
            writer.write_value(&NEXT_TIME, transition.destination_time)?;
            writer.write_value(&TRANSITION_DURATION, transition.duration_remaining)?;
        }
        Ok(())
    }

    fn read_layer(layer: &mut AnimatorLayer, reader: &dyn SaveReader) {
        reader.read_into(&STATE, &mut layer.state);
        reader.read_into(&TIME, &mut layer.normalized_time);
        reader.read_into(&WEIGHT, &mut layer.weight);
        layer.transition = reader
            .lookup::<i32>(&NEXT_STATE)
            .map(|destination_state| AnimatorTransition {
                destination_state,
                destination_time: reader.read_value_or(&NEXT_TIME, 0.0),
                duration_remaining: reader.read_value_or(&TRANSITION_DURATION, 0.0),
            });
    }
}

impl Formatter for AnimatorFormatter {
    type Target = Animator;

    fn write(
        &self,
        target: &Animator,
        scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError> {
        if !scope.active || !target.enabled {
            return Ok(());
        }

        writer.write_context(&PARAMS, ContextId::DEFAULT_INDEX, |w| {
            for parameter in &target.parameters {
                let key = SerializationKey::owned(parameter.name.clone());
                match parameter.value {
                    ParameterValue::Bool(value) => w.write_value(&key, value)?,
                    ParameterValue::Int(value) => w.write_value(&key, value)?,
                    ParameterValue::Float(value) => w.write_value(&key, value)?,
                    ParameterValue::Trigger(_) => {}
                }
            }
            Ok(())
        })?;

        for (index, layer) in target.layers.iter().enumerate() {
            if layer.weight <= 0.0 {
                continue;
            }
            writer.write_context(&LAYER, index as i32, |w| Self::write_layer(layer, w))?;
        }
        Ok(())
    }

    fn read(
        &self,
        target: &mut Animator,
        scope: &NodeScope<'_>,
        reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError> {
        if !scope.active || !target.enabled {
            log::debug!("Skipping inactive animator on '{}'", scope.name);
            return Ok(());
        }

        reader.read_context(&PARAMS, ContextId::DEFAULT_INDEX, |r| {
            for parameter in &mut target.parameters {
                let key = SerializationKey::owned(parameter.name.clone());
                match &mut parameter.value {
                    ParameterValue::Bool(value) => {
                        r.read_into(&key, value);
                    }
                    ParameterValue::Int(value) => {
                        r.read_into(&key, value);
                    }
                    ParameterValue::Float(value) => {
                        r.read_into(&key, value);
                    }
                    ParameterValue::Trigger(_) => {}
                }
            }
            Ok(())
        })?;

        for (index, layer) in target.layers.iter_mut().enumerate() {
            let found = reader.read_context(&LAYER, index as i32, |r| {
                Self::read_layer(layer, r);
                Ok(())
            })?;
            if found.is_none() {
                layer.weight = 0.0;
            }
        }
        Ok(())
    }
}
