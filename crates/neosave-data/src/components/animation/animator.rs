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

use neosave_core::SerializationKey;
use serde::{Deserialize, Serialize};

use crate::Component;

/// The current value of an animator parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    /// A boolean parameter.
    Bool(bool),
    /// An integer parameter.
    Int(i32),
    /// A float parameter.
    Float(f32),
    /// A one-shot pulse, consumed by the next transition that reads it.
    Trigger(bool),
}

/// A named animator parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorParameter {
    /// Parameter name, as used by state machine conditions.
    pub name: String,
    /// Current value.
    pub value: ParameterValue,
}

/// A cross-fade between two states of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatorTransition {
    /// Id of the state being faded to.
    pub destination_state: i32,
    /// Normalized time inside the destination state.
    pub destination_time: f32,
    /// Seconds of blending left.
    pub duration_remaining: f32,
}

/// One layer of the animation state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorLayer {
    /// Layer name.
    pub name: String,
    /// Blend weight in `[0, 1]`.
    pub weight: f32,
    /// Id of the current state, see [`Animator::state_id`].
    pub state: i32,
    /// Normalized time inside the current state.
    pub normalized_time: f32,
    /// The transition in progress, if any.
    pub transition: Option<AnimatorTransition>,
}

impl AnimatorLayer {
    /// Creates a layer in state 0 with the given weight.
    pub fn new(name: impl Into<String>, weight: f32) -> Self {
        Self {
            name: name.into(),
            weight,
            state: 0,
            normalized_time: 0.0,
            transition: None,
        }
    }
}

/// A layered animation state machine.
///
/// Only the runtime state that a save must capture is modelled: parameter
/// values, and per layer the current state, time, weight and any in-flight
/// transition.
#[derive(Debug, Clone, PartialEq, Component, Serialize, Deserialize)]
pub struct Animator {
    /// Disabled animators neither advance nor save.
    pub enabled: bool,
    /// State machine parameters.
    pub parameters: Vec<AnimatorParameter>,
    /// Layers, base layer first.
    pub layers: Vec<AnimatorLayer>,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Animator {
    /// Creates an enabled animator with `layer_count` layers. The base layer
    /// has full weight, the others none.
    pub fn new(layer_count: usize) -> Self {
        let layers = (0..layer_count)
            .map(|i| {
                let weight = if i == 0 { 1.0 } else { 0.0 };
                AnimatorLayer::new(format!("Layer {i}"), weight)
            })
            .collect();
        Self {
            enabled: true,
            parameters: Vec::new(),
            layers,
        }
    }

    /// The id of the state called `name`.
    pub fn state_id(name: &str) -> i32 {
        SerializationKey::owned(name.to_string()).hash() as i32
    }

    /// Builder-style parameter declaration.
    pub fn with_parameter(mut self, name: impl Into<String>, value: ParameterValue) -> Self {
        self.parameters.push(AnimatorParameter {
            name: name.into(),
            value,
        });
        self
    }

    /// The value of the parameter called `name`.
    pub fn parameter(&self, name: &str) -> Option<ParameterValue> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    /// Sets the parameter called `name` if it exists and has the same kind.
    /// Returns whether it was set.
    pub fn set_parameter(&mut self, name: &str, value: ParameterValue) -> bool {
        let Some(parameter) = self.parameters.iter_mut().find(|p| p.name == name) else {
            log::debug!("Animator has no parameter named '{name}'");
            return false;
        };
        if std::mem::discriminant(&parameter.value) != std::mem::discriminant(&value) {
            log::debug!("Animator parameter '{name}' has a different kind");
            return false;
        }
        parameter.value = value;
        true
    }

    /// Jumps `layer` straight to `state` at `normalized_time`, cancelling any
    /// transition.
    pub fn play(&mut self, layer: usize, state: i32, normalized_time: f32) {
        if let Some(layer) = self.layers.get_mut(layer) {
            layer.state = state;
            layer.normalized_time = normalized_time;
            layer.transition = None;
        }
    }

    /// Starts a cross-fade on `layer` towards `state`.
    pub fn cross_fade(&mut self, layer: usize, state: i32, duration: f32, destination_time: f32) {
        if let Some(layer) = self.layers.get_mut(layer) {
            layer.transition = Some(AnimatorTransition {
                destination_state: state,
                destination_time,
                duration_remaining: duration.max(0.0),
            });
        }
    }

    /// Sets the blend weight of `layer`, clamped to `[0, 1]`.
    pub fn set_layer_weight(&mut self, layer: usize, weight: f32) {
        if let Some(layer) = self.layers.get_mut(layer) {
            layer.weight = weight.clamp(0.0, 1.0);
        }
    }

    /// Advances every layer by `dt` seconds, with states lasting
    /// `state_length` seconds. Completed transitions switch the layer to
    /// their destination state.
    pub fn update(&mut self, dt: f32, state_length: f32) {
        if !self.enabled || state_length <= 0.0 {
            return;
        }
        let step = dt / state_length;
        for layer in &mut self.layers {
            layer.normalized_time += step;
            if let Some(transition) = &mut layer.transition {
                transition.destination_time += step;
                transition.duration_remaining -= dt;
                if transition.duration_remaining <= 0.0 {
                    layer.state = transition.destination_state;
                    layer.normalized_time = transition.destination_time;
                    layer.transition = None;
                }
            }
        }
        for parameter in &mut self.parameters {
            if let ParameterValue::Trigger(fired) = &mut parameter.value {
                *fired = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_weights_only_base_layer() {
        let animator = Animator::new(3);
        let weights: Vec<f32> = animator.layers.iter().map(|l| l.weight).collect();
        assert_eq!(weights, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_state_id_is_stable() {
        assert_eq!(Animator::state_id("Run"), Animator::state_id("Run"));
        assert_ne!(Animator::state_id("Run"), Animator::state_id("Idle"));
    }

    #[test]
    fn test_set_parameter_checks_kind() {
        let mut animator = Animator::new(1).with_parameter("speed", ParameterValue::Float(0.0));
        assert!(animator.set_parameter("speed", ParameterValue::Float(2.0)));
        assert!(!animator.set_parameter("speed", ParameterValue::Int(2)));
        assert!(!animator.set_parameter("missing", ParameterValue::Bool(true)));
        assert_eq!(animator.parameter("speed"), Some(ParameterValue::Float(2.0)));
    }

    #[test]
    fn test_cross_fade_completes_on_update() {
        let run = Animator::state_id("Run");
        let mut animator = Animator::new(1);
        animator.cross_fade(0, run, 0.25, 0.0);
        animator.update(0.125, 1.0);
        assert!(animator.layers[0].transition.is_some());
        animator.update(0.125, 1.0);
        let layer = &animator.layers[0];
        assert!(layer.transition.is_none());
        assert_eq!(layer.state, run);
        assert_relative_eq!(layer.normalized_time, 0.25);
    }

    #[test]
    fn test_triggers_reset_after_update() {
        let mut animator = Animator::new(1).with_parameter("jump", ParameterValue::Trigger(false));
        animator.set_parameter("jump", ParameterValue::Trigger(true));
        animator.update(0.016, 1.0);
        assert_eq!(animator.parameter("jump"), Some(ParameterValue::Trigger(false)));
    }
}
