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

use neosave_core::math::{Quaternion, Vec3};
use serde::{Deserialize, Serialize};

use crate::Component;

/// How a body's rendered pose is smoothed between physics steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// No smoothing.
    #[default]
    None,
    /// Smooth from the previous step.
    Interpolate,
    /// Predict from the current velocity.
    Extrapolate,
}

impl Interpolation {
    /// The integer stored in saves.
    pub fn to_index(self) -> i32 {
        match self {
            Interpolation::None => 0,
            Interpolation::Interpolate => 1,
            Interpolation::Extrapolate => 2,
        }
    }

    /// The mode stored as `index`.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Interpolation::None),
            1 => Some(Interpolation::Interpolate),
            2 => Some(Interpolation::Extrapolate),
            _ => None,
        }
    }
}

/// Component representing a rigid body in the physics simulation.
#[derive(Debug, Clone, PartialEq, Component, Serialize, Deserialize)]
pub struct RigidBody {
    /// Current linear velocity.
    pub velocity: Vec3,
    /// Current angular velocity.
    pub angular_velocity: Vec3,
    /// Whether the body takes part in collision detection.
    pub detect_collisions: bool,
    /// Pose smoothing mode.
    pub interpolation: Interpolation,
    /// Kinematic bodies are moved by gameplay code, not by forces.
    pub is_kinematic: bool,
    /// Mass of the body in kilograms.
    pub mass: f32,
    /// Whether gravity applies to the body.
    pub use_gravity: bool,
    /// Cached position, in the owning node's local space. The scene graph
    /// does not propagate transforms, so this is re-synced from the node's
    /// local `Transform`.
    pub position: Vec3,
    /// Cached rotation, in the owning node's local space.
    pub rotation: Quaternion,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            detect_collisions: true,
            interpolation: Interpolation::None,
            is_kinematic: false,
            mass: 1.0,
            use_gravity: true,
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
        }
    }
}

impl RigidBody {
    /// Creates a new dynamic rigid body.
    pub fn new_dynamic(mass: f32) -> Self {
        Self {
            mass,
            ..Self::default()
        }
    }

    /// Creates a new kinematic rigid body.
    pub fn new_kinematic() -> Self {
        Self {
            is_kinematic: true,
            use_gravity: false,
            ..Self::default()
        }
    }

    /// Overwrites the cached pose, e.g. after the owning transform moved.
    pub fn sync_pose(&mut self, position: Vec3, rotation: Quaternion) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Advances the cached pose by one step of the current velocities.
    pub fn integrate(&mut self, dt: f32, gravity: Vec3) {
        if self.is_kinematic {
            return;
        }
        if self.use_gravity {
            self.velocity = self.velocity + gravity * dt;
        }
        self.position = self.position + self.velocity * dt;
        let spin = self.angular_velocity.length();
        if spin > 0.0 {
            let step = Quaternion::from_axis_angle(self.angular_velocity.normalize(), spin * dt);
            self.rotation = (step * self.rotation).normalize();
        }
    }
}
