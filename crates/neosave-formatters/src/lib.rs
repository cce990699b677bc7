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

//! # NeoSave Formatters
//!
//! Formatters for the engine components whose state lives outside gameplay
//! code: transforms, rigid bodies and animators. Gameplay clients that
//! implement [`SaveState`](neosave_core::SaveState) are plugged in through
//! [`StateFormatter`].
//!
//! Every formatter here is registered by [`register_builtin`], which is also
//! submitted for link-time collection by
//! [`FormatterRegistry::with_registered`].

#![warn(missing_docs)]

mod animator;
mod rigid_body;
mod transform;

pub use animator::AnimatorFormatter;
pub use rigid_body::RigidBodyFormatter;
pub use transform::TransformFormatter;

use neosave_core::serialization::{FormatterRegistration, StateFormatter};
use neosave_core::FormatterRegistry;
use neosave_data::gameplay::{MovingPlatform, PopupTarget};

/// Registers every built-in formatter into `registry`.
pub fn register_builtin(registry: &mut FormatterRegistry) {
    registry.register(TransformFormatter);
    registry.register(RigidBodyFormatter);
    registry.register(AnimatorFormatter);
    registry.register(StateFormatter::<MovingPlatform>::new());
    registry.register(StateFormatter::<PopupTarget>::new());
    log::info!("Registered {} built-in formatters", registry.len());
}

inventory::submit! {
    FormatterRegistration {
        name: "neosave-formatters",
        register: register_builtin,
    }
}
