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

use std::any::Any;

/// A piece of state attached to a [`SceneNode`](super::SceneNode).
///
/// Derive it with `#[derive(Component)]`. The component name identifies the
/// component's save context, so it must stay stable across builds.
pub trait Component: Any + Send + Sync {
    /// Stable name of the component type.
    fn component_name(&self) -> &'static str;

    /// Upcasts to `Any` for formatter dispatch.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast to `Any` for formatter dispatch.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
