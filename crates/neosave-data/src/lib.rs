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

//! # NeoSave Data
//!
//! The engine-side data the save layer operates on: a minimal scene graph,
//! the built-in components whose native state needs a formatter, and the
//! gameplay clients that write their own resumable state.

#![warn(missing_docs)]

// Lets `#[derive(Component)]` refer to `::neosave_data` from inside this crate.
extern crate self as neosave_data;

pub mod components;
pub mod gameplay;
pub mod scene;

pub use neosave_macros::Component;
