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

//! # NeoSave Agents
//!
//! The driver side of the save layer. [`SaveAgent`] walks a scene graph,
//! dispatches every node's transform and components to the formatters of an
//! injected [`FormatterRegistry`](neosave_core::FormatterRegistry), and
//! packs the resulting record into a save file.

#![warn(missing_docs)]

pub mod config;
pub mod save_agent;

pub use config::SaveConfig;
pub use save_agent::{AgentError, ComponentFailure, LoadReport, SaveAgent, SaveReport};
