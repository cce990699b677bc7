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

use std::fmt;

use neosave_core::SaveError;

/// A component whose formatter failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentFailure {
    /// Name of the owning node.
    pub node: String,
    /// Context the component was written to or read from.
    pub context: String,
    /// What went wrong.
    pub error: SaveError,
}

impl fmt::Display for ComponentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on '{}': {}", self.context, self.node, self.error)
    }
}

/// Outcome of [`SaveAgent::save_scene`](super::SaveAgent::save_scene).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReport {
    /// Nodes visited.
    pub nodes: usize,
    /// Objects (transforms and components) whose state was written.
    pub written: usize,
    /// Objects without a registered formatter.
    pub skipped: usize,
    /// Objects whose formatter failed. Their state is missing from the save.
    pub failures: Vec<ComponentFailure>,
}

impl SaveReport {
    /// Returns `true` if every formatter succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of [`SaveAgent::load_scene`](super::SaveAgent::load_scene).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Nodes found in the record.
    pub nodes: usize,
    /// Nodes absent from the record, left untouched with their subtree.
    pub missing_nodes: usize,
    /// Objects restored from the record.
    pub restored: usize,
    /// Objects with no context in the record, left untouched.
    pub missing: usize,
    /// Objects without a registered formatter.
    pub skipped: usize,
    /// Objects whose formatter failed.
    pub failures: Vec<ComponentFailure>,
}

impl LoadReport {
    /// Returns `true` if every formatter succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
