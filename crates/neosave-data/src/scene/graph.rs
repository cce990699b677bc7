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

use super::SceneNode;

/// A forest of [`SceneNode`]s.
#[derive(Debug, Default)]
pub struct SceneGraph {
    roots: Vec<SceneNode>,
}

impl SceneGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root node.
    pub fn add_root(&mut self, node: SceneNode) {
        self.roots.push(node);
    }

    /// Root nodes in insertion order.
    pub fn roots(&self) -> &[SceneNode] {
        &self.roots
    }

    /// Root nodes, mutably.
    pub fn roots_mut(&mut self) -> &mut [SceneNode] {
        &mut self.roots
    }

    /// Finds a node anywhere in the graph.
    pub fn find(&self, id: u32) -> Option<&SceneNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// Finds a node anywhere in the graph, mutably.
    pub fn find_mut(&mut self, id: u32) -> Option<&mut SceneNode> {
        self.roots.iter_mut().find_map(|root| root.find_mut(id))
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.roots.iter().map(SceneNode::subtree_len).sum()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
