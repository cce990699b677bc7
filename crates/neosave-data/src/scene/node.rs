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

use super::Component;
use crate::components::Transform;

/// One node of the scene graph.
///
/// `id` is the node's save identity: it indexes the node's context in a save
/// record, so it must be stable between the save and the load.
pub struct SceneNode {
    /// Save identity of the node.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// The node's own active flag. A node is active in the hierarchy only if
    /// all its ancestors are active too.
    pub active: bool,
    /// Local pose, relative to the parent. The graph keeps no world transforms.
    pub transform: Transform,
    components: Vec<Box<dyn Component>>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates an active node at the origin with no components.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active: true,
            transform: Transform::identity(),
            components: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style transform setter.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder-style component attachment.
    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        self.add_component(component);
        self
    }

    /// Builder-style child attachment.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Attaches a component.
    pub fn add_component<C: Component>(&mut self, component: C) {
        self.components.push(Box::new(component));
    }

    /// Attaches a child node.
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// The first component of type `C`.
    pub fn component<C: Component>(&self) -> Option<&C> {
        self.components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<C>())
    }

    /// The first component of type `C`, mutably.
    pub fn component_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components
            .iter_mut()
            .find_map(|c| c.as_any_mut().downcast_mut::<C>())
    }

    /// All components in attachment order.
    pub fn components(&self) -> &[Box<dyn Component>] {
        &self.components
    }

    /// All components in attachment order, mutably.
    pub fn components_mut(&mut self) -> &mut [Box<dyn Component>] {
        &mut self.components
    }

    /// Direct children.
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Direct children, mutably.
    pub fn children_mut(&mut self) -> &mut [SceneNode] {
        &mut self.children
    }

    /// Finds a node by id in this subtree.
    pub fn find(&self, id: u32) -> Option<&SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Finds a node by id in this subtree, mutably.
    pub fn find_mut(&mut self, id: u32) -> Option<&mut SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Number of nodes in this subtree, this one included.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_len).sum::<usize>()
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let components: Vec<&str> = self.components.iter().map(|c| c.component_name()).collect();
        f.debug_struct("SceneNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("active", &self.active)
            .field("transform", &self.transform)
            .field("components", &components)
            .field("children", &self.children)
            .finish()
    }
}
