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

//! The in-memory record tree produced by a save and consumed by a load.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SaveError;
use super::key::SerializationKey;
use super::value::Value;

/// Identity of a nested context: a kind and an index.
///
/// The index disambiguates repeated contexts of the same kind, such as one
/// context per animator layer. [`ContextId::DEFAULT_INDEX`] denotes the
/// owner's own default scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextId {
    /// The kind of the context.
    pub kind: SerializationKey,
    /// The index among contexts of the same kind.
    pub index: i32,
}

impl ContextId {
    /// Index used for a context that is not one of a repeated series.
    pub const DEFAULT_INDEX: i32 = -1;

    /// Creates a new context identity.
    pub fn new(kind: SerializationKey, index: i32) -> Self {
        Self { kind, index }
    }

    fn matches(&self, child: &ChildContext) -> bool {
        child.kind_hash == self.kind.hash()
            && child.index == self.index
            && child.kind == self.kind.name()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.index)
    }
}

/// A value together with the name of the key it was written under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedValue {
    /// The key's display name.
    pub name: String,
    /// The stored value.
    pub value: Value,
}

/// A nested context stored inside its parent record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildContext {
    /// Display name of the context kind.
    pub kind: String,
    /// Hash of the context kind.
    pub kind_hash: u32,
    /// Index among contexts of the same kind.
    pub index: i32,
    /// The context's own values and children.
    pub record: ContextRecord,
}

/// One context's keyed values and nested child contexts.
///
/// Values are indexed by key hash. Lookups verify the stored name as well,
/// so a hash collision between two different names never returns the wrong
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    values: BTreeMap<u32, KeyedValue>,
    children: Vec<ChildContext>,
}

impl ContextRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the value stored under `key`.
    pub fn get(&self, key: &SerializationKey) -> Option<&Value> {
        self.values
            .get(&key.hash())
            .filter(|entry| entry.name == key.name())
            .map(|entry| &entry.value)
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains_key(&self, key: &SerializationKey) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// Fails with [`SaveError::KeyCollision`] if another name with the same
    /// hash already lives in this record.
    pub fn insert(
        &mut self,
        key: &SerializationKey,
        value: Value,
    ) -> Result<Option<Value>, SaveError> {
        match self.values.get_mut(&key.hash()) {
            Some(existing) if existing.name != key.name() => Err(SaveError::KeyCollision {
                existing: existing.name.clone(),
                incoming: key.name().to_owned(),
                hash: key.hash(),
            }),
            Some(existing) => Ok(Some(std::mem::replace(&mut existing.value, value))),
            None => {
                self.values.insert(
                    key.hash(),
                    KeyedValue {
                        name: key.name().to_owned(),
                        value,
                    },
                );
                Ok(None)
            }
        }
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &SerializationKey) -> Option<Value> {
        if self.contains_key(key) {
            self.values.remove(&key.hash()).map(|entry| entry.value)
        } else {
            None
        }
    }

    /// Returns the nested context with the given kind and index.
    pub fn child(&self, kind: &SerializationKey, index: i32) -> Option<&ContextRecord> {
        let id = ContextId::new(kind.clone(), index);
        self.children
            .iter()
            .find(|child| id.matches(child))
            .map(|child| &child.record)
    }

    /// Takes the contents of a nested context out, leaving an empty record in
    /// its slot so the child order is preserved when it is put back.
    pub(crate) fn take_child(&mut self, id: &ContextId) -> Option<ContextRecord> {
        self.children
            .iter_mut()
            .find(|child| id.matches(child))
            .map(|child| std::mem::take(&mut child.record))
    }

    /// Stores a nested context, replacing an existing one with the same identity.
    pub fn put_child(&mut self, id: ContextId, record: ContextRecord) {
        if let Some(slot) = self.children.iter_mut().find(|child| id.matches(child)) {
            slot.record = record;
            return;
        }
        self.children.push(ChildContext {
            kind: id.kind.name().to_owned(),
            kind_hash: id.kind.hash(),
            index: id.index,
            record,
        });
    }

    /// Iterates over the stored values in hash order.
    pub fn values(&self) -> impl Iterator<Item = &KeyedValue> {
        self.values.values()
    }

    /// Iterates over the nested contexts in the order they were first opened.
    pub fn children(&self) -> impl Iterator<Item = &ChildContext> {
        self.children.iter()
    }

    /// Number of values stored directly in this context.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if this context holds neither values nor children.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEALTH: SerializationKey = SerializationKey::new("health");
    const LAYER: SerializationKey = SerializationKey::new("layer");

    #[test]
    fn test_insert_replaces_and_returns_previous() {
        let mut record = ContextRecord::new();
        assert_eq!(record.insert(&HEALTH, Value::Int(3)).unwrap(), None);
        assert_eq!(
            record.insert(&HEALTH, Value::Int(5)).unwrap(),
            Some(Value::Int(3))
        );
        assert_eq!(record.get(&HEALTH), Some(&Value::Int(5)));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_children_are_addressed_by_kind_and_index() {
        let mut record = ContextRecord::new();
        let mut first = ContextRecord::new();
        first.insert(&HEALTH, Value::Int(1)).unwrap();
        record.put_child(ContextId::new(LAYER, 0), first);
        record.put_child(ContextId::new(LAYER, 1), ContextRecord::new());

        assert_eq!(
            record.child(&LAYER, 0).and_then(|c| c.get(&HEALTH)),
            Some(&Value::Int(1))
        );
        assert!(record.child(&LAYER, 1).is_some());
        assert!(record.child(&LAYER, 2).is_none());
        assert_eq!(record.children().count(), 2);
    }

    #[test]
    fn test_remove_only_matching_name() {
        let mut record = ContextRecord::new();
        record.insert(&HEALTH, Value::Bool(true)).unwrap();
        assert_eq!(record.remove(&LAYER), None);
        assert_eq!(record.remove(&HEALTH), Some(Value::Bool(true)));
        assert!(record.is_empty());
    }
}
