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

//! The in-memory [`SaveWriter`] building a [`ContextRecord`] tree.

use super::contract::SaveWriter;
use super::error::SaveError;
use super::key::SerializationKey;
use super::record::{ContextId, ContextRecord};
use super::value::Value;

/// What a [`RecordWriter`] does when a key is written twice in one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// The second write replaces the first and a warning is logged.
    #[default]
    LastWriteWins,
    /// The second write fails with [`SaveError::DuplicateKey`].
    Reject,
}

struct OpenContext {
    id: ContextId,
    record: ContextRecord,
}

/// Builds a record tree from push/write/pop calls.
///
/// Contexts are created eagerly when pushed. Pushing a context that already
/// exists at the current level reopens it, so values written in the second
/// pass join the first.
///
/// ```
/// use neosave_core::{RecordWriter, SaveWriterExt, SerializationKey};
///
/// const LAYER: SerializationKey = SerializationKey::new("layer");
/// const WEIGHT: SerializationKey = SerializationKey::new("weight");
///
/// let mut writer = RecordWriter::new();
/// writer
///     .write_context(&LAYER, 0, |w| w.write_value(&WEIGHT, 1.0_f32))
///     .unwrap();
/// let record = writer.finish().unwrap();
/// assert!(record.child(&LAYER, 0).is_some());
/// ```
#[derive(Default)]
pub struct RecordWriter {
    root: ContextRecord,
    stack: Vec<OpenContext>,
    duplicates: DuplicateKeyPolicy,
}

impl RecordWriter {
    /// Creates a writer with an empty root context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with the given duplicate-key policy.
    pub fn with_policy(duplicates: DuplicateKeyPolicy) -> Self {
        Self {
            duplicates,
            ..Self::default()
        }
    }

    /// The writer's duplicate-key policy.
    pub fn policy(&self) -> DuplicateKeyPolicy {
        self.duplicates
    }

    fn current(&self) -> &ContextRecord {
        self.stack.last().map_or(&self.root, |open| &open.record)
    }

    fn current_mut(&mut self) -> &mut ContextRecord {
        match self.stack.last_mut() {
            Some(open) => &mut open.record,
            None => &mut self.root,
        }
    }

    /// A readable path of the open contexts, e.g. `root/node[4]/Animator[0]`.
    pub fn context_path(&self) -> String {
        let mut path = String::from("root");
        for open in &self.stack {
            path.push('/');
            path.push_str(&open.id.to_string());
        }
        path
    }

    /// Attaches an already-built record as a child of the current context.
    ///
    /// This lets a driver write one object into a scratch writer and only
    /// attach the result once the whole object wrote successfully.
    pub fn insert_context(&mut self, id: ContextId, record: ContextRecord) {
        self.current_mut().put_child(id, record);
    }

    /// Finishes writing and returns the root record.
    pub fn finish(self) -> Result<ContextRecord, SaveError> {
        match self.stack.last() {
            Some(open) => Err(SaveError::UnclosedContexts {
                depth: self.stack.len(),
                innermost: open.id.to_string(),
            }),
            None => Ok(self.root),
        }
    }
}

impl SaveWriter for RecordWriter {
    fn write_raw(&mut self, key: &SerializationKey, value: Value) -> Result<(), SaveError> {
        if self.duplicates == DuplicateKeyPolicy::Reject && self.current().contains_key(key) {
            return Err(SaveError::DuplicateKey {
                key: key.name().to_owned(),
                context: self.context_path(),
            });
        }
        if self.current_mut().insert(key, value)?.is_some() {
            log::warn!(
                "Key '{}' written twice in '{}'; keeping the last value",
                key,
                self.context_path()
            );
        }
        Ok(())
    }

    fn push_context(&mut self, kind: &SerializationKey, index: i32) -> Result<(), SaveError> {
        let id = ContextId::new(kind.clone(), index);
        let record = self.current_mut().take_child(&id).unwrap_or_default();
        self.stack.push(OpenContext { id, record });
        Ok(())
    }

    fn pop_context(&mut self, kind: &SerializationKey) -> Result<(), SaveError> {
        let open = self.stack.last().ok_or_else(|| SaveError::ContextUnderflow {
            kind: kind.name().to_owned(),
        })?;
        if open.id.kind != *kind {
            return Err(SaveError::ContextMismatch {
                open: open.id.to_string(),
                requested: kind.name().to_owned(),
            });
        }
        if let Some(OpenContext { id, record }) = self.stack.pop() {
            self.current_mut().put_child(id, record);
        }
        Ok(())
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }
}
