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
use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use neosave_core::file::SaveFile;
use neosave_core::{
    ContextId, ContextRecord, FormatterRegistry, NodeScope, RecordReader, RecordWriter,
    SaveError, SaveReader, SaveWriter, SerializationKey,
};
use neosave_data::scene::{Component as _, SceneGraph, SceneNode};

use super::{AgentError, ComponentFailure, LoadReport, SaveReport};
use crate::SaveConfig;

const NODE: SerializationKey = SerializationKey::new("node");
const TRANSFORM: SerializationKey = SerializationKey::new("Transform");

/// Saves and loads scene graphs through a [`FormatterRegistry`].
///
/// Record layout: one `node[id]` context per node, nested like the graph.
/// Inside it the transform comes first in `Transform[-1]`, then every
/// component in a context named after the component and indexed by its
/// ordinal among same-named components on that node.
pub struct SaveAgent {
    registry: FormatterRegistry,
    config: SaveConfig,
}

impl SaveAgent {
    /// Creates an agent using `registry` for every dispatch.
    pub fn new(registry: FormatterRegistry, config: SaveConfig) -> Self {
        Self { registry, config }
    }

    /// Creates an agent with the built-in engine and gameplay formatters.
    pub fn with_builtin(config: SaveConfig) -> Self {
        let mut registry = FormatterRegistry::new();
        neosave_formatters::register_builtin(&mut registry);
        Self::new(registry, config)
    }

    /// The formatter registry.
    pub fn registry(&self) -> &FormatterRegistry {
        &self.registry
    }

    /// The configuration.
    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Captures `scene` into a record tree.
    ///
    /// A failing formatter does not abort the save: its object is left out
    /// and reported, and every other object is still written.
    pub fn save_scene(&self, scene: &SceneGraph) -> Result<(ContextRecord, SaveReport), AgentError> {
        let mut writer = RecordWriter::with_policy(self.config.duplicate_policy());
        let mut report = SaveReport::default();
        for root in scene.roots() {
            self.save_node(root, true, &mut writer, &mut report)?;
        }
        let record = writer.finish()?;

        log::info!(
            "Saved {} nodes: {} objects written, {} skipped, {} failed",
            report.nodes,
            report.written,
            report.skipped,
            report.failures.len()
        );
        Ok((record, report))
    }

    /// Restores `scene` from `record`.
    ///
    /// Nodes and objects missing from the record keep their live state.
    pub fn load_scene(
        &self,
        record: &ContextRecord,
        scene: &mut SceneGraph,
    ) -> Result<LoadReport, AgentError> {
        let mut reader = RecordReader::new(record);
        let mut report = LoadReport::default();
        for root in scene.roots_mut() {
            self.load_node(root, true, &mut reader, &mut report)?;
        }

        log::info!(
            "Loaded {} nodes ({} missing): {} objects restored, {} missing, {} skipped, {} failed",
            report.nodes,
            report.missing_nodes,
            report.restored,
            report.missing,
            report.skipped,
            report.failures.len()
        );
        Ok(report)
    }

    /// Saves `scene` into an in-memory save file using the configured encoding.
    pub fn save_to_bytes(&self, scene: &SceneGraph) -> Result<(Vec<u8>, SaveReport), AgentError> {
        let (record, report) = self.save_scene(scene)?;
        let file = SaveFile::from_record(&record, self.config.encoding)?;
        Ok((file.to_bytes(), report))
    }

    /// Restores `scene` from an in-memory save file. The encoding is taken
    /// from the file's header.
    pub fn load_from_bytes(
        &self,
        bytes: &[u8],
        scene: &mut SceneGraph,
    ) -> Result<LoadReport, AgentError> {
        let record = SaveFile::from_bytes(bytes)?.to_record()?;
        self.load_scene(&record, scene)
    }

    /// Saves `scene` to a file.
    pub fn save_to_path(&self, scene: &SceneGraph, path: impl AsRef<Path>) -> anyhow::Result<SaveReport> {
        let path = path.as_ref();
        let (bytes, report) = self.save_to_bytes(scene)?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write save file {}", path.display()))?;
        log::info!("Wrote save file {}", path.display());
        Ok(report)
    }

    /// Restores `scene` from a file.
    pub fn load_from_path(
        &self,
        path: impl AsRef<Path>,
        scene: &mut SceneGraph,
    ) -> anyhow::Result<LoadReport> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read save file {}", path.display()))?;
        self.load_from_bytes(&bytes, scene)
            .with_context(|| format!("Failed to load save file {}", path.display()))
    }

    fn save_node(
        &self,
        node: &SceneNode,
        parent_active: bool,
        writer: &mut RecordWriter,
        report: &mut SaveReport,
    ) -> Result<(), AgentError> {
        let active = parent_active && node.active;
        writer.push_context(&NODE, node_index(node)?)?;
        report.nodes += 1;

        let scope = NodeScope {
            name: &node.name,
            active,
            position: node.transform.position,
            rotation: node.transform.rotation,
        };
        self.save_object(
            &node.transform,
            ContextId::new(TRANSFORM, ContextId::DEFAULT_INDEX),
            &scope,
            writer,
            report,
        )?;

        let mut ordinals = Ordinals::default();
        for component in node.components() {
            let id = ordinals.next(component.component_name());
            self.save_object(component.as_any(), id, &scope, writer, report)?;
        }

        for child in node.children() {
            self.save_node(child, active, writer, report)?;
        }
        writer.pop_context(&NODE)?;
        Ok(())
    }

    /// Writes one object into a scratch writer and attaches the result only
    /// once it is complete. Objects that write nothing get no context.
    fn save_object(
        &self,
        target: &dyn Any,
        id: ContextId,
        scope: &NodeScope<'_>,
        writer: &mut RecordWriter,
        report: &mut SaveReport,
    ) -> Result<(), AgentError> {
        let mut scratch = RecordWriter::with_policy(self.config.duplicate_policy());
        let outcome = self
            .registry
            .write_any(target, scope, &mut scratch)
            .and_then(|written| scratch.finish().map(|record| written.then_some(record)));

        match outcome {
            Ok(Some(record)) => {
                report.written += 1;
                if !record.is_empty() {
                    writer.insert_context(id, record);
                }
            }
            Ok(None) => {
                report.skipped += 1;
                self.log_missing_formatter(&id, scope);
            }
            Err(error) => {
                log::error!(
                    "Failed to save {} on '{}': {}; saving the rest of the scene",
                    id,
                    scope.name,
                    error
                );
                report.failures.push(failure(&id, scope, error));
            }
        }
        Ok(())
    }

    fn load_node(
        &self,
        node: &mut SceneNode,
        parent_active: bool,
        reader: &mut RecordReader<'_>,
        report: &mut LoadReport,
    ) -> Result<(), AgentError> {
        let active = parent_active && node.active;
        if !reader.push_context(&NODE, node_index(node)?) {
            log::debug!("Node '{}' ({}) is not in the save", node.name, node.id);
            report.missing_nodes += 1;
            return Ok(());
        }
        report.nodes += 1;

        let name = node.name.clone();
        let scope = NodeScope {
            name: &name,
            active,
            position: node.transform.position,
            rotation: node.transform.rotation,
        };
        self.load_object(
            &mut node.transform,
            ContextId::new(TRANSFORM, ContextId::DEFAULT_INDEX),
            &scope,
            reader,
            report,
        );

        // Components see the pose restored above.
        let scope = NodeScope {
            position: node.transform.position,
            rotation: node.transform.rotation,
            ..scope
        };
        let mut ordinals = Ordinals::default();
        for component in node.components_mut() {
            let id = ordinals.next(component.component_name());
            self.load_object(component.as_any_mut(), id, &scope, reader, report);
        }

        for child in node.children_mut() {
            self.load_node(child, active, reader, report)?;
        }
        reader.pop_context(&NODE)?;
        Ok(())
    }

    /// Reads one object through a reader scoped to its own context, so a
    /// misbehaving formatter cannot unbalance the walk.
    fn load_object(
        &self,
        target: &mut dyn Any,
        id: ContextId,
        scope: &NodeScope<'_>,
        reader: &RecordReader<'_>,
        report: &mut LoadReport,
    ) {
        if self.registry.get_by_type_id(Any::type_id(&*target)).is_none() {
            report.skipped += 1;
            self.log_missing_formatter(&id, scope);
            return;
        }
        let Some(record) = reader.current().child(&id.kind, id.index) else {
            log::debug!("{} on '{}' is not in the save", id, scope.name);
            report.missing += 1;
            return;
        };

        let mut scoped = RecordReader::new(record);
        match self.registry.read_any(target, scope, &mut scoped) {
            Ok(_) => report.restored += 1,
            Err(error) => {
                log::error!("Failed to load {} on '{}': {}", id, scope.name, error);
                report.failures.push(failure(&id, scope, error));
            }
        }
    }

    fn log_missing_formatter(&self, id: &ContextId, scope: &NodeScope<'_>) {
        if self.config.warn_on_missing_formatter {
            log::warn!("No formatter for {} on '{}'", id, scope.name);
        } else {
            log::debug!("No formatter for {} on '{}'", id, scope.name);
        }
    }
}

fn node_index(node: &SceneNode) -> Result<i32, AgentError> {
    i32::try_from(node.id).map_err(|_| AgentError::NodeIdOutOfRange(node.id))
}

fn failure(id: &ContextId, scope: &NodeScope<'_>, error: SaveError) -> ComponentFailure {
    ComponentFailure {
        node: scope.name.to_string(),
        context: id.to_string(),
        error,
    }
}

/// Hands out per-name ordinals for the components of one node.
#[derive(Default)]
struct Ordinals(HashMap<&'static str, i32>);

impl Ordinals {
    fn next(&mut self, name: &'static str) -> ContextId {
        let ordinal = self.0.entry(name).or_insert(0);
        let id = ContextId::new(SerializationKey::new(name), *ordinal);
        *ordinal += 1;
        id
    }
}
