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

//! Saves written by one version of a component must load in another.

use neosave_agents::{SaveAgent, SaveConfig};
use neosave_core::file::SaveEncoding;
use neosave_core::serialization::StateFormatter;
use neosave_core::{
    FormatterRegistry, SaveError, SaveReader, SaveReaderExt, SaveState, SaveWriter,
    SaveWriterExt, SerializationKey,
};
use neosave_data::scene::{SceneGraph, SceneNode};
use neosave_data::Component;

const HEALTH: SerializationKey = SerializationKey::new("health");
const ARMOR: SerializationKey = SerializationKey::new("armor");
const TITLE: SerializationKey = SerializationKey::new("title");

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The first shipped version of the stats component.
#[derive(Debug, Clone, PartialEq, Component)]
#[component(name = "Stats")]
struct StatsV1 {
    health: i32,
}

impl SaveState for StatsV1 {
    fn write_state(&self, writer: &mut dyn SaveWriter) -> Result<(), SaveError> {
        writer.write_value(&HEALTH, self.health)
    }

    fn read_state(&mut self, reader: &mut dyn SaveReader) -> Result<(), SaveError> {
        reader.read_into(&HEALTH, &mut self.health);
        Ok(())
    }
}

/// A later version: adds armor and a title, and keeps the same save name.
#[derive(Debug, Clone, PartialEq, Component)]
#[component(name = "Stats")]
struct StatsV2 {
    health: i32,
    armor: f32,
    title: String,
}

impl Default for StatsV2 {
    fn default() -> Self {
        Self {
            health: 100,
            armor: 0.25,
            title: "Recruit".to_string(),
        }
    }
}

impl SaveState for StatsV2 {
    fn write_state(&self, writer: &mut dyn SaveWriter) -> Result<(), SaveError> {
        writer.write_value(&HEALTH, self.health)?;
        writer.write_value(&ARMOR, self.armor)?;
        writer.write_value(&TITLE, self.title.clone())
    }

    fn read_state(&mut self, reader: &mut dyn SaveReader) -> Result<(), SaveError> {
        let defaults = Self::default();
        reader.try_read_value(&HEALTH, &mut self.health, defaults.health);
        reader.try_read_value(&ARMOR, &mut self.armor, defaults.armor);
        reader.try_read_value(&TITLE, &mut self.title, defaults.title);
        Ok(())
    }
}

fn agent(config: SaveConfig) -> SaveAgent {
    let mut registry = FormatterRegistry::new();
    neosave_formatters::register_builtin(&mut registry);
    registry.register(StateFormatter::<StatsV1>::new());
    registry.register(StateFormatter::<StatsV2>::new());
    SaveAgent::new(registry, config)
}

fn scene_with<C: neosave_data::scene::Component>(stats: C) -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_root(SceneNode::new(1, "hero").with_component(stats));
    scene
}

#[test]
fn test_old_save_loads_into_new_component() {
    init_logger();
    let agent = agent(SaveConfig::default());
    let (record, _) = agent.save_scene(&scene_with(StatsV1 { health: 42 })).unwrap();

    let mut scene = scene_with(StatsV2 {
        health: 1,
        armor: 0.9,
        title: "Veteran".to_string(),
    });
    let report = agent.load_scene(&record, &mut scene).unwrap();
    assert!(report.is_clean());

    let stats = scene.find(1).unwrap().component::<StatsV2>().unwrap();
    assert_eq!(
        *stats,
        StatsV2 {
            health: 42,
            ..StatsV2::default()
        }
    );
}

#[test]
fn test_new_save_loads_into_old_component() {
    init_logger();
    let agent = agent(SaveConfig::default());
    let newer = StatsV2 {
        health: 77,
        armor: 0.5,
        title: "Captain".to_string(),
    };
    let (record, _) = agent.save_scene(&scene_with(newer)).unwrap();

    let mut scene = scene_with(StatsV1 { health: 0 });
    let report = agent.load_scene(&record, &mut scene).unwrap();
    assert!(report.is_clean());
    assert_eq!(
        scene.find(1).unwrap().component::<StatsV1>(),
        Some(&StatsV1 { health: 77 })
    );
}

#[test]
fn test_changed_field_type_falls_back_to_default() {
    init_logger();
    let mut writer = neosave_core::RecordWriter::new();
    writer.write_value(&ARMOR, "heavy".to_string()).unwrap();
    let record = writer.finish().unwrap();

    let mut stats = StatsV2 {
        armor: 3.0,
        ..StatsV2::default()
    };
    stats
        .read_state(&mut neosave_core::RecordReader::new(&record))
        .unwrap();
    assert_eq!(stats.armor, StatsV2::default().armor);
}

#[test]
fn test_save_file_round_trip_in_both_encodings() {
    init_logger();
    for encoding in [SaveEncoding::Binary, SaveEncoding::Text] {
        let agent = agent(SaveConfig {
            encoding,
            ..SaveConfig::default()
        });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot1.sav");

        let saved = StatsV2 {
            health: 12,
            armor: 0.75,
            title: "Scout".to_string(),
        };
        agent.save_to_path(&scene_with(saved.clone()), &path).unwrap();

        let mut scene = scene_with(StatsV2::default());
        let report = agent.load_from_path(&path, &mut scene).unwrap();
        assert!(report.is_clean());
        assert_eq!(scene.find(1).unwrap().component::<StatsV2>(), Some(&saved));
    }
}

#[test]
fn test_binary_save_loads_with_text_config() {
    let binary = agent(SaveConfig::default());
    let (bytes, _) = binary.save_to_bytes(&scene_with(StatsV1 { health: 5 })).unwrap();

    let text = agent(SaveConfig {
        encoding: SaveEncoding::Text,
        ..SaveConfig::default()
    });
    let mut scene = scene_with(StatsV1 { health: 0 });
    text.load_from_bytes(&bytes, &mut scene).unwrap();
    assert_eq!(
        scene.find(1).unwrap().component::<StatsV1>(),
        Some(&StatsV1 { health: 5 })
    );
}

#[test]
fn test_corrupted_file_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.sav");
    std::fs::write(&path, b"definitely not a save").unwrap();

    let mut scene = scene_with(StatsV1 { health: 3 });
    let error = agent(SaveConfig::default())
        .load_from_path(&path, &mut scene)
        .unwrap_err();
    assert!(format!("{error:#}").contains("broken.sav"));
    assert_eq!(
        scene.find(1).unwrap().component::<StatsV1>(),
        Some(&StatsV1 { health: 3 })
    );
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    let config = SaveConfig {
        encoding: SaveEncoding::Text,
        reject_duplicate_keys: true,
        warn_on_missing_formatter: true,
    };
    config.to_file(&path).unwrap();
    assert_eq!(SaveConfig::from_file(&path).unwrap(), config);
}
