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

use approx::assert_relative_eq;
use neosave_agents::{SaveAgent, SaveConfig};
use neosave_core::math::{Quaternion, Vec3};
use neosave_core::{
    ContextRecord, Formatter, FormatterRegistry, NodeScope, SaveError, SaveReader, SaveWriter,
    SaveWriterExt, SerializationKey,
};
use neosave_data::components::{Animator, Interpolation, RigidBody, Transform};
use neosave_data::gameplay::{MovingPlatform, PlatformPhase, PopupTarget, PopupTimings, TargetPhase};
use neosave_data::scene::{Component as _, SceneGraph, SceneNode};
use neosave_data::Component;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn agent(config: SaveConfig) -> SaveAgent {
    SaveAgent::with_builtin(config)
}

fn platform() -> MovingPlatform {
    MovingPlatform::new(vec![Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0)], 5.0, 2.0)
}

/// The scene as freshly loaded from the level, before any play.
fn level() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_root(
        SceneNode::new(1, "level")
            .with_child(SceneNode::new(2, "lift").with_component(platform()))
            .with_child(
                SceneNode::new(3, "crate")
                    .with_transform(Transform::from_position(Vec3::new(0.0, 1.0, 0.0)))
                    .with_component(RigidBody::new_dynamic(5.0)),
            )
            .with_child(
                SceneNode::new(4, "range")
                    .with_component(PopupTarget::new(3, PopupTimings::default()))
                    .with_component(PopupTarget::new(3, PopupTimings::default())),
            ),
    );
    scene.add_root(SceneNode::new(5, "hero").with_component(Animator::new(2)));
    scene
}

/// Plays the level for a while.
fn played_level() -> SceneGraph {
    let mut scene = level();
    let lift = scene.find_mut(2).unwrap();
    let platform = lift.component_mut::<MovingPlatform>().unwrap();
    platform.start();
    platform.tick(2.0);

    let crate_node = scene.find_mut(3).unwrap();
    crate_node.transform.position = Vec3::new(4.0, 0.5, -2.0);
    crate_node.transform.rotation = Quaternion::from_axis_angle(Vec3::Y, 0.5);
    let body = crate_node.component_mut::<RigidBody>().unwrap();
    body.velocity = Vec3::new(1.0, 0.0, 0.0);
    body.interpolation = Interpolation::Interpolate;

    let range = scene.find_mut(4).unwrap();
    let second = range.components_mut()[1]
        .as_any_mut()
        .downcast_mut::<PopupTarget>()
        .unwrap();
    second.pop_up();
    second.tick(0.25);

    let hero = scene.find_mut(5).unwrap();
    let animator = hero.component_mut::<Animator>().unwrap();
    animator.play(0, Animator::state_id("Run"), 0.3);
    animator.set_layer_weight(1, 0.5);
    scene
}

#[test]
fn test_scene_round_trip() {
    init_logger();
    let agent = agent(SaveConfig::default());
    let (record, report) = agent.save_scene(&played_level()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.nodes, 5);
    assert_eq!(report.skipped, 0);

    let mut scene = level();
    let loaded = agent.load_scene(&record, &mut scene).unwrap();
    assert!(loaded.is_clean());
    assert_eq!(loaded.nodes, 5);
    assert_eq!(loaded.missing_nodes, 0);

    let platform = scene.find(2).unwrap().component::<MovingPlatform>().unwrap();
    assert_eq!(platform.phase(), Some(PlatformPhase::Moving));
    assert_relative_eq!(platform.progress(), 0.4);
    assert_relative_eq!(platform.position().y, 4.0);

    let crate_node = scene.find(3).unwrap();
    assert_eq!(crate_node.transform.position, Vec3::new(4.0, 0.5, -2.0));
    let body = crate_node.component::<RigidBody>().unwrap();
    assert_eq!(body.velocity, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(body.interpolation, Interpolation::Interpolate);
    assert_eq!(body.position, crate_node.transform.position);
    assert_eq!(body.rotation, crate_node.transform.rotation);

    let range = scene.find(4).unwrap();
    let targets: Vec<&PopupTarget> = range
        .components()
        .iter()
        .filter_map(|c| c.as_any().downcast_ref::<PopupTarget>())
        .collect();
    assert_eq!(targets[0].phase(), None);
    assert_eq!(targets[1].phase(), Some(TargetPhase::Rising));
    assert_relative_eq!(targets[1].progress(), 0.5);

    let animator = scene.find(5).unwrap().component::<Animator>().unwrap();
    assert_eq!(animator.layers[0].state, Animator::state_id("Run"));
    assert_relative_eq!(animator.layers[1].weight, 0.5);
}

#[test]
fn test_idle_save_stops_running_operations() {
    init_logger();
    let agent = agent(SaveConfig::default());
    let (record, report) = agent.save_scene(&level()).unwrap();
    assert!(report.is_clean());

    let mut scene = level();
    let platform = scene
        .find_mut(2)
        .unwrap()
        .component_mut::<MovingPlatform>()
        .unwrap();
    platform.start();
    platform.tick(3.0);
    let target = scene
        .find_mut(4)
        .unwrap()
        .component_mut::<PopupTarget>()
        .unwrap();
    target.pop_up();
    target.tick(0.25);

    let loaded = agent.load_scene(&record, &mut scene).unwrap();
    assert!(loaded.is_clean());

    let platform = scene
        .find_mut(2)
        .unwrap()
        .component_mut::<MovingPlatform>()
        .unwrap();
    assert_eq!(platform.phase(), None);
    assert_eq!(platform.position(), Vec3::ZERO);
    platform.tick(0.01);
    assert_eq!(platform.position(), Vec3::ZERO);

    let target = scene.find(4).unwrap().component::<PopupTarget>().unwrap();
    assert_eq!(target.phase(), None);
    assert_relative_eq!(target.height(), 0.0);
}

#[test]
fn test_rigid_body_pose_follows_local_transform() {
    let build = || {
        let mut scene = SceneGraph::new();
        scene.add_root(
            SceneNode::new(1, "dock")
                .with_transform(Transform::from_position(Vec3::new(100.0, 0.0, 0.0)))
                .with_child(
                    SceneNode::new(2, "barrel")
                        .with_transform(Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
                        .with_component(RigidBody::new_dynamic(2.0)),
                ),
        );
        scene
    };
    let agent = agent(SaveConfig::default());
    let (record, _) = agent.save_scene(&build()).unwrap();

    let mut scene = build();
    scene.find_mut(2).unwrap().transform.position = Vec3::ZERO;
    agent.load_scene(&record, &mut scene).unwrap();

    let barrel = scene.find(2).unwrap();
    assert_eq!(barrel.transform.position, Vec3::new(1.0, 2.0, 3.0));
    let body = barrel.component::<RigidBody>().unwrap();
    assert_eq!(body.position, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_components_are_indexed_by_ordinal() {
    let agent = agent(SaveConfig::default());
    let (record, _) = agent.save_scene(&played_level()).unwrap();

    let range = record
        .child(&SerializationKey::new("node"), 1)
        .and_then(|level| level.child(&SerializationKey::new("node"), 4))
        .unwrap();
    let popup = SerializationKey::new("PopupTarget");
    assert!(range.child(&popup, 0).is_some());
    assert!(range.child(&popup, 1).is_some());
    assert!(range.child(&popup, 2).is_none());
    assert!(range
        .child(&SerializationKey::new("Transform"), -1)
        .is_some());
}

#[test]
fn test_missing_node_keeps_live_state() {
    init_logger();
    let agent = agent(SaveConfig::default());
    let (record, _) = agent.save_scene(&played_level()).unwrap();

    let mut scene = level();
    let newcomer = Transform::from_position(Vec3::new(9.0, 9.0, 9.0));
    scene.add_root(SceneNode::new(42, "newcomer").with_transform(newcomer));
    let report = agent.load_scene(&record, &mut scene).unwrap();

    assert_eq!(report.missing_nodes, 1);
    assert_eq!(scene.find(42).unwrap().transform, newcomer);
}

#[test]
fn test_inactive_subtree_skips_animator() {
    let agent = agent(SaveConfig::default());
    let mut scene = SceneGraph::new();
    let mut parent = SceneNode::new(1, "cutscene")
        .with_child(SceneNode::new(2, "actor").with_component(Animator::new(1)));
    parent.active = false;
    scene.add_root(parent);

    let (record, report) = agent.save_scene(&scene).unwrap();
    assert!(report.is_clean());
    let actor = record
        .child(&SerializationKey::new("node"), 1)
        .and_then(|n| n.child(&SerializationKey::new("node"), 2))
        .unwrap();
    assert!(actor.child(&SerializationKey::new("Animator"), 0).is_none());
}

#[derive(Debug, Default, Component)]
struct Jukebox {
    track: i32,
}

#[derive(Debug, Default, Component)]
struct Flaky;

struct FlakyFormatter;

impl Formatter for FlakyFormatter {
    type Target = Flaky;

    fn write(
        &self,
        _target: &Flaky,
        _scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError> {
        writer.write_value(&SerializationKey::new("partial"), 1)?;
        Err(SaveError::Sink("device unplugged".to_string()))
    }

    fn read(
        &self,
        _target: &mut Flaky,
        _scope: &NodeScope<'_>,
        _reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError> {
        Ok(())
    }
}

#[test]
fn test_failing_component_does_not_abort_save() {
    init_logger();
    let mut registry = FormatterRegistry::new();
    neosave_formatters::register_builtin(&mut registry);
    registry.register(FlakyFormatter);
    let agent = SaveAgent::new(registry, SaveConfig::default());

    let mut scene = SceneGraph::new();
    scene.add_root(
        SceneNode::new(1, "crate")
            .with_component(Flaky)
            .with_component(RigidBody::new_dynamic(3.0)),
    );
    let (record, report) = agent.save_scene(&scene).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].context, "Flaky[0]");
    let node = record.child(&SerializationKey::new("node"), 1).unwrap();
    assert!(node.child(&SerializationKey::new("Flaky"), 0).is_none());
    assert!(node.child(&SerializationKey::new("RigidBody"), 0).is_some());
}

#[test]
fn test_component_without_formatter_is_skipped() {
    let agent = agent(SaveConfig {
        warn_on_missing_formatter: true,
        ..SaveConfig::default()
    });
    let mut scene = SceneGraph::new();
    scene.add_root(SceneNode::new(1, "radio").with_component(Jukebox { track: 7 }));

    let (record, report) = agent.save_scene(&scene).unwrap();
    assert_eq!(report.skipped, 1);
    assert!(report.is_clean());

    let loaded = agent.load_scene(&record, &mut scene).unwrap();
    assert_eq!(loaded.skipped, 1);
    assert_eq!(scene.find(1).unwrap().component::<Jukebox>().unwrap().track, 7);
}

#[derive(Debug, Default, Component)]
struct Stutter;

struct StutterFormatter;

impl Formatter for StutterFormatter {
    type Target = Stutter;

    fn write(
        &self,
        _target: &Stutter,
        _scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError> {
        let key = SerializationKey::new("beat");
        writer.write_value(&key, 1)?;
        writer.write_value(&key, 2)
    }

    fn read(
        &self,
        _target: &mut Stutter,
        _scope: &NodeScope<'_>,
        _reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError> {
        Ok(())
    }
}

fn save_stutter(config: SaveConfig) -> (ContextRecord, neosave_agents::SaveReport) {
    let mut registry = FormatterRegistry::new();
    registry.register(StutterFormatter);
    let agent = SaveAgent::new(registry, config);
    let mut scene = SceneGraph::new();
    scene.add_root(SceneNode::new(1, "drum").with_component(Stutter));
    agent.save_scene(&scene).unwrap()
}

#[test]
fn test_duplicate_key_policy_follows_config() {
    init_logger();
    let (record, report) = save_stutter(SaveConfig::default());
    assert!(report.is_clean());
    let stutter = record
        .child(&SerializationKey::new("node"), 1)
        .and_then(|n| n.child(&SerializationKey::new("Stutter"), 0))
        .unwrap();
    assert_eq!(
        stutter.get(&SerializationKey::new("beat")),
        Some(&neosave_core::Value::Int(2))
    );

    let (_, report) = save_stutter(SaveConfig {
        reject_duplicate_keys: true,
        ..SaveConfig::default()
    });
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        SaveError::DuplicateKey { .. }
    ));
}
