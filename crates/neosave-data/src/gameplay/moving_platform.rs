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

use neosave_core::math::Vec3;
use neosave_core::resume::{Phase, ResumableKeys, ResumableTimer};
use neosave_core::{
    SaveError, SaveReader, SaveReaderExt, SaveState, SaveWriter, SaveWriterExt, SerializationKey,
};

use crate::Component;

const CURRENT_WAYPOINT: SerializationKey = SerializationKey::new("currentWaypoint");
const TARGET_WAYPOINT: SerializationKey = SerializationKey::new("targetWaypoint");
const TIMER_KEYS: ResumableKeys = ResumableKeys::new(
    SerializationKey::new("platformPhase"),
    SerializationKey::new("platformElapsed"),
    SerializationKey::new("platformDuration"),
);

/// What a [`MovingPlatform`] is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformPhase {
    /// Travelling between two waypoints.
    Moving,
    /// Paused at a waypoint.
    Waiting,
}

impl Phase for PlatformPhase {
    fn to_index(self) -> i32 {
        match self {
            PlatformPhase::Moving => 0,
            PlatformPhase::Waiting => 1,
        }
    }

    fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(PlatformPhase::Moving),
            1 => Some(PlatformPhase::Waiting),
            _ => None,
        }
    }
}

/// A platform looping through waypoints, pausing at each one.
#[derive(Debug, Clone, Component)]
pub struct MovingPlatform {
    /// Waypoints visited in order, looping back to the first.
    pub waypoints: Vec<Vec3>,
    /// Seconds per segment.
    pub move_duration: f32,
    /// Seconds spent at each waypoint.
    pub pause_duration: f32,
    position: Vec3,
    current: usize,
    target: usize,
    timer: ResumableTimer<PlatformPhase>,
}

impl MovingPlatform {
    /// Creates an idle platform resting on the first waypoint.
    pub fn new(waypoints: Vec<Vec3>, move_duration: f32, pause_duration: f32) -> Self {
        let position = waypoints.first().copied().unwrap_or(Vec3::ZERO);
        let target = if waypoints.len() > 1 { 1 } else { 0 };
        Self {
            waypoints,
            move_duration,
            pause_duration,
            position,
            current: 0,
            target,
            timer: ResumableTimer::idle(),
        }
    }

    /// Starts moving towards the target waypoint. Platforms with fewer than
    /// two waypoints stay put.
    pub fn start(&mut self) {
        if self.waypoints.len() < 2 {
            return;
        }
        self.timer.start(PlatformPhase::Moving, self.move_duration);
    }

    /// Stops wherever the platform is.
    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    /// Advances the platform by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        match self.timer.tick(dt) {
            None if self.timer.phase() == Some(PlatformPhase::Moving) => {
                self.position = self.segment_point(self.timer.progress());
            }
            None => {}
            Some(PlatformPhase::Moving) => {
                self.position = self.waypoint(self.target);
                self.current = self.target;
                self.target = (self.target + 1) % self.waypoints.len().max(1);
                if self.pause_duration > 0.0 {
                    self.timer.start(PlatformPhase::Waiting, self.pause_duration);
                } else {
                    self.timer.start(PlatformPhase::Moving, self.move_duration);
                }
            }
            Some(PlatformPhase::Waiting) => {
                self.timer.start(PlatformPhase::Moving, self.move_duration);
            }
        }
    }

    /// Current position along the waypoint path.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The running phase, `None` when idle.
    pub fn phase(&self) -> Option<PlatformPhase> {
        self.timer.phase()
    }

    /// Progress through the running phase.
    pub fn progress(&self) -> f32 {
        self.timer.progress()
    }

    /// Index of the waypoint the platform last left or rests on.
    pub fn current_waypoint(&self) -> usize {
        self.current
    }

    /// Index of the waypoint the platform heads to.
    pub fn target_waypoint(&self) -> usize {
        self.target
    }

    fn waypoint(&self, index: usize) -> Vec3 {
        self.waypoints.get(index).copied().unwrap_or(self.position)
    }

    fn segment_point(&self, progress: f32) -> Vec3 {
        Vec3::lerp(self.waypoint(self.current), self.waypoint(self.target), progress)
    }

    fn read_waypoint(&self, reader: &dyn SaveReader, key: &SerializationKey, live: usize) -> usize {
        reader
            .lookup::<i32>(key)
            .and_then(|index| usize::try_from(index).ok())
            .filter(|&index| index < self.waypoints.len())
            .unwrap_or(live)
    }
}

impl SaveState for MovingPlatform {
    fn write_state(&self, writer: &mut dyn SaveWriter) -> Result<(), SaveError> {
        writer.write_value(&CURRENT_WAYPOINT, self.current as i32)?;
        writer.write_value(&TARGET_WAYPOINT, self.target as i32)?;
        self.timer.write(writer, &TIMER_KEYS)
    }

    fn read_state(&mut self, reader: &mut dyn SaveReader) -> Result<(), SaveError> {
        self.current = self.read_waypoint(reader, &CURRENT_WAYPOINT, self.current);
        self.target = self.read_waypoint(reader, &TARGET_WAYPOINT, self.target);

        let (move_duration, pause_duration) = (self.move_duration, self.pause_duration);
        let resumed = self.timer.resume(reader, &TIMER_KEYS, |phase| match phase {
            PlatformPhase::Moving => move_duration,
            PlatformPhase::Waiting => pause_duration,
        });
        self.position = match resumed {
            Some(resumed) if resumed.phase == PlatformPhase::Moving => {
                log::debug!("Platform resumes its move at {:.2}", resumed.progress);
                self.segment_point(resumed.progress)
            }
            _ => self.waypoint(self.current),
        };
        Ok(())
    }
}
