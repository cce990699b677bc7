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

use neosave_core::resume::{Phase, ResumableKeys, ResumableTimer};
use neosave_core::{
    SaveError, SaveReader, SaveReaderExt, SaveState, SaveWriter, SaveWriterExt, SerializationKey,
};

use crate::Component;

const HIT_POINTS: SerializationKey = SerializationKey::new("hitPoints");
const IS_HIT: SerializationKey = SerializationKey::new("isHit");
const TIMER_KEYS: ResumableKeys = ResumableKeys::new(
    SerializationKey::new("targetPhase"),
    SerializationKey::new("targetElapsed"),
    SerializationKey::new("targetDuration"),
);

/// Stage of a [`PopupTarget`]'s pop-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPhase {
    /// Swinging up.
    Rising,
    /// Fully raised, waiting to be shot.
    Up,
    /// Swinging down, either shot or timed out.
    Falling,
    /// Lying down before it can pop up again.
    Resetting,
}

impl Phase for TargetPhase {
    fn to_index(self) -> i32 {
        match self {
            TargetPhase::Rising => 0,
            TargetPhase::Up => 1,
            TargetPhase::Falling => 2,
            TargetPhase::Resetting => 3,
        }
    }

    fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(TargetPhase::Rising),
            1 => Some(TargetPhase::Up),
            2 => Some(TargetPhase::Falling),
            3 => Some(TargetPhase::Resetting),
            _ => None,
        }
    }
}

/// Phase durations of a [`PopupTarget`], in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupTimings {
    /// Time to swing up.
    pub rise: f32,
    /// Time spent raised before timing out.
    pub up: f32,
    /// Time to swing down.
    pub fall: f32,
    /// Cooldown after being shot down.
    pub reset: f32,
}

impl PopupTimings {
    fn duration(&self, phase: TargetPhase) -> f32 {
        match phase {
            TargetPhase::Rising => self.rise,
            TargetPhase::Up => self.up,
            TargetPhase::Falling => self.fall,
            TargetPhase::Resetting => self.reset,
        }
    }
}

impl Default for PopupTimings {
    fn default() -> Self {
        Self {
            rise: 0.5,
            up: 3.0,
            fall: 0.5,
            reset: 2.0,
        }
    }
}

/// A shooting-range target that pops up, can be shot down, and resets.
#[derive(Debug, Clone, Component)]
pub struct PopupTarget {
    /// Hit points restored on reset.
    pub max_hit_points: i32,
    /// Phase durations.
    pub timings: PopupTimings,
    hit_points: i32,
    is_hit: bool,
    timer: ResumableTimer<TargetPhase>,
}

impl PopupTarget {
    /// Creates a lowered, idle target.
    pub fn new(max_hit_points: i32, timings: PopupTimings) -> Self {
        Self {
            max_hit_points,
            timings,
            hit_points: max_hit_points,
            is_hit: false,
            timer: ResumableTimer::idle(),
        }
    }

    /// Starts the pop-up sequence. Ignored unless the target is idle.
    pub fn pop_up(&mut self) {
        if !self.timer.is_active() {
            self.begin(TargetPhase::Rising);
        }
    }

    /// Applies damage while the target is rising or up. A target brought to
    /// zero hit points falls from wherever it is.
    pub fn hit(&mut self, damage: i32) {
        if !matches!(
            self.timer.phase(),
            Some(TargetPhase::Rising) | Some(TargetPhase::Up)
        ) {
            return;
        }
        self.hit_points = (self.hit_points - damage).max(0);
        if self.hit_points == 0 {
            self.is_hit = true;
            let height = self.height();
            self.timer
                .start_at(TargetPhase::Falling, self.timings.fall, 1.0 - height);
        }
    }

    /// Advances the sequence by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let Some(completed) = self.timer.tick(dt) else {
            return;
        };
        match completed {
            TargetPhase::Rising => self.begin(TargetPhase::Up),
            TargetPhase::Up => self.begin(TargetPhase::Falling),
            TargetPhase::Falling if self.is_hit => self.begin(TargetPhase::Resetting),
            TargetPhase::Falling => {}
            TargetPhase::Resetting => {
                self.hit_points = self.max_hit_points;
                self.is_hit = false;
            }
        }
    }

    /// How far the target is raised, from 0 (down) to 1 (up).
    pub fn height(&self) -> f32 {
        match self.timer.phase() {
            Some(TargetPhase::Rising) => self.timer.progress(),
            Some(TargetPhase::Up) => 1.0,
            Some(TargetPhase::Falling) => 1.0 - self.timer.progress(),
            Some(TargetPhase::Resetting) | None => 0.0,
        }
    }

    /// The running phase, `None` when idle.
    pub fn phase(&self) -> Option<TargetPhase> {
        self.timer.phase()
    }

    /// Progress through the running phase.
    pub fn progress(&self) -> f32 {
        self.timer.progress()
    }

    /// Remaining hit points.
    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    /// Whether the target was shot down and has not reset yet.
    pub fn is_hit(&self) -> bool {
        self.is_hit
    }

    fn begin(&mut self, phase: TargetPhase) {
        self.timer.start(phase, self.timings.duration(phase));
    }
}

impl SaveState for PopupTarget {
    fn write_state(&self, writer: &mut dyn SaveWriter) -> Result<(), SaveError> {
        writer.write_value(&HIT_POINTS, self.hit_points)?;
        writer.write_value(&IS_HIT, self.is_hit)?;
        self.timer.write(writer, &TIMER_KEYS)
    }

    fn read_state(&mut self, reader: &mut dyn SaveReader) -> Result<(), SaveError> {
        reader.read_into(&HIT_POINTS, &mut self.hit_points);
        reader.read_into(&IS_HIT, &mut self.is_hit);

        let timings = self.timings;
        if let Some(resumed) = self
            .timer
            .resume(reader, &TIMER_KEYS, |phase| timings.duration(phase))
        {
            log::debug!(
                "Popup target resumes {:?} at {:.2}",
                resumed.phase,
                resumed.progress
            );
        }
        Ok(())
    }
}
