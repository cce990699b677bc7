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

//! Timed, staged operations that resume mid-flight after a load.
//!
//! Gameplay clients (moving platforms, popup targets, weapon cooldowns) all
//! run small timed state machines. [`ResumableTimer`] captures the shared
//! shape: a phase, an elapsed time and a duration. It writes itself only
//! while active, and on read it relaunches at the recorded phase and
//! progress instead of snapping to a final state. When nothing was recorded
//! the timer stays idle.

use std::fmt::Debug;

use crate::math::saturate;
use crate::serialization::{
    SaveError, SaveReader, SaveReaderExt, SaveWriter, SaveWriterExt, SerializationKey,
};

/// A phase of a staged operation, persisted as an integer.
pub trait Phase: Copy + Eq + Debug + Send + Sync + 'static {
    /// The integer stored for this phase.
    fn to_index(self) -> i32;

    /// The phase stored as `index`, or `None` for an unknown index.
    fn from_index(index: i32) -> Option<Self>;
}

/// Single-phase operations, where "is running" is the only state.
impl Phase for () {
    fn to_index(self) -> i32 {
        0
    }

    fn from_index(index: i32) -> Option<Self> {
        (index == 0).then_some(())
    }
}

/// The keys a client uses for one resumable operation.
#[derive(Debug, Clone)]
pub struct ResumableKeys {
    /// Key of the phase index.
    pub phase: SerializationKey,
    /// Key of the elapsed time in seconds.
    pub elapsed: SerializationKey,
    /// Key of the total duration in seconds.
    pub duration: SerializationKey,
}

impl ResumableKeys {
    /// Groups three keys.
    pub const fn new(
        phase: SerializationKey,
        elapsed: SerializationKey,
        duration: SerializationKey,
    ) -> Self {
        Self {
            phase,
            elapsed,
            duration,
        }
    }
}

/// What a successful [`ResumableTimer::resume`] relaunched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resumed<P> {
    /// The phase that was in flight.
    pub phase: P,
    /// Progress through the phase, in `[0, 1]`.
    pub progress: f32,
}

/// A phase plus elapsed and total time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResumableTimer<P> {
    phase: Option<P>,
    elapsed: f32,
    duration: f32,
}

impl<P> Default for ResumableTimer<P> {
    fn default() -> Self {
        Self {
            phase: None,
            elapsed: 0.0,
            duration: 0.0,
        }
    }
}

impl<P: Phase> ResumableTimer<P> {
    /// Creates an idle timer.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Starts `phase` from the beginning.
    pub fn start(&mut self, phase: P, duration: f32) {
        self.start_at(phase, duration, 0.0);
    }

    /// Starts `phase` with `progress` (clamped to `[0, 1]`) already done.
    pub fn start_at(&mut self, phase: P, duration: f32, progress: f32) {
        let duration = duration.max(0.0);
        self.phase = Some(phase);
        self.duration = duration;
        self.elapsed = duration * saturate(progress);
    }

    /// Stops the timer without completing the phase.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Advances the timer. Returns the phase that just completed, if any;
    /// the timer is idle afterwards.
    pub fn tick(&mut self, dt: f32) -> Option<P> {
        let phase = self.phase?;
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            self.cancel();
            Some(phase)
        } else {
            None
        }
    }

    /// Returns `true` while a phase is running.
    pub fn is_active(&self) -> bool {
        self.phase.is_some()
    }

    /// The running phase.
    pub fn phase(&self) -> Option<P> {
        self.phase
    }

    /// Seconds spent in the running phase.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total duration of the running phase.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds left in the running phase.
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Progress through the running phase in `[0, 1]`. Zero-length phases
    /// count as complete.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            saturate(self.elapsed / self.duration)
        } else {
            1.0
        }
    }

    /// Writes the phase and timing under `keys`, but only while active.
    pub fn write(&self, writer: &mut dyn SaveWriter, keys: &ResumableKeys) -> Result<(), SaveError> {
        let Some(phase) = self.phase else {
            return Ok(());
        };
        writer.write_value(&keys.phase, phase.to_index())?;
        writer.write_value(&keys.elapsed, self.elapsed)?;
        writer.write_value(&keys.duration, self.duration)
    }

    /// Relaunches the recorded phase, if one was written.
    ///
    /// Absence of the phase key means the operation was idle at save time:
    /// a running timer is cancelled and `None` is returned. An unknown phase index
    /// is treated the same way. A missing duration falls back to
    /// `default_duration(phase)`.
    pub fn resume(
        &mut self,
        reader: &dyn SaveReader,
        keys: &ResumableKeys,
        default_duration: impl FnOnce(P) -> f32,
    ) -> Option<Resumed<P>> {
        let Some(index) = reader.lookup::<i32>(&keys.phase) else {
            self.cancel();
            return None;
        };
        let Some(phase) = P::from_index(index) else {
            log::debug!("Ignoring unknown phase index {index} under '{}'", keys.phase);
            self.cancel();
            return None;
        };
        let duration = reader
            .lookup::<f32>(&keys.duration)
            .unwrap_or_else(|| default_duration(phase));
        let elapsed = reader.read_value_or(&keys.elapsed, 0.0_f32);
        let progress = if duration > 0.0 {
            saturate(elapsed / duration)
        } else {
            1.0
        };
        self.start_at(phase, duration, progress);
        Some(Resumed { phase, progress })
    }
}
