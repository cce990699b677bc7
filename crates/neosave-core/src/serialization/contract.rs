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

//! The writer/reader traits every component and formatter talks to.
//!
//! The two base traits are object safe so formatters can take
//! `&mut dyn SaveWriter` / `&mut dyn SaveReader`. The typed helpers live in
//! the blanket-implemented extension traits.

use super::error::SaveError;
use super::key::SerializationKey;
use super::value::{SaveValue, Value};

/// The writing half of the save contract.
pub trait SaveWriter {
    /// Stores `value` under `key` in the current context.
    fn write_raw(&mut self, key: &SerializationKey, value: Value) -> Result<(), SaveError>;

    /// Opens a nested context. Must be paired with [`pop_context`](Self::pop_context).
    fn push_context(&mut self, kind: &SerializationKey, index: i32) -> Result<(), SaveError>;

    /// Closes the innermost context, which must be of kind `kind`.
    fn pop_context(&mut self, kind: &SerializationKey) -> Result<(), SaveError>;

    /// Number of contexts currently open.
    fn depth(&self) -> usize;
}

/// The reading half of the save contract.
pub trait SaveReader {
    /// Returns the value stored under `key` in the current context.
    fn read_raw(&self, key: &SerializationKey) -> Option<&Value>;

    /// Enters a nested context if it exists in the record being read.
    ///
    /// Returns `false` and leaves the current context unchanged when it does
    /// not; in that case the caller must not call [`pop_context`](Self::pop_context).
    fn push_context(&mut self, kind: &SerializationKey, index: i32) -> bool;

    /// Leaves the innermost context, which must be of kind `kind`.
    fn pop_context(&mut self, kind: &SerializationKey) -> Result<(), SaveError>;

    /// Number of contexts currently entered.
    fn depth(&self) -> usize;
}

/// Typed helpers for any [`SaveWriter`].
pub trait SaveWriterExt: SaveWriter {
    /// Stores a typed value under `key`.
    fn write_value<T: SaveValue>(&mut self, key: &SerializationKey, value: T) -> Result<(), SaveError> {
        self.write_raw(key, value.into_value())
    }

    /// Stores a homogeneous array under `key`, including its length.
    fn write_values<T: SaveValue + Clone>(
        &mut self,
        key: &SerializationKey,
        values: &[T],
    ) -> Result<(), SaveError> {
        self.write_raw(key, values.to_vec().into_value())
    }

    /// Runs `f` inside a freshly pushed context and pops it afterwards.
    ///
    /// The context is popped even when `f` fails, so the writer stays
    /// balanced; the first error is returned.
    fn write_context<R>(
        &mut self,
        kind: &SerializationKey,
        index: i32,
        f: impl FnOnce(&mut Self) -> Result<R, SaveError>,
    ) -> Result<R, SaveError> {
        self.push_context(kind, index)?;
        let result = f(self);
        let popped = self.pop_context(kind);
        let value = result?;
        popped?;
        Ok(value)
    }
}

impl<W: SaveWriter + ?Sized> SaveWriterExt for W {}

/// Typed, default-tolerant helpers for any [`SaveReader`].
///
/// None of these fail: a missing key, or a key holding a value of another
/// type, yields the supplied default.
pub trait SaveReaderExt: SaveReader {
    /// Reads `key` into `value`, or assigns `default` if it is absent.
    ///
    /// Returns whether the key was found. `value` is always assigned.
    fn try_read_value<T: SaveValue>(&self, key: &SerializationKey, value: &mut T, default: T) -> bool {
        match self.lookup::<T>(key) {
            Some(found) => {
                *value = found;
                true
            }
            None => {
                *value = default;
                false
            }
        }
    }

    /// Reads `key` into `target`, leaving it untouched if the key is absent.
    ///
    /// This is the "live value is the default" form used when restoring
    /// engine state in place.
    fn read_into<T: SaveValue>(&self, key: &SerializationKey, target: &mut T) -> bool {
        match self.lookup::<T>(key) {
            Some(found) => {
                *target = found;
                true
            }
            None => false,
        }
    }

    /// Returns the value under `key`, or `default`.
    fn read_value_or<T: SaveValue>(&self, key: &SerializationKey, default: T) -> T {
        self.lookup(key).unwrap_or(default)
    }

    /// Reads an array stored with [`SaveWriterExt::write_values`] into `values`,
    /// or assigns `default` if it is absent.
    fn try_read_values<T: SaveValue>(
        &self,
        key: &SerializationKey,
        values: &mut Vec<T>,
        default: Vec<T>,
    ) -> bool {
        self.try_read_value(key, values, default)
    }

    /// Returns the array under `key`, or `default`.
    fn read_values_or<T: SaveValue>(&self, key: &SerializationKey, default: Vec<T>) -> Vec<T> {
        self.read_value_or(key, default)
    }

    /// Looks up `key` and converts it, treating a type mismatch as absence.
    fn lookup<T: SaveValue>(&self, key: &SerializationKey) -> Option<T> {
        let raw = self.read_raw(key)?;
        let converted = T::from_value(raw);
        if converted.is_none() {
            log::debug!(
                "Key '{}' holds a {} value of an unexpected type; using default",
                key,
                raw.kind_name()
            );
        }
        converted
    }

    /// Runs `f` inside the context `kind[index]` if it exists.
    ///
    /// Returns `Ok(None)` without calling `f` when the context is absent. The
    /// context is popped if and only if the push succeeded.
    fn read_context<R>(
        &mut self,
        kind: &SerializationKey,
        index: i32,
        f: impl FnOnce(&mut Self) -> Result<R, SaveError>,
    ) -> Result<Option<R>, SaveError> {
        if !self.push_context(kind, index) {
            return Ok(None);
        }
        let result = f(self);
        let popped = self.pop_context(kind);
        let value = result?;
        popped?;
        Ok(Some(value))
    }
}

impl<R: SaveReader + ?Sized> SaveReaderExt for R {}
