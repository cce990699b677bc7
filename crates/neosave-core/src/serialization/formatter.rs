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

//! Formatters and the registry mapping runtime types to them.
//!
//! A [`Formatter`] knows how to write one engine type's mutable state into
//! the keyed contract and how to restore it. The [`FormatterRegistry`] is an
//! explicit object handed to whatever drives a save or load; nothing here is
//! global. Crates can still contribute formatters at link time through
//! [`FormatterRegistration`], which [`FormatterRegistry::with_registered`]
//! collects.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

use super::contract::{SaveReader, SaveWriter};
use super::error::SaveError;
use crate::math::{Quaternion, Vec3};

/// Information about the scene node owning the value being formatted.
#[derive(Debug, Clone, Copy)]
pub struct NodeScope<'a> {
    /// Display name of the node.
    pub name: &'a str,
    /// Whether the node is active in the hierarchy.
    pub active: bool,
    /// The node's local position, as restored so far.
    pub position: Vec3,
    /// The node's local rotation, as restored so far.
    pub rotation: Quaternion,
}

impl NodeScope<'static> {
    /// A scope for values that are not attached to any node: active, at the
    /// origin, unrotated.
    pub const DETACHED: NodeScope<'static> = NodeScope {
        name: "",
        active: true,
        position: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
    };
}

/// A strategy writing and reading one runtime type's persistable state.
///
/// Formatters should be stateless. Reads must tolerate missing keys; the
/// usual pattern is [`read_into`](super::SaveReaderExt::read_into), which
/// keeps the live value when a key is absent.
pub trait Formatter: Send + Sync + 'static {
    /// The type this formatter handles.
    type Target: Any;

    /// Writes `target`'s state into the current context of `writer`.
    fn write(
        &self,
        target: &Self::Target,
        scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError>;

    /// Restores `target`'s state from the current context of `reader`.
    fn read(
        &self,
        target: &mut Self::Target,
        scope: &NodeScope<'_>,
        reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError>;
}

/// Object-safe, type-erased view of a [`Formatter`].
pub trait ErasedFormatter: Send + Sync {
    /// The [`TypeId`] of the formatter's target type.
    fn target_type_id(&self) -> TypeId;

    /// The name of the formatter's target type.
    fn target_type_name(&self) -> &'static str;

    /// Writes a type-erased target.
    fn write_erased(
        &self,
        target: &dyn Any,
        scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError>;

    /// Reads into a type-erased target.
    fn read_erased(
        &self,
        target: &mut dyn Any,
        scope: &NodeScope<'_>,
        reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError>;
}

impl<F: Formatter> ErasedFormatter for F {
    fn target_type_id(&self) -> TypeId {
        TypeId::of::<F::Target>()
    }

    fn target_type_name(&self) -> &'static str {
        type_name::<F::Target>()
    }

    fn write_erased(
        &self,
        target: &dyn Any,
        scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError> {
        let target = target
            .downcast_ref::<F::Target>()
            .ok_or(SaveError::TargetMismatch {
                expected: type_name::<F::Target>(),
            })?;
        self.write(target, scope, writer)
    }

    fn read_erased(
        &self,
        target: &mut dyn Any,
        scope: &NodeScope<'_>,
        reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError> {
        let target = target
            .downcast_mut::<F::Target>()
            .ok_or(SaveError::TargetMismatch {
                expected: type_name::<F::Target>(),
            })?;
        self.read(target, scope, reader)
    }
}

/// A link-time formatter registration.
///
/// Submit one with `inventory::submit!` from the crate that owns the
/// formatter; [`FormatterRegistry::with_registered`] runs every submitted
/// `register` function.
pub struct FormatterRegistration {
    /// Name shown in logs.
    pub name: &'static str,
    /// Adds the formatter(s) to a registry.
    pub register: fn(&mut FormatterRegistry),
}

inventory::collect!(FormatterRegistration);

/// Maps runtime types to the formatter responsible for them.
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: HashMap<TypeId, Box<dyn ErasedFormatter>>,
}

impl FormatterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Creates a registry holding every formatter submitted through
    /// [`FormatterRegistration`].
    #[must_use]
    pub fn with_registered() -> Self {
        let mut registry = Self::new();
        for registration in inventory::iter::<FormatterRegistration> {
            log::debug!("Running formatter registration '{}'", registration.name);
            (registration.register)(&mut registry);
        }
        registry
    }

    /// Registers `formatter` for its target type.
    ///
    /// If the type already had a formatter, the new one replaces it and the
    /// previous one is returned.
    pub fn register<F: Formatter>(&mut self, formatter: F) -> Option<Box<dyn ErasedFormatter>> {
        let previous = self
            .formatters
            .insert(TypeId::of::<F::Target>(), Box::new(formatter));
        if previous.is_some() {
            log::warn!(
                "FormatterRegistry: replaced the formatter for '{}'",
                type_name::<F::Target>()
            );
        } else {
            log::debug!(
                "FormatterRegistry: registered formatter for '{}'",
                type_name::<F::Target>()
            );
        }
        previous
    }

    /// The formatter for `T`, if one is registered.
    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&dyn ErasedFormatter> {
        self.get_by_type_id(TypeId::of::<T>())
    }

    /// The formatter for the type with the given id, if one is registered.
    #[must_use]
    pub fn get_by_type_id(&self, type_id: TypeId) -> Option<&dyn ErasedFormatter> {
        self.formatters.get(&type_id).map(|boxed| boxed.as_ref())
    }

    /// Returns `true` if a formatter for `T` is registered.
    #[must_use]
    pub fn contains<T: Any>(&self) -> bool {
        self.formatters.contains_key(&TypeId::of::<T>())
    }

    /// Writes `target` with its registered formatter.
    ///
    /// Returns `Ok(false)` without writing anything when no formatter handles
    /// the target's type.
    pub fn write_any(
        &self,
        target: &dyn Any,
        scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<bool, SaveError> {
        match self.get_by_type_id(Any::type_id(target)) {
            Some(formatter) => formatter.write_erased(target, scope, writer).map(|()| true),
            None => Ok(false),
        }
    }

    /// Reads into `target` with its registered formatter.
    ///
    /// Returns `Ok(false)` without touching the target when no formatter
    /// handles its type.
    pub fn read_any(
        &self,
        target: &mut dyn Any,
        scope: &NodeScope<'_>,
        reader: &mut dyn SaveReader,
    ) -> Result<bool, SaveError> {
        match self.get_by_type_id(Any::type_id(&*target)) {
            Some(formatter) => formatter.read_erased(target, scope, reader).map(|()| true),
            None => Ok(false),
        }
    }

    /// Returns the number of registered formatters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// Returns `true` if no formatters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

/// The capability of a type that writes and reads its own state.
///
/// Gameplay components implement this directly instead of shipping a
/// separate formatter; [`StateFormatter`] plugs them into a registry.
pub trait SaveState: Any + Send + Sync {
    /// Writes this value's state into the current context.
    fn write_state(&self, writer: &mut dyn SaveWriter) -> Result<(), SaveError>;

    /// Restores this value's state from the current context.
    fn read_state(&mut self, reader: &mut dyn SaveReader) -> Result<(), SaveError>;
}

/// A [`Formatter`] delegating to a type's [`SaveState`] implementation.
pub struct StateFormatter<T>(PhantomData<fn() -> T>);

impl<T> StateFormatter<T> {
    /// Creates the formatter.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for StateFormatter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SaveState> Formatter for StateFormatter<T> {
    type Target = T;

    fn write(
        &self,
        target: &T,
        _scope: &NodeScope<'_>,
        writer: &mut dyn SaveWriter,
    ) -> Result<(), SaveError> {
        target.write_state(writer)
    }

    fn read(
        &self,
        target: &mut T,
        _scope: &NodeScope<'_>,
        reader: &mut dyn SaveReader,
    ) -> Result<(), SaveError> {
        target.read_state(reader)
    }
}
