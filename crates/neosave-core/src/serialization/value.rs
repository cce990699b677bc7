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

//! The typed values a record can hold.

use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

/// A value stored under a key inside a context.
///
/// Arrays are homogeneous by convention: [`SaveWriterExt::write_values`]
/// only ever produces arrays of one variant, and reading an array back fails
/// as a whole if any element has the wrong type.
///
/// [`SaveWriterExt::write_values`]: super::SaveWriterExt::write_values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer; enums are persisted through this variant.
    Int(i32),
    /// A single-precision float.
    Float(f32),
    /// A UTF-8 string.
    String(String),
    /// A 3D vector.
    Vec3(Vec3),
    /// A rotation.
    Quaternion(Quaternion),
    /// An array of values. Its length is persisted with it.
    Array(Vec<Value>),
}

impl Value {
    /// A short name of the variant, used in log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Vec3(_) => "vec3",
            Value::Quaternion(_) => "quaternion",
            Value::Array(_) => "array",
        }
    }
}

/// A Rust type that can be stored as a [`Value`].
///
/// Implement this for client enums to persist them as integers:
///
/// ```
/// use neosave_core::{SaveValue, Value};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Mode { Safe, Burst }
///
/// impl SaveValue for Mode {
///     fn into_value(self) -> Value {
///         Value::Int(self as i32)
///     }
///     fn from_value(value: &Value) -> Option<Self> {
///         match value {
///             Value::Int(0) => Some(Mode::Safe),
///             Value::Int(1) => Some(Mode::Burst),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Mode::from_value(&Mode::Burst.into_value()), Some(Mode::Burst));
/// ```
pub trait SaveValue: Sized {
    /// Converts the value into its stored form.
    fn into_value(self) -> Value;

    /// Converts a stored value back, or `None` if it has another type.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_save_value {
    ($ty:ty, $variant:ident) => {
        impl SaveValue for $ty {
            #[inline]
            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            #[inline]
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_save_value!(bool, Bool);
impl_save_value!(i32, Int);
impl_save_value!(f32, Float);
impl_save_value!(String, String);
impl_save_value!(Vec3, Vec3);
impl_save_value!(Quaternion, Quaternion);

impl<T: SaveValue> SaveValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(SaveValue::into_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}
