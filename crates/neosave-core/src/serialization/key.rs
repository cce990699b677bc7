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

//! Keys addressing values inside a context.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of a key name.
const fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// An immutable identifier for a value or a context kind.
///
/// A key pairs a human-readable name with a hash precomputed from it. Records
/// index values by the hash; the name is kept alongside so that saves stay
/// readable and hash collisions can be detected. Two keys with the same name
/// always carry the same hash.
///
/// Keys are usually declared once as constants next to the code that uses them:
///
/// ```
/// use neosave_core::SerializationKey;
///
/// const VELOCITY: SerializationKey = SerializationKey::new("velocity");
/// assert_eq!(VELOCITY, SerializationKey::owned("velocity".to_string()));
/// assert_eq!(VELOCITY.hash(), SerializationKey::new("velocity").hash());
/// ```
#[derive(Clone)]
pub struct SerializationKey {
    name: Cow<'static, str>,
    hash: u32,
}

impl SerializationKey {
    /// Creates a key from a static name. Usable in `const` items.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            hash: fnv1a(name.as_bytes()),
        }
    }

    /// Creates a key from a name only known at runtime (e.g. an animator
    /// parameter name).
    pub fn owned(name: String) -> Self {
        let hash = fnv1a(name.as_bytes());
        Self {
            name: Cow::Owned(name),
            hash,
        }
    }

    /// The display name of the key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The precomputed hash used for lookups.
    pub const fn hash(&self) -> u32 {
        self.hash
    }
}

impl PartialEq for SerializationKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.name == other.name
    }
}

impl Eq for SerializationKey {}

impl Hash for SerializationKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

impl fmt::Debug for SerializationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerializationKey({:?}, {:#010x})", self.name, self.hash)
    }
}

impl fmt::Display for SerializationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
