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

//! Save agent configuration.

use std::path::Path;

use anyhow::Context;
use neosave_core::file::SaveEncoding;
use neosave_core::serialization::DuplicateKeyPolicy;
use serde::{Deserialize, Serialize};

/// Tunables of a [`SaveAgent`](crate::SaveAgent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Payload encoding of save files.
    pub encoding: SaveEncoding,
    /// Fail a component's write when it writes the same key twice in one
    /// context, instead of keeping the last value.
    pub reject_duplicate_keys: bool,
    /// Log components without a formatter at warn level instead of debug.
    pub warn_on_missing_formatter: bool,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            encoding: SaveEncoding::Binary,
            reject_duplicate_keys: false,
            warn_on_missing_formatter: false,
        }
    }
}

impl SaveConfig {
    /// Load configuration from a JSON string. Missing fields take their
    /// default value.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read save config {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid save config {}", path.display()))
    }

    /// Save configuration to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write save config {}", path.display()))
    }

    /// The duplicate-key policy for record writers.
    pub fn duplicate_policy(&self) -> DuplicateKeyPolicy {
        if self.reject_duplicate_keys {
            DuplicateKeyPolicy::Reject
        } else {
            DuplicateKeyPolicy::LastWriteWins
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SaveConfig::from_json(r#"{ "encoding": "Text" }"#).unwrap();
        assert_eq!(config.encoding, SaveEncoding::Text);
        assert!(!config.reject_duplicate_keys);
        assert_eq!(config.duplicate_policy(), DuplicateKeyPolicy::LastWriteWins);
    }

    #[test]
    fn test_reject_flag_selects_policy() {
        let config = SaveConfig {
            reject_duplicate_keys: true,
            ..SaveConfig::default()
        };
        assert_eq!(config.duplicate_policy(), DuplicateKeyPolicy::Reject);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(SaveConfig::from_json("{ encoding: 3 ").is_err());
    }
}
