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

use neosave_core::file::FormatError;
use neosave_core::SaveError;
use thiserror::Error;

/// An error that aborts a whole save or load.
///
/// Failures of single components never abort; they are collected in the
/// reports instead.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The record tree could not be built or walked.
    #[error(transparent)]
    Record(#[from] SaveError),

    /// The save container could not be packed or unpacked.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A node id does not fit a context index.
    #[error("Node id {0} is too large to be saved")]
    NodeIdOutOfRange(u32),
}
