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

//! Errors raised by the save contract.
//!
//! Missing keys and missing contexts are *not* errors: they are reported
//! through boolean returns and defaults. Everything here is either
//! structural misuse of the push/pop protocol or a failing sink.

use thiserror::Error;

/// Errors that can occur while writing or reading a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// A key was written twice in one context while duplicates are rejected.
    #[error("key '{key}' was written twice in context '{context}'")]
    DuplicateKey {
        /// The duplicated key.
        key: String,
        /// The context the key was written in.
        context: String,
    },

    /// Two different key names hash to the same value within one context.
    #[error("key '{incoming}' collides with '{existing}' (hash {hash:#010x})")]
    KeyCollision {
        /// The name already stored under the hash.
        existing: String,
        /// The name being written.
        incoming: String,
        /// The shared hash.
        hash: u32,
    },

    /// `pop_context` was called with no context open.
    #[error("cannot pop context '{kind}': no context is open")]
    ContextUnderflow {
        /// The kind passed to `pop_context`.
        kind: String,
    },

    /// `pop_context` named a different kind than the innermost open context.
    #[error("mismatched context pop: innermost open context is '{open}', pop requested '{requested}'")]
    ContextMismatch {
        /// The innermost open context.
        open: String,
        /// The kind passed to `pop_context`.
        requested: String,
    },

    /// A writer was finished while contexts were still open.
    #[error("{depth} context(s) still open, innermost is '{innermost}'")]
    UnclosedContexts {
        /// Number of contexts left open.
        depth: usize,
        /// The innermost open context.
        innermost: String,
    },

    /// A type-erased formatter was handed a value of the wrong type.
    #[error("formatter for '{expected}' received a value of another type")]
    TargetMismatch {
        /// The formatter's target type name.
        expected: &'static str,
    },

    /// The underlying sink could not accept the write.
    #[error("save sink unavailable: {0}")]
    Sink(String),
}
