// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the pagechat widget engine.

use thiserror::Error;

use crate::types::RecordKind;

/// The primary error type used across pagechat crates.
#[derive(Debug, Error)]
pub enum PagechatError {
    /// Configuration errors (invalid TOML, bad thresholds, colliding storage keys).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, query failure, quota).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A persisted record could not be serialized or parsed.
    #[error("malformed {record} record: {source}")]
    Serialization {
        record: RecordKind,
        source: serde_json::Error,
    },

    /// Another widget instance already owns this storage namespace.
    #[error("a widget instance is already active for namespace `{namespace}`")]
    InstanceActive { namespace: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PagechatError {
    /// Wrap any error as a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        PagechatError::Storage {
            source: Box::new(err),
        }
    }
}
