// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed access to the widget's three persisted records.
//!
//! Every failure stops here. A read that fails or returns malformed JSON is
//! logged and reported as absent; a write that fails is logged and dropped.

use std::sync::Arc;

use pagechat_config::model::StorageConfig;
use pagechat_core::{PagechatError, RecordKind, RecordStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// The corpus, session and memory records of one namespace.
pub struct Records {
    store: Arc<dyn RecordStore>,
    corpus_key: String,
    session_key: String,
    memory_key: String,
}

impl Records {
    pub fn new(store: Arc<dyn RecordStore>, config: &StorageConfig) -> Self {
        Self {
            corpus_key: config.qualified_key(&config.corpus_key),
            session_key: config.qualified_key(&config.session_key),
            memory_key: config.qualified_key(&config.memory_key),
            store,
        }
    }

    pub fn key(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Corpus => &self.corpus_key,
            RecordKind::Session => &self.session_key,
            RecordKind::Memory => &self.memory_key,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Read and parse a record. `None` if absent, unreadable or malformed.
    pub fn load<T: DeserializeOwned>(&self, kind: RecordKind) -> Option<T> {
        let raw = match self.store.get(self.key(kind)) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(record = %kind, "no stored record");
                return None;
            }
            Err(e) => {
                warn!(record = %kind, error = %e, "failed to read record, treating as absent");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(source) => {
                let e = PagechatError::Serialization {
                    record: kind,
                    source,
                };
                warn!(record = %kind, error = %e, "discarding malformed record");
                None
            }
        }
    }

    /// Serialize and write a record. Returns whether it was persisted.
    pub fn save<T: Serialize + ?Sized>(&self, kind: RecordKind, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(source) => {
                let e = PagechatError::Serialization {
                    record: kind,
                    source,
                };
                warn!(record = %kind, error = %e, "failed to serialize record");
                return false;
            }
        };

        match self.store.set(self.key(kind), &raw) {
            Ok(()) => true,
            Err(e) => {
                warn!(record = %kind, error = %e, "failed to persist record");
                false
            }
        }
    }

    /// Delete a record. Returns whether the store accepted the delete.
    pub fn remove(&self, kind: RecordKind) -> bool {
        match self.store.remove(self.key(kind)) {
            Ok(()) => true,
            Err(e) => {
                warn!(record = %kind, error = %e, "failed to remove record");
                false
            }
        }
    }
}

impl std::fmt::Debug for Records {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Records")
            .field("store", &self.store.name())
            .field("corpus_key", &self.corpus_key)
            .field("session_key", &self.session_key)
            .field("memory_key", &self.memory_key)
            .finish()
    }
}
