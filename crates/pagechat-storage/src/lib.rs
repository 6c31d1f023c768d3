// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store backends for the pagechat widget engine.
//!
//! Records are opaque JSON strings keyed by namespaced names. The SQLite
//! backend keeps them in a single `records` table created by embedded
//! migrations; the in-memory backend is for tests and ephemeral embeds.

pub mod database;
pub mod memory;
pub mod migrations;
pub mod sqlite;

use std::sync::Arc;

use pagechat_config::model::{StorageBackend, StorageConfig};
use pagechat_core::{PagechatError, RecordStore};
use tracing::info;

pub use database::Database;
pub use memory::InMemoryRecordStore;
pub use sqlite::SqliteRecordStore;

/// Open the record store selected by `config`.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn RecordStore>, PagechatError> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StorageBackend::Sqlite => Arc::new(SqliteRecordStore::open(&config.database_path)?),
        StorageBackend::Memory => Arc::new(InMemoryRecordStore::new()),
    };
    info!(backend = store.name(), "record store opened");
    Ok(store)
}
