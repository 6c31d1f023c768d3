// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`RecordStore`] trait.

use pagechat_core::{PagechatError, RecordStore};
use rusqlite::{params, OptionalExtension};

use crate::database::Database;

/// Record store backed by the `records` table of a SQLite database.
#[derive(Debug)]
pub struct SqliteRecordStore {
    db: Database,
}

impl SqliteRecordStore {
    /// Open the database at `path`, running migrations.
    pub fn open(path: &str) -> Result<Self, PagechatError> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// Open a private in-memory database. Records vanish on drop.
    pub fn open_in_memory() -> Result<Self, PagechatError> {
        Self::open(crate::database::IN_MEMORY_PATH)
    }

    /// Last write time of `key` as an RFC 3339 timestamp.
    pub fn updated_at(&self, key: &str) -> Result<Option<String>, PagechatError> {
        let conn = self.db.connection()?;
        conn.query_row(
            "SELECT updated_at FROM records WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(PagechatError::storage)
    }
}

impl RecordStore for SqliteRecordStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn get(&self, key: &str) -> Result<Option<String>, PagechatError> {
        let conn = self.db.connection()?;
        conn.query_row(
            "SELECT value FROM records WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(PagechatError::storage)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PagechatError> {
        let now = chrono::Utc::now().to_rfc3339();
        let conn = self.db.connection()?;
        conn.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(PagechatError::storage)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PagechatError> {
        let conn = self.db.connection()?;
        conn.execute("DELETE FROM records WHERE key = ?1", params![key])
            .map_err(PagechatError::storage)?;
        Ok(())
    }
}
