// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and migrations.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use pagechat_core::PagechatError;
use rusqlite::Connection;
use tracing::debug;

use crate::migrations::run_migrations;

/// Path understood by SQLite as a private, non-persistent database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// A single SQLite connection guarded by a mutex.
///
/// All reads and writes of one store go through this connection, so writes
/// are serialized.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (creating if needed) the database at `path` and bring its schema
    /// up to date. Missing parent directories are created.
    pub fn open(path: &str) -> Result<Self, PagechatError> {
        if path != IN_MEMORY_PATH
            && let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(PagechatError::storage)?;
        }

        let mut conn = Connection::open(path).map_err(PagechatError::storage)?;
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(PagechatError::storage)?;
        if path != IN_MEMORY_PATH {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;",
            )
            .map_err(PagechatError::storage)?;
        }
        run_migrations(&mut conn)?;
        debug!(path, "database opened");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the connection for the duration of one statement.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, PagechatError> {
        self.conn
            .lock()
            .map_err(|_| PagechatError::Internal("database connection mutex poisoned".into()))
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}
