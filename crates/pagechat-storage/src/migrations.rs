// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the library at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

use pagechat_core::PagechatError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), PagechatError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(PagechatError::storage)?;
    Ok(())
}
