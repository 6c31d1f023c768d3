// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent key-value store trait, modelled on browser local storage.

use crate::error::PagechatError;

/// A synchronous string key-value store.
///
/// Keys are fully namespaced by the caller. A missing key is `Ok(None)`,
/// never an error. Implementations must be safe to share across threads,
/// although a widget only ever touches its store from one thread at a time.
pub trait RecordStore: Send + Sync {
    /// Human-readable backend name, used in log fields.
    fn name(&self) -> &str;

    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, PagechatError>;

    /// Insert or replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), PagechatError>;

    /// Delete `key`. Deleting an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), PagechatError>;
}

impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>, PagechatError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PagechatError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PagechatError> {
        (**self).remove(key)
    }
}
