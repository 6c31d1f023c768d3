// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record store with switchable failures, for exercising degraded paths.

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pagechat_core::{PagechatError, RecordStore};
use pagechat_storage::InMemoryRecordStore;

/// In-memory store that can be told to fail reads, writes, or both.
///
/// A failed write leaves the stored data untouched, like a browser store
/// over quota.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: InMemoryRecordStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    rejected_writes: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `set` and `remove` fail. Covers quota errors.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of writes refused so far.
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Read straight from the backing map, ignoring `fail_reads`.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key).ok().flatten()
    }

    fn refuse_write(&self) -> Result<(), PagechatError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            self.rejected_writes.fetch_add(1, Ordering::SeqCst);
            return Err(PagechatError::storage(io::Error::new(
                io::ErrorKind::StorageFull,
                "quota exceeded",
            )));
        }
        Ok(())
    }
}

impl RecordStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    fn get(&self, key: &str) -> Result<Option<String>, PagechatError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PagechatError::storage(io::Error::other("read refused")));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PagechatError> {
        self.refuse_write()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PagechatError> {
        self.refuse_write()?;
        self.inner.remove(key)
    }
}
