// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for pagechat integration tests.
//!
//! # Components
//!
//! - [`TestHarness`] - A widget over an in-memory or temp-dir SQLite store
//! - [`FailingStore`] - A record store whose reads and writes fail on demand

pub mod failing_store;
pub mod harness;

pub use failing_store::FailingStore;
pub use harness::{TestHarness, TestHarnessBuilder};
