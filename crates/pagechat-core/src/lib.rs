// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the pagechat widget engine.
//!
//! This crate provides the error type, the chat history types, and the
//! [`RecordStore`] trait that storage backends implement. Everything else in
//! the workspace depends on it.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PagechatError;
pub use traits::RecordStore;
pub use types::{ChatMessage, RecordKind, Sender};
