// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the boundary between the widget and its environment.

pub mod store;

pub use store::RecordStore;
