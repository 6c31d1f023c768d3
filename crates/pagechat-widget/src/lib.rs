// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embeddable chat widget core.
//!
//! [`ChatWidget`] wires the matching engine to persisted state. It is the
//! only type a UI shell needs: open it with the page text and a record store,
//! then call [`ChatWidget::ask`] per user turn.

pub mod guard;
pub mod records;
pub mod widget;

pub use guard::InstanceGuard;
pub use widget::ChatWidget;
