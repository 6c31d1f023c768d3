// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide single-instance guard.
//!
//! At most one widget may own a storage namespace at a time. A second
//! instance over the same records would interleave history writes.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use pagechat_core::PagechatError;
use tracing::warn;

static ACTIVE_NAMESPACES: LazyLock<Mutex<HashSet<String>>> =
    LazyLock::new(|| Mutex::new(HashSet::new()));

fn active() -> MutexGuard<'static, HashSet<String>> {
    // The set stays consistent even if a holder panicked.
    ACTIVE_NAMESPACES
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Claim on a storage namespace, released on drop.
#[derive(Debug)]
pub struct InstanceGuard {
    namespace: String,
}

impl InstanceGuard {
    /// Claim `namespace`, failing if another live guard holds it.
    pub fn acquire(namespace: &str) -> Result<Self, PagechatError> {
        if !active().insert(namespace.to_string()) {
            warn!(namespace, "refusing second widget instance");
            return Err(PagechatError::InstanceActive {
                namespace: namespace.to_string(),
            });
        }
        Ok(Self {
            namespace: namespace.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether some live guard currently holds `namespace`.
    pub fn is_held(namespace: &str) -> bool {
        active().contains(namespace)
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        active().remove(&self.namespace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_fails_until_release() {
        let first = InstanceGuard::acquire("guard-unit-a").unwrap();
        assert!(InstanceGuard::is_held("guard-unit-a"));

        let err = InstanceGuard::acquire("guard-unit-a").unwrap_err();
        assert!(matches!(err, PagechatError::InstanceActive { ref namespace } if namespace == "guard-unit-a"));

        drop(first);
        assert!(!InstanceGuard::is_held("guard-unit-a"));
        let again = InstanceGuard::acquire("guard-unit-a").unwrap();
        assert_eq!(again.namespace(), "guard-unit-a");
    }

    #[test]
    fn namespaces_are_independent() {
        let _a = InstanceGuard::acquire("guard-unit-b").unwrap();
        let _b = InstanceGuard::acquire("guard-unit-c").unwrap();
    }
}
