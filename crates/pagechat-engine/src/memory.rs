// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remembered facts about the user.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Fact key holding the user's stated name.
pub const USER_NAME_KEY: &str = "userName";

/// Flat fact-key to value map, persisted across sessions. Facts never expire.
///
/// Only string facts are kept when reading a record; other values are
/// skipped so one odd field does not cost the user's name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Memory(BTreeMap<String, String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFact {
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Memory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let facts = BTreeMap::<String, StoredFact>::deserialize(deserializer)?;
        Ok(Memory(
            facts
                .into_iter()
                .filter_map(|(key, fact)| match fact {
                    StoredFact::Text(value) => Some((key, value)),
                    StoredFact::Other(_) => None,
                })
                .collect(),
        ))
    }
}

impl Memory {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Store a fact, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn user_name(&self) -> Option<&str> {
        self.get(USER_NAME_KEY)
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.set(USER_NAME_KEY, name);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
