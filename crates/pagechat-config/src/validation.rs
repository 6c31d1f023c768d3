// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Covers constraints serde cannot express: threshold ranges, non-empty and
//! distinct storage keys, usable response phrases.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{PagechatConfig, StorageBackend};

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &PagechatConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let threshold = config.matcher.min_score_threshold;
    if !(0.0..1.0).contains(&threshold) {
        fail(format!(
            "matcher.min_score_threshold must be in [0.0, 1.0), got {threshold}"
        ));
    }

    if config.corpus.max_sentences == 0 {
        fail("corpus.max_sentences must be at least 1".to_string());
    }

    let storage = &config.storage;
    if storage.backend == StorageBackend::Sqlite && storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty for the sqlite backend".to_string());
    }

    if storage.namespace.trim().is_empty() {
        fail("storage.namespace must not be empty".to_string());
    }

    let keys = [
        ("storage.corpus_key", &storage.corpus_key),
        ("storage.session_key", &storage.session_key),
        ("storage.memory_key", &storage.memory_key),
    ];
    let mut seen = HashSet::new();
    for (name, key) in keys {
        if key.trim().is_empty() {
            fail(format!("{name} must not be empty"));
        } else if !seen.insert(key.as_str()) {
            fail(format!("{name} `{key}` collides with another record key"));
        }
    }

    let responses = &config.responses;
    for (i, lead_in) in responses.name_lead_ins.iter().enumerate() {
        if lead_in.split_whitespace().next().is_none() {
            fail(format!("responses.name_lead_ins[{i}] must contain a word"));
        }
    }
    for (name, list) in [
        ("responses.greeting_keywords", &responses.greeting_keywords),
        ("responses.thanks_keywords", &responses.thanks_keywords),
    ] {
        if list.iter().any(|k| k.is_empty()) {
            fail(format!("{name} must not contain empty strings"));
        }
    }

    for (i, suggestion) in config.widget.suggestions.iter().enumerate() {
        if suggestion.query.trim().is_empty() {
            fail(format!("widget.suggestions[{i}].query must not be empty"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
