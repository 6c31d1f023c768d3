// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pagechat.toml` > `~/.config/pagechat/pagechat.toml` > `/etc/pagechat/pagechat.toml`
//! with environment variable overrides via `PAGECHAT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PagechatConfig;

/// Sections whose env keys are rewritten from `section_key` to `section.key`.
const ENV_SECTIONS: &[&str] = &["widget", "corpus", "matcher", "storage", "responses"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pagechat/pagechat.toml` (system-wide)
/// 3. `~/.config/pagechat/pagechat.toml` (user XDG config)
/// 4. `./pagechat.toml` (local directory)
/// 5. `PAGECHAT_*` environment variables
pub fn load_config() -> Result<PagechatConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and embedded configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PagechatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PagechatConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PagechatConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PagechatConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PagechatConfig::default()))
        .merge(Toml::file("/etc/pagechat/pagechat.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pagechat/pagechat.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pagechat.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PAGECHAT_CORPUS_MAX_SENTENCES` must become
/// `corpus.max_sentences`, not `corpus.max.sentences`.
fn env_provider() -> Env {
    Env::prefixed("PAGECHAT_").map(|key| map_env_key(key.as_str()).into())
}

/// Rewrite the first `section_` prefix of a lowercased env key to `section.`.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("corpus_max_sentences"), "corpus.max_sentences");
        assert_eq!(
            map_env_key("matcher_min_score_threshold"),
            "matcher.min_score_threshold"
        );
        assert_eq!(map_env_key("storage_session_key"), "storage.session_key");
    }

    #[test]
    fn unknown_env_section_is_left_alone() {
        assert_eq!(map_env_key("logging_level"), "logging_level");
    }
}
