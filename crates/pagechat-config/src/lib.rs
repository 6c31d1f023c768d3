// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the pagechat widget engine.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use pagechat_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("corpus cap: {}", config.corpus.max_sentences);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PagechatConfig;

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<PagechatConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PagechatConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate a loaded config, or turn the figment error into diagnostics using
/// the TOML sources returned by `sources` (read lazily, only on failure).
fn finish(
    loaded: Result<PagechatConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<PagechatConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read the TOML files of the XDG hierarchy for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/pagechat/pagechat.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("pagechat/pagechat.toml"));
    }
    candidates.push(
        std::env::current_dir()
            .map(|d| d.join("pagechat.toml"))
            .unwrap_or_else(|_| "pagechat.toml".into()),
    );

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
