// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the pagechat widget engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level pagechat configuration.
///
/// Every section is optional and defaults to the values the widget has
/// always shipped with. All values are read once at initialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PagechatConfig {
    /// Widget identity and presentation hints.
    #[serde(default)]
    pub widget: WidgetConfig,

    /// Corpus construction limits.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Query matching settings.
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Persistence backend and record keys.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Localized phrases and reply templates.
    #[serde(default)]
    pub responses: ResponsesConfig,
}

/// Which side of the page the chat bubble is pinned to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Left,
    Right,
}

/// A quick-reply chip shown under the chat log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Suggestion {
    /// Query submitted when the chip is pressed.
    pub query: String,
    /// Text shown on the chip.
    pub label: String,
}

/// Widget identity and presentation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    /// Display name of the assistant. Substituted for `{bot}` in reply
    /// templates.
    #[serde(default = "default_widget_name")]
    pub name: String,

    /// Bubble placement. Cosmetic; the engine ignores it.
    #[serde(default)]
    pub placement: Placement,

    /// Quick-reply chips.
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<Suggestion>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            name: default_widget_name(),
            placement: Placement::default(),
            suggestions: default_suggestions(),
        }
    }
}

fn default_widget_name() -> String {
    "MotoAI".to_string()
}

fn default_suggestions() -> Vec<Suggestion> {
    [
        ("Xe số", "🏍 Xe số"),
        ("Xe ga", "🛵 Xe ga"),
        ("Xe 50cc", "🚲 Xe 50cc"),
        ("Thủ tục", "📄 Thủ tục"),
    ]
    .into_iter()
    .map(|(query, label)| Suggestion {
        query: query.to_string(),
        label: label.to_string(),
    })
    .collect()
}

/// Corpus construction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    /// Maximum number of sentences kept from the page text.
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,

    /// Sentences must be strictly longer than this (in characters) to be kept.
    #[serde(default = "default_min_sentence_len")]
    pub min_sentence_len: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            max_sentences: default_max_sentences(),
            min_sentence_len: default_min_sentence_len(),
        }
    }
}

fn default_max_sentences() -> usize {
    800
}

fn default_min_sentence_len() -> usize {
    18
}

/// Query matching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherConfig {
    /// A corpus sentence is returned only when its cosine score is strictly
    /// greater than this value.
    #[serde(default = "default_min_score_threshold")]
    pub min_score_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_score_threshold: default_min_score_threshold(),
        }
    }
}

fn default_min_score_threshold() -> f64 {
    0.06
}

/// Which record store implementation backs the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage backend.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite database file (sqlite backend only).
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Deployment namespace. Prefixed to every record key and used to refuse
    /// a second widget instance over the same records.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Record key for the sentence corpus.
    #[serde(default = "default_corpus_key")]
    pub corpus_key: String,

    /// Record key for the chat history.
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// Record key for remembered facts.
    #[serde(default = "default_memory_key")]
    pub memory_key: String,
}

impl StorageConfig {
    /// Fully qualified key for one of the widget's records.
    pub fn qualified_key(&self, key: &str) -> String {
        format!("{}:{key}", self.namespace)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            namespace: default_namespace(),
            corpus_key: default_corpus_key(),
            session_key: default_session_key(),
            memory_key: default_memory_key(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("pagechat").join("pagechat.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("pagechat.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_corpus_key() -> String {
    "MotoAI_v10_4_stable_corpus_v1_fixed_autoinit".to_string()
}

fn default_session_key() -> String {
    "MotoAI_v10_4_stable_session_v1_fixed_autoinit".to_string()
}

fn default_memory_key() -> String {
    "MotoAI_v10_4_stable_memory_v1_fixed_autoinit".to_string()
}

/// Localized phrases recognized in queries and the replies sent back.
///
/// Templates may contain `{name}`, replaced with the remembered user name,
/// and `{bot}`, replaced with `widget.name`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResponsesConfig {
    /// Self-introduction lead-ins, e.g. "my name is". Matched case-insensitively.
    #[serde(default = "default_name_lead_ins")]
    pub name_lead_ins: Vec<String>,

    /// Substrings that mark a greeting.
    #[serde(default = "default_greeting_keywords")]
    pub greeting_keywords: Vec<String>,

    /// Substrings that mark a thank-you.
    #[serde(default = "default_thanks_keywords")]
    pub thanks_keywords: Vec<String>,

    #[serde(default = "default_name_ack")]
    pub name_ack: String,

    #[serde(default = "default_greeting_named")]
    pub greeting_named: String,

    #[serde(default = "default_greeting_anonymous")]
    pub greeting_anonymous: String,

    #[serde(default = "default_thanks")]
    pub thanks: String,

    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Shown when a session opens with no history.
    #[serde(default = "default_welcome_named")]
    pub welcome_named: String,

    #[serde(default = "default_welcome_anonymous")]
    pub welcome_anonymous: String,

    /// Shown right after the history is cleared.
    #[serde(default = "default_cleared_named")]
    pub cleared_named: String,

    #[serde(default = "default_cleared_anonymous")]
    pub cleared_anonymous: String,
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            name_lead_ins: default_name_lead_ins(),
            greeting_keywords: default_greeting_keywords(),
            thanks_keywords: default_thanks_keywords(),
            name_ack: default_name_ack(),
            greeting_named: default_greeting_named(),
            greeting_anonymous: default_greeting_anonymous(),
            thanks: default_thanks(),
            fallback: default_fallback(),
            welcome_named: default_welcome_named(),
            welcome_anonymous: default_welcome_anonymous(),
            cleared_named: default_cleared_named(),
            cleared_anonymous: default_cleared_anonymous(),
        }
    }
}

fn default_name_lead_ins() -> Vec<String> {
    vec!["tên tôi là".to_string(), "tôi là".to_string()]
}

fn default_greeting_keywords() -> Vec<String> {
    vec!["chào".to_string(), "hello".to_string()]
}

fn default_thanks_keywords() -> Vec<String> {
    vec!["cảm ơn".to_string(), "thanks".to_string()]
}

fn default_name_ack() -> String {
    "Chào {name}! Rất vui được gặp bạn. Bạn cần tư vấn về xe gì?".to_string()
}

fn default_greeting_named() -> String {
    "Chào {name}! Bạn cần mình giúp gì?".to_string()
}

fn default_greeting_anonymous() -> String {
    "Chào bạn! Mình là {bot}, mình có thể giúp gì cho bạn?".to_string()
}

fn default_thanks() -> String {
    "Không có gì! Mình giúp được gì nữa không?".to_string()
}

fn default_fallback() -> String {
    "Xin lỗi, mình chưa hiểu rõ ý bạn lắm. Bạn có thể hỏi về \"xe số\", \"xe ga\", \"thủ tục mua xe\" thử nhé!"
        .to_string()
}

fn default_welcome_named() -> String {
    "Chào {name}! Bạn sẵn sàng tìm hiểu về xe chưa?".to_string()
}

fn default_welcome_anonymous() -> String {
    "👋 Chào bạn! Mình là {bot} — hỏi thử “Xe ga”, “Xe số”, “Xe 50cc”, hoặc “Thủ tục” nhé!"
        .to_string()
}

fn default_cleared_named() -> String {
    "Chào {name}! Bạn cần hỗ trợ gì tiếp theo?".to_string()
}

fn default_cleared_anonymous() -> String {
    "Chào bạn! Mình là {bot}, mình có thể giúp gì cho bạn?".to_string()
}
