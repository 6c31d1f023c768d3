// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response selection.
//!
//! Tiers are evaluated in a fixed order and the first one that applies
//! produces the answer:
//!
//! 1. self-introduction, which records the user's name
//! 2. corpus match on the lowercased query
//! 3. greeting keyword
//! 4. thanks keyword
//! 5. fallback
//!
//! No tier fails. The worst outcome is the fallback text.

use pagechat_config::model::{PagechatConfig, ResponsesConfig};
use strum::{Display, EnumString};
use tracing::debug;

use crate::corpus::Corpus;
use crate::extractor::FactExtractor;
use crate::matcher::Matcher;
use crate::memory::Memory;

/// Placeholder replaced with the remembered user name in templates.
const NAME_PLACEHOLDER: &str = "{name}";

/// Placeholder replaced with the assistant's display name in templates.
const BOT_PLACEHOLDER: &str = "{bot}";

/// Which tier produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ResponseTier {
    NameFact,
    CorpusMatch,
    Greeting,
    Thanks,
    Fallback,
}

/// The answer to one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub tier: ResponseTier,
    /// Whether [`Memory`] changed and should be persisted.
    pub memory_updated: bool,
}

impl Reply {
    fn new(text: String, tier: ResponseTier) -> Self {
        Self {
            text,
            tier,
            memory_updated: false,
        }
    }
}

/// Combines fact extraction, corpus matching and scripted replies.
#[derive(Debug, Clone)]
pub struct ResponsePolicy {
    responses: ResponsesConfig,
    extractor: FactExtractor,
    matcher: Matcher,
    greeting_keywords: Vec<String>,
    thanks_keywords: Vec<String>,
}

impl ResponsePolicy {
    /// `bot_name` is filled into every `{bot}` placeholder up front.
    pub fn new(responses: &ResponsesConfig, bot_name: &str, matcher: Matcher) -> Self {
        Self {
            extractor: FactExtractor::new(&responses.name_lead_ins),
            greeting_keywords: lowercase_all(&responses.greeting_keywords),
            thanks_keywords: lowercase_all(&responses.thanks_keywords),
            responses: with_bot_name(responses, bot_name),
            matcher,
        }
    }

    pub fn from_config(config: &PagechatConfig) -> Self {
        Self::new(
            &config.responses,
            &config.widget.name,
            Matcher::from_config(&config.matcher),
        )
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Answer `query`, recording any introduced name in `memory`.
    pub fn respond(&self, query: &str, corpus: &Corpus, memory: &mut Memory) -> Reply {
        if let Some(name) = self.extractor.extract_name(query) {
            let text = fill(&self.responses.name_ack, &name);
            memory.set_user_name(name);
            return Reply {
                text,
                tier: ResponseTier::NameFact,
                memory_updated: true,
            };
        }

        let lowered = query.to_lowercase();

        if let Some(answer) = self.matcher.find_best_match(&lowered, corpus) {
            debug!("answered from corpus");
            return Reply::new(answer.to_string(), ResponseTier::CorpusMatch);
        }

        if contains_any(&lowered, &self.greeting_keywords) {
            let text = self.name_aware(
                &self.responses.greeting_named,
                &self.responses.greeting_anonymous,
                memory,
            );
            return Reply::new(text, ResponseTier::Greeting);
        }

        if contains_any(&lowered, &self.thanks_keywords) {
            return Reply::new(self.responses.thanks.clone(), ResponseTier::Thanks);
        }

        debug!("no tier matched, using fallback");
        Reply::new(self.responses.fallback.clone(), ResponseTier::Fallback)
    }

    /// Greeting shown when a session opens with no history.
    pub fn welcome(&self, memory: &Memory) -> String {
        self.name_aware(
            &self.responses.welcome_named,
            &self.responses.welcome_anonymous,
            memory,
        )
    }

    /// Greeting shown right after the history is cleared.
    pub fn cleared(&self, memory: &Memory) -> String {
        self.name_aware(
            &self.responses.cleared_named,
            &self.responses.cleared_anonymous,
            memory,
        )
    }

    fn name_aware(&self, named: &str, anonymous: &str, memory: &Memory) -> String {
        match memory.user_name() {
            Some(name) => fill(named, name),
            None => anonymous.to_string(),
        }
    }
}

fn with_bot_name(responses: &ResponsesConfig, bot_name: &str) -> ResponsesConfig {
    let bot = |template: &String| template.replace(BOT_PLACEHOLDER, bot_name);
    ResponsesConfig {
        name_ack: bot(&responses.name_ack),
        greeting_named: bot(&responses.greeting_named),
        greeting_anonymous: bot(&responses.greeting_anonymous),
        thanks: bot(&responses.thanks),
        fallback: bot(&responses.fallback),
        welcome_named: bot(&responses.welcome_named),
        welcome_anonymous: bot(&responses.welcome_anonymous),
        cleared_named: bot(&responses.cleared_named),
        cleared_anonymous: bot(&responses.cleared_anonymous),
        ..responses.clone()
    }
}

fn fill(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}
