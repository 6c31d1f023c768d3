// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Self-introduction detection ("my name is X").
//!
//! Lead-in phrases are data. A query is split into whitespace tokens; when a
//! run of tokens equals a lead-in (case-insensitively) the following letters
//! are captured as the name, up to the first character that is neither a
//! letter nor whitespace.

use tracing::debug;

/// Extracts the user's name from introduction phrases.
#[derive(Debug, Clone)]
pub struct FactExtractor {
    /// Each lead-in as lowercase tokens.
    lead_ins: Vec<Vec<String>>,
}

impl FactExtractor {
    /// Phrases are tried in order at each query position. Phrases without
    /// any word are ignored.
    pub fn new<I, S>(lead_ins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lead_ins = lead_ins
            .into_iter()
            .map(|phrase| {
                phrase
                    .as_ref()
                    .split_whitespace()
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>()
            })
            .filter(|tokens| !tokens.is_empty())
            .collect();
        Self { lead_ins }
    }

    /// The introduced name, with its original casing, if the query contains
    /// a lead-in followed by at least one letter.
    pub fn extract_name(&self, query: &str) -> Option<String> {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        for start in 0..tokens.len() {
            for lead_in in &self.lead_ins {
                let end = start + lead_in.len();
                if end > tokens.len() || lowered[start..end] != lead_in[..] {
                    continue;
                }
                if let Some(name) = capture_name(&tokens[end..]) {
                    debug!(lead_in = %lead_in.join(" "), "introduction detected");
                    return Some(name);
                }
            }
        }
        None
    }
}

/// Leading letters of `tokens`, stopping inside the first token that holds
/// anything else.
fn capture_name(tokens: &[&str]) -> Option<String> {
    let mut words = Vec::new();
    for token in tokens {
        let letters_end = token
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(token.len());
        if letters_end > 0 {
            words.push(&token[..letters_end]);
        }
        if letters_end < token.len() {
            break;
        }
    }
    (!words.is_empty()).then(|| words.join(" "))
}
