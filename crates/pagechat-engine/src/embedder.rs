// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Term-frequency embedding of free text.
//!
//! Text is lowercased, stripped of every character that is neither an ASCII
//! word character (`[A-Za-z0-9_]`) nor whitespace, split on whitespace, and
//! tokens of three or more characters are counted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tokens at or below this length are discarded.
pub const MIN_TOKEN_LEN: usize = 2;

/// Sparse bag-of-words vector: token to occurrence count.
///
/// Every stored count is at least 1; absent tokens count as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermVector(BTreeMap<String, u32>);

impl TermVector {
    /// Occurrence count of `term`, 0 when absent.
    pub fn get(&self, term: &str) -> u32 {
        self.0.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(term, count)| (term.as_str(), *count))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for TermVector {
    /// Builds a vector from explicit counts, dropping zero counts.
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        TermVector(
            iter.into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(term, count)| (term.into(), count))
                .collect(),
        )
    }
}

/// Embed `text` into a [`TermVector`].
pub fn embed(text: &str) -> TermVector {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0u32) += 1;
    }
    TermVector(counts)
}

/// Normalized tokens of `text`, in order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect();

    normalized
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_LEN)
        .map(str::to_owned)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn counts_repeated_tokens() {
        let vector = embed("Honda honda HONDA wave");
        assert_eq!(vector.get("honda"), 3);
        assert_eq!(vector.get("wave"), 1);
        assert_eq!(vector.len(), 2);
    }

    #[test]
    fn drops_short_tokens_and_punctuation() {
        let vector = embed("An ox, a cat! Is it big?");
        assert_eq!(vector.get("cat"), 1);
        assert_eq!(vector.get("big"), 1);
        assert_eq!(vector.get("ox"), 0);
        assert_eq!(vector.len(), 2);
    }

    #[test]
    fn punctuation_inside_a_word_joins_it() {
        // Characters are removed, not replaced by spaces.
        assert_eq!(tokenize("e-mail don't"), vec!["email", "dont"]);
    }

    #[test]
    fn non_ascii_letters_are_stripped() {
        // "số" loses its accented letter, "phổ" becomes "ph".
        assert_eq!(tokenize("xe số phổ biến"), vec!["bin"]);
    }

    #[test]
    fn underscore_and_digits_are_word_characters() {
        assert_eq!(tokenize("model_x 150cc 50"), vec!["model_x", "150cc"]);
    }

    #[test]
    fn empty_and_short_inputs_embed_to_empty_vector() {
        assert!(embed("").is_empty());
        assert!(embed("  a to be  ").is_empty());
        assert!(embed("?!...").is_empty());
    }

    #[test]
    fn from_iter_drops_zero_counts() {
        let vector: TermVector = [("abc", 2), ("def", 0)].into_iter().collect();
        assert_eq!(vector.len(), 1);
        assert_eq!(vector.get("abc"), 2);
    }

    #[test]
    fn serializes_as_plain_object() {
        let json = serde_json::to_string(&embed("wave wave vision")).unwrap();
        assert_eq!(json, r#"{"vision":1,"wave":2}"#);
    }

    proptest! {
        #[test]
        fn property_embedding_is_deterministic(text in any::<String>()) {
            prop_assert_eq!(embed(&text), embed(&text));
        }

        #[test]
        fn property_tokens_are_long_and_counts_positive(text in any::<String>()) {
            for (term, count) in embed(&text).iter() {
                prop_assert!(term.chars().count() > MIN_TOKEN_LEN);
                prop_assert!(count >= 1);
            }
        }
    }
}
