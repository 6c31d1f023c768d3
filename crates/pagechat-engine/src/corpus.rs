// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sentence corpus built from page text.
//!
//! A [`Corpus`] is built once per session from the page's visible text, or
//! restored from a persisted record. Every entry carries `embed(text)` from
//! the moment it exists, so matching never mutates the corpus.

use std::collections::HashSet;

use pagechat_config::model::CorpusConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedder::{embed, TermVector};

/// Characters that end a sentence. Runs of them count as one break.
const SENTENCE_DELIMITERS: [char; 4] = ['\n', '.', '!', '?'];

/// One candidate answer sentence and its term vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusEntry {
    text: String,
    #[serde(rename = "vec")]
    vector: TermVector,
}

impl CorpusEntry {
    /// Create an entry, embedding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let vector = embed(&text);
        Self { text, vector }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn vector(&self) -> &TermVector {
        &self.vector
    }
}

/// Persisted shape of a corpus entry. Older records carry no vector.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredEntry {
    pub text: String,
    #[serde(rename = "vec", default)]
    pub vector: Option<TermVector>,
}

/// Ordered, capped, de-duplicated sentence list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    /// Restore a persisted corpus, keeping its texts and order. Every text is
    /// re-embedded; a stored vector is only a cache and is replaced when it is
    /// missing or disagrees. Returns the corpus and the number of replaced
    /// vectors, so callers know to write the record back.
    pub fn from_stored(stored: Vec<StoredEntry>) -> (Self, usize) {
        let mut backfilled = 0;
        let entries = stored
            .into_iter()
            .map(|StoredEntry { text, vector }| {
                let entry = CorpusEntry::new(text);
                if vector.as_ref() != Some(&entry.vector) {
                    backfilled += 1;
                }
                entry
            })
            .collect();
        (Self { entries }, backfilled)
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CorpusEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a CorpusEntry;
    type IntoIter = std::slice::Iter<'a, CorpusEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds a [`Corpus`] from raw page text.
#[derive(Debug, Clone, Copy)]
pub struct CorpusBuilder {
    max_entries: usize,
    min_sentence_len: usize,
}

impl CorpusBuilder {
    pub fn new(max_entries: usize, min_sentence_len: usize) -> Self {
        Self {
            max_entries,
            min_sentence_len,
        }
    }

    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::new(config.max_sentences, config.min_sentence_len)
    }

    /// Split `source` into sentences, keep the first occurrence of each
    /// trimmed sentence longer than the minimum, cap the count, and embed.
    pub fn build(&self, source: &str) -> Corpus {
        let mut seen = HashSet::new();
        let entries: Vec<CorpusEntry> = split_sentences(source)
            .filter(|sentence| sentence.chars().count() > self.min_sentence_len)
            .filter(|sentence| seen.insert(*sentence))
            .take(self.max_entries)
            .map(CorpusEntry::new)
            .collect();

        debug!(
            entries = entries.len(),
            max_entries = self.max_entries,
            "corpus built from source text"
        );
        Corpus { entries }
    }
}

/// Trimmed segments of `source` between sentence delimiters, empty ones included.
pub fn split_sentences(source: &str) -> impl Iterator<Item = &str> {
    source.split(SENTENCE_DELIMITERS).map(str::trim)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn builds_two_entries_from_vietnamese_text() {
        let corpus = CorpusBuilder::new(800, 5)
            .build("Xe số là dòng xe phổ biến. Giá xe ga dao động lớn.");
        let texts: Vec<&str> = corpus.iter().map(CorpusEntry::text).collect();
        assert_eq!(texts, vec!["Xe số là dòng xe phổ biến", "Giá xe ga dao động lớn"]);
    }

    #[test]
    fn delimiter_runs_collapse() {
        let corpus = CorpusBuilder::new(10, 0).build("First one!!!\n\n?Second one...Third");
        let texts: Vec<&str> = corpus.iter().map(CorpusEntry::text).collect();
        assert_eq!(texts, vec!["First one", "Second one", "Third"]);
    }

    #[test]
    fn length_filter_is_exclusive_and_counts_characters() {
        // "abcde" has 5 chars, "ạbcdef" has 6 chars but 7 bytes.
        let corpus = CorpusBuilder::new(10, 5).build("abcde. ạbcde. ạbcdef");
        let texts: Vec<&str> = corpus.iter().map(CorpusEntry::text).collect();
        assert_eq!(texts, vec!["ạbcdef"]);
    }

    #[test]
    fn duplicates_are_exact_and_case_sensitive() {
        let corpus = CorpusBuilder::new(10, 3).build("Hello world. hello world.   Hello world  ");
        let texts: Vec<&str> = corpus.iter().map(CorpusEntry::text).collect();
        assert_eq!(texts, vec!["Hello world", "hello world"]);
    }

    #[test]
    fn cap_keeps_earliest_sentences() {
        let corpus = CorpusBuilder::new(2, 0).build("one1. two2. three3. four4");
        let texts: Vec<&str> = corpus.iter().map(CorpusEntry::text).collect();
        assert_eq!(texts, vec!["one1", "two2"]);
    }

    #[test]
    fn entries_are_embedded_on_creation() {
        let corpus = CorpusBuilder::new(10, 0).build("Wave alpha wave");
        assert_eq!(corpus.entries()[0].vector(), &embed("Wave alpha wave"));
    }

    #[test]
    fn empty_source_builds_empty_corpus() {
        assert!(CorpusBuilder::new(10, 0).build("").is_empty());
        assert!(CorpusBuilder::new(10, 0).build("\n.!?  \n").is_empty());
    }

    #[test]
    fn stored_entries_without_vectors_are_backfilled() {
        let stored: Vec<StoredEntry> = serde_json::from_str(
            r#"[{"text":"honda wave alpha"},{"text":"yamaha sirius","vec":{"yamaha":1,"sirius":1}}]"#,
        )
        .unwrap();
        let (corpus, backfilled) = Corpus::from_stored(stored);
        assert_eq!(backfilled, 1);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.entries()[0].vector(), &embed("honda wave alpha"));
        assert_eq!(corpus.entries()[1].vector().get("sirius"), 1);
    }

    #[test]
    fn empty_stored_vectors_are_recomputed() {
        let stored: Vec<StoredEntry> =
            serde_json::from_str(r#"[{"text":"Xe số là dòng xe phổ biến","vec":{}}]"#).unwrap();
        let (corpus, backfilled) = Corpus::from_stored(stored);
        assert_eq!(backfilled, 1);
        assert_eq!(corpus.entries()[0].vector(), &embed("Xe số là dòng xe phổ biến"));
        assert_eq!(corpus.entries()[0].vector().get("dng"), 1);
    }

    #[test]
    fn stale_stored_vectors_are_replaced() {
        let stored: Vec<StoredEntry> = serde_json::from_str(
            r#"[{"text":"honda wave alpha","vec":{"yamaha":4}},{"text":"yamaha sirius","vec":{"sirius":1,"yamaha":1}}]"#,
        )
        .unwrap();
        let (corpus, backfilled) = Corpus::from_stored(stored);
        assert_eq!(backfilled, 1);
        assert_eq!(corpus.entries()[0].vector(), &embed("honda wave alpha"));
        assert_eq!(corpus.entries()[0].vector().get("yamaha"), 0);
        assert_eq!(corpus.entries()[1].vector(), &embed("yamaha sirius"));
    }

    #[test]
    fn serialized_corpus_round_trips_through_stored_entries() {
        let corpus = CorpusBuilder::new(10, 0).build("honda wave. yamaha sirius");
        let json = serde_json::to_string(&corpus).unwrap();
        assert!(json.starts_with(r#"[{"text":"honda wave","vec":{"#));
        let stored: Vec<StoredEntry> = serde_json::from_str(&json).unwrap();
        let (restored, backfilled) = Corpus::from_stored(stored);
        assert_eq!(backfilled, 0);
        assert_eq!(restored, corpus);
    }

    proptest! {
        #[test]
        fn property_dedup_and_cap(
            picks in proptest::collection::vec(0usize..8, 0..40),
            cap in 1usize..10,
        ) {
            let source = picks
                .iter()
                .map(|i| format!("sentence number {i}"))
                .collect::<Vec<_>>()
                .join(". ");

            let mut unique: Vec<String> = Vec::new();
            for i in &picks {
                let s = format!("sentence number {i}");
                if !unique.contains(&s) {
                    unique.push(s);
                }
            }

            let corpus = CorpusBuilder::new(cap, 3).build(&source);
            let texts: Vec<String> = corpus.iter().map(|e| e.text().to_string()).collect();
            prop_assert_eq!(texts.len(), unique.len().min(cap));
            prop_assert_eq!(&texts[..], &unique[..texts.len()]);
        }
    }
}
