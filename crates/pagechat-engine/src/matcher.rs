// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-1 corpus lookup by cosine similarity.

use pagechat_config::model::MatcherConfig;

use crate::corpus::{Corpus, CorpusEntry};
use crate::embedder::{embed, TermVector};
use crate::similarity::cosine_similarity;

/// A corpus entry together with its score against a query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredEntry<'a> {
    pub entry: &'a CorpusEntry,
    pub score: f64,
}

/// Finds the single best corpus sentence for a query.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    threshold: f64,
}

impl Matcher {
    /// `threshold` is exclusive: a match must score strictly above it.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.min_score_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Highest-scoring entry regardless of threshold. On ties the earliest
    /// entry wins.
    pub fn best_candidate<'a>(
        &self,
        query: &TermVector,
        corpus: &'a Corpus,
    ) -> Option<ScoredEntry<'a>> {
        let mut best: Option<ScoredEntry<'a>> = None;
        for entry in corpus {
            let score = cosine_similarity(query, entry.vector());
            if best.is_none_or(|b| score > b.score) {
                best = Some(ScoredEntry { entry, score });
            }
        }
        best
    }

    /// Text of the best entry when its score exceeds the threshold.
    pub fn find_best_match<'a>(&self, query: &str, corpus: &'a Corpus) -> Option<&'a str> {
        if corpus.is_empty() {
            return None;
        }
        let query_vector = embed(query);
        self.best_candidate(&query_vector, corpus)
            .filter(|best| best.score > self.threshold)
            .map(|best| best.entry.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusBuilder;

    fn corpus(sentences: &[&str]) -> Corpus {
        Corpus::new(sentences.iter().copied().map(CorpusEntry::new).collect())
    }

    #[test]
    fn empty_corpus_never_matches() {
        let matcher = Matcher::new(0.0);
        assert_eq!(matcher.find_best_match("honda wave", &Corpus::default()), None);
    }

    #[test]
    fn returns_full_text_of_best_entry() {
        let corpus = corpus(&["Honda Wave costs little", "Yamaha Exciter is sporty"]);
        let matcher = Matcher::new(0.06);
        assert_eq!(
            matcher.find_best_match("yamaha exciter", &corpus),
            Some("Yamaha Exciter is sporty")
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        // cos({aaa}, {aaa,bbb,ccc,ddd}) is exactly 0.5.
        let corpus = corpus(&["aaa bbb ccc ddd"]);
        assert_eq!(Matcher::new(0.5).find_best_match("aaa", &corpus), None);
        assert_eq!(
            Matcher::new(0.499_999_999).find_best_match("aaa", &corpus),
            Some("aaa bbb ccc ddd")
        );
    }

    #[test]
    fn first_entry_wins_ties() {
        let corpus = corpus(&["wave red", "wave blue", "wave red"]);
        let best = Matcher::new(0.0)
            .best_candidate(&embed("wave"), &corpus)
            .unwrap();
        assert_eq!(best.entry.text(), "wave red");
        assert!(std::ptr::eq(best.entry, &corpus.entries()[0]));
    }

    #[test]
    fn zero_scores_do_not_match_default_threshold() {
        let corpus = corpus(&["honda wave alpha"]);
        let matcher = Matcher::new(0.06);
        let best = matcher.best_candidate(&embed("yamaha"), &corpus).unwrap();
        assert_eq!(best.score, 0.0);
        assert_eq!(matcher.find_best_match("yamaha", &corpus), None);
    }

    #[test]
    fn vietnamese_scenario_prefers_first_sentence() {
        let corpus = CorpusBuilder::new(800, 5)
            .build("Xe số là dòng xe phổ biến. Giá xe ga dao động lớn.");
        assert_eq!(corpus.len(), 2);

        let matcher = Matcher::new(0.06);
        let query = embed("dòng xe phổ biến");
        let first = cosine_similarity(&query, corpus.entries()[0].vector());
        let second = cosine_similarity(&query, corpus.entries()[1].vector());
        assert!(first > second, "first={first} second={second}");
        assert_eq!(
            matcher.find_best_match("dòng xe phổ biến", &corpus),
            Some("Xe số là dòng xe phổ biến")
        );
    }
}
