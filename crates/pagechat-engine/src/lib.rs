// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-matching engine for the pagechat widget.
//!
//! Page text is split into a [`Corpus`] of sentences, each embedded as a
//! bag-of-words [`TermVector`]. Queries are embedded the same way and the
//! most cosine-similar sentence is returned when it clears a threshold. The
//! [`ResponsePolicy`] layers name memory and scripted replies on top.

pub mod corpus;
pub mod embedder;
pub mod extractor;
pub mod matcher;
pub mod memory;
pub mod policy;
pub mod similarity;

pub use corpus::{Corpus, CorpusBuilder, CorpusEntry, StoredEntry};
pub use embedder::{embed, tokenize, TermVector};
pub use extractor::FactExtractor;
pub use matcher::{Matcher, ScoredEntry};
pub use memory::Memory;
pub use policy::{Reply, ResponsePolicy, ResponseTier};
pub use similarity::cosine_similarity;
