// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The chat widget instance.
//!
//! A [`ChatWidget`] owns everything one embedded chat needs: the sentence
//! corpus, the chat history, the remembered facts and the record store they
//! persist to. The UI shell hands it the page text once and then one query
//! per turn.

use std::sync::Arc;

use pagechat_config::model::{PagechatConfig, Suggestion};
use pagechat_config::validation::validate_config;
use pagechat_core::{ChatMessage, PagechatError, RecordKind, RecordStore};
use pagechat_engine::{Corpus, CorpusBuilder, Memory, Reply, ResponsePolicy, StoredEntry};
use pagechat_storage::{open_store, InMemoryRecordStore};
use tracing::{debug, info, warn};

use crate::guard::InstanceGuard;
use crate::records::Records;

/// One live chat widget bound to a storage namespace.
#[derive(Debug)]
pub struct ChatWidget {
    config: PagechatConfig,
    records: Records,
    corpus: Corpus,
    history: Vec<ChatMessage>,
    memory: Memory,
    policy: ResponsePolicy,
    _guard: InstanceGuard,
}

impl ChatWidget {
    /// Start a widget over `store`.
    ///
    /// Memory and history are restored from their records. The corpus is
    /// restored verbatim if a readable record exists, otherwise built from
    /// `page_text` and persisted. Fails only for an invalid configuration or
    /// when another widget already owns the storage namespace.
    pub fn open(
        config: PagechatConfig,
        store: Arc<dyn RecordStore>,
        page_text: &str,
    ) -> Result<Self, PagechatError> {
        validate_config(&config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            PagechatError::Config(message)
        })?;

        let guard = InstanceGuard::acquire(&config.storage.namespace)?;
        let records = Records::new(store, &config.storage);

        let memory: Memory = records.load(RecordKind::Memory).unwrap_or_default();
        let history: Vec<ChatMessage> = records.load(RecordKind::Session).unwrap_or_default();

        let corpus = match records.load::<Vec<StoredEntry>>(RecordKind::Corpus) {
            Some(stored) => {
                let (corpus, backfilled) = Corpus::from_stored(stored);
                if backfilled > 0 {
                    info!(backfilled, "re-embedded stored corpus entries with missing or stale vectors");
                    records.save(RecordKind::Corpus, &corpus);
                }
                info!(entries = corpus.len(), "corpus loaded");
                corpus
            }
            None => {
                let corpus = CorpusBuilder::from_config(&config.corpus).build(page_text);
                let saved = records.save(RecordKind::Corpus, &corpus);
                info!(entries = corpus.len(), saved, "corpus built");
                corpus
            }
        };

        info!(
            namespace = %config.storage.namespace,
            store = records.store().name(),
            history = history.len(),
            "widget ready"
        );

        Ok(Self {
            policy: ResponsePolicy::from_config(&config),
            config,
            records,
            corpus,
            history,
            memory,
            _guard: guard,
        })
    }

    /// Start a widget over the store selected by `config.storage`.
    ///
    /// If that store cannot be opened the widget runs on an in-memory store,
    /// so the chat works but nothing survives a reload.
    pub fn open_with_config(config: PagechatConfig, page_text: &str) -> Result<Self, PagechatError> {
        let store = match open_store(&config.storage) {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "record store unavailable, continuing without persistence");
                Arc::new(InMemoryRecordStore::new())
            }
        };
        Self::open(config, store, page_text)
    }

    /// Answer one user turn.
    ///
    /// The query is trimmed; a blank query is ignored and yields `None`.
    /// Otherwise the user message and the reply are appended to the history,
    /// persisting after each append.
    pub fn ask(&mut self, query: &str) -> Option<Reply> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.push(ChatMessage::user(query));

        let reply = self.policy.respond(query, &self.corpus, &mut self.memory);
        debug!(tier = %reply.tier, "reply selected");
        if reply.memory_updated {
            info!("user name remembered");
            self.records.save(RecordKind::Memory, &self.memory);
        }

        self.push(ChatMessage::bot(reply.text.clone()));
        Some(reply)
    }

    /// Submit the query behind suggestion chip `index`, as if typed.
    pub fn ask_suggestion(&mut self, index: usize) -> Option<Reply> {
        let query = self.config.widget.suggestions.get(index)?.query.clone();
        self.ask(&query)
    }

    /// Empty the history and delete its record. Corpus and memory are kept.
    ///
    /// Returns the greeting the shell should display afterwards. It is not
    /// added to the history.
    pub fn clear_history(&mut self) -> String {
        self.history.clear();
        self.records.remove(RecordKind::Session);
        info!("history cleared");
        self.policy.cleared(&self.memory)
    }

    /// Greeting to display when there is no history yet.
    pub fn welcome(&self) -> Option<String> {
        self.history
            .is_empty()
            .then(|| self.policy.welcome(&self.memory))
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Suggestion chips for the shell to render, in configured order.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.config.widget.suggestions
    }

    pub fn config(&self) -> &PagechatConfig {
        &self.config
    }

    fn push(&mut self, message: ChatMessage) {
        self.history.push(message);
        self.records.save(RecordKind::Session, &self.history);
    }
}

#[cfg(test)]
mod tests {
    use pagechat_test_utils::FailingStore;
    use tracing_test::traced_test;

    use super::*;

    fn config(namespace: &str) -> PagechatConfig {
        let mut config = PagechatConfig::default();
        config.storage.namespace = namespace.to_string();
        config
    }

    #[test]
    #[traced_test]
    fn malformed_records_are_logged_and_ignored() {
        let config = config("widget-unit-malformed");
        let store = Arc::new(InMemoryRecordStore::new());
        let records = Records::new(store.clone(), &config.storage);
        store.set(records.key(RecordKind::Memory), "{not json").unwrap();
        store.set(records.key(RecordKind::Session), "42").unwrap();

        let widget = ChatWidget::open(config, store, "").unwrap();
        assert!(widget.memory().is_empty());
        assert!(widget.history().is_empty());
        assert!(logs_contain("discarding malformed record"));
        assert!(logs_contain("malformed memory record"));
    }

    #[test]
    #[traced_test]
    fn write_failures_are_logged_and_ignored() {
        let store = Arc::new(FailingStore::new());
        store.fail_writes(true);

        let mut widget = ChatWidget::open(config("widget-unit-writes"), store.clone(), "").unwrap();
        let reply = widget.ask("tôi là Minh").unwrap();

        assert!(reply.text.contains("Minh"));
        assert_eq!(widget.memory().user_name(), Some("Minh"));
        assert_eq!(widget.history().len(), 2);
        assert!(logs_contain("failed to persist record"));
        assert!(store.is_empty());
    }

    #[test]
    #[traced_test]
    fn read_failures_fall_back_to_a_fresh_session() {
        let store = Arc::new(FailingStore::new());
        store.fail_reads(true);

        let widget = ChatWidget::open(
            config("widget-unit-reads"),
            store,
            "Xe ga phù hợp cho người đi trong thành phố.",
        )
        .unwrap();
        assert_eq!(widget.corpus().len(), 1);
        assert!(logs_contain("failed to read record"));
        assert!(logs_contain("corpus built"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = config("widget-unit-invalid");
        config.matcher.min_score_threshold = 1.5;
        let err = ChatWidget::open(config, Arc::new(InMemoryRecordStore::new()), "").unwrap_err();
        assert!(matches!(err, PagechatError::Config(_)));
        assert!(!InstanceGuard::is_held("widget-unit-invalid"));
    }

    #[test]
    #[traced_test]
    fn unopenable_store_degrades_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config("widget-unit-degrade");
        // A directory is not a database file.
        config.storage.database_path = dir.path().to_string_lossy().into_owned();

        let mut widget = ChatWidget::open_with_config(config, "").unwrap();
        assert!(widget.ask("hello").is_some());
        assert!(logs_contain("continuing without persistence"));
    }
}
