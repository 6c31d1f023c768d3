// SPDX-FileCopyrightText: 2026 Pagechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end widget testing.
//!
//! `TestHarness` opens a [`ChatWidget`] over a fresh store under a namespace
//! unique to the harness, so tests can run in parallel without tripping the
//! single-instance guard. `reopen()` simulates a page reload.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pagechat_config::PagechatConfig;
use pagechat_core::{PagechatError, RecordStore};
use pagechat_storage::{InMemoryRecordStore, SqliteRecordStore};
use pagechat_widget::ChatWidget;

static NEXT_NAMESPACE: AtomicUsize = AtomicUsize::new(0);

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: PagechatConfig,
    page_text: String,
    store: Option<Arc<dyn RecordStore>>,
    sqlite: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = PagechatConfig::default();
        config.storage.namespace = format!(
            "harness-{}-{}",
            std::process::id(),
            NEXT_NAMESPACE.fetch_add(1, Ordering::SeqCst)
        );
        Self {
            config,
            page_text: String::new(),
            store: None,
            sqlite: false,
        }
    }

    /// Visible page text the corpus is built from.
    pub fn with_page_text(mut self, text: impl Into<String>) -> Self {
        self.page_text = text.into();
        self
    }

    /// Replace the configuration. The harness namespace is kept unless the
    /// given config sets a non-default one.
    pub fn with_config(mut self, config: PagechatConfig) -> Self {
        let namespace = std::mem::take(&mut self.config.storage.namespace);
        self.config = config;
        if self.config.storage.namespace == PagechatConfig::default().storage.namespace {
            self.config.storage.namespace = namespace;
        }
        self
    }

    pub fn with_min_sentence_len(mut self, len: usize) -> Self {
        self.config.corpus.min_sentence_len = len;
        self
    }

    /// Use a caller-provided store, e.g. a [`crate::FailingStore`].
    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Back the widget with a SQLite file in a temp directory.
    pub fn with_sqlite(mut self) -> Self {
        self.sqlite = true;
        self
    }

    pub fn build(self) -> Result<TestHarness, PagechatError> {
        let mut temp_dir = None;
        let store: Arc<dyn RecordStore> = match (self.store, self.sqlite) {
            (Some(store), _) => store,
            (None, true) => {
                let dir = tempfile::TempDir::new().map_err(PagechatError::storage)?;
                let path = dir.path().join("pagechat.db");
                let store = SqliteRecordStore::open(&path.to_string_lossy())?;
                temp_dir = Some(dir);
                Arc::new(store)
            }
            (None, false) => Arc::new(InMemoryRecordStore::new()),
        };

        let widget = ChatWidget::open(self.config.clone(), store.clone(), &self.page_text)?;
        Ok(TestHarness {
            widget,
            store,
            config: self.config,
            page_text: self.page_text,
            _temp_dir: temp_dir,
        })
    }
}

/// A widget plus the store behind it.
pub struct TestHarness {
    /// The widget under test.
    pub widget: ChatWidget,
    /// Store shared with the widget, for inspecting persisted records.
    pub store: Arc<dyn RecordStore>,
    pub config: PagechatConfig,
    page_text: String,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Ask a question and return the reply text, `None` for a blank query.
    pub fn ask(&mut self, query: &str) -> Option<String> {
        self.widget.ask(query).map(|reply| reply.text)
    }

    /// Raw JSON persisted under one of the widget's record keys.
    pub fn stored(&self, key: &str) -> Option<String> {
        let key = self.config.storage.qualified_key(key);
        self.store.get(&key).ok().flatten()
    }

    /// Drop the widget and open a new one over the same store, as a page
    /// reload would.
    pub fn reopen(self) -> Result<Self, PagechatError> {
        let TestHarness {
            widget,
            store,
            config,
            page_text,
            _temp_dir,
        } = self;
        drop(widget);
        let widget = ChatWidget::open(config.clone(), store.clone(), &page_text)?;
        Ok(TestHarness {
            widget,
            store,
            config,
            page_text,
            _temp_dir,
        })
    }
}
