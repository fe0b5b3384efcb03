//! Page search and NFR category suggestion over two independent contexts.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use tgpt_core::config::SearchSettings;
use tgpt_core::error::{Error, Result};
use tgpt_core::traits::Embedder;
use tgpt_core::types::{Item, NfrCategory, RawPage};

use crate::context::SearchContext;
use crate::rank::{CategorySuggestion, DocumentHit};

/// Number of categories returned by [`SearchCore::suggest_category`].
pub const SUGGEST_TOP_K: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub pages: usize,
    pub generation: u64,
    pub dim: usize,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fetched {} pages", self.pages)
    }
}

pub struct SearchCore {
    documents: SearchContext<Item>,
    categories: SearchContext<NfrCategory>,
    settings: SearchSettings,
}

impl SearchCore {
    /// Builds the fixed category corpus up front; the page corpus stays
    /// empty until the first ingest.
    pub fn new(embedder: Arc<dyn Embedder>, settings: SearchSettings) -> Result<Self> {
        let batch = settings.embed_batch_size.max(1);
        let documents = SearchContext::new("pages", Arc::clone(&embedder), batch);
        let categories = SearchContext::new("categories", embedder, batch);
        categories.rebuild(NfrCategory::ALL.to_vec())?;
        Ok(Self { documents, categories, settings })
    }

    pub fn settings(&self) -> &SearchSettings { &self.settings }

    pub fn documents(&self) -> &SearchContext<Item> { &self.documents }

    pub fn categories(&self) -> &SearchContext<NfrCategory> { &self.categories }

    /// Flatten fetched pages and replace the page corpus with them.
    pub fn ingest_documents(&self, pages: Vec<RawPage>) -> Result<IngestReport> {
        self.ingest_items(pages.into_iter().map(Item::from).collect())
    }

    pub fn ingest_items(&self, items: Vec<Item>) -> Result<IngestReport> {
        let pages = items.len();
        let snapshot = self.documents.rebuild(items)?;
        let report = IngestReport { pages, generation: snapshot.generation(), dim: snapshot.index().dim() };
        info!(pages, generation = report.generation, "{report}");
        Ok(report)
    }

    /// Nearest pages to `text`, best first, at most `k` of them.
    pub fn query(&self, text: &str, k: usize) -> Result<Vec<DocumentHit>> {
        let hits = self.documents.search(text, k)?;
        Ok(hits
            .iter()
            .map(|h| DocumentHit::assemble(&h.item, h.distance, self.settings.snippet_chars))
            .collect())
    }

    pub fn query_default(&self, text: &str) -> Result<Vec<DocumentHit>> {
        self.query(text, self.settings.default_top_k)
    }

    /// Three closest NFR categories. Blank input is rejected with
    /// [`Error::EmptyQuery`] before the provider is called.
    pub fn suggest_category(&self, text: &str) -> Result<Vec<CategorySuggestion>> {
        if text.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        let hits = self.categories.search(text, SUGGEST_TOP_K)?;
        Ok(hits.iter().map(|h| CategorySuggestion::assemble(*h.item, h.distance)).collect())
    }
}
