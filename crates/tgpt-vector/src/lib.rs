//! In-memory vector search core.
//!
//! Items are embedded once into a [`Corpus`], covered by a brute-force
//! [`FlatL2Index`], and published as an immutable generation inside a
//! [`SearchContext`]. [`SearchCore`] wires two such contexts together: wiki
//! pages (replaced on every ingest) and the fixed NFR category list.

pub mod cache;
pub mod context;
pub mod corpus;
pub mod engine;
pub mod index;
pub mod rank;

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use tgpt_core::config::EmbedSettings;
use tgpt_core::traits::Embedder;

pub use crate::cache::CachedEmbedder;
pub use crate::context::{Hit, SearchContext, Snapshot};
pub use crate::corpus::Corpus;
pub use crate::engine::{IngestReport, SearchCore, SUGGEST_TOP_K};
pub use crate::index::{squared_l2, FlatL2Index, Neighbor};
pub use crate::rank::{snippet, to_score, CategorySuggestion, DocumentHit};

/// Resolve the configured provider and wrap it in the embedding cache unless
/// `cache_capacity` is 0.
pub fn build_embedder(settings: &EmbedSettings, base: &Path) -> Result<Arc<dyn Embedder>> {
    let provider = tgpt_embed::get_default_embedder(settings, base)?;
    info!(embedder = provider.embedder_id(), dim = provider.dim(), "embedding provider ready");
    let embedder: Arc<dyn Embedder> = match NonZeroUsize::new(settings.cache_capacity) {
        Some(capacity) => Arc::new(CachedEmbedder::new(provider, capacity)),
        None => Arc::from(provider),
    };
    Ok(embedder)
}
