use std::sync::Arc;

use tracing::debug;

use tgpt_core::error::{Error, Result};
use tgpt_core::traits::{Embeddable, Embedder};

/// Items paired with their embeddings, all of one dimension.
#[derive(Debug)]
pub struct Corpus<T> {
    items: Vec<Arc<T>>,
    embeddings: Vec<Vec<f32>>,
    dim: usize,
}

impl<T: Embeddable> Corpus<T> {
    /// Embed every item's representative text in batches of `batch_size`.
    ///
    /// The dimension is taken from the first vector; any later vector of a
    /// different length fails the whole build.
    pub fn build(items: Vec<T>, embedder: &dyn Embedder, batch_size: usize) -> Result<Self> {
        if items.is_empty() { return Err(Error::EmptyInput); }
        let texts: Vec<String> = items.iter().map(|i| i.embedding_text().into_owned()).collect();
        let mut embeddings = Vec::with_capacity(texts.len());
        for (n, batch) in texts.chunks(batch_size.max(1)).enumerate() {
            let embs = embedder.embed_batch(batch).map_err(Error::embedding)?;
            if embs.len() != batch.len() {
                return Err(Error::embedding(anyhow::anyhow!("embedder returned {} vectors for {} texts", embs.len(), batch.len())));
            }
            debug!(batch = n, size = batch.len(), "embedded corpus batch");
            embeddings.extend(embs);
        }
        let dim = embeddings[0].len();
        if let Some(bad) = embeddings.iter().find(|e| e.len() != dim) {
            return Err(Error::DimensionMismatch { expected: dim, got: bad.len() });
        }
        Ok(Self { items: items.into_iter().map(Arc::new).collect(), embeddings, dim })
    }
}

impl<T> Corpus<T> {
    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn dim(&self) -> usize { self.dim }

    pub fn item(&self, position: usize) -> Option<&Arc<T>> { self.items.get(position) }

    pub fn items(&self) -> &[Arc<T>] { &self.items }

    pub fn embedding(&self, position: usize) -> Option<&[f32]> { self.embeddings.get(position).map(Vec::as_slice) }

    pub fn embeddings(&self) -> &[Vec<f32>] { &self.embeddings }
}
