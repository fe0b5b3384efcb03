//! In-memory write-through embedding cache keyed by `(embedder_id, content_hash)`.
//!
//! The cache is consulted before calling the wrapped provider; misses are
//! embedded in a single batch and written back. Re-ingesting unchanged pages
//! therefore skips inference entirely.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use tgpt_core::traits::Embedder;

fn hash_content(s: &str) -> String {
    blake3::hash(s.as_bytes()).to_hex().to_string()
}

pub struct CachedEmbedder<E> {
    inner: E,
    cache: Mutex<LruCache<String, Arc<[f32]>>>,
}

impl<E: Embedder> CachedEmbedder<E> {
    pub fn new(inner: E, capacity: NonZeroUsize) -> Self {
        Self { inner, cache: Mutex::new(LruCache::new(capacity)) }
    }

    pub fn inner(&self) -> &E { &self.inner }

    pub fn cached_len(&self) -> usize { self.cache.lock().len() }

    fn key(&self, text: &str) -> String { format!("{}:{}", self.inner.embedder_id(), hash_content(text)) }
}

impl<E: Embedder> Embedder for CachedEmbedder<E> {
    fn embedder_id(&self) -> &str { self.inner.embedder_id() }
    fn dim(&self) -> usize { self.inner.dim() }
    fn max_len(&self) -> usize { self.inner.max_len() }

    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts.iter().map(|t| self.key(t)).collect();
        let mut vectors: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut misses = Vec::new();
        let mut miss_indices = Vec::new();
        {
            let mut cache = self.cache.lock();
            for (i, key) in keys.iter().enumerate() {
                match cache.get(key) {
                    Some(v) => vectors[i] = Some(v.to_vec()),
                    None => { misses.push(texts[i].clone()); miss_indices.push(i); }
                }
            }
        }
        debug!(hits = texts.len() - misses.len(), misses = misses.len(), "embedding cache lookup");

        // The lock is not held across inference.
        if !misses.is_empty() {
            let embs = self.inner.embed_batch(&misses)?;
            if embs.len() != misses.len() {
                anyhow::bail!("embedder returned {} vectors for {} texts", embs.len(), misses.len());
            }
            let mut cache = self.cache.lock();
            for (&i, v) in miss_indices.iter().zip(embs) {
                cache.put(keys[i].clone(), Arc::from(v.as_slice()));
                vectors[i] = Some(v);
            }
        }
        vectors
            .into_iter()
            .map(|v| v.ok_or_else(|| anyhow::anyhow!("embedding cache lost a vector")))
            .collect()
    }
}
