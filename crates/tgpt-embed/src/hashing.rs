use anyhow::Result;
use std::hash::Hasher;
use twox_hash::XxHash64;

use tgpt_core::traits::Embedder;

/// Deterministic bag-of-words embedder based on feature hashing.
///
/// Each lowercase alphanumeric token adds a weight to one bucket chosen by
/// xxHash64; the result is L2-normalized. Texts sharing words end up close,
/// which is enough for tests and offline development.
pub struct HashEmbedder {
    dim: usize,
    max_len: usize,
    id: String,
}

impl HashEmbedder {
    pub fn new(dim: usize, max_len: usize) -> Self {
        let dim = dim.max(1);
        Self { dim, max_len, id: format!("hash:xxh64:d{}", dim) }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        let lower = text.to_lowercase();
        for token in lower.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()).take(self.max_len) {
            let mut hasher = XxHash64::with_seed(0);
            hasher.write(token.as_bytes());
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            v[idx] += sign * (0.5 + ((h >> 32) as u32 as f32) / (u32::MAX as f32));
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        for x in &mut v { *x /= norm; }
        v
    }
}

impl Embedder for HashEmbedder {
    fn embedder_id(&self) -> &str { &self.id }
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { self.max_len }
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> { Ok(texts.iter().map(|t| self.embed_one(t)).collect()) }
}
