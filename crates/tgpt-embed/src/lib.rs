//! tgpt-embed
//!
//! Embedding providers behind `tgpt_core::traits::Embedder`: a candle-based
//! MiniLM sentence embedder and a deterministic hashing embedder.

use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::info;

use tgpt_core::config::{EmbedBackend, EmbedSettings};
use tgpt_core::traits::Embedder;

pub mod device;
pub mod hashing;
pub mod minilm;
pub mod pool;
pub mod tokenize;

pub use hashing::HashEmbedder;
pub use minilm::MiniLmEmbedder;
pub use pool::masked_mean_l2;

/// Build the configured provider.
///
/// `APP_USE_FAKE_EMBEDDINGS=1` forces the hashing embedder regardless of the
/// configured backend.
pub fn get_default_embedder(settings: &EmbedSettings, base: &Path) -> Result<Box<dyn Embedder>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false);
    if use_fake || settings.backend == EmbedBackend::Hash {
        info!(dim = settings.dim, "using hashing embedder");
        return Ok(Box::new(HashEmbedder::new(settings.dim, settings.max_len)));
    }
    let dir = resolve_model_dir(settings, base)?;
    Ok(Box::new(MiniLmEmbedder::load(&dir, settings.max_len)?))
}

fn resolve_model_dir(settings: &EmbedSettings, base: &Path) -> Result<PathBuf> {
    if let Some(p) = settings.resolved_model_dir(base) {
        if p.exists() { return Ok(p); }
        return Err(anyhow!("Configured embed.model_dir {} does not exist", p.display()));
    }
    if let Ok(dir) = std::env::var("MODEL_DIR") { let p = PathBuf::from(&dir); if p.exists() { return Ok(p); } }
    let local = base.join("models/all-MiniLM-L6-v2"); if local.exists() { return Ok(local); }
    Err(anyhow!("Could not locate the MiniLM model directory; set embed.model_dir or APP_USE_FAKE_EMBEDDINGS=1"))
}
