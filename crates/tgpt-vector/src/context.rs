//! A search context: one published corpus/index generation plus the
//! machinery to replace it.
//!
//! Rebuilds happen off to the side and are published with a single atomic
//! pointer swap. Searches load the current generation once and finish against
//! it even if a rebuild publishes a newer one meanwhile. A failed rebuild
//! leaves the previous generation (or nothing) in place.

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use tgpt_core::error::{Error, Result};
use tgpt_core::traits::{Embeddable, Embedder};

use crate::corpus::Corpus;
use crate::index::FlatL2Index;
use crate::rank::to_score;

/// An immutable corpus/index pair. Its index covers exactly its corpus.
#[derive(Debug)]
pub struct Snapshot<T> {
    generation: u64,
    corpus: Corpus<T>,
    index: FlatL2Index,
}

#[derive(Debug)]
pub struct Hit<T> {
    pub position: usize,
    pub item: Arc<T>,
    pub distance: f32,
    pub score: f64,
}

impl<T> Snapshot<T> {
    pub fn generation(&self) -> u64 { self.generation }

    pub fn corpus(&self) -> &Corpus<T> { &self.corpus }

    pub fn index(&self) -> &FlatL2Index { &self.index }

    pub fn search_vector(&self, query: &[f32], k: usize) -> Result<Vec<Hit<T>>> {
        self.index
            .search(query, k)?
            .into_iter()
            .map(|n| {
                let item = self.corpus.item(n.position).ok_or(Error::EmptyIndex)?;
                Ok(Hit { position: n.position, item: Arc::clone(item), distance: n.distance, score: to_score(n.distance) })
            })
            .collect()
    }
}

pub struct SearchContext<T> {
    name: &'static str,
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
    current: ArcSwapOption<Snapshot<T>>,
    // Serializes rebuilds; holds the last generation number handed out.
    build_lock: Mutex<u64>,
}

impl<T: Embeddable> SearchContext<T> {
    pub fn new(name: &'static str, embedder: Arc<dyn Embedder>, batch_size: usize) -> Self {
        Self { name, embedder, batch_size, current: ArcSwapOption::empty(), build_lock: Mutex::new(0) }
    }

    pub fn name(&self) -> &'static str { self.name }

    pub fn embedder(&self) -> &Arc<dyn Embedder> { &self.embedder }

    /// Replace the whole corpus. On error the published generation is untouched.
    pub fn rebuild(&self, items: Vec<T>) -> Result<Arc<Snapshot<T>>> {
        let mut last_generation = self.build_lock.lock();
        let started = Instant::now();
        let count = items.len();
        let built = Corpus::build(items, self.embedder.as_ref(), self.batch_size)
            .and_then(|corpus| FlatL2Index::build(corpus.embeddings()).map(|index| (corpus, index)));
        let (corpus, index) = match built {
            Ok(pair) => pair,
            Err(e) => {
                warn!(context = self.name, items = count, error = %e, "rebuild failed, keeping previous generation");
                return Err(e);
            }
        };
        *last_generation += 1;
        let snapshot = Arc::new(Snapshot { generation: *last_generation, corpus, index });
        self.current.store(Some(Arc::clone(&snapshot)));
        info!(
            context = self.name,
            generation = snapshot.generation,
            items = count,
            dim = snapshot.index.dim(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "published corpus"
        );
        Ok(snapshot)
    }

    pub fn snapshot(&self) -> Option<Arc<Snapshot<T>>> { self.current.load_full() }

    pub fn is_built(&self) -> bool { self.current.load().is_some() }

    pub fn search(&self, text: &str, k: usize) -> Result<Vec<Hit<T>>> {
        let snapshot = self.snapshot().ok_or(Error::NotIndexed(self.name))?;
        if k == 0 { return Err(Error::InvalidTopK); }
        let started = Instant::now();
        let query = self.embedder.embed(text).map_err(Error::embedding)?;
        let hits = snapshot.search_vector(&query, k)?;
        debug!(
            context = self.name,
            generation = snapshot.generation,
            k,
            returned = hits.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "search"
        );
        Ok(hits)
    }
}
