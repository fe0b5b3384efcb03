#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tgpt_core::traits::Embedder;
use tgpt_core::{Item, RawPage};

const ANIMAL: usize = 0;
const FELINE: usize = 1;
const CANINE: usize = 2;
const FINANCE: usize = 3;
const SENTIMENT: usize = 4;
const VEHICLE: usize = 5;
const PERFORMANCE: usize = 6;
const SECURITY: usize = 7;
const RELIABILITY: usize = 8;
const USABILITY: usize = 9;
const MAINTAINABILITY: usize = 10;
const SCALABILITY: usize = 11;
const COMPATIBILITY: usize = 12;
const COMPLIANCE: usize = 13;
pub const CONCEPTS: usize = 14;

const LEXICON: &[(&str, &[usize])] = &[
    ("cats", &[ANIMAL, FELINE]),
    ("dogs", &[ANIMAL, CANINE]),
    ("budget", &[FINANCE]),
    ("quarterly", &[FINANCE]),
    ("great", &[SENTIMENT]),
    ("cars", &[VEHICLE]),
    ("performance", &[PERFORMANCE]),
    ("respon", &[PERFORMANCE]),
    ("time", &[PERFORMANCE]),
    ("throughput", &[PERFORMANCE]),
    ("resource", &[PERFORMANCE]),
    ("utilization", &[PERFORMANCE]),
    ("security", &[SECURITY]),
    ("authentication", &[SECURITY]),
    ("authorization", &[SECURITY]),
    ("protection", &[SECURITY]),
    ("reliability", &[RELIABILITY]),
    ("availability", &[RELIABILITY]),
    ("fault", &[RELIABILITY]),
    ("tolerance", &[RELIABILITY]),
    ("recoverability", &[RELIABILITY]),
    ("usability", &[USABILITY]),
    ("user", &[USABILITY]),
    ("experience", &[USABILITY]),
    ("accessibility", &[USABILITY]),
    ("maintainability", &[MAINTAINABILITY]),
    ("code", &[MAINTAINABILITY]),
    ("quality", &[MAINTAINABILITY]),
    ("documentation", &[MAINTAINABILITY]),
    ("maintenance", &[MAINTAINABILITY]),
    ("scalability", &[SCALABILITY]),
    ("growth", &[SCALABILITY]),
    ("users", &[SCALABILITY]),
    ("transactions", &[SCALABILITY]),
    ("compatibility", &[COMPATIBILITY]),
    ("interoperability", &[COMPATIBILITY]),
    ("platforms", &[COMPATIBILITY]),
    ("compliance", &[COMPLIANCE]),
    ("regulatory", &[COMPLIANCE]),
    ("legal", &[COMPLIANCE]),
    ("standards", &[COMPLIANCE]),
];

/// Bag-of-concepts embedder over stems drawn from the test pages and the
/// category descriptions. A word counts toward the concepts of the longest
/// stem it starts with; words matching no stem contribute nothing, and text
/// with no known words maps to the zero vector.
#[derive(Debug, Default)]
pub struct ConceptEmbedder;

impl ConceptEmbedder {
    pub fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; CONCEPTS];
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            let word = word.to_lowercase();
            let stem = LEXICON.iter().filter(|(w, _)| word.starts_with(*w)).max_by_key(|(w, _)| w.len());
            if let Some((_, dims)) = stem {
                for &d in *dims { v[d] += 1.0; }
            }
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 { v.iter_mut().for_each(|x| *x /= norm); }
        v
    }
}

impl Embedder for ConceptEmbedder {
    fn embedder_id(&self) -> &str { "concept:test" }
    fn dim(&self) -> usize { CONCEPTS }
    fn max_len(&self) -> usize { 512 }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }
}

/// Fails any batch containing `marker`; otherwise delegates.
pub struct FailOn<E> {
    pub inner: E,
    pub marker: &'static str,
}

impl<E: Embedder> Embedder for FailOn<E> {
    fn embedder_id(&self) -> &str { self.inner.embedder_id() }
    fn dim(&self) -> usize { self.inner.dim() }
    fn max_len(&self) -> usize { self.inner.max_len() }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.contains(self.marker)) {
            anyhow::bail!("model unavailable");
        }
        self.inner.embed_batch(texts)
    }
}

/// Returns vectors whose length follows the text length, so a corpus of
/// differently sized texts has inconsistent dimensions.
pub struct RaggedEmbedder;

impl Embedder for RaggedEmbedder {
    fn embedder_id(&self) -> &str { "ragged:test" }
    fn dim(&self) -> usize { 0 }
    fn max_len(&self) -> usize { 512 }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| vec![1.0; t.len().max(1)]).collect())
    }
}

/// Counts texts passed to the wrapped embedder.
pub struct Counting<E> {
    pub inner: E,
    pub texts_seen: Arc<AtomicUsize>,
    pub calls: Arc<AtomicUsize>,
}

impl<E> Counting<E> {
    pub fn new(inner: E) -> Self {
        Self { inner, texts_seen: Arc::new(AtomicUsize::new(0)), calls: Arc::new(AtomicUsize::new(0)) }
    }
}

impl<E: Embedder> Embedder for Counting<E> {
    fn embedder_id(&self) -> &str { self.inner.embedder_id() }
    fn dim(&self) -> usize { self.inner.dim() }
    fn max_len(&self) -> usize { self.inner.max_len() }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts_seen.fetch_add(texts.len(), Ordering::SeqCst);
        self.inner.embed_batch(texts)
    }
}

pub fn item(title: &str, text: &str) -> Item {
    Item::new(title, text)
}

pub fn animal_pages() -> Vec<RawPage> {
    vec![
        RawPage { id: Some("1".into()), title: "Alpha".into(), body: "<p>budget cats are great</p>".into(), url: Some("https://wiki/1".into()) },
        RawPage { id: Some("2".into()), title: "Beta".into(), body: "<p>budget dogs are great</p>".into(), url: Some("https://wiki/2".into()) },
        RawPage { id: Some("3".into()), title: "Gamma".into(), body: "unrelated text about cars".into(), url: None },
    ]
}
