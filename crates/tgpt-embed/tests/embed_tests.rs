use std::path::Path;

use tgpt_core::config::{EmbedBackend, EmbedSettings};
use tgpt_core::traits::Embedder;
use tgpt_embed::{get_default_embedder, HashEmbedder};

fn hash_settings(dim: usize) -> EmbedSettings {
    EmbedSettings { backend: EmbedBackend::Hash, dim, ..EmbedSettings::default() }
}

fn dist2(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum() }

#[test]
fn hash_embedder_shapes_and_determinism() {
    let embedder = get_default_embedder(&hash_settings(384), Path::new(".")).expect("embedder");
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 384, "embedding dim follows settings");
    assert_eq!(embedder.dim(), 384);
    assert_eq!(embedder.embedder_id(), "hash:xxh64:d384");

    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    assert_eq!(v1, v2, "same text, same vector");
}

#[test]
fn shared_words_are_closer_than_unrelated_text() {
    let e = HashEmbedder::new(256, 256);
    let q = e.embed("budget cats").unwrap();
    let near = e.embed("cats are great budget").unwrap();
    let far = e.embed("unrelated text about cars").unwrap();
    assert!(dist2(&q, &near) < dist2(&q, &far));
}

#[test]
fn case_and_punctuation_do_not_matter() {
    let e = HashEmbedder::new(64, 256);
    assert_eq!(e.embed("Hello, World!").unwrap(), e.embed("hello world").unwrap());
}

#[test]
fn batch_preserves_input_order() {
    let e = HashEmbedder::new(64, 256);
    let texts = vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()];
    let batch = e.embed_batch(&texts).unwrap();
    for (text, v) in texts.iter().zip(&batch) {
        assert_eq!(v, &e.embed(text).unwrap());
    }
}

#[test]
fn tokens_beyond_max_len_are_ignored() {
    let e = HashEmbedder::new(64, 2);
    assert_eq!(e.embed("one two three four").unwrap(), e.embed("one two").unwrap());
}

#[test]
fn missing_model_dir_is_reported() {
    let settings = EmbedSettings {
        backend: EmbedBackend::Minilm,
        model_dir: Some("/nonexistent/tgpt-model".to_string()),
        ..EmbedSettings::default()
    };
    if std::env::var("APP_USE_FAKE_EMBEDDINGS").is_ok() { return; }
    let err = get_default_embedder(&settings, Path::new(".")).err().expect("no model there");
    assert!(err.to_string().contains("does not exist"), "{err}");
}
