mod common;

use common::{item, ConceptEmbedder, RaggedEmbedder};
use tgpt_core::Error;
use tgpt_vector::{to_score, Corpus, FlatL2Index};

fn grid() -> Vec<Vec<f32>> {
    vec![vec![0.0, 0.0], vec![3.0, 4.0], vec![1.0, 0.0], vec![0.0, 2.0]]
}

#[test]
fn returns_min_k_n_ascending() {
    let index = FlatL2Index::build(&grid()).unwrap();
    assert_eq!(index.len(), 4);
    assert_eq!(index.dim(), 2);

    let top = index.search(&[0.0, 0.0], 3).unwrap();
    assert_eq!(top.iter().map(|n| n.position).collect::<Vec<_>>(), vec![0, 2, 3]);
    assert_eq!(top.iter().map(|n| n.distance).collect::<Vec<_>>(), vec![0.0, 1.0, 4.0]);

    assert_eq!(index.search(&[0.0, 0.0], 99).unwrap().len(), 4);
}

#[test]
fn own_embedding_is_at_distance_zero() {
    let rows = grid();
    let index = FlatL2Index::build(&rows).unwrap();
    for (pos, row) in rows.iter().enumerate() {
        let top = index.search(row, 1).unwrap();
        assert_eq!(top[0].position, pos);
        assert_eq!(top[0].distance, 0.0);
        assert_eq!(to_score(top[0].distance), 1.0);
    }
}

#[test]
fn distances_are_squared() {
    let index = FlatL2Index::build(&grid()).unwrap();
    let top = index.search(&[0.0, 0.0], 4).unwrap();
    assert_eq!(top[3].position, 1);
    assert_eq!(top[3].distance, 25.0);
    assert!((to_score(25.0) - 1.0 / 26.0).abs() < 1e-12);
}

#[test]
fn invalid_inputs_are_errors() {
    assert!(matches!(FlatL2Index::build(&[]), Err(Error::EmptyInput)));
    assert!(matches!(
        FlatL2Index::build(&[vec![1.0, 2.0], vec![1.0]]),
        Err(Error::DimensionMismatch { expected: 2, got: 1 })
    ));

    let index = FlatL2Index::build(&grid()).unwrap();
    assert!(matches!(index.search(&[1.0, 2.0, 3.0], 1), Err(Error::DimensionMismatch { expected: 2, got: 3 })));
    assert!(matches!(index.search(&[1.0, 2.0], 0), Err(Error::InvalidTopK)));
    assert!(matches!(FlatL2Index::default().search(&[1.0], 1), Err(Error::EmptyIndex)));
}

#[test]
fn corpus_pairs_items_with_embeddings_in_order() {
    let items = vec![item("Alpha", "cats"), item("Beta", "budget"), item("Gamma", "cars")];
    let corpus = Corpus::build(items, &ConceptEmbedder, 2).unwrap();
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.dim(), common::CONCEPTS);
    assert_eq!(corpus.item(1).unwrap().title, "Beta");
    assert_eq!(corpus.embedding(1).unwrap(), ConceptEmbedder::vector("Beta budget").as_slice());
}

#[test]
fn corpus_rejects_empty_and_ragged_input() {
    assert!(matches!(Corpus::<tgpt_core::Item>::build(Vec::new(), &ConceptEmbedder, 8), Err(Error::EmptyInput)));
    let ragged = Corpus::build(vec![item("a", ""), item("abc", "defg")], &RaggedEmbedder, 8);
    assert!(matches!(ragged, Err(Error::DimensionMismatch { .. })));
}
