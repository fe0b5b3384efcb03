//! Exact brute-force L2 index.
//!
//! Vectors are stored row-major in one contiguous buffer. Every query is
//! compared against every row; there is no approximation or quantization.

use tgpt_core::error::{Error, Result};

/// One search result: row position in insertion order and squared L2 distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

#[derive(Debug, Clone, Default)]
pub struct FlatL2Index {
    dim: usize,
    data: Vec<f32>,
}

impl FlatL2Index {
    pub fn build(embeddings: &[Vec<f32>]) -> Result<Self> {
        let first = embeddings.first().ok_or(Error::EmptyInput)?;
        let dim = first.len();
        let mut data = Vec::with_capacity(dim * embeddings.len());
        for e in embeddings {
            if e.len() != dim { return Err(Error::DimensionMismatch { expected: dim, got: e.len() }); }
            data.extend_from_slice(e);
        }
        Ok(Self { dim, data })
    }

    pub fn dim(&self) -> usize { self.dim }

    pub fn len(&self) -> usize { if self.dim == 0 { 0 } else { self.data.len() / self.dim } }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        if position >= self.len() { return None; }
        Some(&self.data[position * self.dim..(position + 1) * self.dim])
    }

    /// The `k` nearest rows by squared L2 distance, ascending; ties keep
    /// insertion order. Returns `min(k, len)` neighbors.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if self.is_empty() { return Err(Error::EmptyIndex); }
        if k == 0 { return Err(Error::InvalidTopK); }
        if query.len() != self.dim { return Err(Error::DimensionMismatch { expected: self.dim, got: query.len() }); }

        let mut hits: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(position, row)| Neighbor { position, distance: squared_l2(query, row) })
            .collect();

        let cmp = |a: &Neighbor, b: &Neighbor| a.distance.total_cmp(&b.distance).then(a.position.cmp(&b.position));
        if k < hits.len() {
            hits.select_nth_unstable_by(k - 1, cmp);
            hits.truncate(k);
        }
        hits.sort_unstable_by(cmp);
        Ok(hits)
    }
}

pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| { let d = x - y; d * d }).sum()
}
