use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot build an index over zero items")]
    EmptyInput,

    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Index holds no vectors")]
    EmptyIndex,

    #[error("No {0} indexed")]
    NotIndexed(&'static str),

    #[error("Embedding failed: {0:#}")]
    Embedding(anyhow::Error),

    #[error("Query text is empty")]
    EmptyQuery,

    #[error("top-k must be at least 1")]
    InvalidTopK,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed wiki payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl Error {
    pub fn embedding(err: impl Into<anyhow::Error>) -> Self { Error::Embedding(err.into()) }

    /// True for the two "nothing to search yet" conditions.
    pub fn is_not_indexed(&self) -> bool { matches!(self, Error::NotIndexed(_) | Error::EmptyIndex) }
}

pub type Result<T> = std::result::Result<T, Error>;
