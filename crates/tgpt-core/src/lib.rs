//! tgpt-core
//!
//! Shared domain types, the error taxonomy, the embedding contract, and
//! configuration for the tgpt search workspace.

pub mod config;
pub mod error;
pub mod page;
pub mod traits;
pub mod types;
pub mod wiki;

pub use error::{Error, Result};
pub use traits::{Embeddable, Embedder};
pub use types::{Item, NfrCategory, RawPage};
