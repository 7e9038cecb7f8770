//! Fixed-width sentence features from pre-trained word embeddings.
//!
//! An [`EmbeddingTable`] is loaded once and passed by reference into every
//! [`FeatureExtractor`] call. Each sentence becomes one row of `2 * D` floats:
//! the element-wise minimum of its known word vectors followed by the
//! element-wise maximum.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;

pub use embeddings::EmbeddingTable;
pub use error::{FeatureError, Result};
pub use features::{extract, Extraction, FeatureExtractor, FeatureMatrix};
