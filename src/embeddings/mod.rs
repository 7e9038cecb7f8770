// embeddings/ — Pre-trained word vectors.
//
// Provides:
// - Loading a whitespace-delimited embeddings file into a hash-map lookup
// - Fetching that file on demand when it is missing

pub mod download;
pub mod table;

pub use table::EmbeddingTable;
