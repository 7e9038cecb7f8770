// features/ — Sentence-level features from word vectors.
//
// Provides:
// - Min/max pooling with an explicit all-zero fallback for sentences with no known words
// - Dataset extraction into a feature matrix plus parallel labels
// - Progress observers (no-op by default, console bar for the CLI)

pub mod extractor;
pub mod pooling;
pub mod progress;

pub use extractor::{extract, Extraction, FeatureExtractor, FeatureMatrix, LabeledSentence};
pub use pooling::{
    empty_sentence_fallback, min_max_pool, min_max_pool_counted, pool_sentence, pool_sentence_counted, FeatureRow,
    EMPTY_SENTENCE_ROWS,
};
pub use progress::{ConsoleProgress, NoProgress, ProgressFn, ProgressObserver};
