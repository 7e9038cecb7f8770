// extractor.rs — Turn a `label<TAB>sentence` dataset into a feature matrix plus labels.
//
// Rows come out in file order: row i of the matrix, label i, and line i of the file
// always refer to the same example. The first line without a tab aborts the whole
// extraction; nothing partial is returned.

use std::collections::BTreeMap;
use std::path::Path;

use serde::ser::{Serialize, Serializer};

use crate::embeddings::EmbeddingTable;
use crate::error::{read_resource, FeatureError, Result};
use crate::features::pooling::pool_sentence_counted;
use crate::features::progress::{NoProgress, ProgressObserver};

/// One parsed dataset line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledSentence<'a> {
    pub label: &'a str,
    pub text: &'a str,
}

impl<'a> LabeledSentence<'a> {
    /// Split once on the first tab. `None` if the line has no tab.
    pub fn parse(line: &'a str) -> Option<Self> {
        line.split_once('\t').map(|(label, text)| Self { label, text })
    }
}

/// Dense row-major matrix of pooled features, `width == 2 * D`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    width: usize,
    data: Vec<f32>,
}

impl FeatureMatrix {
    pub fn new(width: usize) -> Self {
        Self::with_capacity(width, 0)
    }

    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn with_capacity(width: usize, rows: usize) -> Self {
        assert!(width > 0, "feature matrix width must be positive");
        Self {
            width,
            data: Vec::with_capacity(width * rows),
        }
    }

    /// # Panics
    ///
    /// Panics if `row.len()` differs from the matrix width.
    pub fn push_row(&mut self, row: &[f32]) {
        assert_eq!(row.len(), self.width, "feature row width mismatch");
        self.data.extend_from_slice(row);
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        let start = i.checked_mul(self.width)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.data.chunks_exact(self.width)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.width
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major backing storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

// Serialized as a list of rows, which is what downstream classifiers expect.
impl Serialize for FeatureMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

/// The `(X, Y)` pair handed to a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub features: FeatureMatrix,
    pub labels: Vec<String>,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Examples per label, sorted by label.
    pub fn label_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for label in &self.labels {
            *counts.entry(label.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Pools every sentence of a dataset against a shared, read-only table.
pub struct FeatureExtractor<'t, P = NoProgress> {
    table: &'t EmbeddingTable,
    progress: P,
}

impl<'t> FeatureExtractor<'t> {
    pub fn new(table: &'t EmbeddingTable) -> Self {
        Self {
            table,
            progress: NoProgress,
        }
    }
}

impl<'t, P: ProgressObserver> FeatureExtractor<'t, P> {
    /// Replace the progress observer.
    pub fn with_progress<Q: ProgressObserver>(self, progress: Q) -> FeatureExtractor<'t, Q> {
        FeatureExtractor {
            table: self.table,
            progress,
        }
    }

    /// Width of every produced row.
    pub fn feature_width(&self) -> usize {
        2 * self.table.dimension()
    }

    /// Read and extract a dataset file.
    ///
    /// A file that is not valid UTF-8 fails with [`FeatureError::Io`].
    pub fn extract(&mut self, path: &Path) -> Result<Extraction> {
        log::info!("Extracting embedding representation for {}", path.display());
        let contents = read_resource(path)?;
        let extraction = self.extract_str(&contents, path)?;
        log::info!(
            "Extracted {} rows x {} features from {}",
            extraction.len(),
            extraction.features.width(),
            path.display()
        );
        Ok(extraction)
    }

    /// Extract from dataset text already in memory. `source` is only used in error messages.
    pub fn extract_str(&mut self, contents: &str, source: &Path) -> Result<Extraction> {
        let total = contents.lines().count();
        let mut features = FeatureMatrix::with_capacity(self.feature_width(), total);
        let mut labels = Vec::with_capacity(total);
        let mut unresolved = 0usize;

        for (idx, line) in contents.lines().enumerate() {
            let sentence = LabeledSentence::parse(line).ok_or_else(|| FeatureError::MalformedDatasetLine {
                path: source.to_path_buf(),
                line: idx + 1,
            })?;

            let (row, resolved) = pool_sentence_counted(sentence.text, self.table);
            if resolved == 0 {
                unresolved += 1;
            }
            features.push_row(&row);
            labels.push(sentence.label.to_string());

            self.progress.on_line(idx + 1, total);
        }
        self.progress.finish();

        if unresolved > 0 {
            log::debug!(
                "{} of {} sentences in {} had no known words (zero rows)",
                unresolved,
                total,
                source.display()
            );
        }

        Ok(Extraction { features, labels })
    }
}

/// Extract `path` with no progress reporting.
pub fn extract(path: &Path, table: &EmbeddingTable) -> Result<Extraction> {
    FeatureExtractor::new(table).extract(path)
}
