// table.rs — In-memory word → vector lookup built from a plain-text embeddings file.
//
// Format: one word per line, followed by exactly D whitespace-separated floats.
// No header row. Blank lines are ignored.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{read_resource, FeatureError, Result};

/// Immutable lookup table from word to a fixed-length vector.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl EmbeddingTable {
    /// Load a table from `path`, where every vector must have `dimension` components.
    ///
    /// Fails on the first malformed line. If at least two data lines exist and all of
    /// them carry the same vector length, which is not `dimension`, the resource as a
    /// whole has another dimensionality and the error is
    /// [`FeatureError::DimensionMismatch`]. Any other wrong token count, and any value
    /// that is not a finite number, is a [`FeatureError::MalformedEmbeddingLine`].
    ///
    /// A file that is not valid UTF-8 fails with [`FeatureError::Io`].
    pub fn load(path: &Path, dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        log::info!("Reading word embeddings from {} (D={})", path.display(), dimension);

        let contents = read_resource(path)?;
        let table = Self::parse(&contents, dimension, path)?;

        log::info!("Loaded {} word vectors from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse already-read embeddings text. `source` is only used in error messages.
    pub fn parse(contents: &str, dimension: usize, source: &Path) -> Result<Self> {
        check_dimension(dimension)?;

        let mut vectors: HashMap<String, Vec<f32>> = HashMap::new();
        let mut seen_data_line = false;
        let mut duplicates = 0usize;

        for (idx, line) in contents.lines().enumerate() {
            let line_no = idx + 1;
            let mut tokens = line.split_whitespace();
            let Some(word) = tokens.next() else {
                continue;
            };
            let values: Vec<&str> = tokens.collect();

            let malformed = |reason: String| FeatureError::MalformedEmbeddingLine {
                path: source.to_path_buf(),
                line: line_no,
                reason,
            };

            if values.is_empty() {
                return Err(malformed(format!("word '{word}' has no vector")));
            }
            if values.len() != dimension {
                if !seen_data_line {
                    if let Some(actual) = uniform_vector_len(contents) {
                        return Err(FeatureError::DimensionMismatch {
                            expected: dimension,
                            actual,
                        });
                    }
                }
                return Err(malformed(format!(
                    "expected {} tokens, found {}",
                    dimension + 1,
                    values.len() + 1
                )));
            }
            seen_data_line = true;

            let mut vector = Vec::with_capacity(dimension);
            for (col, raw) in values.iter().enumerate() {
                let v = raw
                    .parse::<f32>()
                    .map_err(|_| malformed(format!("non-numeric value '{raw}' in column {}", col + 1)))?;
                // `parse` accepts nan/inf; they would poison min/max pooling.
                if !v.is_finite() {
                    return Err(malformed(format!("non-finite value '{raw}' in column {}", col + 1)));
                }
                vector.push(v);
            }

            // First occurrence wins.
            match vectors.entry(word.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(vector);
                }
                Entry::Occupied(_) => {
                    duplicates += 1;
                    log::debug!("Duplicate word '{}' at line {}, keeping first vector", word, line_no);
                }
            }
        }

        if duplicates > 0 {
            log::warn!(
                "{} duplicate word(s) in {}; kept the first vector for each",
                duplicates,
                source.display()
            );
        }

        Ok(Self { vectors, dimension })
    }

    /// Build a table from vectors already in memory.
    pub fn from_map(vectors: HashMap<String, Vec<f32>>, dimension: usize) -> Result<Self> {
        check_dimension(dimension)?;
        if let Some(bad) = vectors.values().find(|v| v.len() != dimension) {
            return Err(FeatureError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }
        if let Some(word) = vectors
            .iter()
            .find(|(_, v)| v.iter().any(|x| !x.is_finite()))
            .map(|(w, _)| w)
        {
            return Err(FeatureError::InvalidConfig(format!(
                "vector for '{word}' contains a non-finite value"
            )));
        }
        Ok(Self { vectors, dimension })
    }

    /// Exact, case-sensitive lookup.
    pub fn vector_of(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Vector length shared by every data line, if there are at least two of them.
fn uniform_vector_len(contents: &str) -> Option<usize> {
    let mut lens = contents
        .lines()
        .map(|l| l.split_whitespace().count())
        .filter(|&n| n > 0)
        .map(|n| n - 1);
    let first = lens.next()?;
    let mut data_lines = 1usize;
    for n in lens {
        if n != first {
            return None;
        }
        data_lines += 1;
    }
    (data_lines >= 2).then_some(first)
}

fn check_dimension(dimension: usize) -> Result<()> {
    if dimension == 0 {
        return Err(FeatureError::InvalidConfig(
            "embedding size must be a positive integer".to_string(),
        ));
    }
    Ok(())
}
