// pooling.rs — Reduce a variable number of word vectors to one fixed-width row.
//
// Row layout: [min_0 .. min_{D-1}, max_0 .. max_{D-1}].

use crate::embeddings::EmbeddingTable;

/// One pooled sentence: `2 * D` floats, element-wise minimum then element-wise maximum.
pub type FeatureRow = Vec<f32>;

/// Number of all-zero rows pooled when no word of a sentence resolves.
/// Pooling a `(EMPTY_SENTENCE_ROWS, D)` zero matrix yields an all-zero feature row.
pub const EMPTY_SENTENCE_ROWS: usize = 2;

/// The pooling input used for empty or all-unknown sentences.
pub fn empty_sentence_fallback(dimension: usize) -> Vec<Vec<f32>> {
    vec![vec![0.0; dimension]; EMPTY_SENTENCE_ROWS]
}

/// Element-wise min and max over `vectors`, concatenated.
///
/// Every vector must have `dimension` components. An empty input pools over
/// [`empty_sentence_fallback`] instead.
pub fn min_max_pool<'a, I>(vectors: I, dimension: usize) -> FeatureRow
where
    I: IntoIterator<Item = &'a [f32]>,
{
    min_max_pool_counted(vectors, dimension).0
}

/// Like [`min_max_pool`], also returning how many vectors were pooled
/// (0 when the zero fallback was used).
pub fn min_max_pool_counted<'a, I>(vectors: I, dimension: usize) -> (FeatureRow, usize)
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut vectors = vectors.into_iter();
    match vectors.next() {
        Some(first) => fold_rows(first, vectors, dimension),
        None => {
            let fallback = empty_sentence_fallback(dimension);
            let (row, _) = fold_rows(&fallback[0], fallback[1..].iter().map(Vec::as_slice), dimension);
            (row, 0)
        }
    }
}

// Seeded from the first vector so every output value occurs in some input.
fn fold_rows<'a>(first: &[f32], rest: impl Iterator<Item = &'a [f32]>, dimension: usize) -> (FeatureRow, usize) {
    debug_assert_eq!(first.len(), dimension);
    let mut mins = first.to_vec();
    let mut maxs = first.to_vec();
    let mut pooled = 1usize;

    for v in rest {
        debug_assert_eq!(v.len(), dimension);
        for ((lo, hi), &x) in mins.iter_mut().zip(maxs.iter_mut()).zip(v) {
            *lo = lo.min(x);
            *hi = hi.max(x);
        }
        pooled += 1;
    }

    mins.extend_from_slice(&maxs);
    (mins, pooled)
}

/// Pool one whitespace-tokenized sentence against `table`.
/// Words missing from the table are skipped.
pub fn pool_sentence(text: &str, table: &EmbeddingTable) -> FeatureRow {
    pool_sentence_counted(text, table).0
}

/// Like [`pool_sentence`], also returning how many words resolved.
pub fn pool_sentence_counted(text: &str, table: &EmbeddingTable) -> (FeatureRow, usize) {
    let resolved = text.split_whitespace().filter_map(|w| table.vector_of(w));
    min_max_pool_counted(resolved, table.dimension())
}
