// output.rs — JSON hand-off of extracted (X, Y) pairs to an external classifier.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::config;
use crate::features::{Extraction, FeatureMatrix};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFeatures<'a> {
    pub source: String,
    pub labels: &'a [String],
    pub features: &'a FeatureMatrix,
}

impl<'a> DatasetFeatures<'a> {
    pub fn new(source: &Path, extraction: &'a Extraction) -> Self {
        Self {
            source: source.to_string_lossy().into_owned(),
            labels: &extraction.labels,
            features: &extraction.features,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureReport<'a> {
    pub version: &'static str,
    pub generated_at: String,
    pub embedding_size: usize,
    pub feature_width: usize,
    pub train: DatasetFeatures<'a>,
    pub test: DatasetFeatures<'a>,
}

impl<'a> FeatureReport<'a> {
    pub fn new(embedding_size: usize, train: DatasetFeatures<'a>, test: DatasetFeatures<'a>) -> Self {
        Self {
            version: config::VERSION,
            generated_at: chrono::Local::now().to_rfc3339(),
            embedding_size,
            feature_width: 2 * embedding_size,
            train,
            test,
        }
    }
}

pub fn write_json(out: &mut dyn Write, report: &FeatureReport<'_>) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, report).context("failed serializing feature report")?;
    writeln!(out)?;
    out.flush().context("failed flushing feature report")?;
    Ok(())
}

/// Write the report to `path`, replacing any existing file.
pub fn write_json_file(path: &Path, report: &FeatureReport<'_>) -> anyhow::Result<()> {
    let mut file = fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_json(&mut file, report)?;
    log::info!("Wrote features to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Extraction {
        let mut features = FeatureMatrix::new(2);
        features.push_row(&[0.5, 1.5]);
        Extraction {
            features,
            labels: vec!["pos".to_string()],
        }
    }

    #[test]
    fn test_report_shape() {
        let train = sample();
        let test = sample();
        let report = FeatureReport::new(
            1,
            DatasetFeatures::new(Path::new("train.tsv"), &train),
            DatasetFeatures::new(Path::new("test.tsv"), &test),
        );

        let mut buf = Vec::new();
        write_json(&mut buf, &report).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(v["version"], config::VERSION);
        assert_eq!(v["embeddingSize"], 1);
        assert_eq!(v["featureWidth"], 2);
        assert_eq!(v["train"]["source"], "train.tsv");
        assert_eq!(v["train"]["labels"], serde_json::json!(["pos"]));
        assert_eq!(v["test"]["features"], serde_json::json!([[0.5, 1.5]]));
        assert!(v["generatedAt"].as_str().is_some());
    }
}
