// download.rs — Fetch the pre-trained embeddings file when it is not present locally.
//
// The table loader never touches the network; the driver calls `ensure_embeddings_file`
// first. An optional SHA256 guards against truncated or substituted downloads.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use sha2::{Digest, Sha256};

use crate::config;

/// Make sure `dest` exists, downloading it from `url` if needed.
/// Returns `true` when a download happened.
pub fn ensure_embeddings_file(dest: &Path, url: &str, expected_sha256: Option<&str>) -> anyhow::Result<bool> {
    if dest.exists() {
        log::info!("Embeddings file present at {}", dest.display());
        return Ok(false);
    }

    log::info!("Downloading pre-trained word embeddings to {}", dest.display());
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    download_and_verify(url, dest, expected_sha256)?;
    log::info!("Embeddings download complete");
    Ok(true)
}

fn download_and_verify(url: &str, dest: &Path, expected_sha256: Option<&str>) -> anyhow::Result<()> {
    let filename = dest.file_name().unwrap_or_default().to_string_lossy();
    log::info!("Downloading {} from {}", filename, url);

    let resp = ureq::get(url)
        .timeout(std::time::Duration::from_secs(config::embedding::DOWNLOAD_TIMEOUT_SECS))
        .call()
        .with_context(|| format!("failed to download {url}"))?;

    let status = resp.status();
    if status != 200 {
        bail!("HTTP {status} downloading {url}");
    }

    let mut body = Vec::new();
    resp.into_reader()
        .read_to_end(&mut body)
        .with_context(|| format!("failed to read response body for {url}"))?;

    let actual_hash = sha256_hex(&body);
    match expected_sha256 {
        Some(expected) if !expected.eq_ignore_ascii_case(&actual_hash) => {
            bail!(
                "SHA256 mismatch for {}: expected {}, got {}",
                filename,
                expected,
                actual_hash
            );
        }
        Some(_) => log::info!("SHA256 verified for {} ({})", filename, &actual_hash[..12]),
        None => log::info!("Downloaded {} ({} bytes, sha256 {})", filename, body.len(), actual_hash),
    }

    write_atomically(dest, &body)
}

/// Write to `<dest>.tmp`, then rename over `dest`.
fn write_atomically(dest: &Path, body: &[u8]) -> anyhow::Result<()> {
    let tmp_path = dest.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path)
        .with_context(|| format!("failed to create {}", tmp_path.display()))?;
    file.write_all(body)?;
    file.flush()?;
    drop(file);

    fs::rename(&tmp_path, dest)
        .with_context(|| format!("failed to rename {} -> {}", tmp_path.display(), dest.display()))?;
    Ok(())
}

fn sha256_hex(body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_file_skips_download() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // The URL is never contacted when the file already exists.
        let downloaded = ensure_embeddings_file(file.path(), "http://invalid.invalid/x", None).unwrap();
        assert!(!downloaded);
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_write_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("vectors.txt");
        write_atomically(&dest, b"cat 1 2\n").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "cat 1 2\n");
        assert!(!dir.path().join("vectors.tmp").exists());
    }
}
