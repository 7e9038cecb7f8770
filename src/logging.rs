use std::path::PathBuf;

use anyhow::Context;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, Naming};

use crate::config;

/// File log at DEBUG with rotation; stderr gets warnings, or info with `verbose`.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let log_dir = log_dir()?;
    let duplicate = if verbose { Duplicate::Info } else { Duplicate::Warn };

    Logger::try_with_str("debug")?
        .log_to_file(FileSpec::default().directory(log_dir).basename(config::logging::LOG_FILE_NAME))
        .rotate(
            Criterion::Size(config::logging::LOG_ROTATE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config::logging::LOG_ROTATE_KEEP_FILES),
        )
        .duplicate_to_stderr(duplicate)
        .format(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    log::info!("{}", "=".repeat(60));
    log::info!("embd_features starting");
    log::info!("Version: {}", config::VERSION);
    log::info!("Platform: {}", std::env::consts::OS);
    log::info!("{}", "=".repeat(60));

    Ok(())
}

fn log_dir() -> anyhow::Result<PathBuf> {
    let home = home_dir().context("cannot determine home directory for logs")?;
    let dir = home.join(config::logging::LOG_DIR_REL);
    std::fs::create_dir_all(&dir).with_context(|| format!("failed creating log dir {}", dir.display()))?;
    Ok(dir)
}

fn home_dir() -> Option<PathBuf> {
    home_from(std::env::var("HOME").ok(), std::env::var("USERPROFILE").ok())
}

// $HOME first, USERPROFILE as the Windows fallback; empty values count as unset.
fn home_from(home: Option<String>, userprofile: Option<String>) -> Option<PathBuf> {
    home.filter(|v| !v.is_empty())
        .or_else(|| userprofile.filter(|v| !v.is_empty()))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_prefers_home_var() {
        assert_eq!(
            home_from(Some("/home/u".into()), Some("C:\\Users\\u".into())),
            Some(PathBuf::from("/home/u"))
        );
    }

    #[test]
    fn test_home_falls_back_when_empty() {
        assert_eq!(
            home_from(Some(String::new()), Some("C:\\Users\\u".into())),
            Some(PathBuf::from("C:\\Users\\u"))
        );
        assert_eq!(home_from(None, Some(String::new())), None);
        assert_eq!(home_from(None, None), None);
    }
}
