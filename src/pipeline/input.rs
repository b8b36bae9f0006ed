//! Reading markdown documents from disk.
//!
//! Every scanner takes `&str`; this module is the only place that touches
//! the file system on the read side. I/O failures are mapped onto
//! [`PortfolioError`] variants so callers can tell a missing file (use
//! defaults) from one that exists but cannot be read.

use crate::error::PortfolioError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Check that `dir` exists and is a directory.
pub async fn check_data_dir(dir: &Path) -> Result<(), PortfolioError> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(PortfolioError::DataDirNotFound {
            path: dir.to_path_buf(),
        }),
    }
}

/// Read a markdown file as UTF-8 text.
pub async fn read_markdown(path: &Path) -> Result<String, PortfolioError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| map_read_error(path.to_path_buf(), e))?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

fn map_read_error(path: PathBuf, e: std::io::Error) -> PortfolioError {
    match e.kind() {
        ErrorKind::NotFound => PortfolioError::FileNotFound { path },
        ErrorKind::PermissionDenied => PortfolioError::PermissionDenied { path },
        _ => PortfolioError::ReadFailed { path, source: e },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personal.md");
        std::fs::write(&path, "# Profile\nname: 山田\n").unwrap();

        let content = read_markdown(&path).await.unwrap();
        assert!(content.contains("山田"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_markdown(&dir.path().join("nope.md")).await.unwrap_err();
        assert!(matches!(err, PortfolioError::FileNotFound { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_non_utf8_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_markdown(&path).await.unwrap_err();
        assert!(matches!(err, PortfolioError::ReadFailed { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn test_check_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(dir.path()).await.is_ok());

        let file = dir.path().join("file.md");
        std::fs::write(&file, "").unwrap();
        assert!(matches!(
            check_data_dir(&file).await,
            Err(PortfolioError::DataDirNotFound { .. })
        ));
        assert!(check_data_dir(&dir.path().join("missing")).await.is_err());
    }
}
