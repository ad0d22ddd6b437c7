//! Output files

use crate::types::*;
use std::path::{Path, PathBuf};

/// Rename an existing file at `path` to the `.bak` extension, replacing any
/// older backup. Returns the backup path when a file was moved.
pub async fn backup_existing(path: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await? {
        return Ok(None);
    }

    let backup = path.with_extension("bak");
    tokio::fs::rename(path, &backup).await?;
    log::info!("Moved {} to {}", path.display(), backup.display());
    Ok(Some(backup))
}

/// Write `bytes` to `path`, creating parent directories
pub async fn save(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_backup_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.docx");

        assert_eq!(backup_existing(&path).await.unwrap(), None);

        save(&path, b"first").await.unwrap();
        let backup = backup_existing(&path).await.unwrap().unwrap();
        assert_eq!(backup, dir.path().join("planner.bak"));
        assert!(!path.exists());

        save(&path, b"second").await.unwrap();
        backup_existing(&path).await.unwrap();
        assert_eq!(std::fs::read(&backup).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_save_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/out.docx");
        save(&path, b"x").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"x");
    }
}
