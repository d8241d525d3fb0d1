//! Image storage
//!
//! [`ImageStore`] is the seam between the upload pipeline and wherever images
//! end up. [`LocalImageStore`] writes into a single directory on disk.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};

/// Location and size of a persisted image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub path: PathBuf,
    pub size: usize,
}

/// Destination for accepted images
///
/// A store overwrites an existing image of the same name. Writes are not
/// atomic and concurrent writers to one name race; the last one wins.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `data` under `filename`, which must be a single plain path component
    async fn save(&self, filename: &str, data: &[u8]) -> StorageResult<StoredImage>;
}

/// Create the upload directory and any missing parents.
///
/// Calling this on an existing directory is a no-op.
pub async fn ensure_upload_dir(dir: &Path) -> StorageResult<()> {
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}

/// Store that writes images into one local directory
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        ensure_upload_dir(&dir).await?;
        tracing::debug!(dir = %dir.display(), "Upload directory ready");
        Ok(Self { dir })
    }

    /// Directory images are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn resolve(&self, filename: &str) -> StorageResult<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == filename => Ok(self.dir.join(name)),
            _ => Err(StorageError::UnsafeName(filename.to_string())),
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, filename: &str, data: &[u8]) -> StorageResult<StoredImage> {
        let path = self.resolve(filename)?;
        tokio::fs::write(&path, data).await?;

        tracing::debug!(path = %path.display(), size = data.len(), "Image written");

        Ok(StoredImage {
            path,
            size: data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_upload_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("uploads");

        ensure_upload_dir(&dir).await.unwrap();
        ensure_upload_dir(&dir).await.unwrap();

        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_save_writes_into_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalImageStore::open(tmp.path().join("uploads")).await.unwrap();

        let stored = store.save("photo.png", b"abc").await.unwrap();

        assert_eq!(stored.path, store.dir().join("photo.png"));
        assert_eq!(stored.size, 3);
        assert_eq!(std::fs::read(&stored.path).unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalImageStore::open(tmp.path()).await.unwrap();

        store.save("photo.png", b"first").await.unwrap();
        store.save("photo.png", b"second").await.unwrap();

        assert_eq!(std::fs::read(tmp.path().join("photo.png")).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_save_refuses_unsafe_names() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalImageStore::open(tmp.path().join("uploads")).await.unwrap();

        for name in ["../escape.png", "a/b.png", "/abs.png", "..", "", "./x.png"] {
            let err = store.save(name, b"x").await.unwrap_err();
            assert!(matches!(err, StorageError::UnsafeName(_)), "{name}");
        }
        assert!(!tmp.path().join("escape.png").exists());
    }
}
