//! Blob storage behind a provider trait.
//!
//! Uploaded drawings and documents go through [`FileStore`] so the service
//! can swap the local-disk implementation for an object store without
//! touching handlers. Paths are always forward-slash relative keys like
//! `42/9f8e...-site-plan.pdf`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

/// Storage provider seam for uploaded project files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `bytes` under `path`, creating parent directories/prefixes as
    /// needed. Overwrites any existing object at the same path.
    async fn put(&self, path: &str, bytes: &[u8]) -> anyhow::Result<()>;

    /// Remove the object at `path`. Removing a missing object is an error so
    /// callers notice inconsistent metadata.
    async fn delete(&self, path: &str) -> anyhow::Result<()>;

    /// The publicly reachable URL for an object.
    fn public_url(&self, path: &str) -> String;
}

/// Local-filesystem implementation of [`FileStore`].
pub struct LocalFileStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStore {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a storage key to an absolute path, rejecting keys that would
    /// escape the storage root.
    fn resolve(&self, path: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|component| {
            matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if escapes {
            anyhow::bail!("Invalid storage path: {path}");
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> anyhow::Result<()> {
        let full_path = self.resolve(path)?;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, bytes).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> anyhow::Result<()> {
        let full_path = self.resolve(path)?;
        tokio::fs::remove_file(&full_path).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/files/{path}", self.public_base_url)
    }
}
