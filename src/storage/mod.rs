// This file is part of the product MiniArcade.
// SPDX-FileCopyrightText: 2026 MiniArcade Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug)]
pub enum StorageError {
    InvalidKey(String),
    Io(std::io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::InvalidKey(key) => write!(f, "Invalid storage key: {}", key),
            StorageError::Io(e) => write!(f, "Storage I/O error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Blob storage for uploaded screenshots, keyed by relative paths like
/// `{user_id}/{timestamp}.webp`.
#[async_trait]
pub trait ScreenshotStorage: Send + Sync {
    /// Persist the bytes and return the public URL they are served
    /// from.
    async fn store(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError>;
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}

pub struct FsScreenshotStorage {
    root: PathBuf,
    public_base: String,
}

impl FsScreenshotStorage {
    pub fn new(root: PathBuf, public_base: String) -> Self {
        Self {
            root,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a key to a path under the storage root. Rejects
    /// anything that could escape it.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.len() > 256 {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment.starts_with('.') {
                return Err(StorageError::InvalidKey(key.to_string()));
            }
            if !segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            {
                return Err(StorageError::InvalidKey(key.to_string()));
            }
            path.push(segment);
        }
        Ok(path)
    }
}

#[async_trait]
impl ScreenshotStorage for FsScreenshotStorage {
    async fn store(&self, key: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write to a temp name first so a crash never leaves a
        // half-written file at the served path.
        let temp_path = path.with_extension(format!("tmp-{}", Uuid::new_v4()));
        tokio::fs::write(&temp_path, bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(format!("{}/{}", self.public_base, key))
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.resolve(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
