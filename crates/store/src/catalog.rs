use std::path::{Path, PathBuf};

use async_trait::async_trait;

use forno_core::catalog::Catalog;

use crate::{CatalogStore, StoreError};

/// Catalog backed by a single JSON document on local disk.
///
/// The file is owned externally and treated as read-only; every `load`
/// re-reads it, so catalog updates are picked up without a restart.
pub struct FileCatalogStore {
    path: PathBuf,
}

impl FileCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    async fn load(&self) -> Result<Catalog, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StoreError::Read { path: self.path.clone(), source })?;

        serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Decode { path: self.path.clone(), source })
    }
}
