pub mod catalog;
pub mod fixtures;
pub mod orders;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use forno_core::catalog::Catalog;
use forno_core::domain::order::{Order, OrderDraft};

pub use catalog::FileCatalogStore;
pub use orders::FileOrderLog;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not decode `{path}`: {source}")]
    Decode { path: PathBuf, source: serde_json::Error },
    #[error("could not encode `{path}`: {source}")]
    Encode { path: PathBuf, source: serde_json::Error },
    #[error("could not write `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// Read-only access to the catalog document.
///
/// Implementations re-read the backing store on every call; callers must not
/// assume any caching or staleness window.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn load(&self) -> Result<Catalog, StoreError>;
}

/// Append-only access to the order log.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Assigns an id, appends the order, and persists the full log. Returns
    /// the stored entry.
    async fn append(&self, draft: OrderDraft) -> Result<Order, StoreError>;
}
