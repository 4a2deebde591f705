use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use forno_core::domain::order::{Order, OrderDraft, OrderId};

use crate::{OrderStore, StoreError};

/// Order log backed by a single JSON array on local disk.
///
/// The whole read-modify-write cycle runs under one async mutex, so
/// concurrent submissions within this process cannot lose entries. The lock
/// also guards id issuance: ids are millisecond timestamps forced above both
/// the last id issued here and the largest id already on disk.
pub struct FileOrderLog {
    path: PathBuf,
    writer: Mutex<IdCursor>,
}

#[derive(Default)]
struct IdCursor {
    last_issued: i64,
}

impl FileOrderLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), writer: Mutex::new(IdCursor::default()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty log. Any other read or decode failure is
    /// surfaced instead of being treated as "no prior orders".
    async fn load(&self) -> Result<Vec<Order>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };

        serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Decode { path: self.path.clone(), source })
    }

    fn next_id(cursor: &mut IdCursor, existing: &[Order]) -> OrderId {
        let on_disk = existing.iter().map(|order| order.id.0).max().unwrap_or(0);
        let id = Utc::now()
            .timestamp_millis()
            .max(cursor.last_issued + 1)
            .max(on_disk + 1);
        cursor.last_issued = id;
        OrderId(id)
    }
}

#[async_trait]
impl OrderStore for FileOrderLog {
    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        self.load().await
    }

    async fn append(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let mut cursor = self.writer.lock().await;

        let mut orders = self.load().await?;
        let order = draft.into_order(Self::next_id(&mut cursor, &orders));
        orders.push(order.clone());

        let body = serde_json::to_vec_pretty(&orders)
            .map_err(|source| StoreError::Encode { path: self.path.clone(), source })?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })?;

        Ok(order)
    }
}
