use std::time::Duration;

use scraper_core::Record;

use crate::{PositionStore, StoreError, StoreOp, WriteError};

/// Runs the per-record write sequence: hash, hash expiry, index entry, index expiry.
#[derive(Debug, Clone)]
pub struct StoreWriter {
    ttl: Duration,
    index_key: String,
}

impl StoreWriter {
    pub fn new(ttl: Duration, index_key: impl Into<String>) -> Self {
        Self {
            ttl,
            index_key: index_key.into(),
        }
    }

    pub fn index_key(&self) -> &str {
        &self.index_key
    }

    /// Each step is awaited before the next; the first failure stops the
    /// sequence and nothing already applied is rolled back.
    pub async fn write(&self, store: &dyn PositionStore, record: &Record) -> Result<(), WriteError> {
        let fail = |op: StoreOp| {
            let id = record.id.clone();
            move |source: StoreError| WriteError { id, op, source }
        };

        store
            .hash_set(&record.id, &record.hash_fields())
            .await
            .map_err(fail(StoreOp::HashSet))?;
        store
            .expire(&record.id, self.ttl)
            .await
            .map_err(fail(StoreOp::Expire))?;
        store
            .sorted_set_add(&self.index_key, record.index_score(), &record.id)
            .await
            .map_err(fail(StoreOp::IndexAdd))?;
        store
            .expire(&self.index_key, self.ttl)
            .await
            .map_err(fail(StoreOp::IndexExpire))?;
        Ok(())
    }
}
