//! In-memory route store.

use super::{BoxFuture, RouteStore, StoreError, StoreResult};
use crate::persistence::StoredRoute;
use crate::record::RouteRecord;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store for testing and headless replay.
#[derive(Default)]
pub struct MemoryRouteStore {
    records: RwLock<HashMap<String, RouteRecord>>,
}

impl MemoryRouteStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`.
    pub fn with_records(records: impl IntoIterator<Item = RouteRecord>) -> Self {
        let records = records.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

impl RouteStore for MemoryRouteStore {
    fn load(&self, id: &str) -> BoxFuture<'_, StoreResult<RouteRecord>> {
        let id = id.to_string();
        Box::pin(async move {
            let records = self
                .records
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            records.get(&id).cloned().ok_or(StoreError::NotFound(id))
        })
    }

    fn put(&self, record: &RouteRecord) -> BoxFuture<'_, StoreResult<()>> {
        let record = record.clone();
        Box::pin(async move {
            let mut records = self
                .records
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            records.insert(record.id.clone(), record);
            Ok(())
        })
    }

    fn save_route(&self, id: &str, route: Option<StoredRoute>) -> BoxFuture<'_, StoreResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut records = self
                .records
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            record.set_route(route);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<String>>> {
        Box::pin(async move {
            let records = self
                .records
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(records.keys().cloned().collect())
        })
    }
}
