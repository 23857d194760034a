//! Storage abstraction for route records.
//!
//! The hosted relational store lives outside this crate; this trait is the
//! slice of its API the route editor consumes.

mod memory;

pub use memory::MemoryRouteStore;

use crate::persistence::StoredRoute;
use crate::record::RouteRecord;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for route record storage backends.
pub trait RouteStore {
    /// Load a record.
    fn load(&self, id: &str) -> BoxFuture<'_, StoreResult<RouteRecord>>;

    /// Insert or replace a record.
    fn put(&self, record: &RouteRecord) -> BoxFuture<'_, StoreResult<()>>;

    /// Replace a record's route in one write; `None` removes the custom route.
    fn save_route(&self, id: &str, route: Option<StoredRoute>) -> BoxFuture<'_, StoreResult<()>>;

    /// List all record IDs.
    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<String>>>;
}
