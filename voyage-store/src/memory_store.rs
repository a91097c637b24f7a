use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use voyage_core::{DataStore, StoreError};

/// In-memory data store for local development and tests.
///
/// Can be switched into a failing mode to exercise the error path.
#[derive(Default)]
pub struct MemoryDataStore {
    rows: RwLock<HashMap<String, Vec<Value>>>,
    failure: RwLock<Option<Option<String>>>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every insert until `recover` is called. `None` means the
    /// rejection carries no message.
    pub async fn fail_with(&self, message: Option<&str>) {
        *self.failure.write().await = Some(message.map(String::from));
    }

    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    pub async fn rows(&self, collection: &str) -> Vec<Value> {
        self.rows
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DataStore for MemoryDataStore {
    async fn insert_one(&self, collection: &str, record: Value) -> Result<(), StoreError> {
        if let Some(message) = self.failure.read().await.clone() {
            return Err(StoreError::Rejected { status: 503, message });
        }
        self.rows
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(record);
        Ok(())
    }
}
