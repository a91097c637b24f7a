use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use crate::booking::BookingRecord;

/// Failure reported by a data store adapter
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Data store rejected the write with status {status}: {}", message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    #[error("Data store unreachable: {0}")]
    Transport(String),

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Human-readable reason from the service, when it gave one.
    pub fn reason(&self) -> Option<String> {
        let reason = match self {
            StoreError::Rejected { message, .. } => message.clone(),
            StoreError::Transport(msg) => Some(msg.clone()),
            StoreError::Encode(err) => Some(err.to_string()),
        };
        reason.filter(|r| !r.is_empty())
    }
}

/// Hosted structured-data service: insert one record into a named collection.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn insert_one(&self, collection: &str, record: Value) -> Result<(), StoreError>;
}

/// A data store bound to the collection that receives bookings.
#[derive(Clone)]
pub struct BookingBackend {
    store: Arc<dyn DataStore>,
    collection: String,
}

impl BookingBackend {
    pub fn new(store: Arc<dyn DataStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn insert(&self, record: &BookingRecord) -> Result<(), StoreError> {
        let value = serde_json::to_value(record)?;
        self.store.insert_one(&self.collection, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_prefers_service_message() {
        let err = StoreError::Rejected {
            status: 409,
            message: Some("duplicate key value".to_string()),
        };
        assert_eq!(err.reason().as_deref(), Some("duplicate key value"));

        let err = StoreError::Rejected { status: 500, message: None };
        assert!(err.reason().is_none());

        let err = StoreError::Rejected {
            status: 500,
            message: Some(String::new()),
        };
        assert!(err.reason().is_none());

        let err = StoreError::Rejected {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.reason().as_deref(), Some("  "));

        let err = StoreError::Transport("connection refused".to_string());
        assert_eq!(err.reason().as_deref(), Some("connection refused"));
    }
}
