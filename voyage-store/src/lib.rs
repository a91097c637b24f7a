pub mod app_config;
pub mod rest_store;
pub mod memory_store;

use std::sync::Arc;
use voyage_core::DataStore;

pub use rest_store::{RestClientError, RestDataStore};
pub use memory_store::MemoryDataStore;

/// Build the data store selected by `data_store.backend`.
pub fn connect(config: &app_config::DataStoreConfig) -> Result<Arc<dyn DataStore>, RestClientError> {
    match config.backend {
        app_config::StoreBackend::Rest => Ok(Arc::new(RestDataStore::from_config(config)?)),
        app_config::StoreBackend::Memory => {
            tracing::warn!("Using in-memory data store; bookings are not persisted");
            Ok(Arc::new(MemoryDataStore::new()))
        }
    }
}
