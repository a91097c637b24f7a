use std::collections::HashSet;
use std::path::Path;
use tracing::info;
use crate::trip::Trip;

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Duplicate trip id in catalog: {0}")]
    DuplicateId(String),
}

/// Static, ordered set of trips loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct TripCatalog {
    trips: Vec<Trip>,
}

impl TripCatalog {
    pub fn from_trips(trips: Vec<Trip>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for trip in &trips {
            if !seen.insert(trip.id.as_str()) {
                return Err(CatalogError::DuplicateId(trip.id.clone()));
            }
        }
        Ok(Self { trips })
    }

    /// Parse a JSON array of trips.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let trips: Vec<Trip> = serde_json::from_str(json)?;
        Self::from_trips(trips)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;
        info!("Loaded {} trips from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// First trip whose id equals `id`. `None` is a normal outcome.
    pub fn find(&self, id: &str) -> Option<&Trip> {
        self.position(id).map(|idx| &self.trips[idx])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.trips.iter().position(|t| t.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Trip> {
        self.trips.get(index)
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
