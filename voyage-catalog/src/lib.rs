pub mod trip;
pub mod catalog;
pub mod lookup;

pub use trip::Trip;
pub use catalog::{CatalogError, TripCatalog};
pub use lookup::TripLookup;
