use std::sync::Arc;
use voyage_catalog::TripCatalog;
use voyage_core::BookingBackend;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<TripCatalog>,
    pub bookings: BookingBackend,
}
