use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use voyage_catalog::Trip;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trips", get(list_trips))
        .route("/v1/trips/{id}", get(get_trip))
}

/// GET /v1/trips
async fn list_trips(State(state): State<AppState>) -> Json<Vec<Trip>> {
    Json(state.catalog.trips().to_vec())
}

/// GET /v1/trips/{id}
async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    state
        .catalog
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Trip not found: {}", id)))
}
