use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Form, Router,
};
use tracing::{debug, info};
use voyage_core::{BookingField, BookingForm, BookingView};
use crate::render;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog))
        .route("/book/{id}", get(show_booking).post(submit_booking))
}

fn respond(form: &mut BookingForm<'_>) -> (StatusCode, Html<String>) {
    let view = form.view();
    let status = match view {
        BookingView::NotFound { .. } => StatusCode::NOT_FOUND,
        BookingView::Form { .. } => StatusCode::OK,
    };
    (status, Html(render::booking_page(&view)))
}

/// GET /
async fn catalog(State(state): State<AppState>) -> Html<String> {
    Html(render::catalog_page(&state.catalog))
}

/// GET /book/{id}
async fn show_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Html<String>) {
    let mut form = BookingForm::new(&state.catalog, id);
    respond(&mut form)
}

/// POST /book/{id}
///
/// Applies the posted inputs as field edits, submits once, and re-renders
/// the page with the outcome.
async fn submit_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(inputs): Form<Vec<(String, String)>>,
) -> (StatusCode, Html<String>) {
    let mut form = BookingForm::new(&state.catalog, id);
    if form.trip().is_none() {
        return respond(&mut form);
    }

    for (name, value) in inputs {
        match name.parse::<BookingField>() {
            Ok(field) => form.edit(field, value),
            Err(err) => debug!("{}", err),
        }
    }

    match form.submit(&state.bookings).await {
        Ok(record) => info!("Booking page accepted booking for {}", record.tour_id),
        Err(err) => info!("Booking page submission not accepted: {}", err),
    }

    respond(&mut form)
}
