use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use voyage_core::{BookingField, BookingForm, BookingRecord};
use crate::error::AppError;
use crate::state::AppState;

/// Booking request for script clients. Missing text fields count as empty.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub travel_date: String,
    #[serde(default)]
    pub persons: Option<PartySize>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Party size as sent by the client: a JSON number or the raw input text.
/// Either way it goes through the same coercion as the HTML form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PartySize {
    Number(serde_json::Number),
    Text(String),
}

impl PartySize {
    fn into_input(self) -> String {
        match self {
            PartySize::Number(n) => n.to_string(),
            PartySize::Text(s) => s,
        }
    }
}

impl BookingRequest {
    fn fill(self, form: &mut BookingForm<'_>) {
        form.edit(BookingField::FullName, self.full_name);
        form.edit(BookingField::Email, self.email);
        form.edit(BookingField::Phone, self.phone);
        form.edit(BookingField::TravelDate, self.travel_date);
        if let Some(persons) = self.persons {
            form.edit(BookingField::Persons, persons.into_input());
        }
        form.edit(BookingField::Message, self.message.unwrap_or_default());
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub message: String,
    pub booking: BookingRecord,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/trips/{id}/bookings", post(create_booking))
}

/// POST /v1/trips/{id}/bookings
async fn create_booking(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    Json(req): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let mut form = BookingForm::new(&state.catalog, trip_id);
    if form.trip().is_none() {
        return Err(AppError::NotFoundError(format!("Trip not found: {}", form.route_id())));
    }

    req.fill(&mut form);
    let booking = form.submit(&state.bookings).await?;

    let message = form
        .workflow()
        .outcome()
        .success_message()
        .unwrap_or_default()
        .to_string();
    info!("Booking accepted for {}", booking.tour_id);

    Ok((StatusCode::CREATED, Json(BookingResponse { message, booking })))
}
