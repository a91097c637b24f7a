use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use voyage_catalog::Trip;
use voyage_shared::{mask_email, Masked};
use crate::{CoreError, CoreResult};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all required fields.";
pub const INVALID_PERSONS_MESSAGE: &str = "Please enter a valid number of persons.";

/// Status written with every new booking row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Awaiting confirmation by the operator
    Pending,
}

/// Form inputs, named as they are posted by the booking page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    FullName,
    Email,
    Phone,
    TravelDate,
    Persons,
    Message,
}

impl BookingField {
    pub const ALL: [BookingField; 6] = [
        BookingField::FullName,
        BookingField::Email,
        BookingField::Phone,
        BookingField::TravelDate,
        BookingField::Persons,
        BookingField::Message,
    ];

    pub const REQUIRED: [BookingField; 4] = [
        BookingField::FullName,
        BookingField::Email,
        BookingField::Phone,
        BookingField::TravelDate,
    ];

    pub fn input_name(&self) -> &'static str {
        match self {
            BookingField::FullName => "fullName",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::TravelDate => "travelDate",
            BookingField::Persons => "persons",
            BookingField::Message => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown booking field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for BookingField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingField::ALL
            .into_iter()
            .find(|field| field.input_name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// In-progress form data for one booking attempt.
///
/// Values are kept exactly as typed; `persons` stays text until a record is
/// built so the form can echo back whatever the visitor entered.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub travel_date: String,
    pub persons: String,
    pub message: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            travel_date: String::new(),
            persons: "1".to_string(),
            message: String::new(),
        }
    }
}

impl fmt::Debug for BookingDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingDraft")
            .field("full_name", &self.full_name)
            .field("email", &mask_email(&self.email))
            .field("phone", &Masked(&self.phone))
            .field("travel_date", &self.travel_date)
            .field("persons", &self.persons)
            .field("message", &self.message)
            .finish()
    }
}

impl BookingDraft {
    pub fn get(&self, field: BookingField) -> &str {
        match field {
            BookingField::FullName => &self.full_name,
            BookingField::Email => &self.email,
            BookingField::Phone => &self.phone,
            BookingField::TravelDate => &self.travel_date,
            BookingField::Persons => &self.persons,
            BookingField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: BookingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BookingField::FullName => self.full_name = value,
            BookingField::Email => self.email = value,
            BookingField::Phone => self.phone = value,
            BookingField::TravelDate => self.travel_date = value,
            BookingField::Persons => self.persons = value,
            BookingField::Message => self.message = value,
        }
    }

    /// Required fields that are empty. Whitespace counts as a value.
    pub fn missing_required(&self) -> Vec<BookingField> {
        BookingField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    pub fn party_size(&self) -> Option<u32> {
        match self.persons.trim().parse::<u32>() {
            Ok(n) if n >= 1 => Some(n),
            _ => None,
        }
    }

    /// Validate and build the row sent to the data store.
    ///
    /// Trip id and title are copied now; later catalog edits do not touch
    /// rows already written.
    pub fn to_record(&self, trip: &Trip) -> CoreResult<BookingRecord> {
        if !self.missing_required().is_empty() {
            return Err(CoreError::ValidationError(MISSING_FIELDS_MESSAGE.to_string()));
        }
        let persons = self
            .party_size()
            .ok_or_else(|| CoreError::ValidationError(INVALID_PERSONS_MESSAGE.to_string()))?;

        Ok(BookingRecord {
            full_name: self.full_name.clone(),
            email: Masked::new(self.email.clone()),
            phone: Masked::new(self.phone.clone()),
            tour_id: trip.id.clone(),
            tour_title: trip.title.clone(),
            travel_date: self.travel_date.clone(),
            persons,
            message: if self.message.is_empty() {
                None
            } else {
                Some(self.message.clone())
            },
            status: BookingStatus::Pending,
        })
    }
}

/// Row written to the `bookings` collection. Field names are the table's
/// column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub full_name: String,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub tour_id: String,
    pub tour_title: String,
    pub travel_date: String,
    pub persons: u32,
    pub message: Option<String>,
    pub status: BookingStatus,
}
