pub mod booking;
pub mod repository;
pub mod workflow;
pub mod form;

pub use booking::{BookingDraft, BookingField, BookingRecord, BookingStatus};
pub use form::{BookingForm, BookingView};
pub use repository::{BookingBackend, DataStore, StoreError};
pub use workflow::{BookingWorkflow, SubmissionOutcome, WorkflowEvent, WorkflowPhase};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A required field is missing or the party size is not a number.
    /// Never reaches the network.
    #[error("Validation failed: {0}")]
    ValidationError(String),
    /// The remote write failed; carries the reason shown to the visitor.
    #[error("Submission failed: {0}")]
    SubmissionError(String),
    #[error("Trip not found: {0}")]
    TripNotFound(String),
    #[error("A booking is already being submitted")]
    SubmissionInFlight,
}

impl CoreError {
    /// Message suitable for showing next to the form.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::ValidationError(msg) | CoreError::SubmissionError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
