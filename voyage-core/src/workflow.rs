use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use voyage_catalog::Trip;
use voyage_shared::mask_email;
use crate::booking::{BookingDraft, BookingField, BookingRecord};
use crate::repository::BookingBackend;
use crate::{CoreError, CoreResult};

pub const SUCCESS_MESSAGE: &str = "Booking successful! We will contact you soon.";
pub const FALLBACK_FAILURE_MESSAGE: &str = "Something went wrong!";

/// Where a booking form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowPhase {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What the visitor sees under the submit button. Only one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Idle,
    Loading,
    Success(String),
    Failure(String),
}

impl SubmissionOutcome {
    pub fn success_message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Success(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    FieldEdited,
    SubmitRequested,
    ValidationFailed(String),
    ValidationPassed,
    WriteSucceeded,
    WriteFailed(String),
}

/// Draft plus submit state for one booking form.
#[derive(Debug, Clone)]
pub struct BookingWorkflow {
    draft: BookingDraft,
    phase: WorkflowPhase,
    outcome: SubmissionOutcome,
}

impl Default for BookingWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWorkflow {
    pub fn new() -> Self {
        Self {
            draft: BookingDraft::default(),
            phase: WorkflowPhase::Idle,
            outcome: SubmissionOutcome::Idle,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    /// The submit control is disabled while a write is in flight.
    pub fn is_submit_disabled(&self) -> bool {
        self.phase == WorkflowPhase::Submitting
    }

    pub fn edit(&mut self, field: BookingField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.apply(WorkflowEvent::FieldEdited);
    }

    /// Transition function. Returns the phase after the event.
    pub fn apply(&mut self, event: WorkflowEvent) -> WorkflowPhase {
        use WorkflowPhase::*;

        match (self.phase, event) {
            (Succeeded | Failed, WorkflowEvent::FieldEdited) => {
                self.phase = Idle;
            }
            (_, WorkflowEvent::FieldEdited) => {}
            (Idle | Succeeded | Failed, WorkflowEvent::SubmitRequested) => {
                self.phase = Validating;
                self.outcome = SubmissionOutcome::Idle;
            }
            (Validating, WorkflowEvent::ValidationFailed(msg)) => {
                self.phase = Idle;
                self.outcome = SubmissionOutcome::Failure(msg);
            }
            (Validating, WorkflowEvent::ValidationPassed) => {
                self.phase = Submitting;
                self.outcome = SubmissionOutcome::Loading;
            }
            (Submitting, WorkflowEvent::WriteSucceeded) => {
                self.phase = Succeeded;
                self.draft = BookingDraft::default();
                self.outcome = SubmissionOutcome::Success(SUCCESS_MESSAGE.to_string());
            }
            (Submitting, WorkflowEvent::WriteFailed(reason)) => {
                self.phase = Failed;
                self.outcome = SubmissionOutcome::Failure(reason);
            }
            (phase, event) => {
                warn!("Ignoring {:?} in phase {:?}", event, phase);
            }
        }
        self.phase
    }

    /// Validate the draft and, if it passes, write one booking for `trip`.
    ///
    /// Validation failures never touch the network. A failed write keeps the
    /// draft so the visitor can resubmit; a successful one clears it.
    #[tracing::instrument(
        name = "booking_submission",
        skip_all,
        fields(submission_id = %Uuid::new_v4(), tour_id = %trip.id)
    )]
    pub async fn submit(&mut self, trip: &Trip, backend: &BookingBackend) -> CoreResult<BookingRecord> {
        if self.is_submit_disabled() {
            return Err(CoreError::SubmissionInFlight);
        }

        self.apply(WorkflowEvent::SubmitRequested);

        let record = match self.draft.to_record(trip) {
            Ok(record) => record,
            Err(err) => {
                info!("Booking rejected locally: {}", err);
                self.apply(WorkflowEvent::ValidationFailed(err.user_message()));
                return Err(err);
            }
        };

        self.apply(WorkflowEvent::ValidationPassed);

        match backend.insert(&record).await {
            Ok(()) => {
                info!(
                    "Booking stored in {} for {} ({} persons)",
                    backend.collection(),
                    mask_email(record.email.expose()),
                    record.persons
                );
                self.apply(WorkflowEvent::WriteSucceeded);
                Ok(record)
            }
            Err(err) => {
                warn!("Booking write failed: {}", err);
                let reason = err
                    .reason()
                    .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());
                self.apply(WorkflowEvent::WriteFailed(reason.clone()));
                Err(CoreError::SubmissionError(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingStatus, MISSING_FIELDS_MESSAGE};
    use crate::repository::{DataStore, StoreError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingStore {
        writes: Mutex<Vec<(String, Value)>>,
        fail_with: Option<Option<String>>,
    }

    impl RecordingStore {
        fn failing(message: Option<&str>) -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail_with: Some(message.map(String::from)),
            }
        }

        fn writes(&self) -> Vec<(String, Value)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DataStore for RecordingStore {
        async fn insert_one(&self, collection: &str, record: Value) -> Result<(), StoreError> {
            self.writes.lock().unwrap().push((collection.to_string(), record));
            match &self.fail_with {
                Some(message) => Err(StoreError::Rejected {
                    status: 400,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    fn bali() -> Trip {
        Trip {
            id: "bali-escape".to_string(),
            title: "Bali Escape".to_string(),
            description: "Seven nights".to_string(),
            price: "$1,299".to_string(),
            image: "/images/bali.jpg".to_string(),
            brochure: None,
        }
    }

    fn fill_jane(workflow: &mut BookingWorkflow) {
        workflow.edit(BookingField::FullName, "Jane Doe");
        workflow.edit(BookingField::Email, "jane@x.com");
        workflow.edit(BookingField::Phone, "555-0100");
        workflow.edit(BookingField::TravelDate, "2025-12-01");
        workflow.edit(BookingField::Persons, "2");
        workflow.edit(BookingField::Message, "");
    }

    #[tokio::test]
    async fn test_successful_submission_clears_draft() {
        let store = Arc::new(RecordingStore::default());
        let backend = BookingBackend::new(store.clone(), "bookings");
        let mut workflow = BookingWorkflow::new();
        fill_jane(&mut workflow);

        let record = workflow.submit(&bali(), &backend).await.unwrap();
        assert_eq!(record.status, BookingStatus::Pending);

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "bookings");
        assert_eq!(writes[0].1["tour_id"], json!("bali-escape"));
        assert_eq!(writes[0].1["tour_title"], json!("Bali Escape"));
        assert_eq!(writes[0].1["persons"], json!(2));
        assert_eq!(writes[0].1["message"], Value::Null);
        assert_eq!(writes[0].1["status"], json!("PENDING"));

        assert_eq!(workflow.phase(), WorkflowPhase::Succeeded);
        assert_eq!(workflow.draft(), &BookingDraft::default());
        assert_eq!(workflow.outcome().success_message(), Some(SUCCESS_MESSAGE));
        assert!(workflow.outcome().failure_message().is_none());
    }

    #[tokio::test]
    async fn test_missing_field_never_calls_store() {
        for field in BookingField::REQUIRED {
            let store = Arc::new(RecordingStore::default());
            let backend = BookingBackend::new(store.clone(), "bookings");
            let mut workflow = BookingWorkflow::new();
            fill_jane(&mut workflow);
            workflow.edit(field, "");

            let err = workflow.submit(&bali(), &backend).await.unwrap_err();
            assert_eq!(err, CoreError::ValidationError(MISSING_FIELDS_MESSAGE.to_string()));
            assert!(store.writes().is_empty());
            assert_eq!(workflow.phase(), WorkflowPhase::Idle);
            assert_eq!(workflow.outcome().failure_message(), Some(MISSING_FIELDS_MESSAGE));
            assert_eq!(workflow.draft().full_name.is_empty(), field == BookingField::FullName);
        }
    }

    #[tokio::test]
    async fn test_failed_write_keeps_draft_and_reports_reason() {
        let store = Arc::new(RecordingStore::failing(Some("permission denied for table bookings")));
        let backend = BookingBackend::new(store.clone(), "bookings");
        let mut workflow = BookingWorkflow::new();
        fill_jane(&mut workflow);
        let before = workflow.draft().clone();

        let err = workflow.submit(&bali(), &backend).await.unwrap_err();
        assert_eq!(
            err,
            CoreError::SubmissionError("permission denied for table bookings".to_string())
        );
        assert_eq!(store.writes().len(), 1);
        assert_eq!(workflow.phase(), WorkflowPhase::Failed);
        assert_eq!(workflow.draft(), &before);
        assert_eq!(
            workflow.outcome().failure_message(),
            Some("permission denied for table bookings")
        );
    }

    #[tokio::test]
    async fn test_failed_write_without_reason_uses_fallback() {
        let store = Arc::new(RecordingStore::failing(None));
        let backend = BookingBackend::new(store, "bookings");
        let mut workflow = BookingWorkflow::new();
        fill_jane(&mut workflow);

        let err = workflow.submit(&bali(), &backend).await.unwrap_err();
        assert_eq!(err, CoreError::SubmissionError(FALLBACK_FAILURE_MESSAGE.to_string()));
        assert_eq!(workflow.outcome().failure_message(), Some(FALLBACK_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_failed_write_passes_whitespace_reason_through() {
        let store = Arc::new(RecordingStore::failing(Some(" ")));
        let backend = BookingBackend::new(store, "bookings");
        let mut workflow = BookingWorkflow::new();
        fill_jane(&mut workflow);

        let err = workflow.submit(&bali(), &backend).await.unwrap_err();
        assert_eq!(err, CoreError::SubmissionError(" ".to_string()));
        assert_eq!(workflow.outcome().failure_message(), Some(" "));
    }

    #[tokio::test]
    async fn test_resubmit_after_failure_clears_previous_message() {
        let failing = Arc::new(RecordingStore::failing(Some("timeout")));
        let mut workflow = BookingWorkflow::new();
        fill_jane(&mut workflow);
        let _ = workflow
            .submit(&bali(), &BookingBackend::new(failing, "bookings"))
            .await;
        assert_eq!(workflow.outcome().failure_message(), Some("timeout"));

        let working = Arc::new(RecordingStore::default());
        workflow
            .submit(&bali(), &BookingBackend::new(working.clone(), "bookings"))
            .await
            .unwrap();
        assert_eq!(working.writes().len(), 1);
        assert!(workflow.outcome().failure_message().is_none());
        assert_eq!(workflow.outcome().success_message(), Some(SUCCESS_MESSAGE));
    }

    #[test]
    fn test_edit_after_outcome_returns_to_idle() {
        let mut workflow = BookingWorkflow::new();
        workflow.apply(WorkflowEvent::SubmitRequested);
        workflow.apply(WorkflowEvent::ValidationPassed);
        assert!(workflow.is_submit_disabled());
        assert_eq!(workflow.outcome(), &SubmissionOutcome::Loading);

        workflow.apply(WorkflowEvent::WriteSucceeded);
        assert!(!workflow.is_submit_disabled());

        workflow.edit(BookingField::FullName, "J");
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert_eq!(workflow.outcome().success_message(), Some(SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_submit_rejected_while_in_flight() {
        let store = Arc::new(RecordingStore::default());
        let backend = BookingBackend::new(store.clone(), "bookings");
        let mut workflow = BookingWorkflow::new();
        fill_jane(&mut workflow);
        workflow.apply(WorkflowEvent::SubmitRequested);
        workflow.apply(WorkflowEvent::ValidationPassed);

        let err = workflow.submit(&bali(), &backend).await.unwrap_err();
        assert_eq!(err, CoreError::SubmissionInFlight);
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_out_of_order_events_are_ignored() {
        let mut workflow = BookingWorkflow::new();
        assert_eq!(workflow.apply(WorkflowEvent::WriteSucceeded), WorkflowPhase::Idle);
        assert_eq!(
            workflow.apply(WorkflowEvent::ValidationFailed("x".to_string())),
            WorkflowPhase::Idle
        );
        assert_eq!(workflow.outcome(), &SubmissionOutcome::Idle);
    }
}
