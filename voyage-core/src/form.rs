use voyage_catalog::{Trip, TripCatalog, TripLookup};
use crate::booking::{BookingDraft, BookingField, BookingRecord};
use crate::repository::BookingBackend;
use crate::workflow::{BookingWorkflow, SubmissionOutcome};
use crate::{CoreError, CoreResult};

/// What the booking page should show for the current route.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingView<'v> {
    /// No trip matches the route id. Render a way back to the catalog.
    NotFound { id: &'v str },
    Form {
        trip: &'v Trip,
        draft: &'v BookingDraft,
        outcome: &'v SubmissionOutcome,
        submit_disabled: bool,
    },
}

/// One booking page instance: route lookup plus its own workflow.
///
/// Instances share nothing mutable; each request or visitor gets a fresh one.
pub struct BookingForm<'a> {
    lookup: TripLookup<'a>,
    route_id: String,
    workflow: BookingWorkflow,
}

impl<'a> BookingForm<'a> {
    pub fn new(catalog: &'a TripCatalog, route_id: impl Into<String>) -> Self {
        Self {
            lookup: TripLookup::new(catalog),
            route_id: route_id.into(),
            workflow: BookingWorkflow::new(),
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    /// Follow a new route. Moving to a different trip drops the draft.
    pub fn navigate(&mut self, route_id: impl Into<String>) {
        let route_id = route_id.into();
        if route_id != self.route_id {
            self.route_id = route_id;
            self.workflow = BookingWorkflow::new();
        }
    }

    pub fn trip(&mut self) -> Option<&'a Trip> {
        self.lookup.resolve(&self.route_id)
    }

    pub fn workflow(&self) -> &BookingWorkflow {
        &self.workflow
    }

    pub fn edit(&mut self, field: BookingField, value: impl Into<String>) {
        self.workflow.edit(field, value);
    }

    pub async fn submit(&mut self, backend: &BookingBackend) -> CoreResult<BookingRecord> {
        let trip = self
            .trip()
            .ok_or_else(|| CoreError::TripNotFound(self.route_id.clone()))?;
        self.workflow.submit(trip, backend).await
    }

    pub fn view(&mut self) -> BookingView<'_> {
        match self.lookup.resolve(&self.route_id) {
            Some(trip) => BookingView::Form {
                trip,
                draft: self.workflow.draft(),
                outcome: self.workflow.outcome(),
                submit_disabled: self.workflow.is_submit_disabled(),
            },
            None => BookingView::NotFound { id: &self.route_id },
        }
    }
}
