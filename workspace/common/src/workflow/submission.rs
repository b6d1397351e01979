use std::cell::{Cell, RefCell};

use tracing::{debug, info, instrument, warn};

use super::RecordInsert;
use crate::error::WorkflowError;
use crate::form::{Field, FormDraft};
use crate::guard::InFlight;
use crate::normalize::normalize;
use crate::record::{PlaceOfLiving, RecordPayload};
use crate::validation::{FieldErrors, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Editing,
    Submitting,
}

/// Result of a submit that was allowed to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid(FieldErrors),
    /// The record was stored and the draft was reset
    Submitted { message: String, payload: RecordPayload },
    /// Persisting failed; the draft is untouched
    Failed { message: String },
}

/// Owns the form draft and drives validate → normalize → persist.
#[derive(Debug, Default)]
pub struct SubmissionWorkflow {
    draft: RefCell<FormDraft>,
    errors: RefCell<FieldErrors>,
    acknowledged: Cell<bool>,
    state: Cell<SubmitState>,
}

impl SubmissionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> FormDraft {
        self.draft.borrow().clone()
    }

    pub fn value(&self, field: Field) -> String {
        self.draft.borrow().value(field).to_string()
    }

    pub fn place_of_living(&self) -> Option<PlaceOfLiving> {
        self.draft.borrow().place_of_living
    }

    /// Stores an edit and drops any stale error for that field.
    pub fn set_value(&self, field: Field, value: impl Into<String>) {
        self.draft.borrow_mut().set_value(field, value);
        self.errors.borrow_mut().remove(field);
    }

    pub fn errors(&self) -> FieldErrors {
        self.errors.borrow().clone()
    }

    pub fn error_for(&self, field: Field) -> Option<String> {
        self.errors.borrow().get(field).map(str::to_string)
    }

    pub fn acknowledged(&self) -> bool {
        self.acknowledged.get()
    }

    pub fn set_acknowledged(&self, acknowledged: bool) {
        self.acknowledged.set(acknowledged);
    }

    pub fn state(&self) -> SubmitState {
        self.state.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.get() == SubmitState::Submitting
    }

    /// Whether the submit trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        self.acknowledged.get() && !self.is_submitting()
    }

    /// Validates the draft and, if it passes, persists the normalized record.
    ///
    /// Refused with [`WorkflowError::Busy`] while a submit is in flight and
    /// with [`WorkflowError::NotAcknowledged`] until acknowledged. Nothing is
    /// retried.
    #[instrument(skip(self, insert))]
    pub async fn submit<I>(&self, insert: &I) -> Result<SubmitOutcome, WorkflowError>
    where
        I: RecordInsert + ?Sized,
    {
        if self.is_submitting() {
            return Err(WorkflowError::Busy);
        }
        if !self.acknowledged.get() {
            return Err(WorkflowError::NotAcknowledged);
        }

        let draft = self.draft();
        let validated = match validate(&draft) {
            Ok(validated) => validated,
            Err(errors) => {
                debug!("Submit blocked by {} field error(s)", errors.len());
                *self.errors.borrow_mut() = errors.clone();
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };
        self.errors.borrow_mut().clear();

        let guard = InFlight::acquire(&self.state, SubmitState::Submitting, SubmitState::Editing)?;
        let payload = normalize(validated);
        debug!("Submitting record for {}", payload.student_code);

        let outcome = match insert.insert(&payload).await {
            Ok(message) => {
                info!("Record for {} submitted", payload.student_code);
                *self.draft.borrow_mut() = FormDraft::default();
                SubmitOutcome::Submitted { message, payload }
            }
            Err(e) => {
                warn!("Submitting record for {} failed: {}", payload.student_code, e);
                SubmitOutcome::Failed {
                    message: e.user_message(),
                }
            }
        };

        guard.release(SubmitState::Editing);
        Ok(outcome)
    }
}
