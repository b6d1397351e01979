use std::cell::Cell;

use tracing::{debug, instrument, warn};

use super::{LookupOutcome, RecordLookup};
use crate::error::WorkflowError;
use crate::guard::InFlight;
use crate::record::canonical_student_code;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Idle,
    Checking,
    Found,
    NotFound,
}

/// On-demand check whether a student code is already registered.
///
/// Purely advisory: a failed lookup ends in [`CheckState::NotFound`] and is
/// only logged.
#[derive(Debug, Default)]
pub struct ExistenceCheck {
    state: Cell<CheckState>,
    /// Set when the code is edited while a lookup is pending
    edited: Cell<bool>,
}

impl ExistenceCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CheckState {
        self.state.get()
    }

    /// The trigger is disabled while this is true.
    pub fn is_checking(&self) -> bool {
        self.state.get() == CheckState::Checking
    }

    pub fn is_found(&self) -> bool {
        self.state.get() == CheckState::Found
    }

    /// Forgets a previous result after the code input was edited.
    ///
    /// A pending lookup answers for the old code, so it will settle on
    /// [`CheckState::Idle`] instead of its own result.
    pub fn code_changed(&self) {
        if self.is_checking() {
            self.edited.set(true);
        } else {
            self.state.set(CheckState::Idle);
        }
    }

    /// Looks up the canonical form of `raw_code`.
    #[instrument(skip(self, lookup))]
    pub async fn check<L>(&self, lookup: &L, raw_code: &str) -> Result<CheckState, WorkflowError>
    where
        L: RecordLookup + ?Sized,
    {
        let guard = InFlight::acquire(&self.state, CheckState::Checking, CheckState::Idle)?;
        self.edited.set(false);
        let student_code = canonical_student_code(raw_code);
        debug!("Checking whether {} exists", student_code);

        let next = match lookup.lookup(&student_code).await {
            Ok(LookupOutcome::Found) => CheckState::Found,
            Ok(LookupOutcome::NotFound) => CheckState::NotFound,
            Err(e) => {
                warn!("Existence check for {} failed: {}", student_code, e);
                CheckState::NotFound
            }
        };

        let next = if self.edited.replace(false) {
            debug!("Code edited during the check, discarding result for {}", student_code);
            CheckState::Idle
        } else {
            next
        };

        guard.release(next);
        Ok(next)
    }
}
