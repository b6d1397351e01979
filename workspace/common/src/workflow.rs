//! Client-side workflows driving the form.
//!
//! Both workflows are single-threaded state machines with interior
//! mutability, so a UI can hold them behind an `Rc` and trigger them from
//! callbacks. Each refuses a second trigger while its request is in flight.

mod existence;
mod submission;

pub use existence::{CheckState, ExistenceCheck};
pub use submission::{SubmissionWorkflow, SubmitOutcome, SubmitState};

use async_trait::async_trait;

use crate::error::CollaboratorError;
use crate::record::RecordPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found,
    NotFound,
}

/// Answers whether a record with a canonical student code exists.
#[async_trait(?Send)]
pub trait RecordLookup {
    async fn lookup(&self, student_code: &str) -> Result<LookupOutcome, CollaboratorError>;
}

/// Persists a normalized record and returns the server's success message.
#[async_trait(?Send)]
pub trait RecordInsert {
    async fn insert(&self, payload: &RecordPayload) -> Result<String, CollaboratorError>;
}
