//! Core of the student data-collection form, shared between backend and frontend.
//!
//! The crate owns everything that does not depend on a transport: the form
//! field catalogue, the validation rules, the normalizer that turns a validated
//! draft into the persisted record shape, and the two client workflows
//! (existence check and submission). The backend and the frontend plug their
//! own collaborators into the workflows through [`RecordLookup`] and
//! [`RecordInsert`].

mod error;
mod form;
mod guard;
mod normalize;
mod record;
mod validation;
pub mod workflow;

pub use error::{CollaboratorError, WorkflowError, GENERIC_SUBMIT_ERROR};
pub use form::{Field, FieldKind, FieldSpec, FormDraft, FIELDS, is_visible};
pub use normalize::normalize;
pub use record::{
    PlaceOfLiving, RecordPayload, Residence, STUDENT_CODE_PREFIX, canonical_student_code,
};
pub use validation::{
    FieldErrors, HomeAddress, PgDetails, ValidatedForm, ValidatedResidence, validate,
};
pub use workflow::{
    CheckState, ExistenceCheck, LookupOutcome, RecordInsert, RecordLookup, SubmissionWorkflow,
    SubmitOutcome, SubmitState,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

// ===================== Records =====================

/// Request body of the existence check.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct VerifyRequest {
    /// Canonical student code, e.g. `BWU/BCA/23/406`
    #[validate(length(min = 1, max = 64))]
    pub student_code: String,
}

/// Stored record as returned by the insert endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecordResponse {
    pub id: i32,
    pub student_code: String,
    pub name: String,
    pub place_of_living: PlaceOfLiving,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
