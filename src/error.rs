use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use common::{ErrorResponse, FieldErrors};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

/// Failures surfaced by the record endpoints.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No record for student code {0}")]
    RecordNotFound(String),

    #[error("Student code {0} is already registered")]
    DuplicateStudentCode(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl AppError {
    /// Maps an insert failure, recognizing the unique index on `student_code`.
    pub fn from_insert(err: DbErr, student_code: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::DuplicateStudentCode(student_code.to_string())
            }
            _ => AppError::Database(err),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::RecordNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateStudentCode(_) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::RecordNotFound(_) => "RECORD_NOT_FOUND",
            AppError::DuplicateStudentCode(_) => "DUPLICATE_STUDENT_CODE",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = FieldErrors::from(&errors);
        let message = field_errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_str(), message))
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = match &self {
            // Driver messages stay in the logs
            AppError::Database(_) => "A database error occurred".to_string(),
            other => other.to_string(),
        };

        (
            self.status_code(),
            Json(ErrorResponse {
                error,
                code: self.code().to_string(),
                success: false,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_validation_errors_name_each_field() {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("length");
        error.message = Some("Mobile number must be exactly 10 characters long.".into());
        errors.add("mobile", error);

        let app_error = AppError::from(errors);

        assert_eq!(app_error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            app_error.to_string(),
            "Validation failed: mobile: Mobile number must be exactly 10 characters long."
        );
    }

    #[test]
    fn test_codes_per_variant() {
        assert_eq!(
            AppError::DuplicateStudentCode("BWU/BCA/23/406".to_string()).code(),
            "DUPLICATE_STUDENT_CODE"
        );
        assert_eq!(
            AppError::Database(DbErr::Custom("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
