pub use common::{ApiResponse, ErrorResponse};
use common::{PlaceOfLiving, RecordPayload, RecordResponse, Residence, VerifyRequest};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection, opened at startup and closed on shutdown
    pub db: DatabaseConnection,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Body of a successful existence check
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::records::verify_record,
        crate::handlers::records::upload_record,
    ),
    components(
        schemas(
            ApiResponse<RecordResponse>,
            ErrorResponse,
            HealthResponse,
            VerifyRequest,
            VerifyResponse,
            RecordPayload,
            RecordResponse,
            Residence,
            PlaceOfLiving,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "records", description = "Student record endpoints"),
    ),
    info(
        title = "Intake API",
        description = "Student data-collection API: existence check and record submission",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
