use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use common::{PlaceOfLiving, RecordPayload, RecordResponse, Residence, VerifyRequest};
use model::entities::record;
use sea_orm::{ActiveModelTrait, Set};
use tracing::{debug, error, info, instrument, trace, warn};
use validator::Validate;

use crate::error::AppError;
use crate::schemas::{ApiResponse, AppState, VerifyResponse};

fn to_entity_place(place: PlaceOfLiving) -> record::PlaceOfLiving {
    match place {
        PlaceOfLiving::Home => record::PlaceOfLiving::Home,
        PlaceOfLiving::Pg => record::PlaceOfLiving::Pg,
    }
}

fn from_entity_place(place: record::PlaceOfLiving) -> PlaceOfLiving {
    match place {
        record::PlaceOfLiving::Home => PlaceOfLiving::Home,
        record::PlaceOfLiving::Pg => PlaceOfLiving::Pg,
    }
}

fn record_response(model: record::Model) -> RecordResponse {
    RecordResponse {
        id: model.id,
        student_code: model.student_code,
        name: model.name,
        place_of_living: from_entity_place(model.place_of_living),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Builds the row for `payload`; the inactive branch's columns stay NULL.
fn active_model(payload: RecordPayload) -> record::ActiveModel {
    let place_of_living = to_entity_place(payload.place_of_living());
    let mut row = record::ActiveModel {
        student_code: Set(payload.student_code),
        name: Set(payload.name),
        mobile: Set(payload.mobile),
        place_of_living: Set(place_of_living),
        home_address: Set(None),
        pg_address: Set(None),
        pg_name: Set(None),
        pg_landmark: Set(None),
        pg_owner_mobile: Set(None),
        pg_owner_name: Set(None),
        ..Default::default()
    };

    match payload.residence {
        Residence::Home { home_address } => {
            row.home_address = Set(Some(home_address));
        }
        Residence::Pg {
            pg_address,
            pg_name,
            pg_landmark,
            pg_owner_mobile,
            pg_owner_name,
        } => {
            row.pg_address = Set(Some(pg_address));
            row.pg_name = Set(Some(pg_name));
            row.pg_landmark = Set(Some(pg_landmark));
            row.pg_owner_mobile = Set(Some(pg_owner_mobile));
            row.pg_owner_name = Set(Some(pg_owner_name));
        }
    }

    row
}

/// Check whether a record with this canonical student code exists
#[utoipa::path(
    post,
    path = "/api/verify",
    tag = "records",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "A record with this student code exists", body = VerifyResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "No record with this student code", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn verify_record(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<VerifyRequest>>,
) -> Result<Json<VerifyResponse>, AppError> {
    trace!("Entering verify_record function");
    debug!("Looking up student code {}", request.student_code);

    match record::Entity::find_by_student_code(&request.student_code)
        .one(&state.db)
        .await
    {
        Ok(Some(found)) => {
            info!("Student code {} is registered as record {}", found.student_code, found.id);
            Ok(Json(VerifyResponse::default()))
        }
        Ok(None) => {
            debug!("Student code {} is not registered", request.student_code);
            Err(AppError::RecordNotFound(request.student_code))
        }
        Err(e) => {
            error!("Failed to look up student code {}: {}", request.student_code, e);
            Err(AppError::Database(e))
        }
    }
}

/// Store a normalized student record
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "records",
    request_body = RecordPayload,
    responses(
        (status = 201, description = "Record saved successfully", body = ApiResponse<RecordResponse>),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Student code is already registered", body = ErrorResponse),
        (status = 422, description = "Record violates the field rules", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload), fields(student_code = %payload.student_code))]
pub async fn upload_record(
    State(state): State<AppState>,
    Json(payload): Json<RecordPayload>,
) -> Result<(StatusCode, Json<ApiResponse<RecordResponse>>), AppError> {
    trace!("Entering upload_record function");

    if let Err(errors) = payload.validate() {
        warn!("Rejecting record for {}: {}", payload.student_code, errors);
        return Err(AppError::from(errors));
    }

    let student_code = payload.student_code.clone();
    debug!(
        "Inserting {} record for {}",
        payload.place_of_living(),
        student_code
    );

    match active_model(payload).insert(&state.db).await {
        Ok(saved) => {
            info!("Record {} saved for {}", saved.id, saved.student_code);
            let response = ApiResponse {
                data: record_response(saved),
                message: "Record saved successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            let app_error = AppError::from_insert(e, &student_code);
            error!("Failed to save record for {}: {}", student_code, app_error);
            Err(app_error)
        }
    }
}
