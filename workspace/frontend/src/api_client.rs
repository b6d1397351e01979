use async_trait::async_trait;
use common::{
    ApiResponse, CollaboratorError, ErrorResponse, LookupOutcome, RecordInsert, RecordLookup,
    RecordPayload, RecordResponse, VerifyRequest,
};
use gloo_net::http::{Request, Response};
use serde::Serialize;
use yew::Callback;

use crate::settings;

/// Sends a JSON POST; only transport failures are errors here.
async fn post_json<B>(endpoint: &str, body: &B) -> Result<Response, CollaboratorError>
where
    B: Serialize,
{
    let url = settings::get_settings().api_url(endpoint);
    log::debug!("POST request to: {}", url);

    Request::post(&url)
        .json(body)
        .map_err(|e| {
            log::error!("POST {} - Failed to serialize request: {}", endpoint, e);
            CollaboratorError::Decode(e.to_string())
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - Request failed: {}", endpoint, e);
            CollaboratorError::Transport(e.to_string())
        })
}

/// Turns a non-success response into an error, keeping the server's message.
async fn server_error(endpoint: &str, response: Response) -> CollaboratorError {
    let status = response.status();
    log::warn!("POST {} - Non-OK response: {}", endpoint, status);

    let message = match response.json::<ErrorResponse>().await {
        Ok(err) => {
            log::error!("POST {} - API error: {} ({})", endpoint, err.error, err.code);
            err.error
        }
        Err(_) => String::new(),
    };

    CollaboratorError::Server { status, message }
}

/// Existence check over `POST /api/verify`.
#[derive(Default)]
pub struct HttpRecordLookup {
    on_request: Option<Callback<()>>,
}

impl HttpRecordLookup {
    /// Notifies `callback` right before the request leaves.
    pub fn on_request(callback: Callback<()>) -> Self {
        Self {
            on_request: Some(callback),
        }
    }
}

#[async_trait(?Send)]
impl RecordLookup for HttpRecordLookup {
    async fn lookup(&self, student_code: &str) -> Result<LookupOutcome, CollaboratorError> {
        if let Some(callback) = &self.on_request {
            callback.emit(());
        }

        let body = VerifyRequest {
            student_code: student_code.to_string(),
        };
        let response = post_json("/verify", &body).await?;

        match response.status() {
            200 => {
                log::info!("POST /verify - {} is registered", student_code);
                Ok(LookupOutcome::Found)
            }
            404 => {
                log::info!("POST /verify - {} is not registered", student_code);
                Ok(LookupOutcome::NotFound)
            }
            _ => Err(server_error("/verify", response).await),
        }
    }
}

/// Record submission over `POST /api/upload`.
#[derive(Default)]
pub struct HttpRecordInsert {
    on_request: Option<Callback<()>>,
}

impl HttpRecordInsert {
    /// Notifies `callback` right before the request leaves.
    pub fn on_request(callback: Callback<()>) -> Self {
        Self {
            on_request: Some(callback),
        }
    }
}

#[async_trait(?Send)]
impl RecordInsert for HttpRecordInsert {
    async fn insert(&self, payload: &RecordPayload) -> Result<String, CollaboratorError> {
        if let Some(callback) = &self.on_request {
            callback.emit(());
        }

        let response = post_json("/upload", payload).await?;
        if !response.ok() {
            return Err(server_error("/upload", response).await);
        }

        log::trace!("POST /upload - Response received, parsing JSON");
        let api_response: ApiResponse<RecordResponse> = response.json().await.map_err(|e| {
            log::error!("POST /upload - Failed to parse response: {}", e);
            CollaboratorError::Decode(e.to_string())
        })?;

        log::info!("POST /upload - Stored record {}", api_response.data.id);
        Ok(api_response.message)
    }
}
