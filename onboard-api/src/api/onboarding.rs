//! Onboarding submission endpoints
//!
//! POST /api/onboarding accepts the multipart form, writes uploads through
//! the blob store, assembles the record and persists it.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::blob::BlobStore;
use crate::submission::{assemble_record, RawSubmission, UploadedFile};
use crate::{ApiError, ApiResult, AppState};

/// Returned for a body that is not valid multipart form data
pub const MALFORMED_FORM_MESSAGE: &str = "Malformed form data.";

/// Successful submission response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub success: bool,
    pub message: String,
    pub employee_id: i64,
}

/// POST /api/onboarding
///
/// **Response:** `201 {"success": true, "message": "...", "employeeId": 7}`
///
/// **Errors:**
/// - 400 Bad Request: body is not valid multipart form data
/// - 500 Internal Server Error: upload or database write failed (generic message)
pub async fn submit_onboarding(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<OnboardingResponse>)> {
    let submission = receive_submission(&state.blobs, multipart).await?;
    debug!(
        "Received submission: {} fields, {} files",
        submission.fields.len(),
        submission.files.len()
    );

    let record = assemble_record(&submission);
    let employee_id = state.store.insert_employee(record).await?;

    info!("New employee onboarded with ID: {}", employee_id);

    Ok((
        StatusCode::CREATED,
        Json(OnboardingResponse {
            success: true,
            message: "Form submitted successfully!".to_string(),
            employee_id,
        }),
    ))
}

/// Flatten the multipart body into text fields and stored files
///
/// Repeated text fields keep their first value. File inputs left empty by
/// the browser (no file name, no bytes) are ignored.
async fn receive_submission(blobs: &BlobStore, mut multipart: Multipart) -> ApiResult<RawSubmission> {
    let mut submission = RawSubmission::new();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.map_err(malformed)?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                let stored = blobs.store(&file_name, &bytes).await?;
                submission
                    .files
                    .push(UploadedFile::new(name, stored.display().to_string()));
            }
            None => {
                let value = field.text().await.map_err(malformed)?;
                submission.fields.entry(name).or_insert(value);
            }
        }
    }

    Ok(submission)
}

fn malformed(err: MultipartError) -> ApiError {
    warn!("Rejected multipart body: {}", err);
    ApiError::BadRequest(MALFORMED_FORM_MESSAGE.to_string())
}

/// Build onboarding routes
pub fn onboarding_routes() -> Router<AppState> {
    Router::new().route("/api/onboarding", post(submit_onboarding))
}
