use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use snaprelay_core::constants::SUCCESS_MESSAGE;
use snaprelay_core::validation::is_valid_email;
use snaprelay_core::AppError;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_submission;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
}

/// Relay an uploaded photo by email
///
/// Parses the multipart form, checks that `file` and `email` are present, and sends
/// one email to the fixed recipient with the image attached. Nothing is stored and a
/// failed delivery is not retried.
///
/// # Errors
/// - `AppError::MissingFields` - `file` or `email` absent (400)
/// - `AppError::InvalidInput` - malformed `email` with strict validation enabled (400)
/// - `AppError::PayloadTooLarge` - image above the configured limit (413)
/// - `AppError::Multipart` - body could not be parsed (500)
/// - `AppError::Relay` - SMTP relay refused or could not be reached (500)
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: `file` (binary, required), `email` (text, required), `message` (text, optional)"),
    responses(
        (status = 200, description = "Email sent", body = UploadResponse),
        (status = 400, description = "File and email are required", body = ErrorResponse),
        (status = 413, description = "Image too large", body = ErrorResponse),
        (status = 500, description = "Parsing or relay failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(operation = "upload_relay"))]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let raw = extract_submission(multipart?, state.upload.max_file_size).await?;
    let submission = raw.validate()?;

    if state.upload.strict_email_validation && !is_valid_email(&submission.sender_email) {
        return Err(AppError::InvalidInput("Invalid email address".to_string()).into());
    }

    tracing::info!(
        email = %submission.sender_email,
        filename = %submission.image.filename,
        content_type = %submission.image.content_type,
        size = submission.image.size(),
        has_message = submission.has_message(),
        "Upload received"
    );

    state.relay.relay(&submission).await?;

    Ok(Json(UploadResponse {
        message: SUCCESS_MESSAGE.to_string(),
    }))
}
