//! Multipart parsing for the upload endpoint

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::BytesMut;
use snaprelay_core::{AppError, ImageUpload, RawSubmission};

/// Multipart field names understood by the upload endpoint.
pub const FILE_FIELD: &str = "file";
pub const EMAIL_FIELD: &str = "email";
pub const MESSAGE_FIELD: &str = "message";

/// Raised when `file` arrives as a plain form value rather than a file part.
pub const NOT_A_FILE_MESSAGE: &str = "Field `file` must be a file upload";

/// Map a multipart read failure to the relay error taxonomy.
///
/// Body-limit violations keep their 413 meaning; everything else is a parse failure.
pub fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Multipart(err.body_text())
    }
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Read the image field chunk by chunk, refusing to buffer more than `max_size` bytes.
async fn read_file_field(mut field: Field<'_>, max_size: usize) -> Result<ImageUpload, AppError> {
    let filename = field.file_name().map(|s| s.to_string());
    let content_type = field.content_type().map(|s| s.to_string());

    let mut data = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        validate_file_size(data.len() + chunk.len(), max_size)?;
        data.extend_from_slice(&chunk);
    }

    Ok(ImageUpload::new(filename, content_type, data.freeze()))
}

/// Extract the submission fields from the multipart form.
///
/// Only the first `file` field is used; repeated fields and unknown fields are skipped.
/// A `file` part without a filename is a parse failure.
/// Presence is not checked here, see [`RawSubmission::validate`].
pub async fn extract_submission(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<RawSubmission, AppError> {
    let mut raw = RawSubmission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            FILE_FIELD if raw.image.is_none() => {
                if field.file_name().is_none() {
                    return Err(AppError::Multipart(NOT_A_FILE_MESSAGE.to_string()));
                }
                raw.image = Some(read_file_field(field, max_file_size).await?);
            }
            EMAIL_FIELD if raw.email.is_none() => {
                raw.email = Some(field.text().await.map_err(multipart_error)?);
            }
            MESSAGE_FIELD if raw.message.is_none() => {
                raw.message = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {
                tracing::debug!(field = %field_name, "Skipping multipart field");
            }
        }
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_file_size_allows_exact_limit() {
        assert!(validate_file_size(1024, 1024).is_ok());
    }

    #[test]
    fn validate_file_size_rejects_larger_files() {
        match validate_file_size(3 * 1024 * 1024, 2 * 1024 * 1024) {
            Err(AppError::PayloadTooLarge(msg)) => assert!(msg.contains("2 MB")),
            other => panic!("Expected PayloadTooLarge, got {:?}", other),
        }
    }
}
