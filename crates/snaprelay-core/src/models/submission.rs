//! Submission model: one photo upload, alive only for the request that carried it.

use bytes::Bytes;

use crate::constants::{DEFAULT_MESSAGE, FALLBACK_CONTENT_TYPE, UNKNOWN_FILENAME};
use crate::error::AppError;

/// Image payload with what the client declared about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    /// Build an upload, substituting defaults for a missing filename or media type.
    pub fn new(filename: Option<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            filename: filename
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_FILENAME.to_string()),
            content_type: content_type
                .filter(|ct| !ct.is_empty())
                .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Multipart fields as parsed, before presence validation.
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub image: Option<ImageUpload>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl RawSubmission {
    /// Check presence of the image and email.
    ///
    /// An empty image or an empty email string counts as missing.
    pub fn validate(self) -> Result<Submission, AppError> {
        let image = self.image.filter(|image| !image.data.is_empty());
        let email = self.email.filter(|email| !email.is_empty());

        match (image, email) {
            (Some(image), Some(sender_email)) => Ok(Submission {
                image,
                sender_email,
                message: self.message,
            }),
            _ => Err(AppError::MissingFields),
        }
    }
}

/// A validated submission: image and sender email are guaranteed present.
#[derive(Debug, Clone)]
pub struct Submission {
    pub image: ImageUpload,
    pub sender_email: String,
    pub message: Option<String>,
}

impl Submission {
    /// Email body: the message verbatim, or the sentinel when absent or empty.
    pub fn body_text(&self) -> &str {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => DEFAULT_MESSAGE,
        }
    }

    pub fn has_message(&self) -> bool {
        self.message.as_deref().is_some_and(|m| !m.is_empty())
    }
}
