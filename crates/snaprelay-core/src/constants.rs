//! Fixed strings of the upload relay contract.

/// Body text used when the submission carries no (or an empty) message.
pub const DEFAULT_MESSAGE: &str = "No message provided";

/// Client-facing message of the presence validation failure.
pub const MISSING_FIELDS_MESSAGE: &str = "File and email are required";

/// Acknowledgment returned once the relay accepted the email.
pub const SUCCESS_MESSAGE: &str = "Email sent successfully!";

/// Subject line of every relayed email unless overridden by `UPLOAD_SUBJECT`.
pub const DEFAULT_SUBJECT: &str = "📷 New Screenshot Uploaded";

/// Mailbox that receives every upload unless overridden by `UPLOAD_RECIPIENT`.
pub const DEFAULT_RECIPIENT: &str = "jonathan@hcrimson.com";

/// Attachment name used when the client did not declare a filename.
pub const UNKNOWN_FILENAME: &str = "unknown";

/// Media type used when the client did not declare one.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
