//! API paths

/// Multipart upload endpoint relayed by email.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api/openapi.json";
