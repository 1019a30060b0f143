//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Snaprelay API",
        version = "0.1.0",
        description = "Accepts a photo, a sender email and an optional message as multipart form data and relays the photo by email to a fixed mailbox."
    ),
    paths(handlers::upload::upload),
    components(schemas(handlers::upload::UploadResponse, error::ErrorResponse)),
    tags(
        (name = "uploads", description = "Photo upload and email relay")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_documents_upload_path() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/upload"));
    }
}
