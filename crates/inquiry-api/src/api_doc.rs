//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use inquiry_core::models;

/// The OpenAPI document served at `/api/openapi.json`
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inquiry API",
        version = "0.1.0",
        description = "Contact form intake: validates, sanitizes and stores submissions from the website contact form."
    ),
    paths(
        handlers::contact::submit_contact,
        handlers::contact::contact_preflight,
    ),
    components(
        schemas(
            models::ContactRequest,
            models::ContactSuccess,
            models::ContactFailure,
            models::PreflightResponse,
            models::Submission,
            models::SubmissionStatus,
        )
    ),
    tags(
        (name = "contact", description = "Contact form submissions")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_path_documented() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/contact"));
    }
}
