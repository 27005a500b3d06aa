use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::BytesRejection, ConnectInfo, State},
    http::{header::CONTENT_TYPE, Extensions, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use inquiry_core::models::{ContactFailure, ContactRequest, ContactSuccess, PreflightResponse};
use inquiry_core::AppError;
use serde_json::{Map, Value};

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::request_provenance;

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    summary = "Submit the contact form",
    description = "Validates, sanitizes and stores one contact form submission. The CAPTCHA answer is accepted but not checked.",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Submission stored", body = ContactSuccess),
        (status = 400, description = "A validation rule failed", body = ContactFailure),
        (status = 413, description = "Request body too large", body = ContactFailure),
        (status = 500, description = "Internal server error", body = ContactFailure)
    )
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    extensions: Extensions,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(AppError::PayloadTooLarge(rejection.body_text()).into());
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Failed to read contact body");
            Bytes::new()
        }
    };
    let body = if is_form_urlencoded(&headers) {
        parse_form_body(&body)
    } else {
        parse_body(&body)
    };

    let socket_addr = extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let provenance = request_provenance(
        &headers,
        socket_addr.as_ref(),
        state.config.trusted_proxy_count,
    );

    let success = state.contact.submit(body, &provenance).await?;
    Ok(Json(success))
}

fn is_form_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

/// Decode an HTML form post into a JSON object of strings.
///
/// A repeated field keeps its last value.
fn parse_form_body(body: &[u8]) -> Value {
    match serde_urlencoded::from_bytes::<Vec<(String, String)>>(body) {
        Ok(pairs) => {
            let fields: Map<String, Value> = pairs
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect();
            Value::Object(fields)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Contact body is not a valid form");
            Value::Null
        }
    }
}

/// Unparseable bodies become `null`, which the pipeline treats as an empty form
fn parse_body(body: &[u8]) -> Value {
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Contact body is not valid JSON");
            Value::Null
        }
    }
}

#[utoipa::path(
    options,
    path = "/api/contact",
    tag = "contact",
    summary = "CORS preflight",
    responses(
        (status = 200, description = "Preflight accepted", body = PreflightResponse)
    )
)]
pub async fn contact_preflight() -> Json<PreflightResponse> {
    Json(PreflightResponse::default())
}

/// Any method other than POST or OPTIONS
pub async fn contact_method_not_allowed(method: Method) -> HttpAppError {
    HttpAppError(AppError::MethodNotAllowed(method.to_string()))
}
