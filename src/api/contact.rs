//! Contact form submissions

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{json_response, with_cors, ApiError, AppState, CachePolicy};
use crate::store::{queries, Query};

const FAILED: &str = "Failed to submit form";

/// A submitted contact form; only `name` and `email` are required
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub source_page: Option<String>,
}

/// Empty strings are stored as NULL
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Validate and store one submission
pub async fn submit_contact(state: &AppState, form: ContactForm) -> Result<Value, ApiError> {
    let (name, email) = match (present(form.name), present(form.email)) {
        (Some(name), Some(email)) => (name, email),
        _ => return Err(ApiError::Validation("Name and email are required")),
    };

    state
        .store
        .run(
            Query::new(queries::INSERT_CONTACT)
                .bind(name)
                .bind(email)
                .bind(present(form.phone))
                .bind(present(form.message))
                .bind(present(form.source_page)),
        )
        .await
        .map_err(|e| ApiError::internal(FAILED, e))?;

    tracing::info!("Contact submission stored");
    Ok(json!({
        "success": true,
        "message": "Thank you! We will contact you soon.",
    }))
}

/// `/api/contact`, any method
pub async fn handle(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    if method == Method::OPTIONS {
        return preflight();
    }
    if method != Method::POST {
        return ApiError::MethodNotAllowed.into_response();
    }

    let form: ContactForm = match serde_json::from_slice(&body) {
        Ok(form) => form,
        Err(e) => return ApiError::internal(FAILED, e).into_response(),
    };

    match submit_contact(&state, form).await {
        Ok(doc) => json_response(doc, CachePolicy::Unset),
        Err(e) => e.into_response(),
    }
}

fn preflight() -> Response {
    let mut response = with_cors(StatusCode::NO_CONTENT.into_response());
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
