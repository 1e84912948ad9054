//! Response helpers shared by the JSON handlers

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

/// Cache-Control directive attached to a successful response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// No Cache-Control header at all
    Unset,
    /// `no-cache`
    NoCache,
    /// `public, max-age=N`
    Public(u32),
}

impl CachePolicy {
    pub fn header_value(&self) -> Option<String> {
        match self {
            CachePolicy::Unset => None,
            CachePolicy::NoCache => Some("no-cache".to_string()),
            CachePolicy::Public(seconds) => Some(format!("public, max-age={}", seconds)),
        }
    }
}

/// Add the open CORS header every handler sends
pub fn with_cors(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// 200 JSON response with CORS and cache headers
pub fn json_response(value: Value, cache: CachePolicy) -> Response {
    let mut response = with_cors(Json(value).into_response());
    if let Some(directive) = cache.header_value() {
        if let Ok(value) = HeaderValue::from_str(&directive) {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
    }
    response
}
