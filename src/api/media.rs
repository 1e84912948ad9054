//! Media passthrough - serves stored images under `/api/media/*path`.
//!
//! Unlike the JSON handlers, failures here are plain text bodies.

use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use super::{with_cors, AppState};

const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Serve the object stored at `images/<path>`
pub async fn serve_media(state: &AppState, path: &str) -> Response {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return not_found();
    }

    let key = format!("images/{}", path);
    let object = match state.media.get(&key).await {
        Ok(Some(object)) => object,
        Ok(None) => return not_found(),
        Err(e) => {
            tracing::error!("Error serving media {}: {}", key, e);
            return with_cors(
                (StatusCode::INTERNAL_SERVER_ERROR, "Error serving file").into_response(),
            );
        }
    };

    tracing::debug!("Serving media {} ({} bytes)", key, object.body.len());
    let content_type = object
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or(HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let cache = format!("public, max-age={}", state.config.cache.media_max_age);

    let mut response = with_cors(object.body.into_response());
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    if let Ok(cache) = HeaderValue::from_str(&cache) {
        headers.insert(header::CACHE_CONTROL, cache);
    }
    if let Some(etag) = object.etag.and_then(|e| HeaderValue::from_str(&e).ok()) {
        headers.insert(header::ETAG, etag);
    }
    response
}

fn not_found() -> Response {
    with_cors((StatusCode::NOT_FOUND, "Not found").into_response())
}

/// `GET /api/media/*path`
pub async fn get_media(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    serve_media(&state, &path).await
}

/// `GET /api/media/` - the wildcard route needs a non-empty path
pub async fn get_media_root(State(state): State<AppState>) -> Response {
    serve_media(&state, "").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{body_bytes, get, TestSite};
    use crate::config::SiteConfig;
    use crate::media::{MediaObject, MediaStore};
    use crate::store::testing::seeded_store;
    use crate::store::StoreError;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct UnreadableMedia;

    #[async_trait]
    impl MediaStore for UnreadableMedia {
        async fn get(&self, _key: &str) -> Result<Option<MediaObject>, StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
        }
    }

    #[tokio::test]
    async fn test_serves_nested_path() {
        let site = TestSite::seeded();
        site.write_media("images/services/water-heater.png", b"\x89PNG");

        let response = get(&site.state, "/api/media/services/water-heater.png").await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=31536000");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.contains_key(header::ETAG));
        assert_eq!(body_bytes(response).await, b"\x89PNG".to_vec());
    }

    #[tokio::test]
    async fn test_unknown_extension_defaults_to_jpeg() {
        let site = TestSite::seeded();
        site.write_media("images/logo", b"raw");
        let response = get(&site.state, "/api/media/logo").await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    }

    #[tokio::test]
    async fn test_missing_object_is_plain_not_found() {
        let site = TestSite::seeded();
        let response = get(&site.state, "/api/media/foo.jpg").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_bytes(response).await, b"Not found".to_vec());
    }

    #[tokio::test]
    async fn test_empty_path_is_not_found() {
        let site = TestSite::seeded();
        let response = get(&site.state, "/api/media/").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_bytes(response).await, b"Not found".to_vec());
    }

    #[tokio::test]
    async fn test_store_failure_is_plain_error() {
        let (_dir, store) = seeded_store();
        let state = AppState::new(store, Arc::new(UnreadableMedia), SiteConfig::default());
        let response = get(&state, "/api/media/services/water-heater.jpg").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_bytes(response).await, b"Error serving file".to_vec());
    }

    #[tokio::test]
    async fn test_key_is_scoped_to_images() {
        let site = TestSite::seeded();
        site.write_media("private/secret.jpg", b"nope");
        let response = get(&site.state, "/api/media/../private/secret.jpg").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
