//! Theme tokens

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use super::{json_response, ApiError, AppState};
use crate::store::{queries, Query};

pub async fn theme_tokens(state: &AppState) -> Result<Value, ApiError> {
    state
        .store
        .first(Query::new(queries::TOKENS))
        .await
        .map_err(|e| ApiError::internal("Failed to fetch tokens", e))?
        .map(Value::Object)
        .ok_or(ApiError::NotFound("Tokens not found"))
}

/// `GET /api/tokens`
pub async fn get_tokens(State(state): State<AppState>) -> Response {
    match theme_tokens(&state).await {
        Ok(tokens) => json_response(tokens, state.api_cache()),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{body_json, get, TestSite};
    use crate::api::AppState;
    use crate::config::SiteConfig;
    use crate::media::FsMediaStore;
    use crate::store::testing::empty_store;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_tokens_row() {
        let site = TestSite::seeded();
        let (status, body) = body_json(get(&site.state, "/api/tokens").await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["primary_color"], "#2563eb");
        assert_eq!(body["font_heading"], "Plus Jakarta Sans");
    }

    #[tokio::test]
    async fn test_missing_tokens_row() {
        let (_dir, store) = empty_store();
        let media = tempfile::tempdir().unwrap();
        let state = AppState::new(
            store,
            Arc::new(FsMediaStore::new(media.path())),
            SiteConfig::default(),
        );
        let (status, body) = body_json(get(&state, "/api/tokens").await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Tokens not found"}));
    }
}
