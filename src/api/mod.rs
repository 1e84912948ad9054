//! Aggregation handlers - the JSON endpoints under `/api`.
//!
//! Every resource has a plain async function that assembles the document
//! (shared with the page composer) and a thin axum handler that adds the
//! status, CORS and cache headers.

pub mod catalog;
pub mod contact;
mod error;
pub mod media;
pub mod pages;
mod response;
pub mod site;
pub mod tokens;

use axum::routing::{any, get};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::media::MediaStore;
use crate::store::{ContentStore, Row};

pub use error::ApiError;
pub use response::{json_response, with_cors, CachePolicy};

/// Shared, immutable per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub media: Arc<dyn MediaStore>,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContentStore>,
        media: Arc<dyn MediaStore>,
        config: SiteConfig,
    ) -> Self {
        Self {
            store,
            media,
            config: Arc::new(config),
        }
    }

    /// Cache policy for the cacheable JSON endpoints
    pub fn api_cache(&self) -> CachePolicy {
        CachePolicy::Public(self.config.cache.api_max_age)
    }
}

/// Routes for all JSON endpoints and the media passthrough
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/site", get(site::get_site))
        .route("/api/services", get(catalog::get_services))
        .route("/api/service-areas", get(catalog::get_service_areas))
        .route("/api/service/:slug", get(catalog::get_service))
        .route("/api/service-area/:slug", get(catalog::get_service_area))
        .route("/api/page/:slug", get(pages::get_page))
        .route("/api/articles", get(pages::get_articles))
        .route(
            "/api/article/:slug",
            get(pages::get_article).options(pages::article_preflight),
        )
        .route("/api/tokens", get(tokens::get_tokens))
        .route("/api/contact", any(contact::handle))
        .route("/api/media/", get(media::get_media_root))
        .route("/api/media/*path", get(media::get_media))
}

/// Optional row as JSON (`null` when absent)
pub(crate) fn row_value(row: Option<Row>) -> Value {
    row.map(Value::Object).unwrap_or(Value::Null)
}

/// Rows as a JSON array, order preserved
pub(crate) fn rows_value(rows: Vec<Row>) -> Value {
    Value::Array(rows.into_iter().map(Value::Object).collect())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::media::FsMediaStore;
    use crate::store::testing::{broken_store, seeded_store, FailingStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    /// Application state over the demo database and an empty media root
    pub struct TestSite {
        pub state: AppState,
        pub media_dir: TempDir,
        _db_dir: TempDir,
    }

    impl TestSite {
        pub fn seeded() -> Self {
            let (db_dir, store) = seeded_store();
            Self::with_store(db_dir, store)
        }

        /// Every query against this site fails
        pub fn broken() -> Self {
            let (db_dir, store) = broken_store();
            Self::with_store(db_dir, store)
        }

        /// Seeded site where only queries running `sql` fail
        pub fn failing_on(sql: &'static str) -> Self {
            let (db_dir, store) = FailingStore::seeded(sql);
            Self::with_store(db_dir, store)
        }

        fn with_store(db_dir: TempDir, store: Arc<dyn ContentStore>) -> Self {
            let media_dir = tempfile::tempdir().unwrap();
            let media = Arc::new(FsMediaStore::new(media_dir.path()));
            let state = AppState::new(store, media, SiteConfig::default());
            Self {
                state,
                media_dir,
                _db_dir: db_dir,
            }
        }

        pub fn write_media(&self, key: &str, body: &[u8]) {
            let path = self.media_dir.path().join(key);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, body).unwrap();
        }
    }

    /// Send one request through the API router
    pub async fn send(state: &AppState, request: Request<Body>) -> Response {
        routes()
            .with_state(state.clone())
            .oneshot(request)
            .await
            .unwrap()
    }

    pub async fn get(state: &AppState, uri: &str) -> Response {
        send(state, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    pub async fn body_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = body_bytes(response).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
