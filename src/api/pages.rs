//! CMS pages and articles

use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use super::catalog::merge;
use super::{json_response, row_value, rows_value, with_cors, ApiError, AppState, CachePolicy};
use crate::store::{queries, Query};

/// A published page with its FAQs and the site's contact details.
///
/// The three lookups run together; the page row is checked afterwards.
pub async fn page_detail(state: &AppState, slug: &str) -> Result<Value, ApiError> {
    let store = &state.store;
    let (page, faqs, site) = tokio::try_join!(
        store.first(Query::new(queries::PAGE_BY_SLUG).bind(slug)),
        store.all(Query::new(queries::PAGE_FAQS).bind(slug)),
        store.first(Query::new(queries::SITE_CONTACT)),
    )
    .map_err(|e| ApiError::internal("Failed to fetch page", e))?;

    let page = page.ok_or(ApiError::NotFound("Page not found"))?;
    Ok(merge(
        page,
        [("faqs", rows_value(faqs)), ("site", row_value(site))],
    ))
}

/// Published articles, newest first
pub async fn article_list(state: &AppState) -> Result<Value, ApiError> {
    let rows = state
        .store
        .all(Query::new(queries::PUBLISHED_ARTICLES))
        .await
        .map_err(|e| ApiError::internal("Failed to fetch articles", e))?;
    Ok(rows_value(rows))
}

/// A published article together with the full site info row
pub async fn article_detail(state: &AppState, slug: &str) -> Result<Value, ApiError> {
    const FAILED: &str = "Failed to fetch article";
    let store = &state.store;

    let article = store
        .first(Query::new(queries::ARTICLE_BY_SLUG).bind(slug))
        .await
        .map_err(|e| ApiError::internal(FAILED, e))?
        .ok_or(ApiError::NotFound("Article not found"))?;

    let site = store
        .first(Query::new(queries::SITE_INFO))
        .await
        .map_err(|e| ApiError::internal(FAILED, e))?;
    Ok(merge(article, [("site", row_value(site))]))
}

pub async fn get_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match page_detail(&state, &slug).await {
        Ok(doc) => json_response(doc, state.api_cache()),
        Err(e) => e.into_response(),
    }
}

pub async fn get_articles(State(state): State<AppState>) -> Response {
    match article_list(&state).await {
        Ok(list) => json_response(list, state.api_cache()),
        Err(e) => e.into_response(),
    }
}

pub async fn get_article(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match article_detail(&state, &slug).await {
        Ok(doc) => json_response(doc, CachePolicy::Unset),
        Err(e) => e.into_response(),
    }
}

/// `OPTIONS /api/article/:slug`, an empty 200 with the CORS headers
pub async fn article_preflight() -> Response {
    let mut response = with_cors(StatusCode::OK.into_response());
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
