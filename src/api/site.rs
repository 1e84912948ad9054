//! Site bundle - everything the site shell needs in one document

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};

use super::{json_response, row_value, rows_value, ApiError, AppState, CachePolicy};
use crate::store::{queries, Query, Row};

const FAILED: &str = "Failed to fetch site data";

/// Run the nine bundle queries concurrently and combine them.
///
/// Any failing query fails the whole bundle.
pub async fn site_bundle(state: &AppState) -> Result<Value, ApiError> {
    let store = &state.store;
    let (site, services, areas, testimonials, faqs, tokens, content, pages, team) = tokio::try_join!(
        store.first(Query::new(queries::SITE_INFO)),
        store.all(Query::new(queries::PUBLISHED_SERVICES)),
        store.all(Query::new(queries::PUBLISHED_SERVICE_AREAS)),
        store.all(Query::new(queries::PUBLISHED_TESTIMONIALS)),
        store.all(Query::new(queries::GLOBAL_FAQS)),
        store.first(Query::new(queries::TOKENS)),
        store.all(Query::new(queries::GLOBAL_CONTENT)),
        store.all(Query::new(queries::NAV_PAGES)),
        store.all(Query::new(queries::PUBLISHED_TEAM)),
    )
    .map_err(|e| ApiError::internal(FAILED, e))?;

    Ok(json!({
        "site": row_value(site),
        "services": rows_value(services),
        "serviceAreas": rows_value(areas),
        "testimonials": rows_value(testimonials),
        "faqs": rows_value(faqs),
        "tokens": row_value(tokens),
        "content": content_map(content),
        "pages": rows_value(pages),
        "team": rows_value(team),
    }))
}

/// Flatten `key`/`value` rows into one object; later duplicates win
pub fn content_map(rows: Vec<Row>) -> Value {
    let mut map = Map::new();
    for mut row in rows {
        let key = match row.get("key").and_then(Value::as_str) {
            Some(key) => key.to_string(),
            None => continue,
        };
        let value = row.remove("value").unwrap_or(Value::Null);
        map.insert(key, value);
    }
    Value::Object(map)
}

/// `GET /api/site`
pub async fn get_site(State(state): State<AppState>) -> Response {
    match site_bundle(&state).await {
        Ok(bundle) => json_response(bundle, CachePolicy::NoCache),
        Err(e) => e.into_response(),
    }
}
