//! Services and service areas, as lists and as detail documents

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use super::{json_response, row_value, rows_value, ApiError, AppState};
use crate::store::{queries, Param, Query, Row};

/// All published services in display order
pub async fn service_list(state: &AppState) -> Result<Value, ApiError> {
    let rows = state
        .store
        .all(Query::new(queries::PUBLISHED_SERVICES))
        .await
        .map_err(|e| ApiError::internal("Failed to fetch services", e))?;
    Ok(rows_value(rows))
}

/// All published service areas in display order
pub async fn service_area_list(state: &AppState) -> Result<Value, ApiError> {
    let rows = state
        .store
        .all(Query::new(queries::PUBLISHED_SERVICE_AREAS))
        .await
        .map_err(|e| ApiError::internal("Failed to fetch service areas", e))?;
    Ok(rows_value(rows))
}

/// One published service with its FAQs, testimonials, images and the
/// site's contact details
pub async fn service_detail(state: &AppState, slug: &str) -> Result<Value, ApiError> {
    const FAILED: &str = "Failed to fetch service";
    let store = &state.store;

    let service = store
        .first(Query::new(queries::SERVICE_BY_SLUG).bind(slug))
        .await
        .map_err(|e| ApiError::internal(FAILED, e))?
        .ok_or(ApiError::NotFound("Service not found"))?;
    let id = Param::from(&service["id"]);

    let (faqs, testimonials, hero, content, site) = tokio::try_join!(
        store.all(Query::new(queries::SERVICE_FAQS).bind(id.clone())),
        store.all(Query::new(queries::SERVICE_TESTIMONIALS).bind(id)),
        store.first(Query::new(queries::MEDIA_BY_SLUG).bind(format!("service-hero-{}", slug))),
        store.first(Query::new(queries::MEDIA_BY_SLUG).bind(format!("service-content-{}", slug))),
        store.first(Query::new(queries::SITE_CONTACT)),
    )
    .map_err(|e| ApiError::internal(FAILED, e))?;

    Ok(merge(
        service,
        [
            ("faqs", rows_value(faqs)),
            ("testimonials", rows_value(testimonials)),
            ("heroImage", row_value(hero)),
            ("contentImage", row_value(content)),
            ("site", row_value(site)),
        ],
    ))
}

/// One published service area with its FAQs, the service summaries,
/// featured testimonials and the site's contact details
pub async fn service_area_detail(state: &AppState, slug: &str) -> Result<Value, ApiError> {
    const FAILED: &str = "Failed to fetch service area";
    let store = &state.store;

    let area = store
        .first(Query::new(queries::SERVICE_AREA_BY_SLUG).bind(slug))
        .await
        .map_err(|e| ApiError::internal(FAILED, e))?
        .ok_or(ApiError::NotFound("Service area not found"))?;
    let id = Param::from(&area["id"]);

    let (faqs, services, testimonials, site) = tokio::try_join!(
        store.all(Query::new(queries::SERVICE_AREA_FAQS).bind(id)),
        store.all(Query::new(queries::SERVICE_SUMMARIES)),
        store.all(Query::new(queries::FEATURED_TESTIMONIALS)),
        store.first(Query::new(queries::SITE_CONTACT)),
    )
    .map_err(|e| ApiError::internal(FAILED, e))?;

    Ok(merge(
        area,
        [
            ("faqs", rows_value(faqs)),
            ("services", rows_value(services)),
            ("testimonials", rows_value(testimonials)),
            ("site", row_value(site)),
        ],
    ))
}

/// The primary row's columns followed by the related documents
pub(crate) fn merge<const N: usize>(mut row: Row, extra: [(&str, Value); N]) -> Value {
    for (key, value) in extra {
        row.insert(key.to_string(), value);
    }
    Value::Object(row)
}

pub async fn get_services(State(state): State<AppState>) -> Response {
    match service_list(&state).await {
        Ok(list) => json_response(list, state.api_cache()),
        Err(e) => e.into_response(),
    }
}

pub async fn get_service_areas(State(state): State<AppState>) -> Response {
    match service_area_list(&state).await {
        Ok(list) => json_response(list, state.api_cache()),
        Err(e) => e.into_response(),
    }
}

pub async fn get_service(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match service_detail(&state, &slug).await {
        Ok(doc) => json_response(doc, state.api_cache()),
        Err(e) => e.into_response(),
    }
}

pub async fn get_service_area(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match service_area_detail(&state, &slug).await {
        Ok(doc) => json_response(doc, state.api_cache()),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{body_json, get, TestSite};
    use axum::http::{header, StatusCode};
    use serde_json::json;

    fn field<'a>(value: &'a Value, key: &str) -> Vec<&'a str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row[key].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_service_list_is_published_and_sorted() {
        let site = TestSite::seeded();
        let response = get(&site.state, "/api/services").await;
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=60"
        );
        let (status, body) = body_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            field(&body, "slug"),
            vec![
                "water-heaters",
                "drain-cleaning",
                "leak-detection",
                "emergency-plumbing"
            ]
        );
    }

    #[tokio::test]
    async fn test_service_list_failure() {
        let site = TestSite::broken();
        let (status, body) = body_json(get(&site.state, "/api/services").await).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to fetch services"}));
    }

    #[tokio::test]
    async fn test_service_area_list_excludes_unpublished() {
        let site = TestSite::seeded();
        let (_, body) = body_json(get(&site.state, "/api/service-areas").await).await;
        assert_eq!(field(&body, "slug"), vec!["round-rock", "south-austin"]);
    }

    #[tokio::test]
    async fn test_service_detail_document() {
        let site = TestSite::seeded();
        let response = get(&site.state, "/api/service/water-heaters").await;
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=60"
        );
        let (status, body) = body_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Water Heater Repair & Installation");
        assert_eq!(
            body["heroImage"]["url"],
            "/api/media/services/water-heater.jpg"
        );
        assert_eq!(body["contentImage"], Value::Null);
        assert_eq!(
            body["site"],
            json!({
                "name": "Austin Pro Plumbing",
                "phone": "(512) 555-0142",
                "email": "hello@austinproplumbing.com"
            })
        );
        let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            &keys[keys.len() - 5..],
            &["faqs", "testimonials", "heroImage", "contentImage", "site"]
        );
    }

    #[tokio::test]
    async fn test_service_testimonials_scoped_first_then_unscoped() {
        let site = TestSite::seeded();
        let doc = service_detail(&site.state, "drain-cleaning").await.unwrap();
        assert_eq!(
            field(&doc["testimonials"], "client_name"),
            vec!["Maria G.", "James T.", "Dan K."]
        );
        assert_eq!(
            field(&doc["faqs"], "question"),
            vec!["How often should drains be cleaned?"]
        );
    }

    #[tokio::test]
    async fn test_unknown_service_is_not_found() {
        let site = TestSite::seeded();
        let (status, body) = body_json(get(&site.state, "/api/service/teleportation").await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Service not found"}));
    }

    #[tokio::test]
    async fn test_unpublished_service_is_not_found() {
        let site = TestSite::seeded();
        let err = service_detail(&site.state, "gas-line-repair")
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::NotFound("Service not found"));
    }

    #[tokio::test]
    async fn test_service_area_detail_document() {
        let site = TestSite::seeded();
        let (status, body) = body_json(get(&site.state, "/api/service-area/south-austin").await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "South Austin");
        assert_eq!(
            field(&body["faqs"], "question"),
            vec!["Do you charge a trip fee in South Austin?"]
        );
        assert_eq!(
            field(&body["services"], "slug"),
            vec![
                "water-heaters",
                "drain-cleaning",
                "leak-detection",
                "emergency-plumbing"
            ]
        );
        assert_eq!(
            field(&body["testimonials"], "client_name"),
            vec!["Maria G.", "James T.", "Dan K."]
        );
        assert_eq!(body["site"]["phone"], "(512) 555-0142");
    }

    #[tokio::test]
    async fn test_unpublished_service_area_is_not_found() {
        let site = TestSite::seeded();
        let (status, body) = body_json(get(&site.state, "/api/service-area/pflugerville").await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Service area not found"}));
    }
}
