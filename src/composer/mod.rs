//! Page composer - server-rendered HTML over the aggregation documents.
//!
//! Every page loads the site bundle for the shell (header, footer, theme),
//! plus the per-entity document on dynamic routes, and renders one of the
//! embedded templates. Display logic lives in [`sections`]; theming in
//! [`theme`].

mod pages;
pub mod sections;
pub mod theme;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::Datelike;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tera::Context;

use crate::api::site::site_bundle;
use crate::api::{ApiError, AppState};
use crate::config::DisplayConfig;
use crate::templates::TemplateRenderer;

pub use sections::{Carousel, FaqColumns};
pub use theme::ThemeVars;

/// State for the HTML routes
#[derive(Clone)]
pub struct PageState {
    pub app: AppState,
    pub renderer: Arc<TemplateRenderer>,
}

/// Routes for all server-rendered pages
pub fn routes(app: AppState, renderer: Arc<TemplateRenderer>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact).post(pages::submit_contact))
        .route("/services", get(pages::services))
        .route("/services/:slug", get(pages::service))
        .route("/service-areas", get(pages::service_areas))
        .route("/service-areas/:slug", get(pages::service_area))
        .route("/articles", get(pages::articles))
        .route("/articles/:slug", get(pages::article))
        .route("/:slug", get(pages::page))
        .fallback(pages::not_found)
        .with_state(PageState { app, renderer })
}

/// Columns of `site_info` the templates read
const SITE_FIELDS: &[&str] = &[
    "name",
    "tagline",
    "description",
    "phone",
    "email",
    "show_email",
    "address",
    "city",
    "state",
    "zip",
    "logo_url",
    "social_facebook",
    "social_instagram",
    "social_google",
    "year_established",
    "license_number",
];

/// Editable copy with the text shown when a key is missing
const CONTENT_DEFAULTS: &[(&str, &str)] = &[
    ("cta_headline", "Need a Plumber?"),
    ("cta_subheadline", "Call now or request a free estimate online."),
    ("cta_button_secondary", "Get Free Estimate"),
    ("reviews_headline", "What Our Customers Say"),
    ("reviews_subheadline", "Real reviews from real customers."),
    ("services_headline", "Our Services"),
    ("services_subheadline", "Professional plumbing solutions for every need"),
    ("footer_tagline", "Professional plumbing services you can trust."),
];

/// Missing entity page: heading plus the link back to its listing
pub(crate) struct Missing {
    pub heading: &'static str,
    pub back_href: &'static str,
    pub back_label: &'static str,
}

/// The site shell shared by every page, built from the site bundle
pub(crate) struct Shell {
    bundle: Value,
    site: Value,
    content: Value,
    theme: ThemeVars,
    display: DisplayConfig,
}

impl Shell {
    pub fn new(bundle: Value, state: &AppState) -> Self {
        let site = normalize_site(&bundle["site"], &state.config.title);
        let content = normalize_content(&bundle["content"]);
        let theme = ThemeVars::from_tokens(&bundle["tokens"]);
        Self {
            bundle,
            site,
            content,
            theme,
            display: state.config.display.clone(),
        }
    }

    pub fn site(&self) -> &Value {
        &self.site
    }

    pub fn content(&self) -> &Value {
        &self.content
    }

    /// A collection of the bundle, empty when absent
    pub fn list(&self, key: &str) -> &[Value] {
        sections::items(&self.bundle[key])
    }

    pub fn site_name(&self) -> &str {
        sections::field(&self.site, "name").unwrap_or_default()
    }

    /// `"<page> | <site name>"`
    pub fn title(&self, page: &str) -> String {
        format!("{} | {}", page, self.site_name())
    }

    /// Base context: document head, theme, header and footer
    pub fn context(&self, title: &str, description: &str) -> Context {
        let footer_links = self.display.footer_links;
        let services = self.list("services");
        let areas = self.list("serviceAreas");

        let mut context = Context::new();
        context.insert("title", title);
        context.insert("description", description);
        context.insert("theme", &self.theme);
        context.insert("theme_css", &self.theme.css_variables());
        context.insert("site", &self.site);
        context.insert("content", &self.content);
        context.insert("services", services);
        context.insert("service_areas", areas);
        context.insert("nav_pages", self.list("pages"));
        context.insert("footer_services", &sections::first(services, footer_links));
        context.insert("footer_areas", &sections::first(areas, footer_links));
        context.insert("year", &chrono::Local::now().year());
        // Sections a page leaves out still need a value to test against
        context.insert("reviews", &Vec::<Value>::new());
        context.insert("faq", &FaqColumns::default());
        context
    }

    /// Testimonials for the reviews section
    pub fn reviews(&self, testimonials: &[Value]) -> Vec<Value> {
        testimonials
            .iter()
            .take(self.display.reviews_limit)
            .map(review)
            .collect()
    }

    pub fn faq(&self, title: impl Into<String>, faqs: &[Value]) -> FaqColumns {
        FaqColumns::new(title, faqs, self.display.faq_limit)
    }

    /// The services carousel positioned at `slide`
    pub fn carousel(
        &self,
        headline: &str,
        subheadline: &str,
        services: &[Value],
        slide: usize,
    ) -> Value {
        let slides =
            sections::with_card_images(services, "hero_image", sections::SERVICE_SLIDE);
        let carousel = Carousel::new(slides.len(), self.display.viewport_width).go_to(slide);
        json!({
            "headline": headline,
            "subheadline": subheadline,
            "slides": slides,
            "per_view": carousel.per_view,
            "index": carousel.index,
            "max_index": carousel.max_index,
            "dots": carousel.dots,
            "prev": carousel.prev(),
            "next": carousel.next(),
            "at_start": carousel.at_start(),
            "at_end": carousel.at_end(),
        })
    }

    pub fn years_in_business(&self) -> i64 {
        sections::years_in_business(&self.site, chrono::Local::now().year())
    }
}

impl PageState {
    /// Load the site bundle; on failure the response is the fatal page
    pub(crate) async fn shell(&self) -> Result<Shell, Response> {
        match site_bundle(&self.app).await {
            Ok(bundle) => Ok(Shell::new(bundle, &self.app)),
            Err(_) => Err(self.fatal("Failed to load site data")),
        }
    }

    pub(crate) fn render(&self, template: &str, context: &Context, status: StatusCode) -> Response {
        match self.renderer.render(template, context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render {}: {:?}", template, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error rendering page").into_response()
            }
        }
    }

    /// Standalone error page used when there is no shell to render into
    fn fatal(&self, message: &str) -> Response {
        let theme = ThemeVars::default();
        let mut context = Context::new();
        context.insert("title", &self.app.config.title);
        context.insert("theme_css", &theme.css_variables());
        context.insert("message", message);
        self.render("fatal.html", &context, StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub(crate) fn not_found(&self, shell: &Shell, missing: &Missing) -> Response {
        let mut context = shell.context(&shell.title(missing.heading), "");
        context.insert("heading", missing.heading);
        context.insert("back_href", missing.back_href);
        context.insert("back_label", missing.back_label);
        self.render("not_found.html", &context, StatusCode::NOT_FOUND)
    }

    /// Page for a failed entity fetch
    pub(crate) fn failure(&self, shell: &Shell, error: ApiError, missing: &Missing) -> Response {
        if let ApiError::NotFound(_) = error {
            return self.not_found(shell, missing);
        }
        let mut context = shell.context(&shell.title("Error"), "");
        context.insert("heading", "Something went wrong");
        context.insert("message", "We couldn't load this page. Please try again later.");
        self.render("error.html", &context, error.status())
    }
}

/// Site record with every column the templates read, name defaulted
fn normalize_site(site: &Value, fallback_name: &str) -> Value {
    let mut normalized = Map::new();
    for key in SITE_FIELDS {
        normalized.insert(key.to_string(), site.get(*key).cloned().unwrap_or(Value::Null));
    }
    if sections::field(site, "name").is_none() {
        normalized.insert("name".to_string(), json!(fallback_name));
    }
    Value::Object(normalized)
}

/// Global content with defaults for the keys the shell prints
fn normalize_content(content: &Value) -> Value {
    let mut normalized = content.as_object().cloned().unwrap_or_default();
    for (key, default) in CONTENT_DEFAULTS {
        if sections::field(content, key).is_none() {
            normalized.insert(key.to_string(), json!(default));
        }
    }
    Value::Object(normalized)
}

/// One testimonial shaped for the reviews section, rating kept in 1..=5
fn review(testimonial: &Value) -> Value {
    let rating = testimonial
        .get("rating")
        .and_then(Value::as_i64)
        .unwrap_or(5)
        .clamp(1, 5);
    json!({
        "client_name": testimonial.get("client_name").cloned().unwrap_or(Value::Null),
        "client_location": testimonial.get("client_location").cloned().unwrap_or(Value::Null),
        "client_photo": sections::field(testimonial, "client_photo"),
        "content": testimonial.get("content").cloned().unwrap_or(Value::Null),
        "rating": rating,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_site_fills_columns() {
        let site = normalize_site(&json!({"name": "Acme", "phone": "555"}), "Plumber Pro");
        assert_eq!(site["name"], "Acme");
        assert_eq!(site["phone"], "555");
        assert!(site["logo_url"].is_null());
        assert!(site.get("license_number").is_some());

        let site = normalize_site(&Value::Null, "Plumber Pro");
        assert_eq!(site["name"], "Plumber Pro");
    }

    #[test]
    fn test_normalize_content_keeps_stored_copy() {
        let content = normalize_content(&json!({"cta_headline": "Call Us", "extra": "x"}));
        assert_eq!(content["cta_headline"], "Call Us");
        assert_eq!(content["extra"], "x");
        assert_eq!(content["footer_tagline"], "Professional plumbing services you can trust.");
    }

    #[test]
    fn test_review_clamps_rating() {
        assert_eq!(review(&json!({"rating": 9}))["rating"], 5);
        assert_eq!(review(&json!({"rating": 0}))["rating"], 1);
        assert_eq!(review(&json!({}))["rating"], 5);
        assert!(review(&json!({"client_photo": ""}))["client_photo"].is_null());
    }
}
