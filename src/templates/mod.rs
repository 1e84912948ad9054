//! Built-in site templates using Tera template engine
//!
//! All page templates and section partials are embedded directly in the
//! binary, so a deployed site needs nothing on disk besides its database
//! and media.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::render_content;
use crate::helpers;

/// Stylesheet served at `/assets/site.css`
pub const STYLESHEET: &str = include_str!("site/site.css");

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Disable autoescaping: rendered content fragments and image URLs
        // are inserted verbatim
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("about.html", include_str!("site/about.html")),
            ("contact.html", include_str!("site/contact.html")),
            ("services.html", include_str!("site/services.html")),
            ("service.html", include_str!("site/service.html")),
            ("areas.html", include_str!("site/areas.html")),
            ("area.html", include_str!("site/area.html")),
            ("articles.html", include_str!("site/articles.html")),
            ("article.html", include_str!("site/article.html")),
            ("page.html", include_str!("site/page.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            ("error.html", include_str!("site/error.html")),
            ("fatal.html", include_str!("site/fatal.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/carousel.html",
                include_str!("site/partials/carousel.html"),
            ),
            (
                "partials/reviews.html",
                include_str!("site/partials/reviews.html"),
            ),
            ("partials/faq.html", include_str!("site/partials/faq.html")),
            ("partials/cta.html", include_str!("site/partials/cta.html")),
        ])?;

        // Register custom filters
        tera.register_filter("markdown", markdown_filter);
        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("initial", initial_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Filters render NULL columns as empty text
fn empty() -> tera::Value {
    tera::Value::String(String::new())
}

/// Tera filter: render the content dialect to HTML
fn markdown_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    if value.is_null() {
        return Ok(empty());
    }
    let s = tera::try_get_value!("markdown", "value", String, value);
    Ok(tera::Value::String(render_content(&s)))
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    if value.is_null() {
        return Ok(empty());
    }
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    if value.is_null() {
        return Ok(empty());
    }
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };
    Ok(tera::Value::String(helpers::truncate_chars(
        &s, length, &omission,
    )))
}

/// Tera filter: format a stored date, `format="long"` (default) or `"short"`
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    if value.is_null() {
        return Ok(empty());
    }
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "long".to_string(),
    };
    Ok(tera::Value::String(helpers::format_stored_date(&s, &format)))
}

/// Tera filter: first letter of a name
fn initial_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    if value.is_null() {
        return Ok(empty());
    }
    let s = tera::try_get_value!("initial", "value", String, value);
    Ok(tera::Value::String(helpers::initial(&s)))
}
