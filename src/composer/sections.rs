//! Display logic for the shared page sections

use serde::Serialize;
use serde_json::Value;

// Stock photography used when a record carries no image of its own
pub const HOME_HERO: &str =
    "https://images.unsplash.com/photo-1504307651254-35680f356dfd?w=1920&h=1080&fit=crop&q=80";
pub const HOME_ABOUT: &str =
    "https://images.unsplash.com/photo-1581092918056-0c4c3acd3789?w=600&h=400&fit=crop";
pub const HOME_WHY_US: &str =
    "https://images.unsplash.com/photo-1621905251189-08b45d6a269e?w=600&h=400&fit=crop";
pub const ABOUT_HERO: &str =
    "https://images.unsplash.com/photo-1581578731548-c64695cc6952?w=1920&h=800&fit=crop&q=80";
pub const ABOUT_CONTENT: &str =
    "https://images.unsplash.com/photo-1585704032915-c3400ca199e7?w=800&h=400&fit=crop";
pub const CONTACT_HERO: &str =
    "https://images.unsplash.com/photo-1423666639041-f56000c27a9a?w=1920&h=800&fit=crop&q=80";
pub const SERVICES_HERO: &str =
    "https://images.unsplash.com/photo-1585704032915-c3400ca199e7?w=1920&h=800&fit=crop&q=80";
pub const SERVICE_SLIDE: &str =
    "https://images.unsplash.com/photo-1585704032915-c3400ca199e7?w=640&h=800&fit=crop&q=80";
pub const SERVICE_CARD: &str =
    "https://images.unsplash.com/photo-1585704032915-c3400ca199e7?w=400&h=300&fit=crop&q=80";
pub const SERVICE_HERO: &str =
    "https://images.unsplash.com/photo-1504307651254-35680f356dfd?w=1200&h=600&fit=crop";
pub const SERVICE_CONTENT: &str =
    "https://images.unsplash.com/photo-1581092918056-0c4c3acd3789?w=400&h=300&fit=crop";
pub const AREA_CARD: &str =
    "https://images.unsplash.com/photo-1449824913935-59a10b8d2000?w=400&h=250&fit=crop&q=80";
pub const AREA_HERO: &str =
    "https://images.unsplash.com/photo-1477959858617-67f85cf4f1df?w=1200&h=600&fit=crop";
pub const AREA_CONTENT: &str =
    "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=400&h=300&fit=crop";
pub const ARTICLES_HERO: &str =
    "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=1920&h=800&fit=crop&q=80";
pub const ARTICLE_CARD: &str =
    "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=400&h=300&fit=crop&q=80";
pub const ARTICLE_HERO: &str =
    "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=1200&h=600&fit=crop";

/// Non-empty string field of a record
pub fn field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// The record's own image, or the section's stock image
pub fn image_or(record: &Value, key: &str, fallback: &str) -> String {
    field(record, key).unwrap_or(fallback).to_string()
}

/// Card image; stock images get `&sig=<slug>` so cards differ
pub fn card_image(record: &Value, key: &str, fallback: &str) -> String {
    match field(record, key) {
        Some(url) => url.to_string(),
        None => format!("{}&sig={}", fallback, field(record, "slug").unwrap_or("")),
    }
}

/// Copy of each record with an `image` field resolved for card display
pub fn with_card_images(records: &[Value], key: &str, fallback: &str) -> Vec<Value> {
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            let image = card_image(&record, key, fallback);
            if let Some(map) = record.as_object_mut() {
                map.insert("image".to_string(), Value::String(image));
            }
            record
        })
        .collect()
}

/// Array items of a JSON value, empty when it isn't an array
pub fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// First `limit` records
pub fn first(records: &[Value], limit: usize) -> Vec<Value> {
    records.iter().take(limit).cloned().collect()
}

/// FAQs split over two columns
#[derive(Debug, Clone, Default, Serialize)]
pub struct FaqColumns {
    pub title: String,
    pub left: Vec<Value>,
    pub right: Vec<Value>,
}

impl FaqColumns {
    /// Take the first `limit` FAQs; the left column gets the larger half
    pub fn new(title: impl Into<String>, faqs: &[Value], limit: usize) -> Self {
        let shown = &faqs[..faqs.len().min(limit)];
        let midpoint = (shown.len() + 1) / 2;
        Self {
            title: title.into(),
            left: shown[..midpoint].to_vec(),
            right: shown[midpoint..].to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Slides visible at once for a viewport width
pub fn slides_per_view(viewport_width: u32) -> usize {
    if viewport_width < 640 {
        1
    } else if viewport_width < 1024 {
        2
    } else {
        3
    }
}

/// Position of the services carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Carousel {
    pub per_view: usize,
    pub index: usize,
    pub max_index: usize,
    pub dots: Vec<usize>,
}

impl Carousel {
    pub fn new(slides: usize, viewport_width: u32) -> Self {
        let per_view = slides_per_view(viewport_width);
        let max_index = slides.saturating_sub(per_view);
        Self {
            per_view,
            index: 0,
            max_index,
            dots: (0..=max_index).collect(),
        }
    }

    /// Jump to a dot, clamped to the last position
    pub fn go_to(mut self, index: usize) -> Self {
        self.index = index.min(self.max_index);
        self
    }

    pub fn prev(&self) -> usize {
        self.index.saturating_sub(1)
    }

    pub fn next(&self) -> usize {
        (self.index + 1).min(self.max_index)
    }

    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.max_index
    }
}

/// Years since the business was established, 20 when unknown
pub fn years_in_business(site: &Value, current_year: i32) -> i64 {
    match site.get("year_established").and_then(Value::as_i64) {
        Some(year) if year > 0 => i64::from(current_year) - year,
        _ => 20,
    }
}

/// Comma separated tags, trimmed, empties dropped
pub fn split_tags(tags: Option<&str>) -> Vec<String> {
    tags.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
