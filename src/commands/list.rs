//! List site content

use anyhow::Result;
use serde_json::Value;

use crate::media::FsMediaStore;
use crate::store::{queries, ContentStore, Query, Row};
use crate::Site;

/// List site content by type
pub async fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "service" | "services" => {
            let rows = rows(site, queries::ALL_SERVICES).await?;
            println!("Services ({}):", rows.len());
            for row in &rows {
                println!("  {} - {}{}", text(row, "slug"), text(row, "title"), draft(row));
            }
        }
        "area" | "areas" => {
            let rows = rows(site, queries::ALL_SERVICE_AREAS).await?;
            println!("Service areas ({}):", rows.len());
            for row in &rows {
                println!("  {} - {}{}", text(row, "slug"), text(row, "name"), draft(row));
            }
        }
        "article" | "articles" => {
            let rows = rows(site, queries::ALL_ARTICLES).await?;
            println!("Articles ({}):", rows.len());
            for row in &rows {
                let date = match row.get("published_at").and_then(Value::as_str) {
                    Some(date) => date.to_string(),
                    None => "----------".to_string(),
                };
                println!("  {} - {}{}", date, text(row, "title"), draft(row));
            }
        }
        "page" | "pages" => {
            let rows = rows(site, queries::ALL_PAGES).await?;
            println!("Pages ({}):", rows.len());
            for row in &rows {
                let nav = if flag(row, "show_in_nav") { " (nav)" } else { "" };
                println!("  /{} - {}{}{}", text(row, "slug"), text(row, "title"), nav, draft(row));
            }
        }
        "faq" | "faqs" => {
            let rows = rows(site, queries::ALL_FAQS).await?;
            println!("FAQs ({}):", rows.len());
            for row in &rows {
                println!("  [{}] {}{}", faq_scope(row), text(row, "question"), draft(row));
            }
        }
        "media" => {
            let media = FsMediaStore::new(&site.media_dir);
            let keys = media.keys();
            println!("Media ({}) in {:?}:", keys.len(), media.root());
            for key in keys {
                println!("  {}", key);
            }
        }
        "contact" | "contacts" => {
            let rows = rows(site, queries::RECENT_CONTACTS).await?;
            println!("Recent contact submissions ({}):", rows.len());
            for row in &rows {
                println!(
                    "  {} - {} <{}> {} [{}]",
                    text(row, "created_at"),
                    text(row, "name"),
                    text(row, "email"),
                    text(row, "phone"),
                    text(row, "source_page")
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: service, area, article, page, faq, media, contact",
                content_type
            );
        }
    }

    Ok(())
}

async fn rows(site: &Site, sql: &'static str) -> Result<Vec<Row>> {
    Ok(site.store()?.all(Query::new(sql)).await?)
}

/// Column as display text, empty for NULL
fn text(row: &Row, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn flag(row: &Row, key: &str) -> bool {
    row.get(key).and_then(Value::as_i64).unwrap_or(0) != 0
}

fn draft(row: &Row) -> &'static str {
    if flag(row, "is_published") {
        ""
    } else {
        " [draft]"
    }
}

/// Where a FAQ is shown
fn faq_scope(row: &Row) -> String {
    if let Some(page) = row.get("page_slug").and_then(Value::as_str) {
        format!("page:{}", page)
    } else if let Some(id) = row.get("service_id").and_then(Value::as_i64) {
        format!("service:{}", id)
    } else if let Some(id) = row.get("service_area_id").and_then(Value::as_i64) {
        format!("area:{}", id)
    } else {
        "global".to_string()
    }
}
