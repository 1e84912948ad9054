//! Renderer for the site's markdown-like content dialect.
//!
//! The dialect knows four constructs: `## ` / `### ` headings, `**bold**`,
//! runs of `- ` bullet lines, and blank-line separated paragraphs. Input is
//! not escaped; markup embedded in the source passes through as-is.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;

lazy_static! {
    static ref H2: Regex = Regex::new(r"(?m)^## (.*)$").unwrap();
    static ref H3: Regex = Regex::new(r"(?m)^### (.*)$").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref BULLETS: Regex = Regex::new(r"(?m)(?:^- .+$\n?)+").unwrap();
}

/// One heading of an article, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Article HTML plus the table of contents derived from its headings
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderedArticle {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Render dialect text to an HTML fragment
pub fn render_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let html = H2.replace_all(content, "<h2>${1}</h2>");
    let html = H3.replace_all(&html, "<h3>${1}</h3>");
    render_blocks(&html)
}

/// Render an article body, giving every level-2 and level-3 heading an
/// anchor id `section-N`. N counts headings in document order regardless of
/// level, and the returned table of contents uses the same ids.
pub fn render_article(content: &str) -> RenderedArticle {
    if content.is_empty() {
        return RenderedArticle::default();
    }

    let mut toc = Vec::new();
    let lines: Vec<String> = content
        .split('\n')
        .map(|line| match heading(line) {
            Some((level, text)) => {
                let id = format!("section-{}", toc.len());
                let html = format!(r#"<h{level} id="{id}">{text}</h{level}>"#);
                toc.push(TocEntry {
                    id,
                    text: text.to_string(),
                    level,
                });
                html
            }
            None => line.to_string(),
        })
        .collect();

    RenderedArticle {
        html: render_blocks(&lines.join("\n")),
        toc,
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let (level, text) = if let Some(text) = line.strip_prefix("### ") {
        (3, text)
    } else if let Some(text) = line.strip_prefix("## ") {
        (2, text)
    } else {
        return None;
    };

    if text.is_empty() {
        None
    } else {
        Some((level, text))
    }
}

/// Bold, bullet lists, then paragraph wrapping
fn render_blocks(html: &str) -> String {
    let html = BOLD.replace_all(html, "<strong>${1}</strong>");

    let html = BULLETS.replace_all(&html, |caps: &Captures| {
        let items: String = caps[0]
            .trim()
            .split('\n')
            .map(|line| format!("<li>{}</li>", line.strip_prefix("- ").unwrap_or(line)))
            .collect();
        // Keep the line break the run consumed so a following block stays separate
        let trailing = if caps[0].ends_with('\n') { "\n" } else { "" };
        format!("<ul>{}</ul>{}", items, trailing)
    });

    html.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if block.starts_with("<h") || block.starts_with("<ul") || block.starts_with("<ol") {
                block.to_string()
            } else {
                format!("<p>{}</p>", block)
            }
        })
        .collect()
}
