//! Content module - renders the markdown-like dialect used in free-text fields

mod markdown;

pub use markdown::{render_article, render_content, RenderedArticle, TocEntry};
