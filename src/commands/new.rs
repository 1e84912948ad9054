//! Create a new article

use anyhow::Result;

use crate::store::{queries, ContentStore, Query};
use crate::Site;

/// Insert an unpublished article titled `title`, returning its slug
pub async fn create_article(
    site: &Site,
    title: &str,
    category: Option<&str>,
    author: Option<&str>,
) -> Result<String> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title: {:?}", title);
    }

    let store = site.store()?;
    let existing = store
        .first(Query::new("SELECT id FROM articles WHERE slug = ?").bind(slug.as_str()))
        .await?;
    if existing.is_some() {
        anyhow::bail!("Article already exists: {}", slug);
    }

    let content = format!("## {}\n\n", title);
    store
        .run(
            Query::new(queries::INSERT_ARTICLE)
                .bind(slug.as_str())
                .bind(title)
                .bind(content)
                .bind(author)
                .bind(category),
        )
        .await?;

    println!("Created draft article: {}", slug);
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::init_site;

    #[tokio::test]
    async fn test_new_article_is_unpublished() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        let site = Site::new(dir.path()).unwrap();

        let slug = create_article(&site, "Fixing a Running Toilet", Some("Repairs"), None)
            .await
            .unwrap();
        assert_eq!(slug, "fixing-a-running-toilet");

        let store = site.store().unwrap();
        let row = store
            .first(
                Query::new("SELECT title, category, author, is_published FROM articles WHERE slug = ?")
                    .bind(slug.as_str()),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row["title"], "Fixing a Running Toilet");
        assert_eq!(row["category"], "Repairs");
        assert!(row["author"].is_null());
        assert_eq!(row["is_published"], 0);
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        let site = Site::new(dir.path()).unwrap();

        let result = create_article(&site, "Winterizing your pipes!", None, None).await;
        assert!(result.is_err());
    }
}
