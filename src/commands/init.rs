//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::store::schema;
use crate::Site;

const DEFAULT_CONFIG: &str = r#"# Site
title: Plumber Pro

# Storage
database: content.db
media_dir: media

# Server
server:
  ip: localhost
  port: 8788

# Display
display:
  reviews_limit: 6
  faq_limit: 8
  footer_links: 6
  viewport_width: 1280

# Cache-Control max-age, in seconds
cache:
  api_max_age: 60
  media_max_age: 31536000
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let site = Site::new(target_dir)?;
    fs::create_dir_all(site.media_dir.join("images"))?;

    // Demo content only goes into a brand new database
    let seed = !site.database_path.exists();
    schema::initialize(&site.database_path, seed)?;
    if seed {
        tracing::info!("Created {:?} with demo content", site.database_path);
    }

    Ok(())
}

/// Run the init command with an existing site
pub fn run(site: &Site) -> Result<()> {
    init_site(&site.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ContentStore, Query};

    #[test]
    fn test_init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("site");
        init_site(&target).unwrap();

        assert!(target.join("_config.yml").is_file());
        assert!(target.join("content.db").is_file());
        assert!(target.join("media/images").is_dir());

        let site = Site::new(&target).unwrap();
        assert_eq!(site.config.server.port, 8788);
    }

    #[tokio::test]
    async fn test_init_twice_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        init_site(dir.path()).unwrap();

        let store = Site::new(dir.path()).unwrap().store().unwrap();
        let rows = store
            .all(Query::new("SELECT id FROM services"))
            .await
            .unwrap();
        assert_eq!(rows.len(), 5);
    }
}
