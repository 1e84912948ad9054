//! plumber-rs: a marketing site server for a local plumbing business
//!
//! This crate serves a JSON content API over a SQLite content database,
//! passes stored images through from a media directory, and renders the
//! public site with embedded Tera templates.

pub mod api;
pub mod commands;
pub mod composer;
pub mod config;
pub mod content;
pub mod helpers;
pub mod media;
pub mod server;
pub mod store;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A site on disk: configuration, content database and media root
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// SQLite content database
    pub database_path: PathBuf,
    /// Media root; images live under `images/`
    pub media_dir: PathBuf,
}

impl Site {
    /// Open the site rooted at `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let database_path = base_dir.join(&config.database);
        let media_dir = base_dir.join(&config.media_dir);

        Ok(Self {
            config,
            base_dir,
            database_path,
            media_dir,
        })
    }

    /// Open the content store
    pub fn store(&self) -> Result<store::SqliteStore> {
        Ok(store::SqliteStore::open(&self.database_path)?)
    }

    /// Shared handler state over this site's database and media
    pub fn app_state(&self) -> Result<api::AppState> {
        let store = Arc::new(self.store()?);
        let media = Arc::new(media::FsMediaStore::new(&self.media_dir));
        Ok(api::AppState::new(store, media, self.config.clone()))
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Create a draft article
    pub async fn new_article(
        &self,
        title: &str,
        category: Option<&str>,
        author: Option<&str>,
    ) -> Result<String> {
        commands::new::create_article(self, title, category, author).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_paths_follow_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "database: data/site.db\nmedia_dir: uploads\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.database_path, dir.path().join("data/site.db"));
        assert_eq!(site.media_dir, dir.path().join("uploads"));
    }

    #[test]
    fn test_site_defaults_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.database_path, dir.path().join("content.db"));
        assert_eq!(site.config.title, "Plumber Pro");
    }

    #[test]
    fn test_app_state_requires_database() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(site.app_state().is_err());
    }
}
