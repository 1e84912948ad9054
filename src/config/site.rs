//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Fallback document title used before the site bundle is available
    pub title: String,

    // Storage
    /// SQLite database path, relative to the site root
    pub database: String,
    /// Media root directory, relative to the site root
    pub media_dir: String,

    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Plumber Pro".to_string(),
            database: "content.db".to_string(),
            media_dir: "media".to_string(),
            server: ServerConfig::default(),
            display: DisplayConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 8788,
        }
    }
}

/// Display limits used by the page composer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Testimonials shown in the reviews section
    pub reviews_limit: usize,
    /// FAQs shown in the two-column FAQ section
    pub faq_limit: usize,
    /// Services and areas listed in the footer
    pub footer_links: usize,
    /// Viewport width assumed when laying out the services carousel
    pub viewport_width: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reviews_limit: 6,
            faq_limit: 8,
            footer_links: 6,
            viewport_width: 1280,
        }
    }
}

/// Cache-Control lifetimes in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub api_max_age: u32,
    pub media_max_age: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            api_max_age: 60,
            media_max_age: 31_536_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.database, "content.db");
        assert_eq!(config.server.port, 8788);
        assert_eq!(config.display.reviews_limit, 6);
        assert_eq!(config.cache.media_max_age, 31_536_000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Acme Plumbing
database: data/site.db
server:
  port: 3000
display:
  faq_limit: 4
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Acme Plumbing");
        assert_eq!(config.database, "data/site.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.display.faq_limit, 4);
        assert_eq!(config.display.reviews_limit, 6);
    }
}
