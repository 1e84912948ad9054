//! Configuration module

mod site;

pub use site::CacheConfig;
pub use site::DisplayConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
