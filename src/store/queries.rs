//! SQL issued by the aggregation handlers.
//!
//! Every collection query declares its own ordering; handlers never reorder.

// Site bundle
pub const SITE_INFO: &str = "SELECT * FROM site_info WHERE id = 1";
pub const SITE_CONTACT: &str = "SELECT name, phone, email FROM site_info WHERE id = 1";
pub const PUBLISHED_SERVICES: &str =
    "SELECT * FROM services WHERE is_published = 1 ORDER BY sort_order";
pub const PUBLISHED_SERVICE_AREAS: &str =
    "SELECT * FROM service_areas WHERE is_published = 1 ORDER BY sort_order";
pub const PUBLISHED_TESTIMONIALS: &str =
    "SELECT * FROM testimonials WHERE is_published = 1 ORDER BY sort_order";
pub const GLOBAL_FAQS: &str =
    "SELECT * FROM faqs WHERE is_published = 1 AND page_slug IS NULL ORDER BY sort_order";
pub const TOKENS: &str = "SELECT * FROM tokens WHERE id = 1";
pub const GLOBAL_CONTENT: &str = "SELECT key, value FROM global_content";
pub const NAV_PAGES: &str = "SELECT slug, title, nav_label, show_in_nav, sort_order FROM pages \
     WHERE is_published = 1 AND show_in_nav = 1 ORDER BY sort_order";
pub const PUBLISHED_TEAM: &str = "SELECT * FROM team WHERE is_published = 1 ORDER BY sort_order";

// Services
pub const SERVICE_BY_SLUG: &str = "SELECT * FROM services WHERE slug = ? AND is_published = 1";
pub const SERVICE_FAQS: &str = "SELECT question, answer FROM faqs \
     WHERE service_id = ? AND is_published = 1 ORDER BY sort_order";
/// Service-specific testimonials first, then unscoped ones
pub const SERVICE_TESTIMONIALS: &str =
    "SELECT client_name, client_location, content, rating FROM testimonials \
     WHERE (service_id = ? OR service_id IS NULL) AND is_published = 1 \
     ORDER BY service_id DESC, sort_order LIMIT 3";
pub const MEDIA_BY_SLUG: &str = "SELECT url, alt_text FROM media WHERE slug = ?";

// Service areas
pub const SERVICE_AREA_BY_SLUG: &str =
    "SELECT * FROM service_areas WHERE slug = ? AND is_published = 1";
pub const SERVICE_AREA_FAQS: &str = "SELECT question, answer FROM faqs \
     WHERE service_area_id = ? AND is_published = 1 ORDER BY sort_order";
pub const SERVICE_SUMMARIES: &str =
    "SELECT id, slug, title, short_description, icon FROM services \
     WHERE is_published = 1 ORDER BY sort_order";
pub const FEATURED_TESTIMONIALS: &str =
    "SELECT client_name, client_location, content, rating FROM testimonials \
     WHERE is_published = 1 AND is_featured = 1 ORDER BY sort_order LIMIT 3";

// Pages
pub const PAGE_BY_SLUG: &str = "SELECT * FROM pages WHERE slug = ? AND is_published = 1";
pub const PAGE_FAQS: &str =
    "SELECT * FROM faqs WHERE page_slug = ? AND is_published = 1 ORDER BY sort_order";

// Articles
pub const ARTICLE_BY_SLUG: &str = "SELECT * FROM articles WHERE slug = ? AND is_published = 1";
pub const PUBLISHED_ARTICLES: &str =
    "SELECT id, slug, title, excerpt, category, author, featured_image, published_at, is_featured \
     FROM articles WHERE is_published = 1 ORDER BY published_at DESC";
pub const INSERT_ARTICLE: &str = "INSERT INTO articles (slug, title, excerpt, content, author, category, is_published) \
     VALUES (?, ?, '', ?, ?, ?, 0)";

// Contact
pub const INSERT_CONTACT: &str = "INSERT INTO contact_submissions (name, email, phone, message, source_page) \
     VALUES (?, ?, ?, ?, ?)";

// Listings for the CLI
pub const ALL_SERVICES: &str =
    "SELECT slug, title, is_published, sort_order FROM services ORDER BY sort_order";
pub const ALL_SERVICE_AREAS: &str =
    "SELECT slug, name, is_published, sort_order FROM service_areas ORDER BY sort_order";
pub const ALL_ARTICLES: &str =
    "SELECT slug, title, is_published, published_at FROM articles ORDER BY created_at DESC, id DESC";
pub const ALL_PAGES: &str =
    "SELECT slug, title, show_in_nav, is_published FROM pages ORDER BY sort_order";
pub const ALL_FAQS: &str = "SELECT question, page_slug, service_id, service_area_id, is_published \
     FROM faqs ORDER BY sort_order";
pub const RECENT_CONTACTS: &str = "SELECT name, email, phone, source_page, created_at \
     FROM contact_submissions ORDER BY id DESC LIMIT 20";
