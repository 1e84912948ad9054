//! Database schema and demo content, applied by `plumber-rs init`

use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use super::StoreError;

/// Table definitions
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS site_info (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    name TEXT NOT NULL,
    tagline TEXT,
    description TEXT,
    phone TEXT,
    email TEXT,
    show_email INTEGER NOT NULL DEFAULT 1,
    address TEXT,
    city TEXT,
    state TEXT,
    zip TEXT,
    logo_url TEXT,
    social_facebook TEXT,
    social_instagram TEXT,
    social_twitter TEXT,
    social_linkedin TEXT,
    social_youtube TEXT,
    social_google TEXT,
    year_established INTEGER,
    license_number TEXT
);

CREATE TABLE IF NOT EXISTS services (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    short_description TEXT,
    full_description TEXT,
    icon TEXT,
    hero_image TEXT,
    hero_image_prompt TEXT,
    content_image TEXT,
    content_image_prompt TEXT,
    meta_title TEXT,
    meta_description TEXT,
    is_featured INTEGER NOT NULL DEFAULT 0,
    is_published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS service_areas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    short_description TEXT,
    full_description TEXT,
    hero_image TEXT,
    hero_image_prompt TEXT,
    content_image TEXT,
    content_image_prompt TEXT,
    city TEXT,
    state TEXT,
    zip_codes TEXT,
    meta_title TEXT,
    meta_description TEXT,
    is_published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS testimonials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_name TEXT NOT NULL,
    client_location TEXT,
    client_photo TEXT,
    content TEXT NOT NULL,
    rating INTEGER NOT NULL DEFAULT 5 CHECK (rating BETWEEN 1 AND 5),
    source TEXT,
    service_id INTEGER REFERENCES services(id),
    is_published INTEGER NOT NULL DEFAULT 1,
    is_featured INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS faqs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    page_slug TEXT,
    service_id INTEGER REFERENCES services(id),
    service_area_id INTEGER REFERENCES service_areas(id),
    is_published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS team (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    role TEXT,
    bio TEXT,
    photo TEXT,
    photo_prompt TEXT,
    email TEXT,
    phone TEXT,
    is_published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    excerpt TEXT,
    content TEXT,
    featured_image TEXT,
    featured_image_prompt TEXT,
    author TEXT,
    category TEXT,
    tags TEXT,
    meta_title TEXT,
    meta_description TEXT,
    is_published INTEGER NOT NULL DEFAULT 0,
    is_featured INTEGER NOT NULL DEFAULT 0,
    published_at TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    nav_label TEXT,
    hero_headline TEXT,
    hero_subheadline TEXT,
    hero_image TEXT,
    content TEXT,
    content_image TEXT,
    show_in_nav INTEGER NOT NULL DEFAULT 0,
    show_reviews INTEGER NOT NULL DEFAULT 1,
    show_cta INTEGER NOT NULL DEFAULT 1,
    is_published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS tokens (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    color_mode TEXT NOT NULL DEFAULT 'light',
    primary_color TEXT,
    primary_hover TEXT,
    secondary_color TEXT,
    accent_color TEXT,
    light_background TEXT,
    light_surface TEXT,
    light_surface_alt TEXT,
    light_text TEXT,
    light_text_body TEXT,
    light_text_muted TEXT,
    light_border TEXT,
    dark_background TEXT,
    dark_surface TEXT,
    dark_surface_alt TEXT,
    dark_text TEXT,
    dark_text_body TEXT,
    dark_text_muted TEXT,
    dark_border TEXT,
    font_heading TEXT,
    font_body TEXT,
    radius TEXT
);

CREATE TABLE IF NOT EXISTS global_content (
    key TEXT PRIMARY KEY,
    value TEXT
);

CREATE TABLE IF NOT EXISTS media (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL,
    alt_text TEXT
);

CREATE TABLE IF NOT EXISTS contact_submissions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    message TEXT,
    source_page TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Demo content for a freshly initialized site. Rows are inserted out of
/// sort order and include unpublished drafts.
pub const SEED: &str = r#"
INSERT INTO site_info (id, name, tagline, description, phone, email, show_email, address, city, state, zip,
    social_facebook, social_google, year_established, license_number)
VALUES (1, 'Austin Pro Plumbing', 'Fast, honest plumbing for Central Texas',
    'Licensed plumbers serving Austin homes and businesses.', '(512) 555-0142', 'hello@austinproplumbing.com', 1,
    '1200 Barton Springs Rd', 'Austin', 'TX', '78704',
    'https://facebook.com/austinproplumbing', 'https://g.page/austinproplumbing', 2005, 'M-40213');

INSERT INTO services (id, slug, title, short_description, full_description, icon, hero_image, is_featured, is_published, sort_order)
VALUES
    (1, 'drain-cleaning', 'Drain Cleaning', 'Clear clogs and keep drains flowing.',
     '## Professional Drain Cleaning

Slow drains are more than a nuisance. We clear **stubborn clogs** with hydro-jetting and camera inspection.

- Kitchen and bathroom sinks
- Main sewer lines
- Floor drains', 'droplet', NULL, 0, 1, 2),
    (2, 'water-heaters', 'Water Heater Repair & Installation', 'Tank and tankless repair, replacement and installation.',
     '## Hot Water You Can Count On

We service **every major brand** of tank and tankless water heater.', 'flame', '/api/media/services/water-heater.jpg', 1, 1, 1),
    (3, 'leak-detection', 'Leak Detection', 'Find hidden leaks before they cause damage.',
     'Electronic leak detection for slab, wall and yard leaks.', 'search', NULL, 0, 1, 3),
    (4, 'gas-line-repair', 'Gas Line Repair', 'Safe gas line repair and installation.',
     'Draft copy.', 'flame', NULL, 0, 0, 0),
    (5, 'emergency-plumbing', 'Emergency Plumbing', 'Around-the-clock help when things go wrong.',
     'Burst pipe at 2am? We answer the phone **24/7**.', 'clock', NULL, 1, 1, 4);

INSERT INTO service_areas (id, slug, name, short_description, full_description, city, state, zip_codes, is_published, sort_order)
VALUES
    (1, 'south-austin', 'South Austin', 'Plumbing service throughout South Austin.',
     '## Serving South Austin

From Zilker to Slaughter Lane, our trucks are minutes away.', 'Austin', 'TX', '78704,78745,78748', 1, 2),
    (2, 'round-rock', 'Round Rock', 'Trusted plumbers in Round Rock.',
     'Same-day service across Round Rock.', 'Round Rock', 'TX', '78664,78665', 1, 1),
    (3, 'pflugerville', 'Pflugerville', 'Coming soon.', 'Draft copy.', 'Pflugerville', 'TX', '78660', 0, 3);

INSERT INTO testimonials (id, client_name, client_location, content, rating, source, service_id, is_published, is_featured, sort_order)
VALUES
    (1, 'Maria G.', 'South Austin', 'They cleared our main line in under an hour.', 5, 'Google', 1, 1, 1, 1),
    (2, 'James T.', 'Round Rock', 'Honest pricing and spotless work.', 5, 'Google', NULL, 1, 1, 2),
    (3, 'Priya S.', 'Cedar Park', 'Our new tankless heater works perfectly.', 4, 'Yelp', 2, 1, 0, 3),
    (4, 'Hidden Reviewer', 'Nowhere', 'Unpublished review.', 1, 'Yelp', NULL, 0, 1, 0),
    (5, 'Dan K.', 'Austin', 'Showed up at midnight for a burst pipe.', 5, 'Google', NULL, 1, 1, 4);

INSERT INTO faqs (id, question, answer, page_slug, service_id, service_area_id, is_published, sort_order)
VALUES
    (1, 'Do you offer emergency service?', 'Yes, we are available 24/7.', NULL, NULL, NULL, 1, 2),
    (2, 'Are you licensed and insured?', 'Fully licensed, bonded and insured.', NULL, NULL, NULL, 1, 1),
    (3, 'Internal draft question', 'Not ready.', NULL, NULL, NULL, 0, 0),
    (4, 'How often should drains be cleaned?', 'Once a year for most homes.', NULL, 1, NULL, 1, 1),
    (5, 'Do you charge a trip fee in South Austin?', 'Never.', NULL, NULL, 1, 1, 1),
    (6, 'How long have you been in business?', 'Since 2005.', 'about', NULL, NULL, 1, 1),
    (7, 'How quickly can you arrive?', 'Usually within two hours.', NULL, NULL, NULL, 1, 3);

INSERT INTO team (id, name, role, bio, is_published, sort_order)
VALUES
    (1, 'Mike Alvarez', 'Master Plumber', 'Twenty years of keeping Austin''s water running.', 1, 1),
    (2, 'Sarah Chen', 'Office Manager', 'Keeps the schedule and the customers happy.', 1, 2),
    (3, 'Former Technician', 'Technician', 'No longer with the company.', 0, 3);

INSERT INTO articles (id, slug, title, excerpt, content, author, category, tags, is_published, is_featured, published_at)
VALUES
    (1, 'signs-you-need-a-new-water-heater', 'Signs You Need a New Water Heater',
     'Five warning signs your water heater is near the end of its life.',
     '## Age of the Unit

Most tank heaters last **8 to 12 years**.

### Check the Serial Number

The first digits usually encode the year.

## Rusty Water

Rust points to corrosion inside the tank.

- Discolored hot water
- Metallic taste

### When to Call Us

If you see both, call right away.', 'Mike Alvarez', 'Water Heaters', 'water heater, maintenance', 1, 1, '2024-03-12'),
    (2, 'winterizing-your-pipes', 'Winterizing Your Pipes', 'Protect your plumbing before the first freeze.',
     'Insulate exposed pipes and know where your shutoff valve is.', 'Sarah Chen', 'Maintenance', 'winter', 1, 0, '2024-01-08'),
    (3, 'draft-article', 'Draft Article', 'Not ready.', 'Draft.', 'Mike Alvarez', 'Drafts', NULL, 0, 0, NULL);

INSERT INTO pages (id, slug, title, nav_label, hero_headline, hero_subheadline, content, show_in_nav, show_reviews, show_cta, is_published, sort_order)
VALUES
    (1, 'about', 'About Us', 'About', 'About Austin Pro Plumbing', 'Family owned since 2005.',
     '## Our Story

Founded in **2005**, we have grown from one truck to a full team.', 1, 1, 1, 1, 1),
    (2, 'financing', 'Financing Options', 'Financing', 'Flexible Financing', 'Big repairs, small payments.',
     'Ask about 0% financing on water heater replacement.', 1, 0, 1, 1, 2),
    (3, 'privacy', 'Privacy Policy', 'Privacy', 'Privacy Policy', NULL, 'We never sell your data.', 0, 0, 0, 1, 3),
    (4, 'careers', 'Careers', 'Careers', 'Join the Team', NULL, 'Draft.', 1, 0, 0, 0, 0);

INSERT INTO tokens (id, color_mode, primary_color, primary_hover, secondary_color, accent_color,
    light_background, light_surface, light_surface_alt, light_text, light_text_body, light_text_muted, light_border,
    dark_background, dark_surface, dark_surface_alt, dark_text, dark_text_body, dark_text_muted, dark_border,
    font_heading, font_body, radius)
VALUES (1, 'light', '#2563eb', '#1d4ed8', '#0f172a', '#f59e0b',
    '#ffffff', '#f8fafc', '#f1f5f9', '#0f172a', '#334155', '#64748b', '#e2e8f0',
    '#0b1120', '#111827', '#1f2937', '#f8fafc', '#cbd5e1', '#94a3b8', '#334155',
    'Plus Jakarta Sans', 'Inter', '0.75rem');

INSERT INTO global_content (key, value)
VALUES
    ('cta_headline', 'Need a Plumber Today?'),
    ('cta_subheadline', 'Call now or request a free estimate online.'),
    ('cta_button_primary', 'Call Now'),
    ('cta_button_secondary', 'Get Free Estimate'),
    ('reviews_headline', 'What Our Customers Say'),
    ('reviews_subheadline', 'Hundreds of five-star reviews from Austin homeowners.'),
    ('services_headline', 'Our Services'),
    ('services_subheadline', 'Everything from dripping faucets to full repipes.'),
    ('footer_tagline', 'Honest plumbing, done right the first time.');

INSERT INTO media (slug, url, alt_text)
VALUES
    ('service-hero-water-heaters', '/api/media/services/water-heater.jpg', 'Technician installing a tankless water heater');
"#;

/// Create (or upgrade) the database at `path`, optionally loading the demo content
pub fn initialize(path: &Path, seed: bool) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
    )?;
    conn.execute_batch(SCHEMA)?;
    if seed {
        conn.execute_batch(SEED)?;
    }

    tracing::debug!("Initialized database at {:?}", path);
    Ok(())
}
