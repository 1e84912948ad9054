//! Route handlers for the server-rendered pages

use axum::extract::{Path, Query as UrlQuery, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use serde_json::{json, Value};

use super::sections::{self, field, image_or, items, with_card_images};
use super::{Missing, PageState};
use crate::api::contact::{self, ContactForm};
use crate::api::{catalog, pages, ApiError};
use crate::content::{render_article, render_content};
use crate::helpers::html_escape;

const FAQ_TITLE: &str = "Frequently Asked Questions";

const PAGE_MISSING: Missing = Missing {
    heading: "Page Not Found",
    back_href: "/",
    back_label: "Back to Home",
};

/// Carousel position from `?slide=N`
#[derive(Debug, Default, Deserialize)]
pub struct SlideQuery {
    slide: Option<String>,
}

impl SlideQuery {
    fn index(&self) -> usize {
        self.slide
            .as_deref()
            .and_then(|slide| slide.parse().ok())
            .unwrap_or(0)
    }
}

macro_rules! shell_or_return {
    ($state:expr) => {
        match $state.shell().await {
            Ok(shell) => shell,
            Err(response) => return response,
        }
    };
}

pub async fn home(State(state): State<PageState>, UrlQuery(query): UrlQuery<SlideQuery>) -> Response {
    let shell = shell_or_return!(state);
    let site = shell.site();
    let description = field(site, "description").unwrap_or_default();

    let mut context = shell.context(shell.site_name(), description);
    context.insert("hero_image", sections::HOME_HERO);
    context.insert("about_image", sections::HOME_ABOUT);
    context.insert("why_image", sections::HOME_WHY_US);
    context.insert("years", &shell.years_in_business());
    context.insert(
        "carousel",
        &shell.carousel(
            field(shell.content(), "services_headline").unwrap_or_default(),
            field(shell.content(), "services_subheadline").unwrap_or_default(),
            shell.list("services"),
            query.index(),
        ),
    );
    context.insert("reviews", &shell.reviews(shell.list("testimonials")));
    context.insert("faq", &shell.faq(FAQ_TITLE, shell.list("faqs")));
    state.render("home.html", &context, StatusCode::OK)
}

pub async fn about(State(state): State<PageState>) -> Response {
    let shell = shell_or_return!(state);

    // The CMS "about" page is optional: its copy replaces the stock story
    // and its FAQs replace the global ones
    let page = match pages::page_detail(&state.app, "about").await {
        Ok(page) => Some(page),
        Err(ApiError::NotFound(_)) => None,
        Err(e) => return state.failure(&shell, e, &PAGE_MISSING),
    };
    let story_html = page
        .as_ref()
        .and_then(|page| field(page, "content"))
        .map(render_content);
    let faqs = match page.as_ref().map(|page| items(&page["faqs"])) {
        Some(faqs) if !faqs.is_empty() => faqs,
        _ => shell.list("faqs"),
    };

    let team: Vec<Value> = shell
        .list("team")
        .iter()
        .map(|member| {
            let mut member = member.clone();
            let photo = match field(&member, "photo") {
                Some(photo) => photo.to_string(),
                None => format!("https://i.pravatar.cc/150?u={}", member["id"]),
            };
            if let Some(map) = member.as_object_mut() {
                map.insert("photo_url".to_string(), json!(photo));
            }
            member
        })
        .collect();

    let mut context = shell.context(&shell.title("About Us"), "");
    context.insert("hero_image", sections::ABOUT_HERO);
    context.insert("content_image", sections::ABOUT_CONTENT);
    context.insert("years", &shell.years_in_business());
    context.insert("story_html", &story_html);
    context.insert("team", &team);
    context.insert("faq", &shell.faq(FAQ_TITLE, faqs));
    context.insert("reviews", &shell.reviews(shell.list("testimonials")));
    state.render("about.html", &context, StatusCode::OK)
}

pub async fn contact(State(state): State<PageState>) -> Response {
    let shell = shell_or_return!(state);
    let mut context = shell.context(&shell.title("Contact Us"), "");
    context.insert("hero_image", sections::CONTACT_HERO);
    context.insert("form", &form_values(&ContactForm::default()));
    context.insert("status", "idle");
    context.insert("error_message", "");
    state.render("contact.html", &context, StatusCode::OK)
}

/// Form post from the contact page, stored like an `/api/contact` submission
pub async fn submit_contact(State(state): State<PageState>, Form(form): Form<ContactForm>) -> Response {
    let shell = shell_or_return!(state);
    let mut context = shell.context(&shell.title("Contact Us"), "");
    context.insert("hero_image", sections::CONTACT_HERO);
    context.insert("form", &form_values(&form));

    let status = match contact::submit_contact(&state.app, form).await {
        Ok(_) => {
            context.insert("status", "success");
            context.insert("error_message", "");
            StatusCode::OK
        }
        Err(ApiError::Validation(message)) => {
            context.insert("status", "error");
            context.insert("error_message", message);
            StatusCode::BAD_REQUEST
        }
        Err(e) => {
            context.insert("status", "error");
            context.insert(
                "error_message",
                "Something went wrong. Please try again or call us directly.",
            );
            e.status()
        }
    };
    state.render("contact.html", &context, status)
}

/// Submitted values echoed back into the form, escaped for attribute use
fn form_values(form: &ContactForm) -> Value {
    let escaped = |value: &Option<String>| html_escape(value.as_deref().unwrap_or_default());
    json!({
        "name": escaped(&form.name),
        "email": escaped(&form.email),
        "phone": escaped(&form.phone),
        "message": escaped(&form.message),
    })
}

pub async fn services(State(state): State<PageState>) -> Response {
    let shell = shell_or_return!(state);
    let cards = with_card_images(shell.list("services"), "hero_image", sections::SERVICE_CARD);

    let mut context = shell.context(&shell.title("Our Services"), "");
    context.insert("hero_image", sections::SERVICES_HERO);
    context.insert("cards", &cards);
    context.insert("reviews", &shell.reviews(shell.list("testimonials")));
    state.render("services.html", &context, StatusCode::OK)
}

pub async fn service(State(state): State<PageState>, Path(slug): Path<String>) -> Response {
    let shell = shell_or_return!(state);
    let service = match catalog::service_detail(&state.app, &slug).await {
        Ok(service) => service,
        Err(e) => {
            let missing = Missing {
                heading: "Service Not Found",
                back_href: "/services",
                back_label: "View All Services",
            };
            return state.failure(&shell, e, &missing);
        }
    };

    let name = field(&service, "title").unwrap_or_default();
    let title = match field(&service, "meta_title") {
        Some(meta) => meta.to_string(),
        None => shell.title(name),
    };
    let description = field(&service, "meta_description")
        .or_else(|| field(&service, "short_description"))
        .unwrap_or_default();

    let mut context = shell.context(&title, description);
    context.insert("hero_image", &image_or(&service, "hero_image", sections::SERVICE_HERO));
    context.insert(
        "content_image",
        &image_or(&service, "content_image", sections::SERVICE_CONTENT),
    );
    context.insert("faq", &shell.faq(format!("{} FAQs", name), items(&service["faqs"])));
    context.insert("reviews", &shell.reviews(items(&service["testimonials"])));
    context.insert("service", &service);
    state.render("service.html", &context, StatusCode::OK)
}

pub async fn service_areas(State(state): State<PageState>) -> Response {
    let shell = shell_or_return!(state);
    let cards = with_card_images(shell.list("serviceAreas"), "hero_image", sections::AREA_CARD);

    let mut context = shell.context(&shell.title("Service Areas"), "");
    context.insert("cards", &cards);
    state.render("areas.html", &context, StatusCode::OK)
}

pub async fn service_area(
    State(state): State<PageState>,
    Path(slug): Path<String>,
    UrlQuery(query): UrlQuery<SlideQuery>,
) -> Response {
    let shell = shell_or_return!(state);
    let area = match catalog::service_area_detail(&state.app, &slug).await {
        Ok(area) => area,
        Err(e) => {
            let missing = Missing {
                heading: "Service Area Not Found",
                back_href: "/service-areas",
                back_label: "View All Areas",
            };
            return state.failure(&shell, e, &missing);
        }
    };

    let name = field(&area, "name").unwrap_or_default();
    let title = match field(&area, "meta_title") {
        Some(meta) => meta.to_string(),
        None => shell.title(&format!("Plumbing in {}", name)),
    };
    let description = field(&area, "meta_description")
        .or_else(|| field(&area, "short_description"))
        .unwrap_or_default();

    let mut context = shell.context(&title, description);
    context.insert("hero_image", &image_or(&area, "hero_image", sections::AREA_HERO));
    context.insert("content_image", &image_or(&area, "content_image", sections::AREA_CONTENT));
    context.insert(
        "carousel",
        &shell.carousel(
            &format!("Services Available in {}", name),
            &format!("Professional plumbing solutions for {} residents", name),
            items(&area["services"]),
            query.index(),
        ),
    );
    context.insert("faq", &shell.faq(format!("{} FAQs", name), items(&area["faqs"])));
    context.insert("reviews", &shell.reviews(items(&area["testimonials"])));
    context.insert("area", &area);
    state.render("area.html", &context, StatusCode::OK)
}

pub async fn articles(State(state): State<PageState>) -> Response {
    let shell = shell_or_return!(state);
    let articles = match pages::article_list(&state.app).await {
        Ok(articles) => articles,
        Err(e) => return state.failure(&shell, e, &PAGE_MISSING),
    };
    let cards = with_card_images(items(&articles), "featured_image", sections::ARTICLE_CARD);

    let mut context = shell.context(&shell.title("Articles & Tips"), "");
    context.insert("hero_image", sections::ARTICLES_HERO);
    context.insert("cards", &cards);
    state.render("articles.html", &context, StatusCode::OK)
}

pub async fn article(State(state): State<PageState>, Path(slug): Path<String>) -> Response {
    let shell = shell_or_return!(state);
    let article = match pages::article_detail(&state.app, &slug).await {
        Ok(article) => article,
        Err(e) => {
            let missing = Missing {
                heading: "Article Not Found",
                back_href: "/articles",
                back_label: "View All Articles",
            };
            return state.failure(&shell, e, &missing);
        }
    };

    let rendered = render_article(field(&article, "content").unwrap_or_default());
    let title = match field(&article, "meta_title") {
        Some(meta) => meta.to_string(),
        None => shell.title(field(&article, "title").unwrap_or_default()),
    };
    let description = field(&article, "meta_description")
        .or_else(|| field(&article, "excerpt"))
        .unwrap_or_default();

    let mut context = shell.context(&title, description);
    context.insert(
        "hero_image",
        &image_or(&article, "featured_image", sections::ARTICLE_HERO),
    );
    context.insert("body_html", &rendered.html);
    context.insert("toc", &rendered.toc);
    context.insert("tags", &sections::split_tags(field(&article, "tags")));
    context.insert("article", &article);
    state.render("article.html", &context, StatusCode::OK)
}

/// Published CMS page at `/{slug}`
pub async fn page(State(state): State<PageState>, Path(slug): Path<String>) -> Response {
    let shell = shell_or_return!(state);
    let page = match pages::page_detail(&state.app, &slug).await {
        Ok(page) => page,
        Err(e) => return state.failure(&shell, e, &PAGE_MISSING),
    };

    let description = field(&page, "hero_subheadline").unwrap_or_default();
    let mut context = shell.context(
        &shell.title(field(&page, "title").unwrap_or_default()),
        description,
    );
    context.insert("hero_image", &image_or(&page, "hero_image", sections::ABOUT_HERO));
    context.insert("faq", &shell.faq(FAQ_TITLE, items(&page["faqs"])));
    context.insert("reviews", &shell.reviews(shell.list("testimonials")));
    context.insert("page", &page);
    state.render("page.html", &context, StatusCode::OK)
}

/// Any path no route claims
pub async fn not_found(State(state): State<PageState>) -> Response {
    let shell = shell_or_return!(state);
    state.not_found(&shell, &PAGE_MISSING)
}
