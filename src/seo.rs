//! SEO metadata and JSON-LD structured data.
//!
//! Everything here is a pure function of the site config and catalog records:
//! calling any of them twice with the same inputs yields identical output.
//!
//! ## Description Bounds
//!
//! Generated descriptions pass through two hard limits, in order:
//!
//! 1. a 300-character safety cut (297 chars + `...`)
//! 2. the 130-character display cut (127 chars + `...`)
//!
//! so every description is at most 130 characters. Lengths count Unicode
//! scalar values. Titles are never truncated.

use serde::Serialize;
use serde_json::{Value, json};

use crate::catalog::{Area, Faq, Service};
use crate::config::SiteConfig;
use crate::slug;

pub const SAFETY_LIMIT: usize = 300;
pub const DESCRIPTION_LIMIT: usize = 130;
const ELLIPSIS: &str = "...";

/// Head metadata for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub hreflang: Vec<Hreflang>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hreflang {
    pub lang: String,
    pub href: String,
}

impl SeoMetadata {
    /// Metadata with the description bounded and hreflang pointing at `canonical_url`.
    fn new(title: String, description: &str, canonical_url: String) -> Self {
        Self {
            title,
            description: clamp_description(description),
            hreflang: hreflang_for(&canonical_url),
            canonical_url,
            structured_data: None,
        }
    }

    pub fn with_structured_data(mut self, data: Value) -> Self {
        self.structured_data = Some(data);
        self
    }
}

/// `en-in` and `x-default` alternates, both pointing at the canonical URL.
pub fn hreflang_for(canonical_url: &str) -> Vec<Hreflang> {
    ["en-in", "x-default"]
        .into_iter()
        .map(|lang| Hreflang {
            lang: lang.to_string(),
            href: canonical_url.to_string(),
        })
        .collect()
}

/// Cut `text` to at most `limit` characters, ending in `...` when cut.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Apply the safety bound, then the display bound.
pub fn clamp_description(text: &str) -> String {
    truncate_chars(&truncate_chars(text, SAFETY_LIMIT), DESCRIPTION_LIMIT)
}

/// Site-relative path of a service page, with or without an area.
pub fn service_path(config: &SiteConfig, service: &Service, area: Option<&Area>) -> String {
    match area {
        Some(area) => format!(
            "/{}",
            slug::combined_slug(service, area, &config.company.primary_city)
        ),
        None => format!("/services/{}", service.slug),
    }
}

/// Title, description, canonical and hreflang for a service page.
pub fn generate_meta(config: &SiteConfig, service: &Service, area: Option<&Area>) -> SeoMetadata {
    let city = &config.company.primary_city;
    let company = &config.company.name;

    let (title, description) = match area {
        Some(area) => (
            format!(
                "{} in {}, {} | Best {} near {}",
                service.name,
                area.name,
                city,
                service.short_name(),
                area.landmark(0)
            ),
            format!(
                "Professional {} in {}, {}. Serving near {}. {} Verified experts, {}/5 rating. Call {} for a free quote in {}.",
                service.name,
                area.name,
                city,
                area.landmarks.join(", "),
                service.short_desc,
                service.avg_rating,
                config.company.phone,
                area.name
            ),
        ),
        None => (
            format!(
                "{} in {} | #1 Professional Cleaning Services {} | {}",
                service.name, city, city, company
            ),
            format!(
                "Looking for {} in {}? {} offers expert {} with 6-stage scientific process. {} Book now for homes and offices.",
                service.name,
                city,
                company,
                service.name.to_lowercase(),
                service.short_desc
            ),
        ),
    };

    SeoMetadata::new(
        title,
        &description,
        config.absolute_url(&service_path(config, service, area)),
    )
}

/// `Service` entity with a nested `LocalBusiness` provider.
pub fn generate_service_schema(
    config: &SiteConfig,
    service: &Service,
    area_name: Option<&str>,
) -> Value {
    let location = area_name.unwrap_or(&config.company.primary_city);
    json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "name": format!("{} in {}", service.name, location),
        "serviceType": service.name,
        "provider": {
            "@type": "LocalBusiness",
            "name": config.company.name,
            "telephone": config.company.phone,
            "address": {
                "@type": "PostalAddress",
                "addressLocality": location,
                "addressRegion": config.company.address.region,
                "addressCountry": config.company.address.country,
            }
        },
        "areaServed": {
            "@type": "City",
            "name": location,
        },
        "aggregateRating": {
            "@type": "AggregateRating",
            "ratingValue": service.avg_rating,
            "reviewCount": service.review_count,
        }
    })
}

/// `FAQPage` with one `Question` per entry, order preserved.
pub fn generate_faq_schema(faqs: &[Faq]) -> Value {
    let entries: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                }
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entries,
    })
}

/// Service and FAQ schemas merged under a single `@graph`.
pub fn service_page_graph(config: &SiteConfig, service: &Service, area: Option<&Area>) -> Value {
    json!({
        "@graph": [
            generate_service_schema(config, service, area.map(|a| a.name.as_str())),
            generate_faq_schema(&service.faqs),
        ]
    })
}

/// Full head metadata for a service page, structured data included.
pub fn service_page_meta(config: &SiteConfig, service: &Service, area: Option<&Area>) -> SeoMetadata {
    generate_meta(config, service, area).with_structured_data(service_page_graph(config, service, area))
}

// ============================================================================
// Static pages
// ============================================================================

fn service_names(services: &[Service]) -> String {
    services
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn home_meta(config: &SiteConfig, services: &[Service]) -> SeoMetadata {
    let c = &config.company;
    let short_names: Vec<&str> = services.iter().map(Service::short_name).collect();
    SeoMetadata::new(
        format!(
            "{} | Best Cleaning Services in {} | {}",
            c.name,
            c.primary_city,
            short_names.join(", ")
        ),
        &format!(
            "{} offers professional {} in {}. {}+ Years Experience. Trusted by 10k+ Clients. Book verified cleaners today.",
            c.name,
            service_names(services),
            c.primary_city,
            c.years_experience
        ),
        config.absolute_url("/"),
    )
}

pub fn area_directory_meta(config: &SiteConfig, area: &Area, services: &[Service]) -> SeoMetadata {
    SeoMetadata::new(
        format!(
            "Best Cleaning Services in {} | Expert {}",
            area.name, config.company.name
        ),
        &format!(
            "Top-rated professional cleaning services in {}, {}. {}. Book now for reliable service near {}.",
            area.name,
            area.city,
            service_names(services),
            area.landmark(0)
        ),
        config.absolute_url(&format!("/areas/{}", area.slug)),
    )
}

pub fn locations_meta(config: &SiteConfig, areas: &[Area]) -> SeoMetadata {
    let featured: Vec<&str> = areas.iter().take(3).map(|a| a.name.as_str()).collect();
    SeoMetadata::new(
        format!("Service Areas | {}", config.company.name),
        &format!(
            "Find {} near you. We cover {} neighborhoods in {} including {}.",
            config.company.name,
            areas.len(),
            config.company.primary_city,
            featured.join(", ")
        ),
        config.absolute_url("/locations"),
    )
}

pub fn clients_meta(config: &SiteConfig, client_names: &[&str]) -> SeoMetadata {
    let featured: Vec<&str> = client_names.iter().take(3).copied().collect();
    SeoMetadata::new(
        format!(
            "Our Clients | Trusted by 500+ Corporations | {}",
            config.company.name
        ),
        &format!(
            "Prestigious clients in {} trust {} for cleaning needs. Serving {} & more.",
            config.company.primary_city,
            config.company.name,
            featured.join(", ")
        ),
        config.absolute_url("/clients"),
    )
}

pub fn about_meta(config: &SiteConfig) -> SeoMetadata {
    let c = &config.company;
    SeoMetadata::new(
        format!("About Us | {} Years of Excellence | {}", c.years_experience, c.name),
        &format!(
            "{} has kept homes, societies and businesses in {} hygienic for {}+ years.",
            c.name, c.primary_city, c.years_experience
        ),
        config.absolute_url("/about"),
    )
}

pub fn contact_meta(config: &SiteConfig) -> SeoMetadata {
    let c = &config.company;
    SeoMetadata::new(
        format!("Contact Us | Book a Cleaning in {} | {}", c.primary_city, c.name),
        &format!(
            "Book tank, STP or deep cleaning with {}. Call {} or send an enquiry and we will call you back.",
            c.name, c.phone
        ),
        config.absolute_url("/contact"),
    )
}

pub fn not_found_meta(config: &SiteConfig) -> SeoMetadata {
    SeoMetadata::new(
        format!("Page Not Found | {}", config.company.name),
        "The page you are looking for does not exist.",
        config.absolute_url("/404.html"),
    )
}
