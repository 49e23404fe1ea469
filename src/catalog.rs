//! The static dataset of services, areas, and clients.
//!
//! Loaded once from `catalog.toml` in the content directory, validated, and
//! never mutated afterwards. Every other module borrows from it.
//!
//! ## File Layout
//!
//! ```toml
//! [[services]]
//! id = "tank"
//! slug = "water-tank-cleaning"
//! name = "Water Tank Cleaning Services"
//! short_desc = "..."
//! # ...
//! [[services.faqs]]
//! question = "How often does {company} recommend cleaning?"
//! answer = "..."
//!
//! [[areas]]
//! slug = "indiranagar"
//! name = "Indiranagar"
//! city = "Bangalore"
//! landmarks = ["Metro Station", "100 Ft Road", "ESI Hospital"]
//! zip_codes = ["560038"]
//!
//! [[clients]]
//! name = "Prestige Group"
//! ```
//!
//! Service text may contain `{company}`, `{phone}` and `{city}`; they are
//! expanded from the site config at load time.
//!
//! ## Invariants
//!
//! Enforced by [`Catalog::new`]:
//! - at least one service (the first one is the fallback for unknown slugs)
//! - service and area slugs are unique and made of `[a-z0-9-]`
//! - service slugs never contain the reserved `-in-` separator
//! - every area has at least one landmark
//! - ratings are within range

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::config::SiteConfig;
use crate::slug::{self, SEPARATOR};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Catalog declares no services")]
    NoServices,
    #[error("Invalid slug {0:?} (expected lowercase letters, digits and hyphens)")]
    InvalidSlug(String),
    #[error("Duplicate service slug: {0}")]
    DuplicateServiceSlug(String),
    #[error("Duplicate area slug: {0}")]
    DuplicateAreaSlug(String),
    #[error("Service slug {0:?} contains the reserved separator \"-in-\"")]
    ReservedSeparator(String),
    #[error("Area {0} has no landmarks")]
    NoLandmarks(String),
    #[error("Rating out of range for service {0}")]
    RatingOutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub name: String,
    /// Free-form locality label; not required to be a catalog area.
    pub area: String,
    pub content: String,
    /// 1 to 5 stars.
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Service {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub short_desc: String,
    pub long_desc: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub why_choose_us: Vec<String>,
    #[serde(default)]
    pub workflow: Vec<String>,
    #[serde(default)]
    pub dos: Vec<String>,
    #[serde(default)]
    pub donts: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    pub avg_rating: f64,
    pub review_count: u32,
    pub service_time: String,
    pub staff_sent: String,
    #[serde(default)]
    pub equipment_used: Vec<String>,
    pub image: String,
}

impl Service {
    /// Display name without a trailing " Services" ("Water Tank Cleaning").
    pub fn short_name(&self) -> &str {
        self.name.strip_suffix(" Services").unwrap_or(&self.name)
    }

    fn expand_placeholders(&mut self, vars: &Placeholders) {
        for text in [&mut self.name, &mut self.short_desc, &mut self.long_desc] {
            *text = vars.expand(text);
        }
        for list in [
            &mut self.benefits,
            &mut self.why_choose_us,
            &mut self.workflow,
            &mut self.dos,
            &mut self.donts,
            &mut self.equipment_used,
        ] {
            for item in list.iter_mut() {
                *item = vars.expand(item);
            }
        }
        for faq in &mut self.faqs {
            faq.question = vars.expand(&faq.question);
            faq.answer = vars.expand(&faq.answer);
        }
        for t in &mut self.testimonials {
            t.content = vars.expand(&t.content);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Area {
    pub slug: String,
    pub name: String,
    pub city: String,
    pub landmarks: Vec<String>,
    #[serde(default)]
    pub zip_codes: Vec<String>,
}

impl Area {
    /// Landmark at `index`, falling back to the last one for short lists.
    pub fn landmark(&self, index: usize) -> &str {
        self.landmarks
            .get(index)
            .or(self.landmarks.last())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn primary_zip(&self) -> Option<&str> {
        self.zip_codes.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// On-disk shape of `catalog.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    services: Vec<Service>,
    #[serde(default)]
    areas: Vec<Area>,
    #[serde(default)]
    clients: Vec<Client>,
}

struct Placeholders {
    company: String,
    phone: String,
    city: String,
}

impl Placeholders {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            company: config.company.name.clone(),
            phone: config.company.phone.clone(),
            city: config.company.primary_city.clone(),
        }
    }

    fn expand(&self, text: &str) -> String {
        text.replace("{company}", &self.company)
            .replace("{phone}", &self.phone)
            .replace("{city}", &self.city)
    }
}

/// Immutable, validated dataset with slug indexes.
#[derive(Debug)]
pub struct Catalog {
    services: Vec<Service>,
    areas: Vec<Area>,
    clients: Vec<Client>,
    service_index: HashMap<String, usize>,
    area_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, enforcing the module invariants.
    pub fn new(
        services: Vec<Service>,
        areas: Vec<Area>,
        clients: Vec<Client>,
    ) -> Result<Self, CatalogError> {
        if services.is_empty() {
            return Err(CatalogError::NoServices);
        }

        let mut service_index = HashMap::with_capacity(services.len());
        for (pos, service) in services.iter().enumerate() {
            if !slug::is_valid_slug(&service.slug) {
                return Err(CatalogError::InvalidSlug(service.slug.clone()));
            }
            if service.slug.contains(SEPARATOR) {
                return Err(CatalogError::ReservedSeparator(service.slug.clone()));
            }
            if !(0.0..=5.0).contains(&service.avg_rating)
                || service.testimonials.iter().any(|t| !(1..=5).contains(&t.rating))
            {
                return Err(CatalogError::RatingOutOfRange(service.slug.clone()));
            }
            if service_index.insert(service.slug.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateServiceSlug(service.slug.clone()));
            }
        }

        let mut area_index = HashMap::with_capacity(areas.len());
        for (pos, area) in areas.iter().enumerate() {
            if !slug::is_valid_slug(&area.slug) {
                return Err(CatalogError::InvalidSlug(area.slug.clone()));
            }
            if area.landmarks.is_empty() {
                return Err(CatalogError::NoLandmarks(area.slug.clone()));
            }
            if area_index.insert(area.slug.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateAreaSlug(area.slug.clone()));
            }
        }

        for (first, second) in slug::ambiguous_service_pairs(&services) {
            warn!(
                first = %first,
                second = %second,
                "service slugs overlap across the -in- separator; catalog order decides"
            );
        }

        Ok(Self {
            services,
            areas,
            clients,
            service_index,
            area_index,
        })
    }

    /// Load and validate `catalog.toml`, expanding text placeholders.
    pub fn load(path: &Path, config: &SiteConfig) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content, config)
    }

    pub fn from_toml(content: &str, config: &SiteConfig) -> Result<Self, CatalogError> {
        let mut file: CatalogFile = toml::from_str(content)?;
        let vars = Placeholders::from_config(config);
        for service in &mut file.services {
            service.expand_placeholders(&vars);
        }
        Self::new(file.services, file.areas, file.clients)
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// First declared service; stands in for unknown direct-route slugs.
    pub fn default_service(&self) -> &Service {
        &self.services[0]
    }

    /// Exact, case-sensitive lookup.
    pub fn find_service_by_slug(&self, slug: &str) -> Option<&Service> {
        self.service_position(slug).map(|pos| &self.services[pos])
    }

    /// Exact, case-sensitive lookup.
    pub fn find_area_by_slug(&self, slug: &str) -> Option<&Area> {
        self.area_index.get(slug).map(|&pos| &self.areas[pos])
    }

    /// Declaration index of a service, used for first-match tie breaks.
    pub(crate) fn service_position(&self, slug: &str) -> Option<usize> {
        self.service_index.get(slug).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn lookups_are_exact() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.find_service_by_slug("water-tank-cleaning").unwrap().id,
            "tank"
        );
        assert!(catalog.find_service_by_slug("Water-Tank-Cleaning").is_none());
        assert!(catalog.find_service_by_slug("water-tank").is_none());
        assert_eq!(
            catalog.find_area_by_slug("indiranagar").unwrap().name,
            "Indiranagar"
        );
        assert!(catalog.find_area_by_slug("INDIRANAGAR").is_none());
    }

    #[test]
    fn default_service_is_first_declared() {
        let catalog = sample_catalog();
        assert_eq!(catalog.default_service().slug, "water-tank-cleaning");
    }

    #[test]
    fn rejects_empty_services() {
        let result = Catalog::new(vec![], vec![area("a", "A", &["x"])], vec![]);
        assert!(matches!(result, Err(CatalogError::NoServices)));
    }

    #[test]
    fn rejects_duplicate_service_slug() {
        let result = Catalog::new(
            vec![service("dup", "One"), service("dup", "Two")],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateServiceSlug(s)) if s == "dup"));
    }

    #[test]
    fn rejects_duplicate_area_slug() {
        let result = Catalog::new(
            vec![service("s", "S")],
            vec![area("a", "A", &["x"]), area("a", "B", &["y"])],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateAreaSlug(_))));
    }

    #[test]
    fn rejects_separator_in_service_slug() {
        let result = Catalog::new(vec![service("plug-in-care", "Plug")], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::ReservedSeparator(_))));
    }

    #[test]
    fn rejects_invalid_area_slug() {
        let result = Catalog::new(
            vec![service("s", "S")],
            vec![area("someshwara nagar", "Someswarapura", &["Jayanagar"])],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::InvalidSlug(_))));
    }

    #[test]
    fn rejects_area_without_landmarks() {
        let result = Catalog::new(vec![service("s", "S")], vec![area("a", "A", &[])], vec![]);
        assert!(matches!(result, Err(CatalogError::NoLandmarks(_))));
    }

    #[test]
    fn rejects_rating_out_of_range() {
        let mut s = service("s", "S");
        s.avg_rating = 5.5;
        let result = Catalog::new(vec![s], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::RatingOutOfRange(_))));
    }

    #[test]
    fn landmark_falls_back_to_last() {
        let a = area("a", "A", &["One", "Two"]);
        assert_eq!(a.landmark(0), "One");
        assert_eq!(a.landmark(1), "Two");
        assert_eq!(a.landmark(2), "Two");
    }

    #[test]
    fn short_name_strips_trailing_services() {
        assert_eq!(
            service("t", "Water Tank Cleaning Services").short_name(),
            "Water Tank Cleaning"
        );
        assert_eq!(
            service("s", "STP Cleaning & Maintenance").short_name(),
            "STP Cleaning & Maintenance"
        );
    }

    #[test]
    fn from_toml_expands_placeholders() {
        let toml = r#"
[[services]]
id = "tank"
slug = "water-tank-cleaning"
name = "Water Tank Cleaning Services"
short_desc = "Clean tanks in {city}."
long_desc = "By {company}."
avg_rating = 4.9
review_count = 10
service_time = "2 hours"
staff_sent = "2 cleaners"
image = "images/tank.jpg"

[[services.faqs]]
question = "How often does {company} recommend cleaning?"
answer = "Call {phone}."

[[areas]]
slug = "indiranagar"
name = "Indiranagar"
city = "Bangalore"
landmarks = ["Metro Station"]
"#;
        let config = SiteConfig::default();
        let catalog = Catalog::from_toml(toml, &config).unwrap();
        let s = catalog.default_service();
        assert_eq!(s.short_desc, "Clean tanks in Bangalore.");
        assert_eq!(s.long_desc, "By Hygienic Cleaning Services.");
        assert_eq!(
            s.faqs[0].question,
            "How often does Hygienic Cleaning Services recommend cleaning?"
        );
        assert_eq!(s.faqs[0].answer, "Call +91 99866 55556.");
        assert!(catalog.clients().is_empty());
    }

    #[test]
    fn from_toml_rejects_unknown_fields() {
        let result = Catalog::from_toml("[[clients]]\nname = \"A\"\nlgoo = \"x\"", &SiteConfig::default());
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn shipped_catalog_loads() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("content");
        let config = crate::config::load_config(&root).unwrap();
        let catalog = Catalog::load(&root.join("catalog.toml"), &config).unwrap();
        assert_eq!(catalog.services().len(), 3);
        assert_eq!(catalog.areas().len(), 30);
        assert!(catalog.areas().iter().all(|a| a.landmarks.len() >= 3));
        assert!(!catalog.clients().is_empty());
        // No placeholder survives expansion
        for s in catalog.services() {
            for faq in &s.faqs {
                assert!(!faq.question.contains('{') && !faq.answer.contains('{'));
            }
        }
    }
}
