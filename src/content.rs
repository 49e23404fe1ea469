//! Localized copy for service × area pages.
//!
//! Each combined page gets one paragraph picked from a fixed set of
//! templates. The choice is keyed on the area name so that neighbouring
//! pages read differently while any given page stays stable across builds.

use crate::catalog::{Area, Service};
use crate::config::SiteConfig;

type Template = fn(&SiteConfig, &Service, &Area) -> String;

const TEMPLATES: [Template; 3] = [hygiene_check, leading_provider, specialist];

fn hygiene_check(config: &SiteConfig, service: &Service, area: &Area) -> String {
    format!(
        "Is your {} up to date? Don't let your property in {} suffer from hygiene issues. \
         {} provides top-rated professional {} in {}, {} for both residential and commercial clients. \
         Trusted near {}, we ensure bacteria-free results.",
        service.name.to_lowercase(),
        area.name,
        config.company.name,
        service.name,
        area.name,
        area.city,
        area.landmark(0)
    )
}

fn leading_provider(_config: &SiteConfig, service: &Service, area: &Area) -> String {
    format!(
        "We are the leading providers of {} near {} and across {}. \
         Our professional team uses high-pressure jets and eco-friendly solutions \
         to guarantee safe results for residents of {}.",
        service.name,
        area.landmark(1),
        area.name,
        area.name
    )
}

fn specialist(config: &SiteConfig, service: &Service, area: &Area) -> String {
    format!(
        "{} specializes in {} for homes and offices located in {}. \
         Trusted by thousands near {}, we offer the best quality cleaning with a 100% satisfaction guarantee.",
        config.company.name,
        service.name,
        area.name,
        area.landmark(2)
    )
}

/// Pick `templates[len(key) % templates.len()]`, counting characters.
/// `None` only for an empty template list.
pub fn select_template<'t, T>(templates: &'t [T], key: &str) -> Option<&'t T> {
    if templates.is_empty() {
        return None;
    }
    templates.get(key.chars().count() % templates.len())
}

/// The localized paragraph for a combined page. Deterministic in its inputs.
pub fn generate_area_specific_content(config: &SiteConfig, service: &Service, area: &Area) -> String {
    match select_template(&TEMPLATES, &area.name) {
        Some(template) => template(config, service, area),
        None => String::new(),
    }
}
