//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output leads with what a page *is* (its route) and shows the file it was
//! written to as secondary context. The same helpers format `check`,
//! `build` and `routes`, so one catalog entry reads the same in all three.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Services
//! 001 Water Tank Cleaning Services
//!     Slug: water-tank-cleaning
//!     FAQs: 4
//!
//! Areas
//! 001 Indiranagar (560038)
//!     Landmarks: Metro Station, 100 Ft Road, ESI Hospital
//!
//! Clients
//!     24 clients
//!
//! Config
//!     Base URL: https://hygieniccleaning.com
//!     Chat: disabled (no API key)
//!     Forms: demo mode (no access key)
//! ```
//!
//! ## Build
//!
//! ```text
//! Pages
//!     Home → index.html
//!     Clients → clients/index.html
//!     ...
//! Services
//!     001 water-tank-cleaning → services/water-tank-cleaning/index.html
//! Areas
//!     001 indiranagar → areas/indiranagar/index.html
//! Combined
//!     90 pages (3 services × 30 areas)
//!
//! Generated 128 pages, 128 sitemap URLs, 2 assets
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::generate::BuildReport;
use crate::routes::Route;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Display label for a static route.
fn route_label(route: &Route) -> &'static str {
    match route {
        Route::Home => "Home",
        Route::Clients => "Clients",
        Route::Locations => "Locations",
        Route::About => "About",
        Route::Contact => "Contact",
        Route::Service(_) => "Service",
        Route::Area(_) => "Area",
        Route::Seo(_) => "Combined",
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Catalog inventory and the collaborator state the config implies.
pub fn format_check_output(catalog: &Catalog, config: &SiteConfig) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Services".to_string());
    for (i, service) in catalog.services().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), service.name));
        lines.push(format!("{}Slug: {}", indent(1), service.slug));
        lines.push(format!("{}FAQs: {}", indent(1), service.faqs.len()));
    }

    lines.push(String::new());
    lines.push("Areas".to_string());
    for (i, area) in catalog.areas().iter().enumerate() {
        let header = match area.primary_zip() {
            Some(zip) => format!("{} {} ({})", format_index(i + 1), area.name, zip),
            None => format!("{} {}", format_index(i + 1), area.name),
        };
        lines.push(header);
        lines.push(format!("{}Landmarks: {}", indent(1), area.landmarks.join(", ")));
    }

    lines.push(String::new());
    lines.push("Clients".to_string());
    lines.push(format!(
        "{}{}",
        indent(1),
        plural(catalog.clients().len(), "client", "clients")
    ));

    lines.push(String::new());
    lines.push("Config".to_string());
    lines.push(format!("{}Base URL: {}", indent(1), config.base_url));
    lines.push(format!(
        "{}Chat: {}",
        indent(1),
        if config.chat.enabled() {
            format!("enabled ({})", config.chat.model)
        } else {
            "disabled (no API key)".to_string()
        }
    ));
    lines.push(format!(
        "{}Forms: {}",
        indent(1),
        if config.forms.enabled() {
            "Web3Forms"
        } else {
            "demo mode (no access key)"
        }
    ));
    lines
}

pub fn print_check_output(catalog: &Catalog, config: &SiteConfig) {
    for line in format_check_output(catalog, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Written pages grouped by kind. Combined pages are summarized, not listed.
pub fn format_build_output(report: &BuildReport, catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    let mut services = Vec::new();
    let mut areas = Vec::new();
    let mut combined = 0;

    lines.push("Pages".to_string());
    for page in &report.pages {
        match &page.route {
            Route::Service(slug) => services.push((slug, &page.file)),
            Route::Area(slug) => areas.push((slug, &page.file)),
            Route::Seo(_) => combined += 1,
            other => lines.push(format!("{}{} → {}", indent(1), route_label(other), page.file)),
        }
    }

    lines.push("Services".to_string());
    for (i, (slug, file)) in services.iter().enumerate() {
        lines.push(format!("{}{} {} → {}", indent(1), format_index(i + 1), slug, file));
    }

    lines.push("Areas".to_string());
    for (i, (slug, file)) in areas.iter().enumerate() {
        lines.push(format!("{}{} {} → {}", indent(1), format_index(i + 1), slug, file));
    }

    lines.push("Combined".to_string());
    lines.push(format!(
        "{}{} ({} × {})",
        indent(1),
        plural(combined, "page", "pages"),
        plural(catalog.services().len(), "service", "services"),
        plural(catalog.areas().len(), "area", "areas"),
    ));

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.sitemap_urls, "sitemap URL", "sitemap URLs"),
        plural(report.assets_copied, "asset", "assets"),
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, catalog: &Catalog) {
    for line in format_build_output(report, catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Routes output
// ============================================================================

/// One line per published path: kind, then path.
pub fn format_routes_output(routes: &[Route]) -> Vec<String> {
    routes
        .iter()
        .map(|route| format!("{:<10}{}", route_label(route), route.path()))
        .collect()
}

pub fn print_routes_output(routes: &[Route]) {
    for line in format_routes_output(routes) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::PageEntry;
    use crate::routes::all_routes;
    use crate::test_helpers::*;

    fn report_for(catalog: &Catalog) -> BuildReport {
        let pages: Vec<PageEntry> = all_routes(catalog, &test_config())
            .into_iter()
            .map(|route| PageEntry {
                file: route.output_file(),
                route,
            })
            .collect();
        BuildReport {
            sitemap_urls: pages.len(),
            pages,
            assets_copied: 1,
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page", "pages"), "1 page");
        assert_eq!(plural(0, "page", "pages"), "0 pages");
    }

    #[test]
    fn check_lists_services_and_areas() {
        let catalog = sample_catalog();
        let lines = format_check_output(&catalog, &test_config());
        assert_eq!(lines[0], "Services");
        assert_eq!(lines[1], "001 Water Tank Cleaning Services");
        assert_eq!(lines[2], "    Slug: water-tank-cleaning");
        assert!(lines.contains(&"001 Indiranagar (560038)".to_string()));
        assert!(lines.contains(&"    Landmarks: Metro Station, 100 Feet Road, HAL 2nd Stage".to_string()));
        assert!(lines.contains(&"    4 clients".to_string()));
        assert!(lines.contains(&"    Chat: disabled (no API key)".to_string()));
        assert!(lines.contains(&"    Forms: demo mode (no access key)".to_string()));
    }

    #[test]
    fn check_reports_enabled_collaborators() {
        let catalog = sample_catalog();
        let mut config = test_config();
        config.chat.api_key = Some("k".into());
        config.forms.access_key = Some("f".into());
        let lines = format_check_output(&catalog, &config);
        assert!(lines.iter().any(|l| l.starts_with("    Chat: enabled (")));
        assert!(lines.contains(&"    Forms: Web3Forms".to_string()));
    }

    #[test]
    fn build_summarizes_combined_pages() {
        let catalog = sample_catalog();
        let lines = format_build_output(&report_for(&catalog), &catalog);
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "    Home → index.html");
        assert!(lines.contains(&"    002 stp-cleaning-maintenance → services/stp-cleaning-maintenance/index.html".to_string()));
        assert!(lines.contains(&"    15 pages (3 services × 5 areas)".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 28 pages, 28 sitemap URLs, 1 asset"
        );
        assert!(!lines.iter().any(|l| l.contains("best-")));
    }

    #[test]
    fn routes_output_one_line_per_route() {
        let catalog = sample_catalog();
        let routes = all_routes(&catalog, &test_config());
        let lines = format_routes_output(&routes);
        assert_eq!(lines.len(), routes.len());
        assert_eq!(lines[0], "Home      /");
        assert!(lines.contains(&"Combined  /best-water-tank-cleaning-in-indiranagar-bangalore".to_string()));
    }
}
