//! Shared test utilities for the hygienic-site test suite.
//!
//! Provides record builders, a small in-memory catalog, and lookup helpers
//! that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = sample_catalog();
//! let tank = find_service(&catalog, "water-tank-cleaning");
//! let area = find_area(&catalog, "indiranagar");
//! assert_eq!(area.landmark(0), "Metro Station");
//! ```

use crate::catalog::{Area, Catalog, Client, Faq, Service, Testimonial};
use crate::config::SiteConfig;

/// Default config with a recognisable base URL.
pub fn test_config() -> SiteConfig {
    SiteConfig {
        base_url: "https://example.test".to_string(),
        ..SiteConfig::default()
    }
}

// =========================================================================
// Record builders
// =========================================================================

/// A service with every field populated.
pub fn service(slug: &str, name: &str) -> Service {
    Service {
        id: slug.to_string(),
        slug: slug.to_string(),
        name: name.to_string(),
        short_desc: format!("Reliable {name} for homes and offices."),
        long_desc: format!("{name} carried out by trained, verified staff."),
        benefits: vec!["Safe results".to_string(), "Fast turnaround".to_string()],
        why_choose_us: vec!["Trained staff".to_string()],
        workflow: vec!["Inspect".to_string(), "Clean".to_string(), "Verify".to_string()],
        dos: vec!["Book ahead".to_string()],
        donts: vec!["Use harsh acids".to_string()],
        faqs: vec![
            Faq {
                question: format!("How long does {name} take?"),
                answer: "Usually two to three hours.".to_string(),
            },
            Faq {
                question: "Are chemicals safe?".to_string(),
                answer: "Yes, we use eco-friendly solutions.".to_string(),
            },
        ],
        testimonials: vec![Testimonial {
            name: "Ramesh K.".to_string(),
            area: "Jayanagar".to_string(),
            content: "Spotless work.".to_string(),
            rating: 5,
        }],
        avg_rating: 4.8,
        review_count: 100,
        service_time: "2-3 hours".to_string(),
        staff_sent: "2-3 experts".to_string(),
        equipment_used: vec!["High-pressure jet".to_string()],
        image: format!("images/{slug}.jpg"),
    }
}

/// An area in Bangalore with the given landmarks.
pub fn area(slug: &str, name: &str, landmarks: &[&str]) -> Area {
    Area {
        slug: slug.to_string(),
        name: name.to_string(),
        city: "Bangalore".to_string(),
        landmarks: landmarks.iter().map(|l| l.to_string()).collect(),
        zip_codes: vec!["560001".to_string()],
    }
}

/// Three real services and five areas whose name lengths cover every
/// content template.
pub fn sample_catalog() -> Catalog {
    let mut tank = service("water-tank-cleaning", "Water Tank Cleaning Services");
    tank.id = "tank".to_string();
    tank.avg_rating = 4.9;
    tank.review_count = 1540;

    let mut stp = service("stp-cleaning-maintenance", "STP Cleaning & Maintenance");
    stp.id = "stp".to_string();

    let mut deep = service("home-office-deep-cleaning", "Home & Office Deep Cleaning");
    deep.id = "deep".to_string();
    deep.faqs.clear();

    let mut indiranagar = area(
        "indiranagar",
        "Indiranagar",
        &["Metro Station", "100 Feet Road", "HAL 2nd Stage"],
    );
    indiranagar.zip_codes = vec!["560038".to_string()];

    let areas = vec![
        indiranagar,
        area(
            "koramangala",
            "Koramangala",
            &["Forum Mall", "Sony World Signal", "St. John's Hospital"],
        ),
        area("whitefield", "Whitefield", &["ITPL", "Phoenix Marketcity", "Hope Farm"]),
        area(
            "bangalore-city-gpo",
            "Bangalore City GPO",
            &["Cubbon Park", "Vidhana Soudha", "MG Road"],
        ),
        area("rajarajeshwari-nagar", "Rajarajeshwari Nagar", &["Global Village"]),
    ];

    let clients = vec![
        Client { name: "Prestige Group".to_string(), logo: None },
        Client { name: "Brigade Group".to_string(), logo: None },
        Client { name: "Sobha Limited".to_string(), logo: None },
        Client { name: "Embassy Group".to_string(), logo: None },
    ];

    Catalog::new(vec![tank, stp, deep], areas, clients).unwrap()
}

// =========================================================================
// Catalog lookups (panics with a clear message on miss)
// =========================================================================

/// Find a service by slug. Panics if not found.
pub fn find_service<'a>(catalog: &'a Catalog, slug: &str) -> &'a Service {
    catalog.find_service_by_slug(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = catalog.services().iter().map(|s| s.slug.as_str()).collect();
        panic!("service '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find an area by slug. Panics if not found.
pub fn find_area<'a>(catalog: &'a Catalog, slug: &str) -> &'a Area {
    catalog.find_area_by_slug(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = catalog.areas().iter().map(|a| a.slug.as_str()).collect();
        panic!("area '{slug}' not found. Available: {slugs:?}")
    })
}

/// Assert `haystack` contains every needle, naming the first one missing.
pub fn assert_contains_all(haystack: &str, needles: &[&str]) {
    for needle in needles {
        assert!(
            haystack.contains(needle),
            "expected to find {needle:?} in output:\n{haystack}"
        );
    }
}
