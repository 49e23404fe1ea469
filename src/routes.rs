//! URL surface of the site.
//!
//! [`Route::parse`] maps a request path onto one of the site's routes, and
//! [`Route::resolve`] turns a route into a [`PageRequest`] against the
//! catalog, applying the fallback policies:
//!
//! | Path | Miss behaviour |
//! |---|---|
//! | `/services/{slug}` | unknown service renders the first catalog service |
//! | `/areas/{slug}` | unknown area renders the not-found page |
//! | `/{seo_slug}` | unknown service renders the not-found page; unknown area renders city-wide |
//!
//! Static routes win over the `/{seo_slug}` catch-all. Trailing slashes and
//! an `index.html` suffix are accepted so that the static output tree and
//! the server agree on every path.

use crate::catalog::{Area, Catalog, Service};
use crate::config::SiteConfig;
use crate::slug::{self, Resolution};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Clients,
    Service(String),
    Area(String),
    Locations,
    About,
    Contact,
    /// Catch-all combined slug, e.g. `best-water-tank-cleaning-in-indiranagar-bangalore`.
    Seo(String),
}

/// What to render for a route, borrowed from the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageRequest<'a> {
    Home,
    Clients,
    Locations,
    About,
    Contact,
    Service {
        service: &'a Service,
        area: Option<&'a Area>,
    },
    AreaDirectory(&'a Area),
    NotFound,
}

impl Route {
    /// Parse a request path. `None` means no route shape matches
    /// (nested unknown paths, empty slugs).
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.last() == Some(&"index.html") {
            segments.pop();
        }

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["clients"] => Route::Clients,
            ["locations"] => Route::Locations,
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            ["services", slug] => Route::Service(slug.to_string()),
            ["areas", slug] => Route::Area(slug.to_string()),
            [seo_slug] => Route::Seo(seo_slug.to_string()),
            _ => return None,
        };
        Some(route)
    }

    /// Canonical site-relative path, no trailing slash except for `/`.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Clients => "/clients".to_string(),
            Route::Locations => "/locations".to_string(),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Service(slug) => format!("/services/{slug}"),
            Route::Area(slug) => format!("/areas/{slug}"),
            Route::Seo(slug) => format!("/{slug}"),
        }
    }

    /// File the static build writes this route to, relative to the output root.
    pub fn output_file(&self) -> String {
        match self {
            Route::Home => "index.html".to_string(),
            other => format!("{}/index.html", other.path().trim_start_matches('/')),
        }
    }

    pub fn resolve<'a>(&self, catalog: &'a Catalog, config: &SiteConfig) -> PageRequest<'a> {
        match self {
            Route::Home => PageRequest::Home,
            Route::Clients => PageRequest::Clients,
            Route::Locations => PageRequest::Locations,
            Route::About => PageRequest::About,
            Route::Contact => PageRequest::Contact,
            Route::Service(slug) => {
                let service = slug::resolve_service(catalog, slug)
                    .service()
                    .unwrap_or_else(|| catalog.default_service());
                PageRequest::Service {
                    service,
                    area: None,
                }
            }
            Route::Area(slug) => match catalog.find_area_by_slug(slug) {
                Some(area) => PageRequest::AreaDirectory(area),
                None => PageRequest::NotFound,
            },
            Route::Seo(segment) => {
                match slug::resolve_combined(catalog, segment, &config.company.primary_city) {
                    Resolution::FullMatch { service, area } => PageRequest::Service {
                        service,
                        area: Some(area),
                    },
                    Resolution::ServiceOnly { service } => PageRequest::Service {
                        service,
                        area: None,
                    },
                    Resolution::NoMatch => PageRequest::NotFound,
                }
            }
        }
    }
}

/// Every route the site publishes, in sitemap order: static pages, service
/// pages, area directories, then every service × area combination.
pub fn all_routes(catalog: &Catalog, config: &SiteConfig) -> Vec<Route> {
    let mut routes = vec![
        Route::Home,
        Route::Clients,
        Route::Locations,
        Route::About,
        Route::Contact,
    ];
    routes.extend(catalog.services().iter().map(|s| Route::Service(s.slug.clone())));
    routes.extend(catalog.areas().iter().map(|a| Route::Area(a.slug.clone())));
    for service in catalog.services() {
        for area in catalog.areas() {
            routes.push(Route::Seo(slug::combined_slug(
                service,
                area,
                &config.company.primary_city,
            )));
        }
    }
    routes
}
