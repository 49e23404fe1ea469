//! Slug helpers and the SEO slug resolver.
//!
//! Two inbound shapes resolve to a service and an optional area:
//!
//! - **Direct**: `/services/{slug}`, a bare service slug.
//! - **Combined**: `/{seo_slug}` of the form
//!   `[best-]<service-slug>-in-<area-slug>[-<city>]`, e.g.
//!   `best-water-tank-cleaning-in-indiranagar-bangalore`.
//!
//! The combined parser strips the city suffix (case-insensitive) and the
//! `best-` prefix, then tries every position of the reserved `-in-`
//! separator as a split point. Each split yields a candidate service slug,
//! looked up in the catalog's slug index. Among the hits the service
//! declared first in the catalog wins. The remainder after that service's
//! separator is looked up as an area; an unknown area still yields a
//! service-only match.
//!
//! Resolution never fails and never logs: a miss is an ordinary outcome.

use crate::catalog::{Area, Catalog, Service};

/// Reserved separator between the service and area parts of a combined slug.
pub const SEPARATOR: &str = "-in-";
/// Optional marketing prefix of combined slugs.
pub const BEST_PREFIX: &str = "best-";

/// Outcome of resolving an inbound slug.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    FullMatch {
        service: &'a Service,
        area: &'a Area,
    },
    /// Service recognized, area absent or unknown: render city-wide.
    ServiceOnly { service: &'a Service },
    NoMatch,
}

impl<'a> Resolution<'a> {
    pub fn service(&self) -> Option<&'a Service> {
        match *self {
            Resolution::FullMatch { service, .. } | Resolution::ServiceOnly { service } => {
                Some(service)
            }
            Resolution::NoMatch => None,
        }
    }

    pub fn area(&self) -> Option<&'a Area> {
        match *self {
            Resolution::FullMatch { area, .. } => Some(area),
            _ => None,
        }
    }

    fn from_parts(service: &'a Service, area: Option<&'a Area>) -> Self {
        match area {
            Some(area) => Resolution::FullMatch { service, area },
            None => Resolution::ServiceOnly { service },
        }
    }
}

/// `true` for non-empty slugs made of lowercase ASCII letters, digits and hyphens.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Trailing token of combined slugs: the lowercase primary city.
pub fn city_token(city: &str) -> String {
    city.to_lowercase()
}

/// `best-<service>-in-<area>-<city>`: the canonical combined slug.
pub fn combined_slug(service: &Service, area: &Area, city: &str) -> String {
    format!(
        "{BEST_PREFIX}{}{SEPARATOR}{}-{}",
        service.slug,
        area.slug,
        city_token(city)
    )
}

/// Resolve a direct service route. Falling back to a default service is the
/// caller's policy, not the resolver's.
pub fn resolve_service<'a>(catalog: &'a Catalog, slug: &str) -> Resolution<'a> {
    match catalog.find_service_by_slug(slug) {
        Some(service) => Resolution::ServiceOnly { service },
        None => Resolution::NoMatch,
    }
}

/// Resolve a combined SEO slug against the catalog.
pub fn resolve_combined<'a>(catalog: &'a Catalog, segment: &str, city: &str) -> Resolution<'a> {
    let suffix = format!("-{}", city_token(city));
    let rest = strip_suffix_ignore_case(segment, &suffix);
    let rest = rest.strip_prefix(BEST_PREFIX).unwrap_or(rest);

    let best = separator_positions(rest)
        .filter_map(|pos| {
            let candidate = &rest[..pos];
            catalog
                .service_position(candidate)
                .map(|rank| (rank, &rest[pos + SEPARATOR.len()..]))
        })
        .min_by_key(|(rank, _)| *rank);

    match best {
        Some((rank, area_slug)) => {
            let service = &catalog.services()[rank];
            Resolution::from_parts(service, catalog.find_area_by_slug(area_slug))
        }
        None => Resolution::NoMatch,
    }
}

fn strip_suffix_ignore_case<'s>(value: &'s str, suffix: &str) -> &'s str {
    let Some(split) = value.len().checked_sub(suffix.len()) else {
        return value;
    };
    match (value.get(..split), value.get(split..)) {
        (Some(head), Some(tail)) if tail.to_lowercase() == suffix => head,
        _ => value,
    }
}

/// Byte offsets of every `-in-` occurrence, overlapping ones included.
fn separator_positions(value: &str) -> impl Iterator<Item = usize> + '_ {
    value
        .char_indices()
        .map(|(i, _)| i)
        .filter(move |&i| value[i..].starts_with(SEPARATOR))
}

/// Pairs of service slugs where `a-in-` is a prefix of `b-in-`, making a
/// combined slug parse ambiguous. Catalog order then picks the winner.
pub(crate) fn ambiguous_service_pairs(services: &[Service]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for a in services {
        let prefix = format!("{}{SEPARATOR}", a.slug);
        for b in services {
            if a.slug != b.slug && format!("{}{SEPARATOR}", b.slug).starts_with(&prefix) {
                pairs.push((a.slug.clone(), b.slug.clone()));
            }
        }
    }
    pairs
}
