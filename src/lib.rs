//! # Hygienic Site
//!
//! Generator and server for the marketing site of a local cleaning-services
//! company. The catalog of services and areas is data; every page, including
//! one landing page per service × area combination, is derived from it.
//!
//! # Architecture: One Resolver, Two Deliveries
//!
//! ```text
//! path ──► routes::Route::parse ──► Route::resolve ──► PageRequest
//!                                        │                  │
//!                                  slug resolver      render::Renderer
//!                                                     (seo + content)
//! ```
//!
//! The static build ([`generate`]) walks every published route through this
//! pipeline and writes the results to disk. The server ([`server`]) runs the
//! same pipeline per request. Neither path has logic the other lacks, so a
//! page built statically and the same page served live are byte-identical,
//! apart from the call/WhatsApp notice the static contact page carries
//! ([`render::Delivery`]).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading: stock defaults, overrides, validation, CSS generation |
//! | [`catalog`] | Services, areas and clients; invariant checks; slug lookups |
//! | [`slug`] | Combined-slug construction and resolution (`best-<service>-in-<area>-<city>`) |
//! | [`seo`] | Titles, descriptions, canonical URLs, hreflang and JSON-LD |
//! | [`content`] | Localized paragraph for each combined page |
//! | [`routes`] | URL surface: path parsing and fallback policies |
//! | [`render`] | Maud templates for every page and the shared chrome |
//! | [`generate`] | Static build: pages, `404.html`, `sitemap.xml`, `robots.txt`, assets |
//! | [`assistant`] | Chat collaborator (Gemini) behind [`assistant::ChatBackend`] |
//! | [`enquiry`] | Form collaborator (Web3Forms) behind [`enquiry::FormBackend`] |
//! | [`server`] | Axum server for `serve`, including `/api/chat` and `/api/contact` |
//! | [`output`] | CLI output formatting for `check`, `build` and `routes` |
//!
//! # Design Decisions
//!
//! ## Pure Core
//!
//! [`slug`], [`seo`] and [`content`] take the catalog and config as
//! arguments and return values. They never fail and never touch I/O, which
//! keeps every generated title, description and schema testable without a
//! filesystem or network.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error and all interpolation is
//! auto-escaped; the only unescaped inserts are the embedded stylesheet and
//! script, rendered markdown, and JSON-LD with `</` neutralized.
//!
//! ## Collaborators Behind Traits
//!
//! Chat completion and form submission are external services. Each sits
//! behind an `async_trait` so the server can run without credentials (chat
//! hidden, forms in demo mode) and tests can substitute stubs.

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod content;
pub mod enquiry;
pub mod generate;
pub mod output;
pub mod render;
pub mod routes;
pub mod seo;
pub mod server;
pub mod slug;

#[cfg(test)]
pub(crate) mod test_helpers;
