//! HTML page rendering.
//!
//! Every page of the site is a pure function of the catalog, the site
//! config and the [`PageRequest`] being served. The static build and the
//! server both go through [`Renderer::render`], so a page looks the same
//! whichever way it is delivered.
//!
//! ## Document Head
//!
//! Each page carries its [`SeoMetadata`]: `<title>`, meta description,
//! canonical link, one `rel="alternate"` link per hreflang entry, and on
//! service pages a single `application/ld+json` script holding the
//! `@graph` of Service and FAQPage schemas.
//!
//! ## Shared Chrome
//!
//! - navbar and footer
//! - floating contact widget (chat only when an API key is configured,
//!   WhatsApp, call)
//! - CTA popup, driven by `static/site.js` through `data-*` attributes
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde_json::Value;
use url::Url;

use crate::assistant;
use crate::catalog::{Area, Catalog, Service};
use crate::config::{self, SiteConfig};
use crate::content;
use crate::enquiry::Enquiry;
use crate::routes::PageRequest;
use crate::seo::{self, SeoMetadata};
use crate::slug;

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Shown when `about.md` is absent from the content directory.
const DEFAULT_ABOUT: &str = "Our services include meticulous tank and sump cleaning, thorough \
sewage treatment plant (STP) maintenance, and comprehensive home deep cleaning.";

/// Page-independent inputs, computed once per build or server start.
#[derive(Debug, Clone)]
pub struct PageAssets {
    css: String,
    about_html: String,
}

impl PageAssets {
    pub fn new(config: &SiteConfig, about_markdown: Option<&str>) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        let mut about_html = String::new();
        md_html::push_html(
            &mut about_html,
            Parser::new(about_markdown.unwrap_or(DEFAULT_ABOUT)),
        );
        Self {
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
            about_html,
        }
    }
}

/// State of the contact page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactState<'a> {
    Blank,
    Sent,
    /// Failed submission: the message and the visitor's input, for a retry.
    Retry {
        enquiry: &'a Enquiry,
        error: &'a str,
    },
}

/// Where rendered pages end up. A static host has no `/api` endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delivery {
    #[default]
    Server,
    Static,
}

pub struct Renderer<'a> {
    catalog: &'a Catalog,
    config: &'a SiteConfig,
    assets: &'a PageAssets,
    delivery: Delivery,
}

impl<'a> Renderer<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a SiteConfig, assets: &'a PageAssets) -> Self {
        Self {
            catalog,
            config,
            assets,
            delivery: Delivery::default(),
        }
    }

    pub fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn render(&self, page: PageRequest<'_>) -> Markup {
        match page {
            PageRequest::Home => self.home_page(),
            PageRequest::Clients => self.clients_page(),
            PageRequest::Locations => self.locations_page(),
            PageRequest::About => self.about_page(),
            PageRequest::Contact => self.contact_page(ContactState::Blank),
            PageRequest::Service { service, area } => self.service_page(service, area),
            PageRequest::AreaDirectory(area) => self.area_page(area),
            PageRequest::NotFound => self.not_found_page(),
        }
    }

    // ========================================================================
    // HTML Components
    // ========================================================================

    /// Renders the base HTML document structure
    fn base_document(&self, meta: &SeoMetadata, body_class: &str, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en-IN" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (meta.title) }
                    meta name="description" content=(meta.description);
                    link rel="canonical" href=(meta.canonical_url);
                    @for alt in &meta.hreflang {
                        link rel="alternate" hreflang=(alt.lang) href=(alt.href);
                    }
                    meta property="og:title" content=(meta.title);
                    meta property="og:description" content=(meta.description);
                    meta property="og:url" content=(meta.canonical_url);
                    link rel="icon" type="image/svg+xml" href="/assets/favicon.svg";
                    @if let Some(data) = &meta.structured_data {
                        script type="application/ld+json" { (PreEscaped(json_ld(data))) }
                    }
                    style { (PreEscaped(&self.assets.css)) }
                }
                body class=(body_class) {
                    (self.navbar())
                    main { (content) }
                    (self.footer())
                    (self.contact_widget())
                    (self.cta_popup())
                    script { (PreEscaped(JS)) }
                }
            }
        }
    }

    fn navbar(&self) -> Markup {
        html! {
            nav.site-nav {
                a.brand href="/" { (self.config.company.name) }
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" aria-label="Menu" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                ul.nav-links {
                    li { a href="/" { "Home" } }
                    li { a href="/#services" { "Services" } }
                    li { a href="/locations" { "Locations" } }
                    li { a href="/about" { "About" } }
                    li { a.button href="/contact" { "Book Now" } }
                }
            }
        }
    }

    fn footer(&self) -> Markup {
        let c = &self.config.company;
        html! {
            footer.site-footer {
                div.footer-brand {
                    h3 { (c.name) }
                    p {
                        "Your trusted partner for exceptional cleaning solutions. With "
                        (c.years_experience)
                        "+ years of experience, we maintain overall sanitation and deliver spotless results using eco-friendly products."
                    }
                    p.footer-label { "Headquarters" }
                    address { (c.address.one_line()) }
                }
                div.footer-columns {
                    div {
                        h4 { "Services" }
                        ul {
                            @for s in self.catalog.services() {
                                li { a href={ "/services/" (s.slug) } { (s.name) } }
                            }
                        }
                    }
                    div {
                        h4 { "Locations" }
                        ul {
                            @for a in self.catalog.areas().iter().take(4) {
                                li { a href={ "/areas/" (a.slug) } { (a.name) } }
                            }
                            li { a href="/locations" { "View All" } }
                        }
                    }
                    @if !c.social.is_empty() {
                        div {
                            h4 { "Social" }
                            ul {
                                @for link in &c.social {
                                    li { a href=(link.url) target="_blank" rel="noopener noreferrer" { (link.label) } }
                                }
                            }
                        }
                    }
                    div {
                        h4 { "Connect" }
                        ul {
                            li { a href=(c.phone_href()) { (c.phone) } }
                            li { a href=(config::tel_href(&c.phone_secondary)) { (c.phone_secondary) } }
                            li { a href=(whatsapp_href(&c.whatsapp, None)) { "WhatsApp" } }
                            li { a href={ "mailto:" (c.email) } { (c.email) } }
                        }
                    }
                }
                p.copyright { "© " (c.name) ". All Rights Reserved." }
            }
        }
    }

    /// Floating support button with chat, WhatsApp and call actions.
    fn contact_widget(&self) -> Markup {
        let c = &self.config.company;
        let chat = self.config.chat.enabled();
        let enquiry_text = "Hi, I would like to enquire about your cleaning services.";
        html! {
            div.contact-widget id="contact-widget" {
                div.widget-actions id="widget-actions" hidden {
                    @if chat {
                        button.widget-chat type="button" id="chat-open" title="AI Assistant" { "Chat" }
                    }
                    a.widget-whatsapp href=(whatsapp_href(&c.whatsapp, Some(enquiry_text)))
                        target="_blank" rel="noopener noreferrer" { "WhatsApp" }
                    a.widget-call href=(c.phone_href()) { "Call" }
                }
                button.widget-toggle type="button" id="widget-toggle" aria-expanded="false" { "Support" }
                @if chat {
                    section.chat-panel id="chat-panel" hidden
                        data-endpoint="/api/chat"
                        data-fallback=(assistant::fallback_reply(self.config)) {
                        header {
                            span { (c.name) " Assistant" }
                            button type="button" id="chat-close" aria-label="Close chat" { "×" }
                        }
                        ol.chat-messages id="chat-messages" {
                            li.chat-ai { (assistant::greeting(self.config)) }
                        }
                        form.chat-form id="chat-form" {
                            input type="text" name="message" placeholder="Ask about our services..." autocomplete="off" required;
                            button type="submit" { "Send" }
                        }
                    }
                }
            }
        }
    }

    fn cta_popup(&self) -> Markup {
        let c = &self.config.company;
        let p = &self.config.popup;
        let message = format!(
            "Hi {}, I'm interested in your cleaning services. Please provide more details.",
            c.name
        );
        html! {
            div.cta-popup id="cta-popup" hidden
                data-delay-ms=(p.delay_ms)
                data-scroll-depth=(p.scroll_depth_percent)
                data-expiry-days=(p.expiry_days)
                data-storage-key=(p.storage_key) {
                div.cta-backdrop data-close {}
                div.cta-dialog role="dialog" aria-modal="true" {
                    button.cta-close type="button" data-close aria-label="Close Popup" { "×" }
                    p.cta-badge { "LIMITED TIME OFFER" }
                    h3 { "Ready for a Pristine Home?" }
                    p { "Book your Water Tank or Deep Cleaning session today and get 15% OFF on your first service!" }
                    a.button href=(c.phone_href()) { "Call Now & Save" }
                    a.button.whatsapp href=(whatsapp_href(&c.whatsapp, Some(&message)))
                        target="_blank" rel="noopener noreferrer" { "WhatsApp Us" }
                    p.cta-footnote { "Trusted by 10,000+ Families in " (c.primary_city) }
                }
            }
        }
    }

    fn client_grid(&self, limit: usize) -> Markup {
        html! {
            div.client-grid {
                @for client in self.catalog.clients().iter().take(limit) {
                    div.client-card {
                        @if let Some(logo) = &client.logo {
                            img src=(logo) alt={ (client.name) " logo" } loading="lazy";
                        } @else {
                            span { (client.name) }
                        }
                    }
                }
            }
        }
    }

    // ========================================================================
    // Page Renderers
    // ========================================================================

    fn home_page(&self) -> Markup {
        let c = &self.config.company;
        let meta = seo::home_meta(self.config, self.catalog.services());
        let content = html! {
            section.hero {
                h1 { "MASTER " br; span.accent { "HYGIENE." } }
                p.lead {
                    "Your trusted partner for exceptional cleaning solutions in " (c.primary_city)
                    ". We provide thorough cleaning beyond routine tasks."
                }
                div.actions {
                    a.button href="/contact" { "Book Service" }
                    a.button.secondary href=(c.phone_href()) { "Call Us" }
                }
            }
            @if !self.catalog.clients().is_empty() {
                section.trusted {
                    p.eyebrow { "Our Reputation" }
                    h2 { "Trusted by 500+ Corporations & Societies" }
                    (self.client_grid(4))
                    a href="/clients" { "Explore All Clients →" }
                }
            }
            section.services id="services" {
                p.eyebrow { "Our Expertise" }
                h2 { "Engineered for perfection." }
                div.service-grid {
                    @for service in self.catalog.services() {
                        article.service-card {
                            img src=(service.image) alt=(service.name) loading="lazy";
                            h3 { (service.name) }
                            p { (service.long_desc) }
                            a href={ "/services/" (service.slug) } { "Explore" }
                        }
                    }
                }
            }
            section.stats {
                div { p.stat { (c.years_experience) "+" } p { "Years Experience" } }
                div { p.stat { "10K+" } p { "Happy Clients" } }
                div { p.stat { (self.catalog.areas().len()) "+" } p { "Service Areas" } }
                div { p.stat { (format_rating(self.catalog.services())) } p { "Rating" } }
            }
            section.standard {
                h2.eyebrow { "The " (c.name) " Standard" }
                ol {
                    li { h3 { (c.years_experience) "+ Years Legacy" } p { "Decades of experience in maintaining overall sanitation of residential and commercial facilities." } }
                    li { h3 { "Beyond Routine" } p { "We provide thorough cleaning beyond routine tasks using advanced techniques and eco-friendly products." } }
                    li { h3 { "High Standards" } p { "Services designed to meet high cleanliness standards with a skilled team dedicated to spotless results." } }
                }
            }
            section.areas id="locations" {
                h2 { "Serving " (c.primary_city) }
                div.area-links {
                    @for area in self.catalog.areas() {
                        a href={ "/areas/" (area.slug) } { (area.name) }
                    }
                }
            }
        };
        self.base_document(&meta, "page-home", content)
    }

    fn clients_page(&self) -> Markup {
        let c = &self.config.company;
        let names: Vec<&str> = self.catalog.clients().iter().map(|cl| cl.name.as_str()).collect();
        let meta = seo::clients_meta(self.config, &names);
        let content = html! {
            section.page-header {
                h1 { "Our Esteemed " span.accent { "Clientele." } }
                p.lead {
                    "We are proud to serve some of the most respected names in real estate, hospitality, and corporate sectors across "
                    (c.primary_city) "."
                }
            }
            (self.client_grid(usize::MAX))
            section.cta {
                h2 { "Join our list of happy customers" }
                a.button href="/contact" { "Book a Service" }
                a.button.secondary href=(c.phone_href()) { "Call " (c.phone) }
            }
        };
        self.base_document(&meta, "page-clients", content)
    }

    fn locations_page(&self) -> Markup {
        let meta = seo::locations_meta(self.config, self.catalog.areas());
        let content = html! {
            section.page-header {
                h1 { "Our " span.accent { "Service Areas" } }
                p.lead {
                    "We bring professional hygiene solutions to every corner of "
                    (self.config.company.primary_city) ". Expert cleaning at your doorstep."
                }
            }
            div.location-grid {
                @for area in self.catalog.areas() {
                    a.location-card href={ "/areas/" (area.slug) } {
                        h3 { (area.name) }
                        p.zips { (area.zip_codes.join(", ")) }
                    }
                }
            }
        };
        self.base_document(&meta, "page-locations", content)
    }

    fn about_page(&self) -> Markup {
        let c = &self.config.company;
        let meta = seo::about_meta(self.config);
        let content = html! {
            section.page-header {
                h1 { (c.years_experience) " Years of " span.accent { "Excellence." } }
                p.lead {
                    "Your trusted partner for exceptional cleaning solutions. We go beyond routine tasks to ensure optimal hygiene."
                }
            }
            article.about-content {
                (PreEscaped(&self.assets.about_html))
            }
            @if !self.catalog.clients().is_empty() {
                section.clientele {
                    h2 { "Distinguished Clientele" }
                    (self.client_grid(usize::MAX))
                }
            }
        };
        self.base_document(&meta, "page-about", content)
    }

    /// Contact page in the given submission state.
    pub fn contact_page(&self, state: ContactState<'_>) -> Markup {
        let c = &self.config.company;
        let meta = seo::contact_meta(self.config);
        let follow_up = format!(
            "Hi {}, I just submitted an enquiry on your website and wanted to follow up.",
            c.name
        );

        let content = match state {
            ContactState::Sent => html! {
                section.form-sent {
                    h1 { "Request Successfully Sent!" }
                    p.lead {
                        "Thank you for reaching out. Your enquiry has been recorded and our team will contact you within 30 minutes."
                    }
                    a.button.whatsapp href=(whatsapp_href(&c.whatsapp, Some(&follow_up)))
                        target="_blank" rel="noopener noreferrer" { "Follow up on WhatsApp" }
                    a.button.secondary href="/" { "Return Home" }
                }
            },
            ContactState::Blank => self.contact_form(None, None),
            ContactState::Retry { enquiry, error } => self.contact_form(Some(enquiry), Some(error)),
        };
        self.base_document(&meta, "page-contact", content)
    }

    fn contact_form(&self, enquiry: Option<&Enquiry>, error: Option<&str>) -> Markup {
        let c = &self.config.company;
        let blank = Enquiry::default();
        let values = enquiry.unwrap_or(&blank);
        html! {
            section.page-header {
                h1 { "Get In Touch" }
            }
            div.contact-layout {
                div.contact-info {
                    h2 { "Visit Us" }
                    address { (c.address.one_line()) }
                    h2 { "Talk to Us" }
                    p.footer-label { "Main Line" }
                    a.phone href=(c.phone_href()) { (c.phone) }
                    p.footer-label { "Support Line" }
                    a.phone href=(config::tel_href(&c.phone_secondary)) { (c.phone_secondary) }
                }
                @if self.delivery == Delivery::Static {
                    p.form-fallback role="note" {
                        "If the form does not go through, call us on "
                        a href=(c.phone_href()) { (c.phone) }
                        " or "
                        a href=(whatsapp_href(&c.whatsapp, None)) target="_blank" rel="noopener noreferrer" {
                            "message us on WhatsApp"
                        }
                        "."
                    }
                }
                form.contact-form method="post" action="/api/contact" {
                    @if let Some(message) = error {
                        p.form-error role="alert" { (message) }
                    }
                    label { "Your Name"
                        input name="name" type="text" placeholder="John Doe" required value=(values.name);
                    }
                    label { "Phone Number"
                        input name="phone" type="tel" placeholder="+91 00000 00000" required value=(values.phone);
                    }
                    label { "Email Address"
                        input name="email" type="email" placeholder="john@example.com" value=(values.email);
                    }
                    label { "Service Needed"
                        select name="service" {
                            @for s in self.catalog.services() {
                                option value=(s.name) selected[values.service == s.name] { (s.name) }
                            }
                        }
                    }
                    label { "Your Area"
                        select name="area" {
                            @for a in self.catalog.areas() {
                                option value=(a.name) selected[values.area == a.name] { (a.name) }
                            }
                            option value="Other" selected[values.area == "Other"] { "Other" }
                        }
                    }
                    label { "Message (Optional)"
                        textarea name="message" rows="4" placeholder="Tell us about your requirements..." { (values.message) }
                    }
                    button.button type="submit" { "Send Enquiry" }
                }
            }
        }
    }

    fn service_page(&self, service: &Service, area: Option<&Area>) -> Markup {
        let c = &self.config.company;
        let meta = seo::service_page_meta(self.config, service, area);
        let location = area.map_or(c.primary_city.as_str(), |a| a.name.as_str());
        let intro = match area {
            Some(area) => content::generate_area_specific_content(self.config, service, area),
            None => format!(
                "Professional and certified {} for residential and commercial properties across {}. Safe, effective, and hygiene-focused.",
                service.name.to_lowercase(),
                location
            ),
        };

        let page = html! {
            section.hero.service-hero {
                span.badge { "Premium Cleaning Service" }
                h1 { (service.name) br; span.accent { "in " (location) } }
                div.hero-grid {
                    div {
                        p.lead { (intro) }
                        div.actions {
                            a.button href="/contact" { "Book Now" }
                            a.button.secondary href=(whatsapp_href(&c.whatsapp, None)) { "WhatsApp" }
                        }
                    }
                    figure.service-image {
                        img src=(service.image) alt={ (service.name) " in " (location) };
                    }
                    dl.fact-card {
                        dt { "Duration" } dd { (service.service_time) }
                        dt { "Team Size" } dd { (service.staff_sent) }
                        dt { "Rating" } dd { (service.avg_rating) "/5.0" }
                        p.fact-footnote { "Backed By " (c.years_experience) "+ Years Exp." }
                    }
                }
            }
            section.overview {
                h2 { "Overview" }
                p { (service.long_desc) }
                @if let Some(area) = area {
                    (local_insight(service, area))
                }
            }
            @if !service.benefits.is_empty() {
                section.benefits {
                    h2 { "The Advantage" }
                    ol.benefit-grid {
                        @for benefit in &service.benefits {
                            li { (benefit) }
                        }
                    }
                }
            }
            @if !service.why_choose_us.is_empty() {
                section.why-us {
                    h2 { "Why Choose Us" }
                    ul {
                        @for reason in &service.why_choose_us {
                            li { (reason) }
                        }
                    }
                }
            }
            @if !service.workflow.is_empty() {
                section.workflow {
                    h2 { "Process Execution" }
                    ol {
                        @for (i, step) in service.workflow.iter().enumerate() {
                            li {
                                span.step { "Step " (format!("{:02}", i + 1)) }
                                p { (step) }
                            }
                        }
                    }
                }
            }
            section.dos-donts {
                h2 { "Do's and Don'ts" }
                div.columns {
                    div.dos {
                        h3 { "✓ What We Do" }
                        ul { @for item in &service.dos { li { (item) } } }
                    }
                    div.donts {
                        h3 { "✕ Important Guidelines" }
                        ul { @for item in &service.donts { li { (item) } } }
                    }
                }
            }
            @if !service.testimonials.is_empty() {
                section.testimonials {
                    h2 { "What Customers Say" }
                    div.testimonial-grid {
                        @for t in &service.testimonials {
                            blockquote {
                                p.stars aria-label={ (t.rating) " out of 5" } { (stars(t.rating)) }
                                p { (t.content) }
                                footer { (t.name) ", " (t.area) }
                            }
                        }
                    }
                }
            }
            @if !service.faqs.is_empty() {
                section.faqs {
                    h2 { "Queries" }
                    @for faq in &service.faqs {
                        details {
                            summary { (faq.question) }
                            p { (faq.answer) }
                        }
                    }
                }
            }
            @if !service.equipment_used.is_empty() {
                section.equipment {
                    p.eyebrow { "Professional Grade Arsenal" }
                    div.tags {
                        @for eq in &service.equipment_used {
                            span.tag { (eq) }
                        }
                    }
                }
            }
            section.available-in {
                span.eyebrow { "Available In:" }
                @for a in self.catalog.areas() {
                    a href={ "/" (slug::combined_slug(service, a, &c.primary_city)) } { (a.name) }
                }
            }
        };
        self.base_document(&meta, "page-service", page)
    }

    fn area_page(&self, area: &Area) -> Markup {
        let meta = seo::area_directory_meta(self.config, area, self.catalog.services());
        let city = &self.config.company.primary_city;
        let content = html! {
            section.hero.area-hero {
                span.badge { "Regional Service Hub" }
                h1 { "Focus on " span.accent { (area.name) } }
                p.lead {
                    "Premium cleaning solutions deployed for residents near "
                    strong { (area.landmarks.join(", ")) } "."
                }
            }
            section.area-services {
                h2 { "Available Services in " (area.name) }
                div.service-grid {
                    @for s in self.catalog.services() {
                        a.service-card href={ "/" (slug::combined_slug(s, area, city)) } {
                            h3 { (s.name) }
                            p { "Tailored " (s.name.to_lowercase()) " for the " (area.name) " ecosystem." }
                            span { "View Pricing" }
                        }
                    }
                }
            }
        };
        self.base_document(&meta, "page-area", content)
    }

    pub fn not_found_page(&self) -> Markup {
        let meta = seo::not_found_meta(self.config);
        let content = html! {
            section.page-header.not-found {
                h1 { "Page not found" }
                p.lead { "The page you are looking for does not exist. Try one of our services:" }
                ul {
                    @for s in self.catalog.services() {
                        li { a href={ "/services/" (s.slug) } { (s.name) } }
                    }
                }
                a.button href="/" { "Back to Home" }
            }
        };
        self.base_document(&meta, "page-not-found", content)
    }
}

/// "Local {area} Insight" callout on combined pages.
fn local_insight(service: &Service, area: &Area) -> Markup {
    let name = service.name.to_lowercase();
    let need = name.strip_suffix(" services").unwrap_or(&name);
    html! {
        aside.local-insight {
            p.insight-title { "Local " (area.name) " Insight" }
            p {
                "Serving residents near " (area.landmarks.join(", ")) ". We understand the specific "
                (need) " needs of "
                @match area.primary_zip() {
                    Some(zip) => { "the " (zip) " area." },
                    None => { "residents in " (area.name) "." },
                }
            }
        }
    }
}

/// JSON-LD body, safe to embed inside `<script>`.
pub fn json_ld(data: &Value) -> String {
    data.to_string().replace("</", "<\\/")
}

/// `https://wa.me/<number>` with an optional prefilled message.
pub fn whatsapp_href(number: &str, text: Option<&str>) -> String {
    let base = format!("https://wa.me/{number}");
    match text {
        Some(text) => Url::parse_with_params(&base, &[("text", text)])
            .map(|u| u.to_string())
            .unwrap_or(base),
        None => base,
    }
}

fn stars(rating: u8) -> String {
    "★".repeat(rating.min(5) as usize)
}

/// Mean service rating as "4.9/5".
fn format_rating(services: &[Service]) -> String {
    let count = services.len().max(1) as f64;
    let mean = services.iter().map(|s| s.avg_rating).sum::<f64>() / count;
    format!("{mean:.1}/5")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn render_page(config: &SiteConfig, page: impl FnOnce(&Catalog) -> PageRequest<'_>) -> String {
        let catalog = sample_catalog();
        let assets = PageAssets::new(config, Some("We clean **tanks**."));
        let renderer = Renderer::new(&catalog, config, &assets);
        renderer.render(page(&catalog)).into_string()
    }

    #[test]
    fn base_document_includes_doctype() {
        let html = render_page(&test_config(), |_| PageRequest::Home);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<body class="page-home">"#));
    }

    #[test]
    fn service_page_head_carries_seo_metadata() {
        let html = render_page(&test_config(), |catalog| PageRequest::Service {
            service: find_service(catalog, "water-tank-cleaning"),
            area: Some(find_area(catalog, "indiranagar")),
        });
        let canonical = "https://example.test/best-water-tank-cleaning-in-indiranagar-bangalore";
        assert!(html.contains(&format!(r#"<link rel="canonical" href="{canonical}">"#)));
        assert!(html.contains(&format!(
            r#"<link rel="alternate" hreflang="en-in" href="{canonical}">"#
        )));
        assert!(html.contains(&format!(
            r#"<link rel="alternate" hreflang="x-default" href="{canonical}">"#
        )));
        assert_eq!(html.matches("application/ld+json").count(), 1);
        assert!(html.contains(r#"{"@graph":["#));
        assert!(html.contains("<title>Water Tank Cleaning Services in Indiranagar, Bangalore | Best Water Tank Cleaning near Metro Station</title>"));
    }

    #[test]
    fn combined_page_uses_localized_content_and_insight() {
        let html = render_page(&test_config(), |catalog| PageRequest::Service {
            service: find_service(catalog, "water-tank-cleaning"),
            area: Some(find_area(catalog, "indiranagar")),
        });
        assert_contains_all(
            &html,
            &[
                "in Indiranagar",
                "Trusted by thousands near HAL 2nd Stage",
                "Local Indiranagar Insight",
                "specific water tank cleaning needs of the 560038 area.",
            ],
        );
    }

    #[test]
    fn city_wide_page_has_no_insight() {
        let html = render_page(&test_config(), |catalog| PageRequest::Service {
            service: find_service(catalog, "stp-cleaning-maintenance"),
            area: None,
        });
        assert!(html.contains("in Bangalore"));
        assert!(html.contains("across Bangalore. Safe, effective, and hygiene-focused."));
        assert!(!html.contains("Insight"));
        assert!(html.contains(r#"href="https://example.test/services/stp-cleaning-maintenance""#));
    }

    #[test]
    fn service_page_links_every_area() {
        let html = render_page(&test_config(), |catalog| PageRequest::Service {
            service: catalog.default_service(),
            area: None,
        });
        for a in sample_catalog().areas() {
            let href = format!(r#"href="/best-water-tank-cleaning-in-{}-bangalore""#, a.slug);
            assert!(html.contains(&href), "missing {href}");
        }
    }

    #[test]
    fn chat_widget_absent_without_key() {
        let html = render_page(&test_config(), |_| PageRequest::Home);
        assert!(!html.contains(r#"id="chat-panel""#));
        assert!(!html.contains("data-endpoint"));
        assert!(!html.contains("/api/chat"));
        assert!(html.contains("widget-whatsapp"));
        assert!(html.contains(r#"href="tel:+919986655556""#));
    }

    #[test]
    fn chat_widget_present_with_key() {
        let mut config = test_config();
        config.chat.api_key = Some("k".into());
        let html = render_page(&config, |_| PageRequest::Home);
        assert!(html.contains(r#"id="chat-panel""#));
        assert!(html.contains(r#"data-endpoint="/api/chat""#));
        assert!(html.contains("Hi! I'm your Hygienic Cleaning Services assistant."));
        assert!(!html.contains(r#""k""#));
    }

    #[test]
    fn popup_carries_config_in_data_attributes() {
        let html = render_page(&test_config(), |_| PageRequest::Contact);
        assert_contains_all(
            &html,
            &[
                r#"data-delay-ms="15000""#,
                r#"data-scroll-depth="50""#,
                r#"data-expiry-days="7""#,
                r#"data-storage-key="hygienic_cta_closed_at""#,
            ],
        );
    }

    #[test]
    fn area_directory_links_combined_pages_without_schema() {
        let html = render_page(&test_config(), |catalog| {
            PageRequest::AreaDirectory(find_area(catalog, "koramangala"))
        });
        assert!(html.contains("Focus on"));
        assert!(html.contains(r#"href="/best-stp-cleaning-maintenance-in-koramangala-bangalore""#));
        assert!(html.contains("Forum Mall, Sony World Signal, St. John's Hospital"));
        assert!(!html.contains("application/ld+json"));
    }

    #[test]
    fn about_page_renders_markdown() {
        let html = render_page(&test_config(), |_| PageRequest::About);
        assert!(html.contains("<strong>tanks</strong>"));
        assert!(html.contains("Distinguished Clientele"));
    }

    #[test]
    fn locations_page_lists_zip_codes() {
        let html = render_page(&test_config(), |_| PageRequest::Locations);
        assert!(html.contains("560038"));
        assert!(html.contains(r#"href="/areas/whitefield""#));
    }

    #[test]
    fn not_found_page_links_services() {
        let html = render_page(&test_config(), |_| PageRequest::NotFound);
        assert!(html.contains("Page not found"));
        assert!(html.contains(r#"href="/services/home-office-deep-cleaning""#));
    }

    #[test]
    fn contact_retry_keeps_input_and_message() {
        let config = test_config();
        let catalog = sample_catalog();
        let assets = PageAssets::new(&config, None);
        let renderer = Renderer::new(&catalog, &config, &assets);
        let enquiry = Enquiry {
            name: "Asha".into(),
            phone: "900".into(),
            area: "Whitefield".into(),
            ..Enquiry::default()
        };
        let html = renderer
            .contact_page(ContactState::Retry {
                enquiry: &enquiry,
                error: crate::enquiry::NETWORK_MESSAGE,
            })
            .into_string();
        assert!(html.contains("Network error. Please check your internet connection."));
        assert!(html.contains(r#"value="Asha""#));
        assert!(html.contains(r#"<option value="Whitefield" selected>"#));
    }

    #[test]
    fn contact_sent_shows_confirmation() {
        let config = test_config();
        let catalog = sample_catalog();
        let assets = PageAssets::new(&config, None);
        let renderer = Renderer::new(&catalog, &config, &assets);
        let html = renderer.contact_page(ContactState::Sent).into_string();
        assert!(html.contains("Request Successfully Sent!"));
        assert!(!html.contains("<form class=\"contact-form\""));
    }

    #[test]
    fn static_contact_page_offers_call_and_whatsapp() {
        let config = test_config();
        let catalog = sample_catalog();
        let assets = PageAssets::new(&config, None);

        let built = Renderer::new(&catalog, &config, &assets)
            .with_delivery(Delivery::Static)
            .contact_page(ContactState::Blank)
            .into_string();
        assert!(built.contains(r#"class="form-fallback""#));
        assert!(built.contains(r#"href="tel:+919986655556""#));
        assert!(built.contains("message us on WhatsApp"));

        let served = Renderer::new(&catalog, &config, &assets)
            .contact_page(ContactState::Blank)
            .into_string();
        assert!(!served.contains(r#"class="form-fallback""#));
    }

    #[test]
    fn json_ld_escapes_script_close() {
        let data = serde_json::json!({ "text": "</script><script>alert(1)</script>" });
        let out = json_ld(&data);
        assert!(!out.contains("</script>"));
        assert!(out.contains("<\\/script>"));
    }

    #[test]
    fn whatsapp_href_encodes_message() {
        assert_eq!(whatsapp_href("919986655556", None), "https://wa.me/919986655556");
        let href = whatsapp_href("919986655556", Some("Hi there & hello"));
        assert!(href.starts_with("https://wa.me/919986655556?text="));
        assert!(!href.contains(' '));
        assert!(href.contains("%26"));
    }

    #[test]
    fn html_escape_in_maud() {
        let mut config = test_config();
        config.company.name = "<script>alert('xss')</script>".to_string();
        let html = render_page(&config, |_| PageRequest::Clients);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
