//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by the user's `config.toml` in the content directory, and the
//! two secrets can additionally come from the environment.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml      # Site config (overrides stock defaults)
//! ├── catalog.toml     # Services, areas, clients
//! ├── about.md         # About page body
//! └── assets/          # Copied to the output root
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_url = "https://hygieniccleaning.com"  # No trailing slash
//!
//! [company]
//! name = "Hygienic Cleaning Services"
//! primary_city = "Bangalore"
//! phone = "+91 99866 55556"
//! phone_secondary = "+91 97395 60560"
//! whatsapp = "919986655556"
//! email = "contact@hygieniccleaning.com"
//! years_experience = 25
//!
//! [company.address]
//! street = "207, 4th Cross, 2nd Main, 2nd Stage"
//! locality = "Nagarabhavi"
//! city = "Bangalore"
//! region = "Karnataka"
//! postal_code = "560072"
//! country = "IN"
//!
//! [chat]
//! # api_key = "..."          # Or HYGIENIC_CHAT_API_KEY; absent = chat hidden
//! model = "gemini-1.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com"
//! timeout_secs = 30
//!
//! [forms]
//! # access_key = "..."       # Or HYGIENIC_FORMS_ACCESS_KEY; absent = demo mode
//! endpoint = "https://api.web3forms.com/submit"
//! timeout_secs = 30
//!
//! [popup]
//! delay_ms = 15000
//! scroll_depth_percent = 50
//! expiry_days = 7
//! storage_key = "hygienic_cta_closed_at"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [colors.light]
//! background = "#f8fafc"
//! # ...
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::slug;

/// Environment variable that overrides `chat.api_key`.
pub const CHAT_API_KEY_ENV: &str = "HYGIENIC_CHAT_API_KEY";
/// Environment variable that overrides `forms.access_key`.
pub const FORMS_ACCESS_KEY_ENV: &str = "HYGIENIC_FORMS_ACCESS_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute site origin used for canonical URLs, without trailing slash.
    pub base_url: String,
    /// Business identity shown on every page and in structured data.
    pub company: CompanyConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// AI assistant settings.
    pub chat: ChatConfig,
    /// Contact form submission settings.
    pub forms: FormsConfig,
    /// Promotional popup timing.
    pub popup: PopupConfig,
    /// Bind address for `serve`.
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hygieniccleaning.com".to_string(),
            company: CompanyConfig::default(),
            colors: ColorConfig::default(),
            chat: ChatConfig::default(),
            forms: FormsConfig::default(),
            popup: PopupConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "base_url must not end with a slash".into(),
            ));
        }
        if self.company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company.name must not be empty".into(),
            ));
        }
        if !slug::is_valid_slug(&self.city_token()) {
            return Err(ConfigError::Validation(
                "company.primary_city must lowercase to a slug token (letters, digits, hyphens)"
                    .into(),
            ));
        }
        if self.popup.scroll_depth_percent > 100 {
            return Err(ConfigError::Validation(
                "popup.scroll_depth_percent must be 0-100".into(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// The lowercase primary city used as the trailing token of combined slugs.
    pub fn city_token(&self) -> String {
        slug::city_token(&self.company.primary_city)
    }

    /// Join a site-relative path (`/services/x`) onto the base URL.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Override secrets from the environment. `lookup` is `std::env::var`
    /// in production; tests pass a closure over a fixed map.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(CHAT_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.chat.api_key = Some(key);
        }
        if let Some(key) = lookup(FORMS_ACCESS_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.forms.access_key = Some(key);
        }
    }
}

/// Business identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanyConfig {
    pub name: String,
    /// City every area belongs to; its lowercase form ends combined slugs.
    pub primary_city: String,
    pub phone: String,
    pub phone_secondary: String,
    /// WhatsApp number in international format without `+` or spaces.
    pub whatsapp: String,
    pub email: String,
    pub years_experience: u32,
    pub address: AddressConfig,
    pub social: Vec<SocialLink>,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Hygienic Cleaning Services".to_string(),
            primary_city: "Bangalore".to_string(),
            phone: "+91 99866 55556".to_string(),
            phone_secondary: "+91 97395 60560".to_string(),
            whatsapp: "919986655556".to_string(),
            email: "contact@hygieniccleaning.com".to_string(),
            years_experience: 25,
            address: AddressConfig::default(),
            social: vec![
                SocialLink::new("YouTube", "https://youtube.com/@hygieniccleaning"),
                SocialLink::new("Instagram", "https://instagram.com/hygieniccleaning"),
                SocialLink::new("Facebook", "https://facebook.com/hygieniccleaning"),
            ],
        }
    }
}

impl CompanyConfig {
    /// Phone number as used in `tel:` links (whitespace removed).
    pub fn phone_href(&self) -> String {
        tel_href(&self.phone)
    }
}

/// `tel:` URI for a display phone number.
pub fn tel_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{digits}")
}

/// Postal address, also emitted in the LocalBusiness schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AddressConfig {
    pub street: String,
    pub locality: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            street: "207, 4th Cross, 2nd Main, 2nd Stage".to_string(),
            locality: "Nagarabhavi".to_string(),
            city: "Bangalore".to_string(),
            region: "Karnataka".to_string(),
            postal_code: "560072".to_string(),
            country: "IN".to_string(),
        }
    }
}

impl AddressConfig {
    /// Single-line address for the footer and contact page.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}",
            self.street, self.locality, self.city, self.region, self.postal_code
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

impl SocialLink {
    fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// AI assistant settings. The assistant is hidden entirely without a key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ChatConfig {
    pub fn enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Contact form settings. Without an access key submissions run in demo mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormsConfig {
    pub access_key: Option<String>,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            endpoint: "https://api.web3forms.com/submit".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FormsConfig {
    /// A blank key counts as unset, so the stock `access_key = ""` stays in demo mode.
    pub fn enabled(&self) -> bool {
        self.access_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Promotional popup timing, consumed by the embedded script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopupConfig {
    pub delay_ms: u64,
    pub scroll_depth_percent: u32,
    pub expiry_days: u32,
    pub storage_key: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            delay_ms: 15_000,
            scroll_depth_percent: 50,
            expiry_days: 7,
            storage_key: "hygienic_cta_closed_at".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Card and section background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Secondary text (captions, labels).
    pub text_muted: String,
    pub border: String,
    /// Brand color for buttons and links.
    pub accent: String,
    pub accent_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            surface: "#ffffff".to_string(),
            text: "#111827".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            accent: "#2563eb".to_string(),
            accent_hover: "#1d4ed8".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            surface: "#111111".to_string(),
            text: "#f3f4f6".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#1f2937".to_string(),
            accent: "#3b82f6".to_string(),
            accent_hover: "#60a5fa".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. Environment overrides are applied by the caller.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Hygienic Site Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Absolute origin used for canonical URLs, hreflang and the sitemap.
# Must not end with a slash.
base_url = "https://hygieniccleaning.com"

# ---------------------------------------------------------------------------
# Business identity
# ---------------------------------------------------------------------------
[company]
name = "Hygienic Cleaning Services"
# Every area belongs to this city. Its lowercase form ends combined SEO
# slugs: /best-water-tank-cleaning-in-indiranagar-bangalore
primary_city = "Bangalore"
phone = "+91 99866 55556"
phone_secondary = "+91 97395 60560"
# International format, digits only (used for wa.me links).
whatsapp = "919986655556"
email = "contact@hygieniccleaning.com"
years_experience = 25

[company.address]
street = "207, 4th Cross, 2nd Main, 2nd Stage"
locality = "Nagarabhavi"
city = "Bangalore"
region = "Karnataka"
postal_code = "560072"
country = "IN"

[[company.social]]
label = "YouTube"
url = "https://youtube.com/@hygieniccleaning"

[[company.social]]
label = "Instagram"
url = "https://instagram.com/hygieniccleaning"

[[company.social]]
label = "Facebook"
url = "https://facebook.com/hygieniccleaning"

# ---------------------------------------------------------------------------
# AI assistant (Gemini generateContent)
# ---------------------------------------------------------------------------
[chat]
# Without a key the assistant is hidden. HYGIENIC_CHAT_API_KEY overrides this.
# api_key = ""
model = "gemini-1.5-flash"
endpoint = "https://generativelanguage.googleapis.com"
timeout_secs = 30

# ---------------------------------------------------------------------------
# Contact form (Web3Forms)
# ---------------------------------------------------------------------------
[forms]
# Without a key submissions are accepted in demo mode and only logged.
# HYGIENIC_FORMS_ACCESS_KEY overrides this.
# access_key = ""
endpoint = "https://api.web3forms.com/submit"
timeout_secs = 30

# ---------------------------------------------------------------------------
# Promotional popup
# ---------------------------------------------------------------------------
[popup]
# Shown after this delay or at this scroll depth, whichever comes first.
delay_ms = 15000
scroll_depth_percent = 50
# Suppressed for this many days after the visitor closes it.
expiry_days = 7
storage_key = "hygienic_cta_closed_at"

# ---------------------------------------------------------------------------
# `serve` bind address
# ---------------------------------------------------------------------------
[server]
host = "127.0.0.1"
port = 3000

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
surface = "#ffffff"
text = "#111827"
text_muted = "#6b7280"
border = "#e5e7eb"
accent = "#2563eb"
accent_hover = "#1d4ed8"

[colors.dark]
background = "#0a0a0a"
surface = "#111111"
text = "#f3f4f6"
text_muted = "#9ca3af"
border = "#1f2937"
accent = "#3b82f6"
accent_hover = "#60a5fa"
"##
}

/// Generate CSS custom properties from color config.
///
/// These variables are referenced by the static CSS for theming.
/// Dark mode uses `prefers-color-scheme` media query.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-surface: {light_surface};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
    --color-accent-hover: {light_accent_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-surface: {dark_surface};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
        --color-accent-hover: {dark_accent_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_surface = colors.light.surface,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_accent_hover = colors.light.accent_hover,
        dark_bg = colors.dark.background,
        dark_surface = colors.dark.surface,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_accent_hover = colors.dark.accent_hover,
    )
}
