//! Static site build.
//!
//! Renders every route the site publishes into an output directory, so the
//! result can be served by any static file host.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── sitemap.xml
//! ├── robots.txt
//! ├── clients/index.html
//! ├── locations/index.html
//! ├── about/index.html
//! ├── contact/index.html
//! ├── services/water-tank-cleaning/index.html
//! ├── areas/indiranagar/index.html
//! ├── best-water-tank-cleaning-in-indiranagar-bangalore/index.html
//! ├── ...
//! └── assets/                    # copied from content/assets/
//! ```
//!
//! Pages are independent of each other and are rendered in parallel.
//!
//! The contact form posts to `/api/contact` and the chat widget to
//! `/api/chat`; on a static host those endpoints need the `serve` command
//! (or an equivalent proxy) behind them. Built contact pages therefore carry
//! a call/WhatsApp notice next to the form.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::render::{Delivery, PageAssets, Renderer};
use crate::routes::{self, Route};

pub const ABOUT_FILE: &str = "about.md";
pub const ASSETS_DIR: &str = "assets";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk assets: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    pub route: Route,
    /// Output-relative file path.
    pub file: String,
}

/// What a build produced, for the CLI report.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub pages: Vec<PageEntry>,
    pub assets_copied: usize,
    pub sitemap_urls: usize,
}

/// Read `about.md` from the content directory, if present.
pub fn load_about(source: &Path) -> Result<Option<String>, std::io::Error> {
    let path = source.join(ABOUT_FILE);
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path).map(Some)
}

pub fn generate(
    catalog: &Catalog,
    config: &SiteConfig,
    source: &Path,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    let about = load_about(source)?;
    let assets = PageAssets::new(config, about.as_deref());
    let renderer = Renderer::new(catalog, config, &assets).with_delivery(Delivery::Static);

    fs::create_dir_all(output_dir)?;

    let routes = routes::all_routes(catalog, config);
    let pages = routes
        .into_par_iter()
        .map(|route| {
            let file = route.output_file();
            let page = renderer.render(route.resolve(catalog, config));
            write_file(&output_dir.join(&file), &page.into_string())?;
            debug!(file = %file, "wrote page");
            Ok(PageEntry { route, file })
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    write_file(
        &output_dir.join("404.html"),
        &renderer.not_found_page().into_string(),
    )?;

    let urls: Vec<String> = pages
        .iter()
        .map(|p| config.absolute_url(&p.route.path()))
        .collect();
    write_file(&output_dir.join("sitemap.xml"), &render_sitemap(&urls))?;
    write_file(&output_dir.join("robots.txt"), &render_robots(config))?;

    let assets_copied = copy_assets(&source.join(ASSETS_DIR), &output_dir.join(ASSETS_DIR))?;

    Ok(BuildReport {
        pages,
        assets_copied,
        sitemap_urls: urls.len(),
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Copy `src` into `dst` recursively. A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target: PathBuf = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// `sitemap.xml` listing every URL in order.
pub fn render_sitemap(urls: &[String]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for url in urls {
        xml.push_str("  <url><loc>");
        xml.push_str(&xml_escape(url));
        xml.push_str("</loc></url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

pub fn render_robots(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        config.absolute_url("/sitemap.xml")
    )
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
