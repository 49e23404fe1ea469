//! End-to-end test of the `hygienic-site` binary over the shipped `content/`.
//!
//! Runs `build`, `check` and `routes` as a user would and inspects the
//! output tree. The collaborator secrets are cleared so the build renders
//! with chat hidden and forms in demo mode.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_hygienic-site");

fn content_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("content")
}

fn run(args: &[&str]) -> Output {
    let out = Command::new(BIN)
        .arg("--source")
        .arg(content_dir())
        .args(args)
        .env_remove("HYGIENIC_CHAT_API_KEY")
        .env_remove("HYGIENIC_FORMS_ACCESS_KEY")
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "hygienic-site {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn build() -> TempDir {
    let dist = TempDir::new().unwrap();
    run(&["--output", dist.path().to_str().unwrap(), "build"]);
    dist
}

fn read(dist: &TempDir, file: &str) -> String {
    fs::read_to_string(dist.path().join(file))
        .unwrap_or_else(|e| panic!("reading {file}: {e}"))
}

#[test]
fn build_writes_every_combined_page() {
    let dist = build();

    let combined: Vec<_> = fs::read_dir(dist.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("best-"))
        .collect();
    assert_eq!(combined.len(), 3 * 30);
    for entry in &combined {
        assert!(entry.path().join("index.html").exists());
    }
}

#[test]
fn combined_page_is_localized() {
    let dist = build();
    let html = read(&dist, "best-water-tank-cleaning-in-koramangala-bangalore/index.html");

    assert!(html.contains(
        "<title>Water Tank Cleaning Services in Koramangala, Bangalore | Best Water Tank Cleaning near Sony Signal</title>"
    ));
    assert!(html.contains(
        r#"<link rel="canonical" href="https://hygieniccleaning.com/best-water-tank-cleaning-in-koramangala-bangalore">"#
    ));
    assert!(html.contains(r#"hreflang="x-default""#));
    assert_eq!(html.matches("application/ld+json").count(), 1);
    assert!(html.contains("FAQPage"));
    assert!(html.contains("Local Koramangala Insight"));
    assert!(html.contains("560034"));
}

#[test]
fn placeholder_slug_area_is_normalized() {
    let dist = build();
    assert!(
        dist.path()
            .join("best-stp-cleaning-maintenance-in-someshwara-nagar-bangalore/index.html")
            .exists()
    );
}

#[test]
fn sitemap_robots_and_assets() {
    let dist = build();

    let sitemap = read(&dist, "sitemap.xml");
    assert_eq!(sitemap.matches("<loc>").count(), 5 + 3 + 30 + 90);
    assert!(sitemap.contains(
        "<loc>https://hygieniccleaning.com/best-home-office-deep-cleaning-in-whitefield-bangalore</loc>"
    ));

    let robots = read(&dist, "robots.txt");
    assert!(robots.contains("Sitemap: https://hygieniccleaning.com/sitemap.xml"));

    assert!(dist.path().join("404.html").exists());
    assert!(dist.path().join("assets/favicon.svg").exists());
    assert!(dist.path().join("assets/images/water-tank-cleaning.svg").exists());
}

#[test]
fn chat_hidden_without_key() {
    let dist = build();
    let html = read(&dist, "index.html");
    assert!(!html.contains(r#"id="chat-panel""#));
    assert!(!html.contains("data-endpoint"));
    assert!(html.contains("cta-popup"));
}

#[test]
fn static_contact_page_has_phone_fallback() {
    let dist = build();
    let html = read(&dist, "contact/index.html");
    assert!(html.contains(r#"action="/api/contact""#));
    assert!(html.contains(r#"class="form-fallback""#));
    assert!(html.contains("message us on WhatsApp"));
}

#[test]
fn about_page_renders_markdown() {
    let dist = build();
    let html = read(&dist, "about/index.html");
    assert!(html.contains("<h2>How we work</h2>"));
    assert!(html.contains("<strong>tank and sump cleaning</strong>"));
}

#[test]
fn check_reports_inventory() {
    let out = run(&["check"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("001 Water Tank Cleaning Services"));
    assert!(stdout.contains("24 clients"));
    assert!(stdout.contains("==> Content is valid"));
}

#[test]
fn routes_lists_every_path() {
    let out = run(&["routes"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 5 + 3 + 30 + 90);
    assert!(stdout.contains("/best-water-tank-cleaning-in-indiranagar-bangalore"));
}

#[test]
fn gen_config_prints_documented_stock_file() {
    let out = Command::new(BIN).arg("gen-config").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[company]"));
    assert!(stdout.contains("[popup]"));
}
