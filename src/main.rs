use clap::{Parser, Subcommand};
use hygienic_site::catalog::Catalog;
use hygienic_site::config::{self, SiteConfig};
use hygienic_site::render::PageAssets;
use hygienic_site::{generate, output, routes, server};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const CATALOG_FILE: &str = "catalog.toml";

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "hygienic-site")]
#[command(about = "SEO-first site generator and server for a cleaning-services company")]
#[command(long_about = "\
SEO-first site generator and server for a cleaning-services company

The catalog is the data source. Every service and every area gets a page,
and every service × area pair gets its own landing page at
/best-<service>-in-<area>-<city>.

Content structure:

  content/
  ├── config.toml       # Company identity, base URL, theme, chat/forms/popup
  ├── catalog.toml      # Services, areas (with landmarks), clients
  ├── about.md          # About page body (optional)
  └── assets/           # Logos, favicon → copied to <output>/assets/

Secrets may come from the environment instead of config.toml:
  HYGIENIC_CHAT_API_KEY       enables the chat assistant
  HYGIENIC_FORMS_ACCESS_KEY   forwards enquiries to Web3Forms

Run 'hygienic-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page into the output directory
    ///
    /// The built site has no /api endpoints: chat and the contact form only
    /// work behind `serve`, so the static contact page also offers call and
    /// WhatsApp links.
    Build,
    /// Serve pages on demand, with the chat and contact endpoints
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,
        /// Override server.port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate config and catalog without building
    Check,
    /// List every published path
    Routes,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Build => {
            let (config, catalog) = load_site(&cli.source)?;
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&catalog, &config, &cli.source, &cli.output)?;
            output::print_build_output(&report, &catalog);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Serve { host, port } => {
            let (mut config, catalog) = load_site(&cli.source)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let about = generate::load_about(&cli.source)?;
            let assets = PageAssets::new(&config, about.as_deref());
            let state =
                server::AppState::from_config(Arc::new(catalog), Arc::new(config), assets)?;
            let assets_dir = cli.source.join(generate::ASSETS_DIR);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(state, Some(&assets_dir)))?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (config, catalog) = load_site(&cli.source)?;
            output::print_check_output(&catalog, &config);
            println!("==> Content is valid");
        }
        Command::Routes => {
            let (config, catalog) = load_site(&cli.source)?;
            output::print_routes_output(&routes::all_routes(&catalog, &config));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("hygienic_site=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Config (with environment overrides) and catalog from the content directory.
fn load_site(source: &Path) -> Result<(SiteConfig, Catalog), Box<dyn std::error::Error>> {
    let mut config = config::load_config(source)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;
    let catalog = Catalog::load(&source.join(CATALOG_FILE), &config)?;
    Ok((config, catalog))
}
