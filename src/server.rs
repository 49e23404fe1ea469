//! The `serve` command.
//!
//! Renders pages on demand with the same resolver and templates as the
//! static build, and hosts the two endpoints that front the external
//! collaborators:
//!
//! | Method | Path | Behaviour |
//! |---|---|---|
//! | `GET` | any page path | resolved by [`Route::parse`]; not-found pages answer 404 |
//! | `POST` | `/api/chat` | JSON chat round trip; 404 when chat is disabled |
//! | `POST` | `/api/contact` | urlencoded enquiry; re-renders the contact page |
//! | `GET` | `/assets/*` | files from `content/assets/` |
//! | `GET` | `/sitemap.xml`, `/robots.txt` | generated |
//!
//! Collaborator failures never surface as 5xx responses. They are logged and
//! turned into the visitor-facing texts of [`assistant`] and
//! [`crate::enquiry`].

use axum::{
    Form, Json, Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::assistant::{self, ChatBackend, ChatError, ChatRequest, GeminiClient};
use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::enquiry::{Enquiry, EnquiryError, FormBackend, SubmitOutcome, Web3FormsClient, submit_enquiry};
use crate::generate;
use crate::render::{ContactState, PageAssets, Renderer};
use crate::routes::{self, PageRequest, Route};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Chat client error: {0}")]
    Chat(#[from] ChatError),
    #[error("Form client error: {0}")]
    Forms(#[from] EnquiryError),
}

pub struct AppState {
    catalog: Arc<Catalog>,
    config: Arc<SiteConfig>,
    assets: PageAssets,
    chat: Option<Arc<dyn ChatBackend>>,
    forms: Option<Arc<dyn FormBackend>>,
    system_prompt: String,
}

type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        config: Arc<SiteConfig>,
        assets: PageAssets,
        chat: Option<Arc<dyn ChatBackend>>,
        forms: Option<Arc<dyn FormBackend>>,
    ) -> Self {
        let system_prompt = assistant::system_prompt(&config, &catalog);
        Self {
            catalog,
            config,
            assets,
            chat,
            forms,
            system_prompt,
        }
    }

    /// State with the Gemini and Web3Forms clients the config enables.
    pub fn from_config(
        catalog: Arc<Catalog>,
        config: Arc<SiteConfig>,
        assets: PageAssets,
    ) -> Result<Self, ServerError> {
        let chat = GeminiClient::from_config(&config)?.map(|c| Arc::new(c) as Arc<dyn ChatBackend>);
        let forms =
            Web3FormsClient::from_config(&config)?.map(|c| Arc::new(c) as Arc<dyn FormBackend>);
        Ok(Self::new(catalog, config, assets, chat, forms))
    }

    fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.catalog, &self.config, &self.assets)
    }
}

pub fn router(state: AppState, assets_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/api/chat", post(chat))
        .route("/api/contact", post(contact))
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots));
    if let Some(dir) = assets_dir {
        app = app.nest_service("/assets", ServeDir::new(dir));
    }
    app.fallback(page)
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, assets_dir: Option<&Path>) -> Result<(), ServerError> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let chat_enabled = state.chat.is_some();
    let forms_enabled = state.forms.is_some();
    let app = router(state, assets_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, chat_enabled, forms_enabled, "hygienic-site server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// --- Handlers ---

async fn page(State(state): State<SharedState>, uri: Uri) -> (StatusCode, Html<String>) {
    let request = Route::parse(uri.path())
        .map(|route| route.resolve(&state.catalog, &state.config))
        .unwrap_or(PageRequest::NotFound);
    let status = if request == PageRequest::NotFound {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Html(state.renderer().render(request).into_string()))
}

async fn chat(State(state): State<SharedState>, Json(request): Json<ChatRequest>) -> Response {
    let Some(backend) = state.chat.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if request.message.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "message is required").into_response();
    }
    let reply = assistant::answer(backend, &state.config, &state.system_prompt, &request).await;
    Json(reply).into_response()
}

async fn contact(State(state): State<SharedState>, Form(enquiry): Form<Enquiry>) -> Html<String> {
    let outcome = submit_enquiry(state.forms.as_deref(), &enquiry).await;
    let contact_state = match outcome {
        SubmitOutcome::Sent | SubmitOutcome::Demo => ContactState::Sent,
        SubmitOutcome::Failed(error) => ContactState::Retry {
            enquiry: &enquiry,
            error,
        },
    };
    Html(state.renderer().contact_page(contact_state).into_string())
}

async fn sitemap(State(state): State<SharedState>) -> impl IntoResponse {
    let urls: Vec<String> = routes::all_routes(&state.catalog, &state.config)
        .iter()
        .map(|route| state.config.absolute_url(&route.path()))
        .collect();
    (
        [(header::CONTENT_TYPE, "application/xml")],
        generate::render_sitemap(&urls),
    )
}

async fn robots(State(state): State<SharedState>) -> String {
    generate::render_robots(&state.config)
}
