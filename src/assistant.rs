//! Site chat assistant.
//!
//! The browser widget posts the running conversation to `/api/chat`; the
//! server grounds it in a system prompt built from the company identity and
//! catalog, and forwards it to the Gemini `generateContent` REST endpoint.
//! The API key never leaves the server.
//!
//! ## Conversation Layout
//!
//! Gemini has no system role on this endpoint, so the prompt is sent as the
//! opening exchange:
//!
//! ```text
//! user:  <system prompt>
//! model: Understood. I am the AI assistant for <company>. How can I help?
//! user / model ... (history, oldest first)
//! user:  <new message>
//! ```
//!
//! Any failure is logged and replaced by [`fallback_reply`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::config::SiteConfig;

/// Most recent turns forwarded upstream; older ones are dropped.
pub const MAX_HISTORY: usize = 20;
/// Areas named in the system prompt.
const PROMPT_AREAS: usize = 5;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Chat API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Chat API response had no text")]
    EmptyReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
}

impl ChatRole {
    fn upstream(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Ai => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, ChatError>;
}

/// Context the assistant is grounded in.
pub fn system_prompt(config: &SiteConfig, catalog: &Catalog) -> String {
    let c = &config.company;
    let services: Vec<&str> = catalog.services().iter().map(|s| s.name.as_str()).collect();
    let areas: Vec<&str> = catalog
        .areas()
        .iter()
        .take(PROMPT_AREAS)
        .map(|a| a.name.as_str())
        .collect();

    format!(
        "You are the AI Assistant for {name}, a professional cleaning service provider in {city} \
         with {years}+ years of experience.\n\
         Your goal is to help users with questions about our services, areas we cover, and how to contact us.\n\
         \n\
         Key Information:\n\
         - Company Name: {name}\n\
         - Services: {services}\n\
         - Location: Based in {city}, serving {count} neighborhoods including {areas}.\n\
         - Contact: Phone {phone}, Email {email}.\n\
         - Booking: Users can book via the \"Book Service\" button or by calling us.\n\
         \n\
         Tone: Professional, helpful, clean, and efficient.\n\
         If you don't know an answer, suggest the user call us at {phone}.",
        name = c.name,
        city = c.primary_city,
        years = c.years_experience,
        services = services.join(", "),
        count = catalog.areas().len(),
        areas = areas.join(", "),
        phone = c.phone,
        email = c.email,
    )
}

/// Reply shown whenever the upstream call fails.
pub fn fallback_reply(config: &SiteConfig) -> String {
    format!(
        "Sorry, I'm having trouble connecting right now. Please call us at {} for immediate assistance.",
        config.company.phone
    )
}

/// Opening line of the widget.
pub fn greeting(config: &SiteConfig) -> String {
    format!(
        "Hi! I'm your {} assistant. How can I help you today?",
        config.company.name
    )
}

/// Run one chat round trip. Never fails: errors become the fallback reply.
pub async fn answer(
    backend: &dyn ChatBackend,
    config: &SiteConfig,
    system_prompt: &str,
    request: &ChatRequest,
) -> ChatReply {
    let start = request.history.len().saturating_sub(MAX_HISTORY);
    let history = &request.history[start..];

    match backend
        .complete(system_prompt, history, request.message.trim())
        .await
    {
        Ok(reply) => ChatReply { reply },
        Err(e) => {
            warn!(error = %e, "chat completion failed; sending fallback reply");
            ChatReply {
                reply: fallback_reply(config),
            }
        }
    }
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    company: String,
}

impl GeminiClient {
    /// `None` when chat is disabled (no API key).
    pub fn from_config(config: &SiteConfig) -> Result<Option<Self>, ChatError> {
        let Some(api_key) = config.chat.api_key.clone().filter(|_| config.chat.enabled()) else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.chat.timeout_secs))
            .build()?;
        Ok(Some(Self {
            http,
            endpoint: config.chat.endpoint.trim_end_matches('/').to_string(),
            model: config.chat.model.clone(),
            api_key,
            company: config.company.name.clone(),
        }))
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    fn contents(&self, system_prompt: &str, history: &[ChatMessage], message: &str) -> Value {
        let turn = |role: &str, text: &str| json!({ "role": role, "parts": [{ "text": text }] });

        let acknowledgement = format!(
            "Understood. I am the AI assistant for {}. How can I help?",
            self.company
        );
        let mut contents = vec![
            turn("user", system_prompt),
            turn("model", &acknowledgement),
        ];
        contents.extend(history.iter().map(|m| turn(m.role.upstream(), &m.text)));
        contents.push(turn("user", message));
        Value::Array(contents)
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, ChatError> {
        debug!(model = %self.model, turns = history.len(), "chat completion request");
        let response = self
            .http
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({ "contents": self.contents(system_prompt, history, message) }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .ok_or(ChatError::EmptyReply)
    }
}
