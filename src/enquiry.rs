//! Contact-form submission.
//!
//! Enquiries posted to `/api/contact` are forwarded to Web3Forms, which
//! stores them and emails the business. The backend sits behind the
//! [`FormBackend`] trait so the server can run without one (demo mode) and
//! tests can substitute their own.
//!
//! Failures never escape as server errors: [`submit_enquiry`] folds every
//! outcome into a [`SubmitOutcome`] carrying the text shown to the visitor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SiteConfig;

pub const REJECTED_MESSAGE: &str = "Something went wrong. Please try again or call us.";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const MISSING_FIELDS_MESSAGE: &str = "Please enter your name and phone number.";

#[derive(Error, Debug)]
pub enum EnquiryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Form backend rejected the submission: {0}")]
    Rejected(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl EnquiryError {
    /// Text shown to the visitor for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            EnquiryError::Http(_) => NETWORK_MESSAGE,
            EnquiryError::Rejected(_) => REJECTED_MESSAGE,
            EnquiryError::MissingField(_) => MISSING_FIELDS_MESSAGE,
        }
    }
}

/// The contact form's fields, as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enquiry {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub area: String,
    pub message: String,
}

impl Enquiry {
    pub fn validate(&self) -> Result<(), EnquiryError> {
        if self.name.trim().is_empty() {
            return Err(EnquiryError::MissingField("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(EnquiryError::MissingField("phone"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    /// No access key configured: logged and reported as sent.
    Demo,
    Failed(&'static str),
}

#[async_trait]
pub trait FormBackend: Send + Sync {
    async fn submit(&self, enquiry: &Enquiry) -> Result<(), EnquiryError>;
}

#[derive(Debug, Deserialize)]
struct Web3FormsResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

/// Web3Forms client: one JSON POST per enquiry.
pub struct Web3FormsClient {
    http: reqwest::Client,
    endpoint: String,
    access_key: String,
    company: String,
}

impl Web3FormsClient {
    /// `None` when no access key is configured.
    pub fn from_config(config: &SiteConfig) -> Result<Option<Self>, EnquiryError> {
        if !config.forms.enabled() {
            return Ok(None);
        }
        let access_key = config.forms.access_key.clone().unwrap_or_default();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.forms.timeout_secs))
            .build()?;
        Ok(Some(Self {
            http,
            endpoint: config.forms.endpoint.clone(),
            access_key,
            company: config.company.name.clone(),
        }))
    }

    fn payload(&self, enquiry: &Enquiry) -> serde_json::Value {
        json!({
            "access_key": self.access_key,
            "name": enquiry.name,
            "phone": enquiry.phone,
            "email": enquiry.email,
            "service": enquiry.service,
            "area": enquiry.area,
            "message": enquiry.message,
            "subject": format!("New Enquiry for {} from {}", self.company, enquiry.name),
            "from_name": enquiry.name,
        })
    }
}

#[async_trait]
impl FormBackend for Web3FormsClient {
    async fn submit(&self, enquiry: &Enquiry) -> Result<(), EnquiryError> {
        let response: Web3FormsResponse = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&self.payload(enquiry))
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            Ok(())
        } else {
            Err(EnquiryError::Rejected(response.message))
        }
    }
}

/// Validate and forward an enquiry, mapping every failure to its visitor text.
pub async fn submit_enquiry(backend: Option<&dyn FormBackend>, enquiry: &Enquiry) -> SubmitOutcome {
    if let Err(e) = enquiry.validate() {
        return SubmitOutcome::Failed(e.user_message());
    }

    let Some(backend) = backend else {
        info!(
            name = %enquiry.name,
            service = %enquiry.service,
            area = %enquiry.area,
            "forms access key not configured; enquiry accepted in demo mode"
        );
        return SubmitOutcome::Demo;
    };

    match backend.submit(enquiry).await {
        Ok(()) => {
            info!(service = %enquiry.service, area = %enquiry.area, "enquiry forwarded");
            SubmitOutcome::Sent
        }
        Err(e) => {
            warn!(error = %e, "enquiry submission failed");
            SubmitOutcome::Failed(e.user_message())
        }
    }
}
