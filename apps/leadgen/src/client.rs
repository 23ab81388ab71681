//! Bio Client — the single point of entry for all bio-generation service calls.
//!
//! ARCHITECTURAL RULE: No other module may talk to the service directly.
//! Both flows (single-lead and batch) MUST go through `BioService`, so the
//! request/response contract lives in exactly one place.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::FlowError;
use crate::models::{BatchEnvelope, BatchRow, GenerateEnvelope, GeneratedLead, LeadQuery};

const GENERATE_BIO_PATH: &str = "/generate_bio";
const GENERATE_BATCH_BIO_PATH: &str = "/generate_batch_bio";

/// Multipart field name the service expects the CSV under.
const BATCH_FILE_FIELD: &str = "file";

/// The service boundary. Implement this to swap backends without touching
/// either flow — the flows only ever see `&dyn BioService`.
#[async_trait]
pub trait BioService: Send + Sync {
    /// `POST /generate_bio` with a JSON body.
    async fn generate_bio(&self, query: &LeadQuery) -> Result<GeneratedLead, FlowError>;

    /// `POST /generate_batch_bio` with the CSV bytes as a multipart upload.
    async fn generate_batch_bio(
        &self,
        file_name: &str,
        csv_bytes: Vec<u8>,
    ) -> Result<Vec<BatchRow>, FlowError>;
}

/// HTTP implementation of [`BioService`] over reqwest.
///
/// Deliberately has no request timeout: a hung connection hangs the calling
/// flow until the transport gives up on its own. No retries either — the user
/// retries manually.
#[derive(Clone)]
pub struct BioClient {
    client: Client,
    base_url: String,
}

impl BioClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BioService for BioClient {
    async fn generate_bio(&self, query: &LeadQuery) -> Result<GeneratedLead, FlowError> {
        debug!(first = %query.first, last = %query.last, "submitting single-lead query");

        let response = self
            .client
            .post(self.url(GENERATE_BIO_PATH))
            .header("content-type", "application/json")
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Body shape is unspecified on non-2xx; do not attempt to read it.
            warn!(%status, "bio service returned non-success status");
            return Err(FlowError::Network(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: GenerateEnvelope = serde_json::from_str(&body)?;

        match (envelope.output, envelope.error) {
            (Some(lead), _) => Ok(lead),
            (None, Some(message)) => {
                warn!("bio service returned an error payload: {message}");
                Err(FlowError::Service(message))
            }
            (None, None) => {
                warn!("bio service returned neither output nor error");
                Err(FlowError::Service(
                    "Bio service returned an empty response.".to_string(),
                ))
            }
        }
    }

    async fn generate_batch_bio(
        &self,
        file_name: &str,
        csv_bytes: Vec<u8>,
    ) -> Result<Vec<BatchRow>, FlowError> {
        debug!(file_name, bytes = csv_bytes.len(), "submitting batch upload");

        let part = Part::bytes(csv_bytes)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(FlowError::Transport)?;
        let form = Form::new().part(BATCH_FILE_FIELD, part);

        let response = self
            .client
            .post(self.url(GENERATE_BATCH_BIO_PATH))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "batch endpoint returned non-success status");
            return Err(FlowError::Network(status.as_u16()));
        }

        let body = response.text().await?;
        let envelope: BatchEnvelope = serde_json::from_str(&body)?;

        debug!(rows = envelope.results.len(), "batch response decoded");
        Ok(envelope.results)
    }
}
