//! Pure Gumloop REST API client.
//!
//! A minimal client for the Gumloop pipeline API. Supports starting a saved
//! pipeline and fetching run details. Polling policy is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use gumloop_client::{GumloopClient, PipelineApi, PipelineInput, StartPipelineRequest};
//!
//! let client = GumloopClient::new("your-api-key");
//!
//! let started = client
//!     .start_pipeline(&StartPipelineRequest {
//!         user_id: "user".into(),
//!         saved_item_id: "saved-item".into(),
//!         pipeline_inputs: vec![PipelineInput::new("job_posting_url", url)],
//!     })
//!     .await?;
//!
//! let run = client.get_pipeline_run(&started.run_id.unwrap(), "user").await?;
//! println!("{}", run.state);
//! ```

pub mod api;
pub mod error;
pub mod testing;
pub mod types;

pub use api::PipelineApi;
pub use error::{GumloopError, Result};
pub use secrecy::{ExposeSecret, SecretString};
pub use types::{
    PipelineInput, PipelineRun, RunState, StartPipelineRequest, StartPipelineResponse,
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

const BASE_URL: &str = "https://api.gumloop.com/api/v1";

/// Gumloop API client.
///
/// Clones share one connection pool and one copy of the API key.
#[derive(Clone)]
pub struct GumloopClient {
    http_client: reqwest::Client,
    api_key: Arc<SecretString>,
    base_url: String,
}

impl GumloopClient {
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: Arc::new(api_key.into()),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies or a local stub).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response, what: &str) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = %status, error = %body, "Gumloop {} failed", what);
            return Err(GumloopError::api(status.as_u16(), body));
        }

        resp.json().await.map_err(|e| {
            GumloopError::Parse(format!("Failed to decode {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl PipelineApi for GumloopClient {
    async fn start_pipeline(
        &self,
        request: &StartPipelineRequest,
    ) -> Result<StartPipelineResponse> {
        let url = format!("{}/start_pipeline", self.base_url);
        debug!(
            saved_item_id = %request.saved_item_id,
            inputs = request.pipeline_inputs.len(),
            "Starting Gumloop pipeline"
        );

        let resp = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gumloop start_pipeline request failed");
                GumloopError::Network(e.to_string())
            })?;

        Self::read_json(resp, "start_pipeline").await
    }

    async fn get_pipeline_run(&self, run_id: &str, user_id: &str) -> Result<PipelineRun> {
        let url = format!("{}/get_pl_run", self.base_url);

        let resp = self
            .http_client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .query(&[("run_id", run_id), ("user_id", user_id)])
            .send()
            .await
            .map_err(|e| {
                warn!(run_id, error = %e, "Gumloop get_pl_run request failed");
                GumloopError::Network(e.to_string())
            })?;

        Self::read_json(resp, "get_pl_run").await
    }
}
