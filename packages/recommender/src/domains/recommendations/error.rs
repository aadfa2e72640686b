//! Typed errors for recommendation runs.
//!
//! Every failure aborts the current run. Callers match on the variant instead
//! of parsing messages.

use gumloop_client::GumloopError;
use thiserror::Error;

use crate::domains::profiles::ProfileError;

/// Placeholder used when a failed run carries no log lines.
pub const NO_ERROR_LOGS: &str = "No error logs provided";

pub type Result<T> = std::result::Result<T, RecommendationError>;

#[derive(Debug, Error)]
pub enum RecommendationError {
    /// Inputs rejected before anything was sent
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// The start call failed or was rejected
    #[error("Gumloop API call failed: {0}")]
    Submission(#[source] GumloopError),

    /// The start call succeeded without a usable run id
    #[error("pipeline start response did not include a run id")]
    InvalidRunHandle,

    /// A status check failed at the network/response level
    #[error("Failed to retrieve run details on attempt {attempt}: {source}")]
    PollTransport {
        attempt: u32,
        #[source]
        source: GumloopError,
    },

    /// The run reached `FAILED` or `TERMINATED`
    #[error("Pipeline run {status}: {log}")]
    RunFailed { status: String, log: String },

    /// The attempt budget ran out before a terminal state
    #[error("Pipeline run did not complete after {max_attempts} attempts")]
    RunTimedOut { max_attempts: u32 },

    /// `DONE`, but the outputs can't be turned into candidates
    #[error("malformed pipeline outputs: {0}")]
    MalformedOutput(String),

    #[error("pipeline run cancelled")]
    Cancelled,

    #[error("profile lookup failed: {0}")]
    Profile(#[from] ProfileError),
}

impl RecommendationError {
    /// Build a [`RecommendationError::RunFailed`] from a terminal status and
    /// the service's log lines.
    pub fn run_failed(status: &str, log: Option<&[String]>) -> Self {
        let joined = log.map(|lines| lines.join("\n")).unwrap_or_default();
        Self::RunFailed {
            status: status.to_lowercase(),
            log: if joined.is_empty() {
                NO_ERROR_LOGS.to_string()
            } else {
                joined
            },
        }
    }

    /// Whether submitting the same request again later might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Submission(_) | Self::PollTransport { .. } | Self::RunTimedOut { .. } => true,
            Self::Profile(e) => e.is_transient(),
            _ => false,
        }
    }
}
