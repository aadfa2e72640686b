//! Drives one pipeline run from submission to typed candidates.
//!
//! A run moves `Submitted → Polling → {Succeeded, Failed, TimedOut, Cancelled}`.
//! Every poll attempt is one fixed delay followed by one status check, and the
//! delay comes before the first check as well. Worst-case latency is therefore
//! `max_attempts × interval`.

use gumloop_client::{PipelineApi, RunState, StartPipelineRequest};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::{RecommendationError, Result};
use super::models::{CandidateRecord, JobSubmission, RunHandle};
use super::outputs::{candidates_from_outputs, kind_of};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// What a failed status check does to the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PollErrorPolicy {
    /// Abort with [`RecommendationError::PollTransport`].
    #[default]
    FailFast,
    /// Log it, spend the attempt, keep polling.
    RetryWithinBudget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub on_transport_error: PollErrorPolicy,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
            on_transport_error: PollErrorPolicy::FailFast,
        }
    }
}

/// Routing identifiers and poll policy, fixed for the life of a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Gumloop user (workspace) that owns the saved pipeline
    pub user_id: String,
    /// Saved pipeline to start
    pub saved_item_id: String,
    pub poll: PollPolicy,
}

impl RunSettings {
    pub fn new(user_id: impl Into<String>, saved_item_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            saved_item_id: saved_item_id.into(),
            poll: PollPolicy::default(),
        }
    }

    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }
}

/// Submits pipeline runs and waits for them.
///
/// Holds no per-run state: the handle and attempt counter of a run live on
/// that call's stack, so one runner can serve concurrent callers.
pub struct JobRunner<P> {
    api: P,
    settings: RunSettings,
}

impl<P: PipelineApi> JobRunner<P> {
    pub fn new(api: P, settings: RunSettings) -> Self {
        Self { api, settings }
    }

    /// Run the recommendation pipeline for a posting and return the suggested
    /// contacts.
    pub async fn submit_and_await(
        &self,
        subject_id: &str,
        posting_url: &str,
    ) -> Result<Vec<CandidateRecord>> {
        self.submit_and_await_with_cancel(subject_id, posting_url, CancellationToken::new())
            .await
    }

    /// Like [`submit_and_await`](Self::submit_and_await), giving up with
    /// [`RecommendationError::Cancelled`] once `cancel` fires.
    pub async fn submit_and_await_with_cancel(
        &self,
        subject_id: &str,
        posting_url: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<CandidateRecord>> {
        if posting_url.trim().is_empty() {
            return Err(RecommendationError::InvalidSubmission(
                "job posting URL is required".into(),
            ));
        }

        let submission = JobSubmission::recommendation(subject_id, posting_url);
        let outputs = self.run_to_completion(submission, cancel).await?;

        let candidates = candidates_from_outputs(&outputs)?;
        info!(count = candidates.len(), "Pipeline produced candidates");
        Ok(candidates)
    }

    /// Submit any set of inputs and wait for the raw outputs of a `DONE` run.
    pub async fn run_to_completion(
        &self,
        submission: JobSubmission,
        cancel: CancellationToken,
    ) -> Result<Map<String, Value>> {
        if cancel.is_cancelled() {
            return Err(RecommendationError::Cancelled);
        }

        let handle = self.submit(submission).await?;
        info!(run_id = %handle, "Gumloop pipeline started, polling for completion");

        self.await_outputs(&handle, &cancel).await
    }

    async fn submit(&self, submission: JobSubmission) -> Result<RunHandle> {
        let request = StartPipelineRequest {
            user_id: self.settings.user_id.clone(),
            saved_item_id: self.settings.saved_item_id.clone(),
            pipeline_inputs: submission.into_inputs(),
        };

        let response = self
            .api
            .start_pipeline(&request)
            .await
            .map_err(RecommendationError::Submission)?;

        RunHandle::parse(response.run_id.as_deref())
            .ok_or(RecommendationError::InvalidRunHandle)
    }

    async fn await_outputs(
        &self,
        handle: &RunHandle,
        cancel: &CancellationToken,
    ) -> Result<Map<String, Value>> {
        let policy = &self.settings.poll;
        let mut attempt = 0;

        while attempt < policy.max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(run_id = %handle, attempt, "Pipeline run cancelled");
                    return Err(RecommendationError::Cancelled);
                }
                _ = tokio::time::sleep(policy.interval) => {}
            }
            attempt += 1;

            let run = match self
                .api
                .get_pipeline_run(handle.as_str(), &self.settings.user_id)
                .await
            {
                Ok(run) => run,
                Err(source) => match policy.on_transport_error {
                    PollErrorPolicy::FailFast => {
                        return Err(RecommendationError::PollTransport { attempt, source })
                    }
                    PollErrorPolicy::RetryWithinBudget => {
                        warn!(
                            run_id = %handle,
                            attempt,
                            error = %source,
                            "Status check failed, retrying"
                        );
                        continue;
                    }
                },
            };

            debug!(run_id = %handle, state = %run.state, attempt, "Run state");

            match run.state {
                RunState::Done => return completed_outputs(run.outputs),
                ref state if state.is_failure() => {
                    return Err(RecommendationError::run_failed(
                        state.as_str(),
                        run.log.as_deref(),
                    ));
                }
                RunState::Unknown(ref raw) => {
                    warn!(
                        run_id = %handle,
                        state = %raw,
                        attempt,
                        "Unrecognized run state, still polling"
                    );
                }
                // RUNNING, TERMINATING
                _ => {}
            }
        }

        warn!(run_id = %handle, max_attempts = policy.max_attempts, "Pipeline run timed out");
        Err(RecommendationError::RunTimedOut {
            max_attempts: policy.max_attempts,
        })
    }
}

/// The outputs of a `DONE` run must be a JSON object.
fn completed_outputs(outputs: Option<Value>) -> Result<Map<String, Value>> {
    match outputs {
        Some(Value::Object(map)) => Ok(map),
        None | Some(Value::Null) => Err(RecommendationError::MalformedOutput(
            "run completed without outputs".into(),
        )),
        Some(other) => Err(RecommendationError::MalformedOutput(format!(
            "`outputs` should be an object, got {}",
            kind_of(&other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_policy() {
        let poll = PollPolicy::default();

        assert_eq!(poll.max_attempts, 30);
        assert_eq!(poll.interval, Duration::from_secs(2));
        assert_eq!(poll.on_transport_error, PollErrorPolicy::FailFast);
        assert_eq!(
            poll.interval * poll.max_attempts,
            Duration::from_secs(60)
        );
    }

    #[test]
    fn test_settings_builder() {
        let settings = RunSettings::new("user", "item").with_poll(PollPolicy {
            max_attempts: 5,
            ..Default::default()
        });

        assert_eq!(settings.user_id, "user");
        assert_eq!(settings.saved_item_id, "item");
        assert_eq!(settings.poll.max_attempts, 5);
    }

    #[test]
    fn test_completed_outputs_requires_an_object() {
        let outputs = completed_outputs(Some(serde_json::json!({ "first_names": [] }))).unwrap();
        assert!(outputs.contains_key("first_names"));

        let err = completed_outputs(Some(serde_json::json!(["not", "a", "map"]))).unwrap_err();
        assert!(matches!(
            err,
            RecommendationError::MalformedOutput(ref msg) if msg.contains("an array")
        ));

        let err = completed_outputs(Some(Value::Null)).unwrap_err();
        assert!(matches!(err, RecommendationError::MalformedOutput(_)));
    }
}
