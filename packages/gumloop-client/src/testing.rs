//! Testing utilities including a scriptable mock pipeline service.
//!
//! Useful for exercising polling logic without real network calls.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::api::PipelineApi;
use crate::error::{GumloopError, Result};
use crate::types::{PipelineRun, StartPipelineRequest, StartPipelineResponse};

/// A mock pipeline service.
///
/// Start responses are consumed in order. Status responses are scripted per
/// run id and consumed in order; once a run's script is exhausted every further
/// check reports `RUNNING`.
///
/// # Example
///
/// ```rust
/// use gumloop_client::testing::MockPipelineApi;
/// use gumloop_client::PipelineRun;
///
/// let mock = MockPipelineApi::new()
///     .with_started_run("run-1")
///     .with_poll("run-1", Ok(PipelineRun::running()));
///
/// assert_eq!(mock.start_call_count(), 0);
/// ```
#[derive(Default, Clone)]
pub struct MockPipelineApi {
    starts: Arc<RwLock<VecDeque<Result<StartPipelineResponse>>>>,
    polls: Arc<RwLock<HashMap<String, VecDeque<Result<PipelineRun>>>>>,
    start_calls: Arc<RwLock<Vec<StartPipelineRequest>>>,
    poll_calls: Arc<RwLock<Vec<MockPollCall>>>,
}

/// Record of a status check made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPollCall {
    pub run_id: String,
    pub user_id: String,
}

impl MockPipelineApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a start response.
    pub fn with_start_response(self, response: Result<StartPipelineResponse>) -> Self {
        self.starts.write().unwrap().push_back(response);
        self
    }

    /// Queue a successful start returning `run_id`.
    pub fn with_started_run(self, run_id: impl Into<String>) -> Self {
        self.with_start_response(Ok(StartPipelineResponse::with_run_id(run_id)))
    }

    /// Queue one status response for `run_id`.
    pub fn with_poll(self, run_id: impl Into<String>, response: Result<PipelineRun>) -> Self {
        self.polls
            .write()
            .unwrap()
            .entry(run_id.into())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue `count` consecutive `RUNNING` responses for `run_id`.
    pub fn with_running_polls(mut self, run_id: &str, count: usize) -> Self {
        for _ in 0..count {
            self = self.with_poll(run_id, Ok(PipelineRun::running()));
        }
        self
    }

    pub fn start_call_count(&self) -> usize {
        self.start_calls.read().unwrap().len()
    }

    pub fn start_calls(&self) -> Vec<StartPipelineRequest> {
        self.start_calls.read().unwrap().clone()
    }

    pub fn poll_call_count(&self) -> usize {
        self.poll_calls.read().unwrap().len()
    }

    /// Number of status checks made for one run.
    pub fn poll_count_for(&self, run_id: &str) -> usize {
        self.poll_calls
            .read()
            .unwrap()
            .iter()
            .filter(|call| call.run_id == run_id)
            .count()
    }

    pub fn poll_calls(&self) -> Vec<MockPollCall> {
        self.poll_calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PipelineApi for MockPipelineApi {
    async fn start_pipeline(
        &self,
        request: &StartPipelineRequest,
    ) -> Result<StartPipelineResponse> {
        self.start_calls.write().unwrap().push(request.clone());
        self.starts
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GumloopError::api(500, "no scripted start response")))
    }

    async fn get_pipeline_run(&self, run_id: &str, user_id: &str) -> Result<PipelineRun> {
        self.poll_calls.write().unwrap().push(MockPollCall {
            run_id: run_id.to_string(),
            user_id: user_id.to_string(),
        });
        self.polls
            .write()
            .unwrap()
            .get_mut(run_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(PipelineRun::running()))
    }
}
