//! The pipeline service seam.
//!
//! Anything that drives runs (see the `recommender` crate) is generic over
//! [`PipelineApi`] so it can be tested against
//! [`MockPipelineApi`](crate::testing::MockPipelineApi) instead of the network.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PipelineRun, StartPipelineRequest, StartPipelineResponse};

#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Start a saved pipeline. Returns as soon as the run is accepted.
    async fn start_pipeline(
        &self,
        request: &StartPipelineRequest,
    ) -> Result<StartPipelineResponse>;

    /// Fetch the current details of a run.
    async fn get_pipeline_run(&self, run_id: &str, user_id: &str) -> Result<PipelineRun>;
}

#[async_trait]
impl<T: PipelineApi + ?Sized> PipelineApi for std::sync::Arc<T> {
    async fn start_pipeline(
        &self,
        request: &StartPipelineRequest,
    ) -> Result<StartPipelineResponse> {
        (**self).start_pipeline(request).await
    }

    async fn get_pipeline_run(&self, run_id: &str, user_id: &str) -> Result<PipelineRun> {
        (**self).get_pipeline_run(run_id, user_id).await
    }
}
