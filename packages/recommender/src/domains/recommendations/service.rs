use gumloop_client::PipelineApi;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use super::error::Result;
use super::models::CandidateRecord;
use super::runner::JobRunner;
use crate::domains::profiles::ProfileDirectory;

/// Recommends contacts for a signed-in user.
///
/// Looks up the user's own LinkedIn URL, then runs the pipeline with it and
/// the posting URL.
pub struct RecommendationService<P, D> {
    runner: JobRunner<P>,
    profiles: D,
}

impl<P: PipelineApi, D: ProfileDirectory> RecommendationService<P, D> {
    pub fn new(runner: JobRunner<P>, profiles: D) -> Self {
        Self { runner, profiles }
    }

    pub async fn recommend(
        &self,
        user_id: Uuid,
        posting_url: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<CandidateRecord>> {
        let personal_linkedin = self.profiles.linkedin_url(user_id).await?.unwrap_or_default();

        info!(
            %user_id,
            has_linkedin = !personal_linkedin.is_empty(),
            "Requesting contact recommendations"
        );

        self.runner
            .submit_and_await_with_cancel(&personal_linkedin, posting_url, cancel)
            .await
    }
}
