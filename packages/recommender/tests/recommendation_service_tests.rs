mod common;

use common::*;
use gumloop_client::testing::MockPipelineApi;
use recommender::domains::profiles::{InMemoryProfileDirectory, ProfileError};
use recommender::domains::recommendations::models::{
    JOB_POSTING_URL_INPUT, PERSONAL_LINKEDIN_INPUT,
};
use recommender::domains::recommendations::{RecommendationError, RecommendationService};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

fn submitted_value(mock: &MockPipelineApi, input_name: &str) -> String {
    mock.start_calls()[0]
        .pipeline_inputs
        .iter()
        .find(|input| input.input_name == input_name)
        .map(|input| input.value.clone())
        .unwrap_or_else(|| panic!("input {} was not submitted", input_name))
}

#[tokio::test(start_paused = true)]
async fn test_recommend_submits_profile_linkedin_url() {
    let user_id = Uuid::new_v4();
    let mock = MockPipelineApi::new()
        .with_started_run("run-1")
        .with_poll("run-1", done(two_candidate_outputs()));
    let profiles = InMemoryProfileDirectory::new()
        .with_profile(user_id, Some("https://linkedin.com/in/jordan"));
    let service = RecommendationService::new(runner(&mock), profiles);

    let candidates = service
        .recommend(user_id, POSTING_URL, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(
        submitted_value(&mock, PERSONAL_LINKEDIN_INPUT),
        "https://linkedin.com/in/jordan"
    );
    assert_eq!(submitted_value(&mock, JOB_POSTING_URL_INPUT), POSTING_URL);
}

#[tokio::test(start_paused = true)]
async fn test_profile_without_linkedin_submits_empty_value() {
    let user_id = Uuid::new_v4();
    let mock = MockPipelineApi::new()
        .with_started_run("run-1")
        .with_poll("run-1", done(two_candidate_outputs()));
    let profiles = InMemoryProfileDirectory::new().with_profile(user_id, None);
    let service = RecommendationService::new(runner(&mock), profiles);

    service
        .recommend(user_id, POSTING_URL, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(submitted_value(&mock, PERSONAL_LINKEDIN_INPUT), "");
}

#[tokio::test(start_paused = true)]
async fn test_unknown_profile_never_starts_a_run() {
    let mock = MockPipelineApi::new().with_started_run("run-1");
    let service = RecommendationService::new(runner(&mock), InMemoryProfileDirectory::new());

    let err = service
        .recommend(Uuid::new_v4(), POSTING_URL, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RecommendationError::Profile(ProfileError::NotFound(_))
    ));
    assert_eq!(mock.start_call_count(), 0);
}
