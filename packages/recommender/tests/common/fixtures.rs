//! Test fixtures for scripted pipeline runs.

use gumloop_client::testing::MockPipelineApi;
use gumloop_client::{PipelineRun, StartPipelineResponse};
use recommender::domains::recommendations::{JobRunner, PollPolicy, RunSettings};
use serde_json::{json, Map, Value};

pub const USER_ID: &str = "gumloop-user";
pub const SAVED_ITEM_ID: &str = "saved-item";
pub const POSTING_URL: &str = "https://www.linkedin.com/jobs/view/1234";

pub fn settings() -> RunSettings {
    RunSettings::new(USER_ID, SAVED_ITEM_ID)
}

pub fn runner(mock: &MockPipelineApi) -> JobRunner<MockPipelineApi> {
    JobRunner::new(mock.clone(), settings())
}

pub fn runner_with_poll(mock: &MockPipelineApi, poll: PollPolicy) -> JobRunner<MockPipelineApi> {
    JobRunner::new(mock.clone(), settings().with_poll(poll))
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Outputs for two fully populated candidates.
pub fn two_candidate_outputs() -> Map<String, Value> {
    object(json!({
        "first_names": ["Priya", "Marcus"],
        "last_names": ["Shah", "Lee"],
        "job_titles": ["Engineering Manager", "Technical Recruiter"],
        "headlines": ["Building payments infra", "Hiring backend engineers"],
        "links": ["https://linkedin.com/in/priya", "https://linkedin.com/in/marcus"],
        "profile_pictures": ["https://img.example/priya.jpg", "https://img.example/marcus.jpg"],
        "cities": ["Minneapolis", "St. Paul"],
        "states": ["MN", "MN"],
        "countries": ["USA", "USA"],
        "custom_messages": ["Hi Priya, ...", "Hi Marcus, ..."]
    }))
}

pub fn done(outputs: Map<String, Value>) -> gumloop_client::Result<PipelineRun> {
    Ok(PipelineRun::done(outputs))
}

/// A run status decoded from a raw `get_pl_run` body.
pub fn run_from_wire(body: Value) -> gumloop_client::Result<PipelineRun> {
    Ok(serde_json::from_value(body).expect("run body should decode"))
}

/// A start response decoded from a raw `start_pipeline` body.
pub fn start_from_wire(body: Value) -> gumloop_client::Result<StartPipelineResponse> {
    Ok(serde_json::from_value(body).expect("start body should decode"))
}

/// Paused-clock elapsed time, allowing for timer tick rounding.
pub fn assert_elapsed(start: tokio::time::Instant, expected: std::time::Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + std::time::Duration::from_millis(50),
        "expected ~{:?}, got {:?}",
        expected,
        elapsed
    );
}
