use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One named input passed to a saved pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInput {
    pub input_name: String,
    pub value: String,
}

impl PipelineInput {
    pub fn new(input_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            input_name: input_name.into(),
            value: value.into(),
        }
    }
}

/// Body of `POST /start_pipeline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartPipelineRequest {
    pub user_id: String,
    pub saved_item_id: String,
    pub pipeline_inputs: Vec<PipelineInput>,
}

/// Response of `POST /start_pipeline`.
///
/// Every field is optional on the wire, and a field that is not a string
/// reads as absent. Callers decide whether a missing `run_id` is fatal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartPipelineResponse {
    #[serde(default, deserialize_with = "string_or_none")]
    pub run_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub saved_item_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub url: Option<String>,
}

impl StartPipelineResponse {
    pub fn with_run_id(run_id: impl Into<String>) -> Self {
        Self {
            run_id: Some(run_id.into()),
            ..Default::default()
        }
    }
}

/// Run state as reported by `GET /get_pl_run`.
///
/// The service sends a bare string. Values outside the documented set are kept
/// in [`RunState::Unknown`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunState {
    Running,
    Terminating,
    Done,
    Failed,
    Terminated,
    Unknown(String),
}

impl RunState {
    pub fn as_str(&self) -> &str {
        match self {
            RunState::Running => "RUNNING",
            RunState::Terminating => "TERMINATING",
            RunState::Done => "DONE",
            RunState::Failed => "FAILED",
            RunState::Terminated => "TERMINATED",
            RunState::Unknown(raw) => raw,
        }
    }

    /// `DONE`, `FAILED` and `TERMINATED` never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Done | RunState::Failed | RunState::Terminated
        )
    }

    /// `FAILED` and `TERMINATED`: finished without outputs.
    pub fn is_failure(&self) -> bool {
        matches!(self, RunState::Failed | RunState::Terminated)
    }
}

impl From<String> for RunState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "RUNNING" => RunState::Running,
            "TERMINATING" => RunState::Terminating,
            "DONE" => RunState::Done,
            "FAILED" => RunState::Failed,
            "TERMINATED" => RunState::Terminated,
            _ => RunState::Unknown(raw),
        }
    }
}

impl From<&str> for RunState {
    fn from(raw: &str) -> Self {
        RunState::from(raw.to_string())
    }
}

impl From<RunState> for String {
    fn from(state: RunState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline run details from `GET /get_pl_run`.
///
/// Decoding never fails on the shape of an individual field. A `state` that
/// is missing or not a string becomes [`RunState::Unknown`], and `outputs` is
/// kept as raw JSON so the caller can reject a non-object itself.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRun {
    #[serde(default, deserialize_with = "string_or_none")]
    pub run_id: Option<String>,
    #[serde(default = "missing_state", deserialize_with = "state_or_unknown")]
    pub state: RunState,
    /// Named outputs, expected to be an object once the run is `DONE`.
    #[serde(default)]
    pub outputs: Option<Value>,
    /// Log lines. A bare string is one line; non-string entries are dropped.
    #[serde(default, deserialize_with = "log_lines")]
    pub log: Option<Vec<String>>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub created_ts: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub finished_ts: Option<String>,
}

impl PipelineRun {
    pub fn new(state: impl Into<RunState>) -> Self {
        Self {
            run_id: None,
            state: state.into(),
            outputs: None,
            log: None,
            created_ts: None,
            finished_ts: None,
        }
    }

    pub fn running() -> Self {
        Self::new(RunState::Running)
    }

    /// A finished run with the given outputs.
    pub fn done(outputs: Map<String, Value>) -> Self {
        Self {
            outputs: Some(Value::Object(outputs)),
            ..Self::new(RunState::Done)
        }
    }

    pub fn with_log<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.log = Some(lines.into_iter().map(Into::into).collect());
        self
    }
}

fn string_or_none<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn missing_state() -> RunState {
    RunState::Unknown(String::new())
}

fn state_or_unknown<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<RunState, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => RunState::from(s),
        Value::Null => missing_state(),
        other => RunState::Unknown(other.to_string()),
    })
}

fn log_lines<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(line) => Some(vec![line]),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(line) => Some(line),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_state_parses_documented_values() {
        assert_eq!(RunState::from("RUNNING"), RunState::Running);
        assert_eq!(RunState::from("TERMINATING"), RunState::Terminating);
        assert_eq!(RunState::from("DONE"), RunState::Done);
        assert_eq!(RunState::from("FAILED"), RunState::Failed);
        assert_eq!(RunState::from("TERMINATED"), RunState::Terminated);
    }

    #[test]
    fn test_run_state_keeps_unrecognized_value() {
        let state = RunState::from("QUEUED");

        assert_eq!(state, RunState::Unknown("QUEUED".into()));
        assert_eq!(state.to_string(), "QUEUED");
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_run_state_is_case_sensitive() {
        assert_eq!(RunState::from("done"), RunState::Unknown("done".into()));
    }

    #[test]
    fn test_pipeline_run_deserializes_completed_run() {
        let run: PipelineRun = serde_json::from_value(json!({
            "run_id": "abc123",
            "state": "DONE",
            "outputs": { "first_names": ["Ada"] },
            "log": ["started", "finished"],
            "created_ts": "2024-11-01T10:00:00"
        }))
        .unwrap();

        assert_eq!(run.state, RunState::Done);
        assert_eq!(run.run_id.as_deref(), Some("abc123"));
        assert_eq!(run.outputs.unwrap()["first_names"], json!(["Ada"]));
        assert_eq!(run.log.unwrap().len(), 2);
    }

    #[test]
    fn test_pipeline_run_tolerates_missing_optional_fields() {
        let run: PipelineRun = serde_json::from_value(json!({ "state": "RUNNING" })).unwrap();

        assert_eq!(run.state, RunState::Running);
        assert!(run.outputs.is_none());
        assert!(run.log.is_none());
    }

    #[test]
    fn test_done_run_keeps_non_object_outputs() {
        let run: PipelineRun =
            serde_json::from_value(json!({ "state": "DONE", "outputs": ["not", "a", "map"] }))
                .unwrap();

        assert_eq!(run.state, RunState::Done);
        assert_eq!(run.outputs, Some(json!(["not", "a", "map"])));
    }

    #[test]
    fn test_failed_run_reads_bare_string_log_as_one_line() {
        let run: PipelineRun =
            serde_json::from_value(json!({ "state": "FAILED", "log": "bad url" })).unwrap();

        assert_eq!(run.state, RunState::Failed);
        assert_eq!(run.log, Some(vec!["bad url".to_string()]));
    }

    #[test]
    fn test_unusable_log_is_dropped() {
        let run: PipelineRun =
            serde_json::from_value(json!({ "state": "TERMINATED", "log": { "line": 1 } }))
                .unwrap();
        assert!(run.log.is_none());

        let run: PipelineRun =
            serde_json::from_value(json!({ "state": "FAILED", "log": ["boom", 7, null] }))
                .unwrap();
        assert_eq!(run.log, Some(vec!["boom".to_string()]));
    }

    #[test]
    fn test_non_string_state_is_unknown() {
        let run: PipelineRun = serde_json::from_value(json!({ "state": 3 })).unwrap();
        assert_eq!(run.state, RunState::Unknown("3".into()));

        let run: PipelineRun = serde_json::from_value(json!({ "run_id": "r" })).unwrap();
        assert_eq!(run.state, RunState::Unknown(String::new()));
        assert!(!run.state.is_terminal());
    }

    #[test]
    fn test_start_response_ignores_non_string_run_id() {
        let response: StartPipelineResponse =
            serde_json::from_value(json!({ "run_id": 42, "url": "https://gumloop.com/r/1" }))
                .unwrap();

        assert!(response.run_id.is_none());
        assert_eq!(response.url.as_deref(), Some("https://gumloop.com/r/1"));
    }

    #[test]
    fn test_start_request_wire_shape() {
        let request = StartPipelineRequest {
            user_id: "user".into(),
            saved_item_id: "item".into(),
            pipeline_inputs: vec![PipelineInput::new("job_posting_url", "https://jobs.example/1")],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "user_id": "user",
                "saved_item_id": "item",
                "pipeline_inputs": [
                    { "input_name": "job_posting_url", "value": "https://jobs.example/1" }
                ]
            })
        );
    }
}
