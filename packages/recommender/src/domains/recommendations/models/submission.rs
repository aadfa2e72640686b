use gumloop_client::PipelineInput;
use std::fmt;

/// Input name carrying the caller's own LinkedIn profile URL.
pub const PERSONAL_LINKEDIN_INPUT: &str = "personal_linked_in";

/// Input name carrying the job posting to analyze.
pub const JOB_POSTING_URL_INPUT: &str = "job_posting_url";

/// Ordered named inputs for one pipeline run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSubmission {
    inputs: Vec<PipelineInput>,
}

impl JobSubmission {
    pub fn new(inputs: Vec<PipelineInput>) -> Self {
        Self { inputs }
    }

    /// The contact recommendation submission.
    ///
    /// `subject_id` is always sent, even when empty; the pipeline expects the
    /// key to be present.
    pub fn recommendation(subject_id: impl Into<String>, posting_url: impl Into<String>) -> Self {
        Self::new(vec![
            PipelineInput::new(PERSONAL_LINKEDIN_INPUT, subject_id),
            PipelineInput::new(JOB_POSTING_URL_INPUT, posting_url),
        ])
    }

    pub fn inputs(&self) -> &[PipelineInput] {
        &self.inputs
    }

    pub fn value(&self, input_name: &str) -> Option<&str> {
        self.inputs
            .iter()
            .find(|input| input.input_name == input_name)
            .map(|input| input.value.as_str())
    }

    pub(crate) fn into_inputs(self) -> Vec<PipelineInput> {
        self.inputs
    }
}

/// Identifier of one in-flight or finished run. Only meaningful to the
/// pipeline service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunHandle(String);

impl RunHandle {
    /// Returns `None` for an absent or blank id.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
