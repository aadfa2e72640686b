pub mod candidate;
pub mod submission;

pub use candidate::{CandidateRecord, Location};
pub use submission::{JobSubmission, RunHandle, JOB_POSTING_URL_INPUT, PERSONAL_LINKEDIN_INPUT};
