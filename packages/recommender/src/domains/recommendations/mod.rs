pub mod error;
pub mod models;
pub mod outputs;
pub mod runner;
pub mod service;

// Re-export commonly used types
pub use error::{RecommendationError, NO_ERROR_LOGS};
pub use models::{CandidateRecord, JobSubmission, Location, RunHandle};
pub use outputs::candidates_from_outputs;
pub use runner::{JobRunner, PollErrorPolicy, PollPolicy, RunSettings};
pub use service::RecommendationService;
