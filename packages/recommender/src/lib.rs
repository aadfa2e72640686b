// Contact recommendations for job seekers.
//
// A user submits a job posting; an external Gumloop pipeline suggests people
// to reach out to. This crate starts that pipeline, polls it to completion and
// turns its output into typed candidate records.

pub mod config;
pub mod domains;

pub use config::*;
