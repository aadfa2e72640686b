use serde::{Deserialize, Serialize};

/// Where a suggested contact is based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A suggested professional contact, rebuilt from one index position of the
/// pipeline's parallel output arrays.
///
/// Only exists after a run finishes; persisting it is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub headline: String,
    /// Profile link
    pub link: String,
    pub profile_picture: String,
    pub location: Location,
    /// Suggested cold outreach message
    pub custom_message: String,
}

impl CandidateRecord {
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }
}
