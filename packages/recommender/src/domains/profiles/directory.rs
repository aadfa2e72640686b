use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(Uuid),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProfileError {
    /// Network failures and 5xx responses may clear up on their own.
    pub fn is_transient(&self) -> bool {
        match self {
            ProfileError::Network(_) => true,
            ProfileError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Lookup of a user's own profile data.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// The user's LinkedIn profile URL, `None` when the profile has none.
    async fn linkedin_url(&self, user_id: Uuid) -> Result<Option<String>, ProfileError>;
}

/// Profiles held in memory. Used in tests and for local runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileDirectory {
    profiles: Arc<RwLock<HashMap<Uuid, Option<String>>>>,
}

impl InMemoryProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, user_id: Uuid, linkedin_url: Option<&str>) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(user_id, linkedin_url.map(str::to_string));
        self
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryProfileDirectory {
    async fn linkedin_url(&self, user_id: Uuid) -> Result<Option<String>, ProfileError> {
        self.profiles
            .read()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(ProfileError::NotFound(user_id))
    }
}
