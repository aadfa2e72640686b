use async_trait::async_trait;
use gumloop_client::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::directory::{ProfileDirectory, ProfileError};

/// Reads the `profiles` table through Supabase's PostgREST endpoint.
#[derive(Clone)]
pub struct SupabaseProfileDirectory {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Arc<SecretString>,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    linkedin_url: Option<String>,
}

impl SupabaseProfileDirectory {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<SecretString>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: Arc::new(api_key.into()),
        }
    }

    fn profiles_url(&self) -> String {
        format!("{}/rest/v1/profiles", self.base_url)
    }
}

#[async_trait]
impl ProfileDirectory for SupabaseProfileDirectory {
    async fn linkedin_url(&self, user_id: Uuid) -> Result<Option<String>, ProfileError> {
        let id_filter = format!("eq.{}", user_id);

        let resp = self
            .http_client
            .get(self.profiles_url())
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .query(&[("id", id_filter.as_str()), ("select", "linkedin_url")])
            .send()
            .await
            .map_err(|e| {
                warn!(%user_id, error = %e, "Profile lookup request failed");
                ProfileError::Network(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(%user_id, status = %status, error = %message, "Profile lookup failed");
            return Err(ProfileError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Vec<ProfileRow> = resp
            .json()
            .await
            .map_err(|e| ProfileError::Parse(e.to_string()))?;

        let row = rows
            .into_iter()
            .next()
            .ok_or(ProfileError::NotFound(user_id))?;

        debug!(%user_id, has_linkedin = row.linkedin_url.is_some(), "Loaded profile");
        Ok(row.linkedin_url)
    }
}
