use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use gumloop_client::SecretString;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::domains::recommendations::runner::{
    PollErrorPolicy, PollPolicy, RunSettings, DEFAULT_MAX_ATTEMPTS,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub gumloop_api_key: Arc<SecretString>,
    pub gumloop_user_id: String,
    pub gumloop_saved_item_id: String,
    pub gumloop_base_url: Option<String>,
    pub poll_max_attempts: u32,
    pub poll_interval_ms: u64,
    pub poll_retry_transient: bool,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<Arc<SecretString>>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} must be set", name))
        };

        let poll_max_attempts: u32 = lookup("GUMLOOP_POLL_MAX_ATTEMPTS")
            .unwrap_or_else(|| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse()
            .context("GUMLOOP_POLL_MAX_ATTEMPTS must be a valid number")?;
        if poll_max_attempts == 0 {
            bail!("GUMLOOP_POLL_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            gumloop_api_key: Arc::new(SecretString::from(required("GUMLOOP_API_KEY")?)),
            gumloop_user_id: required("GUMLOOP_USER_ID")?,
            gumloop_saved_item_id: required("GUMLOOP_SAVED_ITEM_ID")?,
            gumloop_base_url: lookup("GUMLOOP_BASE_URL"),
            poll_max_attempts,
            poll_interval_ms: lookup("GUMLOOP_POLL_INTERVAL_MS")
                .unwrap_or_else(|| "2000".to_string())
                .parse()
                .context("GUMLOOP_POLL_INTERVAL_MS must be a valid number")?,
            poll_retry_transient: lookup("GUMLOOP_POLL_RETRY_TRANSIENT")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            supabase_url: lookup("SUPABASE_URL"),
            supabase_anon_key: lookup("SUPABASE_ANON_KEY")
                .map(|key| Arc::new(SecretString::from(key))),
        })
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings::new(&self.gumloop_user_id, &self.gumloop_saved_item_id).with_poll(PollPolicy {
            max_attempts: self.poll_max_attempts,
            interval: Duration::from_millis(self.poll_interval_ms),
            on_transport_error: if self.poll_retry_transient {
                PollErrorPolicy::RetryWithinBudget
            } else {
                PollErrorPolicy::FailFast
            },
        })
    }
}
