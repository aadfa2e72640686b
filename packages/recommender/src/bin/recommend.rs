//! Recommend contacts for a job posting.
//!
//! Starts the Gumloop pipeline, waits for it and prints the suggested contacts
//! as JSON. Ctrl-C cancels the run.

use anyhow::{bail, Context, Result};
use clap::Parser;
use gumloop_client::{ExposeSecret, GumloopClient};
use recommender::domains::profiles::SupabaseProfileDirectory;
use recommender::domains::recommendations::{
    CandidateRecord, JobRunner, RecommendationService,
};
use recommender::Config;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "recommend", about = "Suggest people to contact about a job posting")]
struct Args {
    /// Job posting URL to analyze
    posting_url: String,

    /// Look up your LinkedIn URL from this user's profile
    #[arg(long, conflicts_with = "profile_url")]
    user_id: Option<Uuid>,

    /// Your LinkedIn profile URL (skips the profile lookup)
    #[arg(long)]
    profile_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recommender=debug,gumloop_client=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let mut client = GumloopClient::new(config.gumloop_api_key.expose_secret());
    if let Some(base_url) = &config.gumloop_base_url {
        client = client.with_base_url(base_url);
    }
    let runner = JobRunner::new(client, config.run_settings());

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling pipeline run");
            on_ctrl_c.cancel();
        }
    });

    let candidates: Vec<CandidateRecord> = match (args.user_id, args.profile_url) {
        (Some(user_id), _) => {
            let (Some(url), Some(key)) = (&config.supabase_url, &config.supabase_anon_key) else {
                bail!("SUPABASE_URL and SUPABASE_ANON_KEY must be set to use --user-id");
            };
            let profiles = SupabaseProfileDirectory::new(url, key.expose_secret());
            RecommendationService::new(runner, profiles)
                .recommend(user_id, &args.posting_url, cancel)
                .await?
        }
        (None, profile_url) => {
            runner
                .submit_and_await_with_cancel(
                    profile_url.as_deref().unwrap_or_default(),
                    &args.posting_url,
                    cancel,
                )
                .await?
        }
    };

    tracing::info!(count = candidates.len(), "Recommendations ready");
    println!("{}", serde_json::to_string_pretty(&candidates)?);

    Ok(())
}
