//! Lecturer Claims - Batch Runner
//!
//! Pushes a file of claim submissions through the validation and approval
//! pipeline and prints the per-claim results as JSON.
//!
//! # Usage
//!
//! ```bash
//! claims-batch submissions.json
//! CLAIMS_BATCH_FILE=submissions.json CLAIMS_LOG_FORMAT=json claims-batch
//! ```

use anyhow::Context;
use chrono::Utc;

use claims_app::batch::{run_batch, BatchFile};
use claims_app::telemetry::init_tracing;
use claims_app::{ClaimsApp, ClaimsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ClaimsConfig::from_env().context("loading CLAIMS_* configuration")?;
    init_tracing(&config.log_level, config.log_format);

    let path = std::env::args()
        .nth(1)
        .or_else(|| config.batch_file.clone())
        .context("no batch file given; pass a path or set CLAIMS_BATCH_FILE")?;

    tracing::info!(%path, "Starting claims batch");

    let batch = BatchFile::read(&path)?;
    let now = Utc::now();
    let lecturers = batch
        .lecturers
        .into_iter()
        .map(|entry| entry.into_lecturer(now))
        .collect();

    let app = ClaimsApp::in_memory(config, lecturers)?;
    let report = run_batch(&app.service, batch.submissions).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!(accepted = report.accepted(), total = report.entries.len(), "Batch finished");
    Ok(())
}
