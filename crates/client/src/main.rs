//! Battle client binary.
//!
//! Composition root that assembles:
//! 1. Configuration from `BATTLE_*` environment variables (and `.env`)
//! 2. Logging to stderr and, optionally, a log file
//! 3. A simulation from TOML/RON content or a seeded random roster
//! 4. The runtime that drives it to completion
//!
//! # Examples
//!
//! ```bash
//! # Random 3v3 with a fixed seed
//! BATTLE_SEED=7 cargo run -p battle-client
//!
//! # Hand-written roster, watched in real time, final state as JSON
//! BATTLE_ROSTER=crates/game/content/data/rosters/skirmish.ron \
//!     BATTLE_PACING_MS=16 BATTLE_SNAPSHOT_JSON=1 cargo run -p battle-client
//! ```

use anyhow::Result;
use battle_client::{ClientConfig, app, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting battle client");
    let report = app::run(&config).await?;

    for line in report.summary_lines() {
        println!("{line}");
    }
    if config.snapshot_json {
        println!("{}", serde_json::to_string_pretty(&report.snapshot)?);
    }

    tracing::info!("Client shutdown complete");
    Ok(())
}
