use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use citypulse::{CityConfig, TemporalContext, TrafficSummary, TransitSummary, generate_snapshot};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    // Optional argument: path to a JSON reference configuration. Without it
    // the built-in Greater Boston dataset is used.
    let config = match std::env::args().nth(1) {
        Some(path) => CityConfig::from_file(&path)?,
        None => CityConfig::default(),
    };
    config.validate().context("invalid reference configuration")?;

    let ctx = TemporalContext::now();
    // Seeded from the truncated refresh timestamp: refreshes inside the same
    // truncation window intentionally repeat themselves.
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed());

    let snapshot = generate_snapshot(&config, &ctx, &mut rng)?;

    let traffic = TrafficSummary::from_records(&snapshot.traffic);
    let transit = TransitSummary::from_records(&snapshot.transit);
    info!(
        mean_congestion = %format!("{:.1}%", traffic.mean_congestion * 100.0),
        on_time = %format!("{:.1}%", transit.on_time_pct * 100.0),
        demand_mw = snapshot.energy.total_demand_mw,
        "refresh complete"
    );

    serde_json::to_writer_pretty(std::io::stdout().lock(), &snapshot)
        .context("failed to write snapshot")?;
    println!();
    Ok(())
}
