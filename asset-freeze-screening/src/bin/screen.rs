//! Asset-freeze screening command line
//!
//! Usage: `freeze-screen <registry.json> <portfolio.csv> [report.csv]`

use anyhow::{bail, Context};
use asset_freeze_screening::{
    concern_links, export, load_portfolio_path, Config, Progress, RegistrySnapshot, Screener,
    ScreeningRequest,
};
use std::sync::atomic::{AtomicUsize, Ordering};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: freeze-screen <registry.json> <portfolio.csv> [report.csv]");
    }
    let registry_path = &args[0];
    let portfolio_path = &args[1];
    let report_path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(export::DEFAULT_REPORT_FILE);

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Concern threshold: {}", config.threshold);

    let registry = RegistrySnapshot::from_path(registry_path)
        .with_context(|| format!("Failed to load registry {}", registry_path))?;
    match registry.publication_date {
        Some(date) => tracing::info!("Registry last published on {}", date),
        None => tracing::warn!("Registry publication date unknown"),
    }

    let portfolio = load_portfolio_path(portfolio_path, config.delimiter_byte())
        .with_context(|| format!("Failed to load portfolio {}", portfolio_path))?;
    tracing::info!("Portfolio holds {} entries to check", portfolio.len());

    let request = ScreeningRequest::new(registry.records, portfolio).with_threshold(config.threshold);

    // Log every 10%, whichever worker gets there first
    let last_decile = AtomicUsize::new(0);
    let on_progress = |p: Progress| {
        let decile = (p.fraction() * 10.0) as usize;
        if last_decile.fetch_max(decile, Ordering::Relaxed) < decile {
            tracing::info!("Scoring {}% ({}/{})", decile * 10, p.completed, p.total);
        }
    };

    let report = Screener::new(&config)
        .screen_with_progress(&request, &on_progress)
        .context("Screening failed")?;

    for rejected in &report.rejected {
        tracing::warn!(
            "Row {} (contract {:?}) not screened: missing {}",
            rejected.row,
            rejected.contract_id,
            rejected.missing_field
        );
    }

    println!("{}", report.outcome());
    for link in concern_links(&report, &config.registry_detail_base_url) {
        println!("  {}  {}", link.label, link.url);
    }

    export::write_report_path(report_path, &report)
        .with_context(|| format!("Failed to write report {}", report_path))?;
    tracing::info!("Match list written to {}", report_path);

    Ok(())
}
