// truepath_sim/src/main.rs

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use truepath_sim::cli::Cli;
use truepath_sim::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let mut config = load_scenario(&cli.scenario)?;
    cli.apply_overrides(&mut config);

    let (mut rng, seed) = SimulationRng::resolve(config.simulation.seed);
    info!(seed, "Seeded sensor noise");

    let outcome = run_scenario(&config, seed, &mut rng)?;
    log_report(&outcome.report);

    if let Some(path) = &cli.report {
        outcome.report.write_toml(path)?;
        info!("Report written to {}", path.display());
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,truepath_core=debug,truepath_sim=debug"
    } else {
        "info"
    };
    // RUST_LOG wins over the flag.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();
}

fn log_report(report: &EvaluationReport) {
    info!(
        "Dead Reckoning RMSE: {:.2} m | final error {:.2} m",
        report.dead_reckoning.rmse, report.dead_reckoning.final_error
    );
    info!(
        "TruePath Fusion RMSE: {:.2} m | final error {:.2} m",
        report.fusion.rmse, report.fusion.final_error
    );
    if let (Some(dr), Some(ekf)) = (
        report.dead_reckoning.peak_outage_error,
        report.fusion.peak_outage_error,
    ) {
        info!("Peak error during GNSS outage: dead reckoning {dr:.2} m, fusion {ekf:.2} m");
    }
    info!("Improvement: {:.1}%", report.improvement_percent);
    info!(
        "System health {:.0}/100: {}",
        report.health.score, report.health.status
    );
}
