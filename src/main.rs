use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use landing_simulation::*;

/// Headless booster landing simulation.
#[derive(Parser, Debug)]
#[command(name = "falcon-landing", version, about)]
struct Cli {
    /// manual, autonomous or versus
    #[arg(long, default_value = "autonomous")]
    scenario: Scenario,

    /// JSON configuration; missing fields fall back to the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the initial spin
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds before giving up
    #[arg(long)]
    max_time: Option<f64>,

    /// Keyframe script for the user-controlled booster
    #[arg(long)]
    pilot_script: Option<PathBuf>,

    /// Write the recorded frames and events here as JSON
    #[arg(long)]
    telemetry_out: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(max_time) = cli.max_time {
        config.max_time = max_time;
    }
    config.validate()?;

    if cli.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let mut pilot: Box<dyn PilotInput> = match &cli.pilot_script {
        Some(path) => Box::new(ScriptedPilot::from_json_file(path)?),
        None => Box::new(Hold),
    };

    let mut simulation = config.build(cli.scenario)?;
    if let Some(lane) = simulation.lanes.first() {
        println!("{}", lane.rocket);
    }

    let mut telemetry = Telemetry::new();
    telemetry.collect(&simulation);

    let summary = simulation.run_with(pilot.as_mut(), config.max_time, |simulation, events| {
        telemetry.record_events(events);
        telemetry.collect(simulation);
    });

    if summary.quit {
        info!(elapsed = summary.elapsed, "pilot quit");
    } else if !simulation.is_settled() {
        info!(elapsed = summary.elapsed, "simulation stopped before every booster settled");
    }

    telemetry.display_data();

    if let Some(path) = &cli.telemetry_out {
        telemetry.write_json(path)?;
        info!(path = %path.display(), "telemetry written");
    }

    Ok(())
}
