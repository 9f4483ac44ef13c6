//! Command-line runner: loads a scenario, runs it and writes the playback output.

mod telemetry;

use anyhow::{Context, Result};
use bubble_core::{RunConfig, ScenarioConfig};
use bubble_world::{run_scenario, SimulationOutput};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Bincode,
}

#[derive(Debug, Parser)]
#[command(name = "bubble-runner", about = "Run a bubble grid collision simulation")]
struct Cli {
    /// Scenario JSON file; the built-in 20x20 scenario is used when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of steps to simulate
    #[arg(long)]
    steps: Option<u64>,

    /// Seed for the movement source
    #[arg(long)]
    seed: Option<u64>,

    /// Output file; stdout when omitted
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.json_logs)?;

    let scenario = match &cli.scenario {
        Some(path) => ScenarioConfig::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };

    let defaults = RunConfig::default();
    let run = RunConfig {
        steps: cli.steps.unwrap_or(defaults.steps),
        seed: cli.seed.unwrap_or(defaults.seed),
    };

    info!(
        "Running {}x{} scenario with {} objects for {} steps (seed {})",
        scenario.width,
        scenario.height,
        scenario.objects.len(),
        run.steps,
        run.seed
    );

    let result = run_scenario(&scenario, &run).context("simulation setup failed")?;
    let bytes = encode(&result.output, cli.format)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {} frames to {}", result.output.frames.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn encode(output: &SimulationOutput, format: OutputFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Json => output.to_json_pretty()?.into_bytes(),
        OutputFormat::Bincode => output.to_bytes()?,
    };
    Ok(bytes)
}
