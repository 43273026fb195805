use tribody::{render_overlay, ScenarioConfig, SimulationClock, StartMode, TickOutcome};
use tribody::RepeatingTask;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::ops::ControlFlow;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Three-body gravity simulation with spin")]
struct Args {
    /// Scenario file; bare names are looked up in the `scenarios/` directory
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Override the scenario's start mode
    #[arg(short, long, value_enum)]
    mode: Option<StartMode>,

    /// Override the seed used for random starts
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of frames to run headless
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Override the telemetry interval in ticks (0 disables it)
    #[arg(long)]
    report_every: Option<u64>,

    /// Open the 3D viewer instead of running headless (needs the `viewer` feature)
    #[arg(long)]
    viewer: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let Some(file) = &args.file else {
        return Ok(ScenarioConfig::default());
    };
    let path = if file.exists() {
        file.clone()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
    };
    ScenarioConfig::load(&path).with_context(|| format!("failed to load scenario {}", path.display()))
}

fn run_headless(mut clock: SimulationClock, max_ticks: u64, report_every: u64) -> Result<()> {
    clock.start()?;
    let params = clock.parameters();
    tracing::info!(G = params.G, dt = params.dt, seed = params.seed, max_ticks, "running headless");

    let mut failure = None;
    let executed = {
        let mut task = RepeatingTask::new(|| match clock.tick() {
            Ok(TickOutcome::Advanced(_)) => {
                if report_every > 0 && clock.ticks() % report_every == 0 {
                    tracing::info!("tick {}\n{}", clock.ticks(), render_overlay(&clock.snapshot()));
                }
                ControlFlow::Continue(())
            }
            Ok(_) => ControlFlow::Break(()),
            Err(e) => {
                failure = Some(e);
                ControlFlow::Break(())
            }
        });
        task.run_frames(max_ticks)
    };

    if let Some(e) = failure {
        return Err(e).context("simulation tick failed");
    }

    tracing::info!("finished after {} ticks\n{}", executed, render_overlay(&clock.snapshot()));
    match clock.verdict() {
        Some(verdict) => tracing::info!("{}", verdict.message()),
        None => tracing::info!("no terminal condition within {} ticks", max_ticks),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut scenario = load_scenario(&args)?;
    if let Some(mode) = args.mode {
        scenario.start = mode;
    }

    let mut params = scenario.parameters();
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    let max_ticks = args.ticks.unwrap_or(scenario.run.max_ticks);
    let report_every = args.report_every.unwrap_or(scenario.run.report_every);

    let clock = SimulationClock::new(params, &scenario.initial_conditions())
        .context("invalid initial conditions")?;

    if args.viewer {
        #[cfg(feature = "viewer")]
        {
            tribody::run_viewer(clock);
            return Ok(());
        }
        #[cfg(not(feature = "viewer"))]
        tracing::warn!("built without the `viewer` feature, running headless");
    }

    run_headless(clock, max_ticks, report_every)
}
