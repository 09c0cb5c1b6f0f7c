use clap::Parser;
use routesim_rs::error::SimError;
use routesim_rs::proto::ProtocolKind;
use routesim_rs::sim::{Scenario, SimOpts, Simulation, render_text, write_json, write_text};
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "scenario-sim",
    about = "Run a scenario.json (topology + changes + messages) on routesim-rs"
)]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Override the protocol named in the scenario
    #[arg(long, value_enum)]
    protocol: Option<ProtocolKind>,

    /// Write the text output here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output per-round snapshots as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Upper bound on distance-vector convergence passes
    #[arg(long, default_value_t = 10_000)]
    max_passes: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!(%err, "scenario failed");
        eprintln!("scenario-sim: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let mut scenario = Scenario::from_json_file(&args.scenario)?;
    if args.protocol.is_some() {
        scenario.protocol = args.protocol;
    }

    let mut opts = SimOpts::default();
    opts.distance_vector.max_passes = args.max_passes;

    let rounds = Simulation::run(&scenario, ProtocolKind::default(), &opts)?;
    match &args.output {
        Some(path) => write_text(path, &rounds)?,
        None => print!("{}", render_text(&rounds)),
    }
    if let Some(path) = &args.json {
        write_json(path, &rounds)?;
    }
    Ok(())
}
