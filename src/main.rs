/* 3rd party libraries */
use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

/* Custom libraries */
use elevator_sim::config;
use elevator_sim::simulation::Simulation;
use elevator_sim::unwrap_or_exit;
use elevator_sim::Elevator;

/**
 * Command line arguments.
 *
 * Everything except `config` overrides the matching value of the
 * `[simulation]` section in the configuration file.
 */
#[derive(Parser, Debug)]
#[clap(author, version, about = "Simulate a single elevator serving random passengers")]
struct Args {
    /// Path to the TOML configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of simulated minutes
    #[clap(short, long)]
    duration: Option<u64>,

    /// Seed for the passenger generator
    #[clap(short, long)]
    seed: Option<u64>,

    /// Do not pace the simulation in wall-clock time
    #[clap(long)]
    fast: bool,

    /// Print the final report as JSON
    #[clap(long)]
    json: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let mut config = unwrap_or_exit!(config::load_config(&args.config));
    if let Some(duration) = args.duration {
        config.simulation.duration = duration;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    if args.fast {
        config.simulation.tick_ms = 0;
    }

    // Create the elevator
    let elevator = unwrap_or_exit!(Elevator::from_config(&config.elevator));
    info!(
        "Starting simulation: {} floors, capacity {}, {} minutes",
        elevator.floors_count(),
        elevator.max_capacity(),
        config.simulation.duration
    );

    // Run the simulation
    let simulation = Simulation::new(elevator, config.simulation);
    let report = unwrap_or_exit!(simulation.run());

    info!(
        "Requests: {}, boarded: {}, delivered: {}, failed boardings: {}, peak load: {}",
        report.stats.requests,
        report.stats.boardings,
        report.stats.deliveries,
        report.stats.failed_boardings,
        report.stats.peak_load
    );

    if args.json {
        let json = unwrap_or_exit!(serde_json::to_string_pretty(&report));
        println!("{}", json);
    }
}
