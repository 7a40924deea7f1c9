//! # Cell Control Unit
//!
//! Fixed-period cyclic executive for the multiprocess production cell.
//!
//! Loads the TOML configuration, builds the configured I/O port backend,
//! wires SIGINT/SIGTERM to the cooperative cancellation flag and enters the
//! cycle loop. On cancellation the in-flight cycle completes, every output
//! is deasserted in one final write, and the process exits.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use cell_common::io::IoPort;
use cell_common::io::simulation::SimulationPort;
use cell_control_unit::config::{CellConfig, ConfigError, load_config};
use cell_control_unit::cycle::CycleRunner;

/// Cell Control Unit — cyclic executive for the production cell
#[derive(Parser, Debug)]
#[command(name = "cell_control_unit")]
#[command(version)]
#[command(about = "Fixed-period control loop for the multiprocess station")]
struct Args {
    /// Path to the cell configuration TOML.
    #[arg(default_value = "config/cell.toml")]
    config: PathBuf,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("Cell Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Cell Control Unit shutdown complete");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;
    info!(
        "Config OK: cycle_time={}ms, port={}, oven_dwell={} cycles",
        config.cycle_time_ms, config.port, config.timings.oven_dwell,
    );

    let port = build_port(&config)?;

    // Map termination signals onto the cooperative cancellation flag; the
    // loop observes it at the next cycle boundary.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut runner = CycleRunner::new(config, port, running)?;
    runner.run()?;

    Ok(())
}

/// Build the configured I/O port backend.
fn build_port(config: &CellConfig) -> Result<Box<dyn IoPort>, ConfigError> {
    match config.port.as_str() {
        "simulation" => Ok(Box::new(SimulationPort::new())),
        other => Err(ConfigError::Validation(format!(
            "unknown I/O port backend '{other}'"
        ))),
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
