//! Partition Simulator Binary Entry Point
//!
//! Parses options, runs the requested commands against a fresh session and
//! prints the results to standard output. `RUST_LOG` controls diagnostics.

use std::io;

use anyhow::Result;
use clap::Parser;
use frameworks_simulator_cli::{run, SimulatorArgs};

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = SimulatorArgs::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Command failures are reported in the output; only setup and I/O errors exit non-zero
    run(&args, &mut out)?;
    Ok(())
}
