//! Command-Line Argument Parsing Module
//!
//! Provides argument parsing for the `fitsim` driver. Uses clap for type-safe
//! argument parsing; every layout option can also be supplied through an
//! environment variable, with flags taking precedence.

use std::path::PathBuf;

use api_facades::{SessionConfig, DEMO_ALLOCATION_SIZE, DEMO_GAP_SIZES, DEMO_TOTAL_SIZE};
use clap::Parser;
use usecases_memory_management::PlacementStrategy;

/// Dynamic partition simulator command-line arguments
#[derive(Parser, Debug)]
#[command(name = "fitsim")]
#[command(about = "Dynamic memory partition simulator (first/next/best/worst-fit)")]
pub struct SimulatorArgs {
    /// Size of the simulated address space
    #[arg(long, env = "FITSIM_TOTAL_SIZE", default_value_t = DEMO_TOTAL_SIZE)]
    pub total_size: usize,

    /// Gap sizes of the seeded layout (comma separated)
    #[arg(long, env = "FITSIM_GAPS", value_delimiter = ',', default_values_t = DEMO_GAP_SIZES)]
    pub gaps: Vec<usize>,

    /// Size of each seeded process
    #[arg(long, env = "FITSIM_ALLOCATION_SIZE", default_value_t = DEMO_ALLOCATION_SIZE)]
    pub allocation_size: usize,

    /// Start with the whole address space as one free block
    #[arg(long)]
    pub empty: bool,

    /// Placement strategy for `alloc` commands without an explicit one
    #[arg(long, env = "FITSIM_STRATEGY", default_value_t = PlacementStrategy::FirstFit)]
    pub strategy: PlacementStrategy,

    /// Script file with one command per line
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Commands to run after the script (separate them with `;`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub commands: Vec<String>,
}

impl SimulatorArgs {
    /// Session configuration described by these arguments
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            total_size: self.total_size,
            gap_sizes: self.gaps.clone(),
            allocation_size: self.allocation_size,
            strategy: self.strategy,
            seed_layout: !self.empty,
        }
    }

    /// Trailing commands joined back into one `;`-separated source
    pub fn inline_commands(&self) -> Option<String> {
        if self.commands.is_empty() {
            None
        } else {
            Some(self.commands.join(" "))
        }
    }

    /// Check if there is anything to run besides the initial report
    pub fn has_commands(&self) -> bool {
        self.script.is_some() || !self.commands.is_empty()
    }
}
