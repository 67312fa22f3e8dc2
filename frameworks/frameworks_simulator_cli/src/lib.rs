//! Frameworks Layer: Simulator Command-Line Driver
//!
//! Provides the `fitsim` driver: a text front end over the
//! [`SimulationSession`](api_facades::SimulationSession) facade.
//!
//! ## Overview
//!
//! The driver builds a session from flags and environment variables, then
//! executes commands read from a script file and from the trailing command
//! line. Every command prints one line of output (or a full report for
//! `show`); failures print an `error:` line and the run continues.
//!
//! ## Modules
//!
//! - **[`args`](args/index.html)**: Command-line and environment options
//! - **[`script`](script/index.html)**: Command language parsing
//! - **[`runner`](runner/index.html)**: Command execution against a session
//! - **[`report`](report/index.html)**: Text rendering of the layout
//!
//! ## See Also
//!
//! - [`api_facades`](../../api_facades/index.html): Session facade
//! - [`usecases_memory_management`](../../usecases/usecases_memory_management/index.html): Allocation engine

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use api_facades::SimulationSession;
use log::info;

pub mod args;
pub mod report;
pub mod runner;
pub mod script;

pub use args::SimulatorArgs;
pub use report::{render_bar, render_report, BAR_WIDTH};
pub use runner::{CommandRunner, RunOutcome};
pub use script::{parse_command, parse_script, Command, CommandError, ScriptError};

/// Run one `fitsim` invocation, writing all output to `out`
///
/// Without any commands the initial layout report is printed.
///
/// # Errors
///
/// Fails on an invalid layout configuration, an unreadable script file or an
/// output write error. Command failures are part of the output instead.
pub fn run(args: &SimulatorArgs, out: &mut impl Write) -> Result<RunOutcome> {
    let config = args.session_config();
    let mut session = SimulationSession::new(config).context("invalid simulation configuration")?;
    info!(
        "session ready: {} units, strategy {}",
        session.engine().total_size(),
        session.strategy()
    );

    let mut runner = CommandRunner::new(&mut session, out);
    if !args.has_commands() {
        runner.show().context("failed to write report")?;
        return Ok(runner.outcome());
    }

    if let Some(path) = &args.script {
        let source = fs::read_to_string(path).with_context(|| format!("failed to read script {}", path.display()))?;
        runner.run_source(&source).context("failed to write output")?;
    }
    if let Some(inline) = args.inline_commands() {
        runner.run_source(&inline).context("failed to write output")?;
    }

    let outcome = runner.outcome();
    info!("{} command(s) succeeded, {} failed", outcome.succeeded, outcome.failed);
    Ok(outcome)
}
