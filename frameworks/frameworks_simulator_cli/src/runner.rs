//! Command Execution
//!
//! Applies parsed commands to a [`SimulationSession`] and writes their
//! results. A failing command (a parse error or an engine error) is reported
//! on the output and the run continues; only output I/O errors stop it.

use std::io::{self, Write};

use api_facades::SimulationSession;
use log::debug;

use crate::report::{render_report, BAR_WIDTH};
use crate::script::{parse_script, Command};

/// Counts gathered over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Commands that completed
    pub succeeded: usize,
    /// Commands that failed to parse or were rejected by the engine
    pub failed: usize,
}

impl RunOutcome {
    fn absorb(&mut self, other: RunOutcome) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

/// Drives a session from command text
pub struct CommandRunner<'a, W: Write> {
    session: &'a mut SimulationSession,
    out: W,
    outcome: RunOutcome,
}

impl<'a, W: Write> CommandRunner<'a, W> {
    pub fn new(session: &'a mut SimulationSession, out: W) -> Self {
        Self {
            session,
            out,
            outcome: RunOutcome::default(),
        }
    }

    /// Parse `source` and execute every command in it
    ///
    /// Parse errors are printed with their line number.
    pub fn run_source(&mut self, source: &str) -> io::Result<RunOutcome> {
        let mut outcome = RunOutcome::default();
        for entry in parse_script(source) {
            match entry {
                Ok((_, command)) => {
                    if self.execute(command)? {
                        outcome.succeeded += 1;
                    } else {
                        outcome.failed += 1;
                    }
                }
                Err(error) => {
                    writeln!(self.out, "error: {}", error)?;
                    outcome.failed += 1;
                }
            }
        }
        self.outcome.absorb(outcome);
        Ok(outcome)
    }

    /// Execute one command, returning whether it succeeded
    pub fn execute(&mut self, command: Command) -> io::Result<bool> {
        debug!("executing {:?}", command);
        match command {
            Command::Alloc { size, strategy } => {
                let strategy = strategy.unwrap_or(self.session.strategy());
                match self.session.allocate_with(size, strategy) {
                    Ok(pid) => {
                        let start = self
                            .session
                            .engine()
                            .allocated_blocks()
                            .into_iter()
                            .find(|extent| extent.process_id == pid)
                            .map(|extent| extent.start);
                        match start {
                            Some(start) => writeln!(self.out, "{pid}: {size} units at {start} ({strategy})")?,
                            None => writeln!(self.out, "{pid}: {size} units ({strategy})")?,
                        }
                        Ok(true)
                    }
                    Err(error) => self.report_failure(error),
                }
            }
            Command::Free(pid) => match self.session.release(pid) {
                Ok(()) => {
                    writeln!(self.out, "freed {pid}")?;
                    Ok(true)
                }
                Err(error) => self.report_failure(error),
            },
            Command::Strategy(strategy) => {
                self.session.set_strategy(strategy);
                writeln!(self.out, "strategy: {strategy}")?;
                Ok(true)
            }
            Command::Owner(offset) => match self.session.owner_at(offset) {
                Ok(Some(pid)) => {
                    writeln!(self.out, "offset {offset}: {pid}")?;
                    Ok(true)
                }
                Ok(None) => {
                    writeln!(self.out, "offset {offset}: free")?;
                    Ok(true)
                }
                Err(error) => self.report_failure(error),
            },
            Command::Show => {
                self.show()?;
                Ok(true)
            }
            Command::Stats => {
                writeln!(self.out, "{}", self.session.summary())?;
                Ok(true)
            }
            Command::Reset => match self.session.reset() {
                Ok(()) => {
                    writeln!(self.out, "reset")?;
                    Ok(true)
                }
                Err(error) => self.report_failure(error),
            },
        }
    }

    /// Print the full layout report
    pub fn show(&mut self) -> io::Result<()> {
        let report = render_report(&self.session.snapshot(), BAR_WIDTH);
        self.out.write_all(report.as_bytes())
    }

    /// Totals over every `run_source` call so far
    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    fn report_failure(&mut self, error: impl std::fmt::Display) -> io::Result<bool> {
        writeln!(self.out, "error: {}", error)?;
        Ok(false)
    }
}
