//! Command Script Parsing
//!
//! Parses the small command language understood by `fitsim`. Commands are
//! separated by newlines or `;`; everything after `#` on a line is a comment.
//!
//! ```text
//! alloc 30            # current strategy
//! alloc 120 worst-fit
//! free P2; show
//! ```

use std::num::ParseIntError;

use entities_memory_layout::ProcessId;
use thiserror::Error;
use usecases_memory_management::{ParseStrategyError, PlacementStrategy};

/// One simulator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place `size` units, optionally overriding the current strategy
    Alloc {
        size: usize,
        strategy: Option<PlacementStrategy>,
    },
    /// Free the block held by a process
    Free(ProcessId),
    /// Change the current strategy
    Strategy(PlacementStrategy),
    /// Report which process owns an offset
    Owner(usize),
    /// Print the full layout report
    Show,
    /// Print the statistics line
    Stats,
    /// Rebuild the starting layout
    Reset,
}

/// Command parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`{command}` takes at most {max} argument(s)")]
    TooManyArguments { command: &'static str, max: usize },

    #[error("invalid number `{value}`: {reason}")]
    InvalidNumber { value: String, reason: ParseIntError },

    #[error("invalid process id `{0}` (expected e.g. `3` or `P3`)")]
    InvalidProcessId(String),

    #[error(transparent)]
    Strategy(#[from] ParseStrategyError),
}

/// A command parse failure tagged with its source line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {error}")]
pub struct ScriptError {
    pub line: usize,
    pub error: CommandError,
}

/// Parse a single command
///
/// Returns `Ok(None)` for blank input.
pub fn parse_command(input: &str) -> Result<Option<Command>, CommandError> {
    let mut words = input.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match keyword.to_ascii_lowercase().as_str() {
        "alloc" | "allocate" => {
            let size = parse_number(required(&args, "alloc", "a size")?)?;
            let strategy = optional_last(&args, 1, "alloc")?
                .map(|name| name.parse::<PlacementStrategy>())
                .transpose()?;
            Command::Alloc { size, strategy }
        }
        "free" | "dealloc" | "release" => {
            exact(&args, 1, "free")?;
            Command::Free(parse_process_id(required(&args, "free", "a process id")?)?)
        }
        "strategy" | "use" => {
            // Strategy names may contain a space ("best fit")
            if args.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "strategy",
                    expected: "a strategy name",
                });
            }
            Command::Strategy(args.join(" ").parse()?)
        }
        "owner" => {
            exact(&args, 1, "owner")?;
            Command::Owner(parse_number(required(&args, "owner", "an offset")?)?)
        }
        "show" => {
            exact(&args, 0, "show")?;
            Command::Show
        }
        "stats" => {
            exact(&args, 0, "stats")?;
            Command::Stats
        }
        "reset" => {
            exact(&args, 0, "reset")?;
            Command::Reset
        }
        _ => return Err(CommandError::UnknownCommand(keyword.to_string())),
    };
    Ok(Some(command))
}

/// Parse a whole script
///
/// Blank segments and comments are skipped. Each entry is either a parsed
/// command or the error for that segment; line numbers start at 1.
pub fn parse_script(source: &str) -> Vec<Result<(usize, Command), ScriptError>> {
    let mut parsed = Vec::new();
    for (index, raw_line) in source.lines().enumerate() {
        let line = index + 1;
        let code = raw_line.split('#').next().unwrap_or_default();
        for segment in code.split(';') {
            match parse_command(segment) {
                Ok(Some(command)) => parsed.push(Ok((line, command))),
                Ok(None) => {}
                Err(error) => parsed.push(Err(ScriptError { line, error })),
            }
        }
    }
    parsed
}

/// Parse `3`, `P3` or `p3`
pub fn parse_process_id(text: &str) -> Result<ProcessId, CommandError> {
    let digits = text.strip_prefix(|c: char| c.eq_ignore_ascii_case(&'p')).unwrap_or(text);
    match digits.parse::<u64>() {
        Ok(raw) if raw > 0 => Ok(ProcessId::new(raw)),
        _ => Err(CommandError::InvalidProcessId(text.to_string())),
    }
}

fn parse_number(text: &str) -> Result<usize, CommandError> {
    text.parse().map_err(|reason| CommandError::InvalidNumber {
        value: text.to_string(),
        reason,
    })
}

fn required<'a>(args: &[&'a str], command: &'static str, expected: &'static str) -> Result<&'a str, CommandError> {
    args.first()
        .copied()
        .ok_or(CommandError::MissingArgument { command, expected })
}

fn exact(args: &[&str], max: usize, command: &'static str) -> Result<(), CommandError> {
    if args.len() > max {
        return Err(CommandError::TooManyArguments { command, max });
    }
    Ok(())
}

/// Words after the first `skip` arguments, joined with spaces
fn optional_last<'a>(args: &[&'a str], skip: usize, command: &'static str) -> Result<Option<String>, CommandError> {
    match args.len().saturating_sub(skip) {
        0 => Ok(None),
        1 | 2 => Ok(Some(args[skip..].join(" "))),
        _ => Err(CommandError::TooManyArguments { command, max: skip + 2 }),
    }
}
