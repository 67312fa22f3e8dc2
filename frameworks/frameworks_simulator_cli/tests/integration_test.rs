//! Integration tests for frameworks_simulator_cli
//!
//! Drives the `run` entry point with parsed arguments, script files and
//! inline commands, checking the printed output.

use std::io::Write as _;

use clap::Parser;
use frameworks_simulator_cli::{run, RunOutcome, SimulatorArgs};
use tempfile::NamedTempFile;

fn run_args(argv: &[&str]) -> (anyhow::Result<RunOutcome>, String) {
    let args = SimulatorArgs::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let result = run(&args, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_no_commands_prints_report() {
    let (result, text) = run_args(&["fitsim"]);
    assert_eq!(result.unwrap(), RunOutcome::default());
    assert!(text.starts_with("strategy: first-fit\n["));
    assert!(text.contains("free blocks (6):\n  [50..75) 25 units\n"));
    assert!(text.contains("  P6 [445..495) 50 units\n"));
    assert!(text.contains("total: 1000 | allocated: 300 | free: 700 | free blocks: 6\n"));
}

#[test]
fn test_script_file_then_inline_commands() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "# fill the 40-unit gap, then free its neighbor").unwrap();
    writeln!(script, "alloc 40").unwrap();
    writeln!(script, "free P3").unwrap();
    writeln!(script, "alloc 600").unwrap();
    script.flush().unwrap();

    let path = script.path().to_str().unwrap().to_string();
    let (result, text) = run_args(&["fitsim", "--script", &path, "owner", "150", ";", "stats"]);
    assert_eq!(result.unwrap(), RunOutcome { succeeded: 4, failed: 1 });

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "P7: 40 units at 125 (first-fit)",
            "freed P3",
            "error: no free block can hold 600 units (first-fit)",
            "offset 150: P7",
            "total: 1000 | allocated: 290 | free: 710 | free blocks: 5",
        ]
    );
}

#[test]
fn test_malformed_script_line_reports_line_number() {
    let mut script = NamedTempFile::new().unwrap();
    write!(script, "alloc 10\n\nalloc ten\nstats\n").unwrap();
    script.flush().unwrap();

    let path = script.path().to_str().unwrap().to_string();
    let (result, text) = run_args(&["fitsim", "--empty", "--total-size", "100", "--script", &path]);
    assert_eq!(result.unwrap(), RunOutcome { succeeded: 2, failed: 1 });
    assert!(text.contains("error: line 3: invalid number `ten`"));
}

#[test]
fn test_missing_script_is_fatal() {
    let (result, text) = run_args(&["fitsim", "--script", "/nonexistent/fitsim-script.txt"]);
    let error = result.unwrap_err();
    assert!(error.to_string().contains("failed to read script"));
    assert!(text.is_empty());
}

#[test]
fn test_invalid_layout_is_fatal() {
    let (result, _) = run_args(&["fitsim", "--total-size", "100"]);
    assert!(result.unwrap_err().to_string().contains("invalid simulation configuration"));
}

#[test]
fn test_next_fit_from_command_line() {
    let (result, text) = run_args(&[
        "fitsim",
        "--strategy",
        "next-fit",
        "alloc 20; alloc 20; alloc 20",
    ]);
    assert_eq!(result.unwrap().succeeded, 3);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "P7: 20 units at 50 (next-fit)",
            "P8: 20 units at 125 (next-fit)",
            "P9: 20 units at 145 (next-fit)",
        ]
    );
}

#[test]
fn test_largest_address_space_report() {
    let total = usize::MAX.to_string();
    let (result, text) = run_args(&["fitsim", "--empty", "--total-size", &total]);
    assert_eq!(result.unwrap(), RunOutcome::default());
    assert!(text.contains(&format!("[{}]", ".".repeat(64))));
    assert!(text.contains(&format!("  [0..{total}) {total} units")));
}
