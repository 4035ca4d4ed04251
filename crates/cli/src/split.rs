//! One-shot split pipeline: decode → apply instruction → encode.

use std::path::PathBuf;

use serde::Serialize;

use crate::exit_codes::EXIT_NOT_ACTIONABLE;
use crate::session::Session;
use crate::CliError;

pub struct SplitArgs {
    pub input: PathBuf,
    pub instruction: String,
    pub output: Option<PathBuf>,
    pub delimiter: u8,
    pub json: bool,
    pub strict: bool,
    pub quiet: bool,
}

/// Machine-readable summary for `--json`.
#[derive(Debug, Serialize)]
struct SplitReport {
    applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<char>,
    rows_added: usize,
    cells_split: usize,
    output: String,
}

pub fn run(args: SplitArgs) -> Result<(), CliError> {
    let (mut session, summary) = Session::open(&args.input, args.delimiter)?;
    if let (Some(summary), false) = (summary, args.quiet) {
        eprintln!("note: {}", summary);
    }

    let output = args.output.unwrap_or_else(|| session.default_output());

    let report = match session.apply(&args.instruction) {
        Ok(outcome) => {
            if !args.quiet {
                eprintln!(
                    "note: column {}: {} row{} added ({} cell{} split)",
                    outcome.column,
                    outcome.rows_added,
                    if outcome.rows_added == 1 { "" } else { "s" },
                    outcome.cells_split,
                    if outcome.cells_split == 1 { "" } else { "s" },
                );
            }
            SplitReport {
                applied: true,
                column: Some(outcome.column),
                rows_added: outcome.rows_added,
                cells_split: outcome.cells_split,
                output: output.display().to_string(),
            }
        }
        Err(failure) => {
            // A no-op by contract: the input passes through unchanged
            if args.strict {
                return Err(CliError {
                    code: EXIT_NOT_ACTIONABLE,
                    message: failure.message().to_string(),
                    hint: Some("instructions look like: split column B".to_string()),
                });
            }
            if !args.quiet {
                eprintln!("note: {}", failure.message());
            }
            SplitReport {
                applied: false,
                column: None,
                rows_added: 0,
                cells_split: 0,
                output: output.display().to_string(),
            }
        }
    };

    session.save(&output)?;

    if args.json {
        let line = serde_json::to_string(&report)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", line);
    } else if !args.quiet {
        eprintln!("note: wrote '{}'", output.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(input: PathBuf, instruction: &str) -> SplitArgs {
        SplitArgs {
            input,
            instruction: instruction.to_string(),
            output: None,
            delimiter: b',',
            json: false,
            strict: false,
            quiet: true,
        }
    }

    #[test]
    fn test_split_default_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("orders.csv");
        fs::write(&input, "Name,Items\nBox,a/b\n").unwrap();

        run(args(input, "split column B")).unwrap();

        let out = dir.path().join("modified_orders.csv");
        assert_eq!(fs::read_to_string(&out).unwrap(), "Name,Items\nBox,a\nBox,b\n");
    }

    #[test]
    fn test_unactionable_passes_input_through() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("orders.csv");
        fs::write(&input, "Name,Items\nBox,a/b\n").unwrap();

        run(args(input, "make it nicer")).unwrap();

        let out = dir.path().join("modified_orders.csv");
        assert_eq!(fs::read_to_string(&out).unwrap(), "Name,Items\nBox,a/b\n");
    }

    #[test]
    fn test_strict_maps_to_exit_code() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("orders.csv");
        fs::write(&input, "Name,Items\nBox,a/b\n").unwrap();

        let mut a = args(input, "make it nicer");
        a.strict = true;
        let err = run(a).unwrap_err();
        assert_eq!(err.code, EXIT_NOT_ACTIONABLE);

        // Strict failure writes nothing
        assert!(!dir.path().join("modified_orders.csv").exists());
    }

    #[test]
    fn test_missing_input_is_codec_or_io_error() {
        let dir = tempdir().unwrap();
        let err = run(args(dir.path().join("missing.csv"), "split column B")).unwrap_err();
        assert_ne!(err.code, 0);
    }
}
