// rowsplit CLI - split multi-value spreadsheet cells into rows

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rowsplit_cli::exit_codes::EXIT_SUCCESS;
use rowsplit_cli::{format, shell, split, CliError};
use rowsplit_engine::dataset::column_letter;

#[derive(Parser)]
#[command(name = "rowsplit")]
#[command(about = "Split multi-value spreadsheet cells into one row per value")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a "split column X" instruction to a file and write the result
    #[command(after_help = "\
Examples:
  rowsplit split orders.xlsx 'split column B'
  rowsplit split orders.csv 'column C' -o expanded.csv
  rowsplit split orders.xlsx 'split column B' --json
  rowsplit split orders.csv 'split column B' --strict")]
    Split {
        /// Input file (csv, tsv, xlsx, xlsm, xls, xlsb, ods)
        input: PathBuf,

        /// Instruction text, e.g. "split column B"
        instruction: String,

        /// Output file (default: modified_<input-file-name>; format from extension)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// CSV delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Print a JSON summary to stdout
        #[arg(long)]
        json: bool,

        /// Exit non-zero when the instruction names no usable column
        #[arg(long)]
        strict: bool,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Interactive session: load a file, type instructions, save the result
    #[command(after_help = "\
Examples:
  rowsplit shell orders.xlsx
  rowsplit shell")]
    Shell {
        /// File to load on startup
        input: Option<PathBuf>,

        /// CSV delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,
    },

    /// Show a file's dimensions and column letters
    #[command(after_help = "\
Examples:
  rowsplit inspect orders.xlsx
  rowsplit inspect orders.csv --json")]
    Inspect {
        /// Input file
        input: PathBuf,

        /// CSV delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Split { input, instruction, output, delimiter, json, strict, quiet } => {
            format::delimiter_byte(delimiter).and_then(|delimiter| {
                split::run(split::SplitArgs {
                    input,
                    instruction,
                    output,
                    delimiter,
                    json,
                    strict,
                    quiet,
                })
            })
        }
        Commands::Shell { input, delimiter } => {
            format::delimiter_byte(delimiter).and_then(|delimiter| shell::run(input, delimiter))
        }
        Commands::Inspect { input, delimiter, json } => {
            format::delimiter_byte(delimiter).and_then(|delimiter| cmd_inspect(input, delimiter, json))
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

// ============================================================================
// inspect
// ============================================================================

#[derive(serde::Serialize)]
struct InspectColumn {
    letter: char,
    label: String,
}

#[derive(serde::Serialize)]
struct InspectReport {
    data_rows: usize,
    columns: Vec<InspectColumn>,
}

fn cmd_inspect(input: PathBuf, delimiter: u8, json: bool) -> Result<(), CliError> {
    let (dataset, summary) = format::read_dataset(&input, delimiter)?;

    let columns: Vec<InspectColumn> = dataset
        .header
        .iter()
        .enumerate()
        .map(|(i, label)| InspectColumn {
            letter: column_letter(i).unwrap_or('?'),
            label: label.clone(),
        })
        .collect();

    if json {
        let report = InspectReport { data_rows: dataset.row_count(), columns };
        let line = serde_json::to_string(&report).map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", line);
        return Ok(());
    }

    if let Some(summary) = summary {
        println!("{}", summary);
    } else {
        println!(
            "{} data row{}, {} column{}",
            dataset.row_count(),
            if dataset.row_count() == 1 { "" } else { "s" },
            dataset.column_count(),
            if dataset.column_count() == 1 { "" } else { "s" },
        );
    }
    for col in columns {
        println!("  {}: {}", col.letter, col.label);
    }

    Ok(())
}
