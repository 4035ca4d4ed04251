//! Interactive shell: a read-eval loop over one session.
//!
//! Free text lines are treated as instructions ("split column B"); a small
//! set of commands manages the session. The loop itself never dies on a
//! bad line — every failure becomes a status message.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use rowsplit_engine::dataset::column_letter;

use crate::session::Session;
use crate::CliError;

const HELP: &str = "\
commands:
  open <path>    load a spreadsheet (csv, tsv, xlsx, xlsm, xls, xlsb, ods)
  show           preview the current dataset
  save [path]    write the current dataset (default: modified_<file-name>)
  help           show this help
  quit           exit
anything else is an instruction, e.g.: split column B";

/// How many data rows `show` previews.
const PREVIEW_ROWS: usize = 10;

pub struct Shell {
    session: Option<Session>,
    delimiter: u8,
}

/// Outcome of one input line: messages to display, and whether to exit.
pub struct Reply {
    pub messages: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn say(messages: Vec<String>) -> Self {
        Reply { messages, quit: false }
    }

    fn one(message: impl Into<String>) -> Self {
        Reply::say(vec![message.into()])
    }
}

impl Shell {
    pub fn new(delimiter: u8) -> Self {
        Shell { session: None, delimiter }
    }

    /// Load a file, replacing the current session only on success. A failed
    /// decode leaves the previously loaded dataset usable.
    pub fn open(&mut self, path: &Path) -> Vec<String> {
        match Session::open(path, self.delimiter) {
            Ok((session, summary)) => {
                let mut messages = vec![format!("'{}' loaded", path.display())];
                if let Some(summary) = summary {
                    messages.push(summary);
                }
                self.session = Some(session);
                messages
            }
            Err(CliError { message, .. }) => vec![format!("error: {}", message)],
        }
    }

    /// Process one input line.
    pub fn execute(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::say(Vec::new());
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        match word {
            "quit" | "exit" => Reply { messages: Vec::new(), quit: true },
            "help" => Reply::one(HELP),
            "open" => {
                if rest.is_empty() {
                    return Reply::one("usage: open <path>");
                }
                Reply::say(self.open(&PathBuf::from(rest)))
            }
            "show" => self.show(),
            "save" => self.save(rest),
            _ => self.instruct(line),
        }
    }

    fn show(&self) -> Reply {
        let Some(session) = &self.session else {
            return Reply::one("no file loaded — use: open <path>");
        };
        let dataset = session.dataset();

        let mut messages = Vec::new();
        let labels: Vec<String> = dataset
            .header
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{}: {}", column_letter(i).unwrap_or('?'), label))
            .collect();
        messages.push(labels.join("  |  "));

        for row in dataset.rows.iter().take(PREVIEW_ROWS) {
            let cells: Vec<String> = row.iter().map(|c| c.raw_display()).collect();
            messages.push(cells.join("  |  "));
        }
        if dataset.row_count() > PREVIEW_ROWS {
            messages.push(format!("... {} more rows", dataset.row_count() - PREVIEW_ROWS));
        }
        Reply::say(messages)
    }

    fn save(&self, rest: &str) -> Reply {
        let Some(session) = &self.session else {
            return Reply::one("no file loaded — use: open <path>");
        };
        let path = if rest.is_empty() {
            session.default_output()
        } else {
            PathBuf::from(rest)
        };
        match session.save(&path) {
            Ok(()) => Reply::one(format!("saved '{}'", path.display())),
            Err(CliError { message, hint, .. }) => {
                let mut messages = vec![format!("error: {}", message)];
                if let Some(hint) = hint {
                    messages.push(format!("hint:  {}", hint));
                }
                Reply::say(messages)
            }
        }
    }

    fn instruct(&mut self, line: &str) -> Reply {
        let Some(session) = &mut self.session else {
            return Reply::one("no file loaded — use: open <path>");
        };
        match session.apply(line) {
            Ok(outcome) => {
                let mut messages = vec![format!(
                    "column {}: {} row{} added ({} cell{} split)",
                    outcome.column,
                    outcome.rows_added,
                    if outcome.rows_added == 1 { "" } else { "s" },
                    outcome.cells_split,
                    if outcome.cells_split == 1 { "" } else { "s" },
                )];
                if outcome.rows_added > 0 {
                    messages.push("use 'save [path]' to write the result".to_string());
                }
                Reply::say(messages)
            }
            Err(failure) => Reply::one(failure.message()),
        }
    }
}

/// Run the interactive loop over stdin/stdout.
pub fn run(input: Option<PathBuf>, delimiter: u8) -> Result<(), CliError> {
    let mut shell = Shell::new(delimiter);

    if let Some(path) = input {
        for message in shell.open(&path) {
            println!("{}", message);
        }
    } else {
        println!("rowsplit shell — 'help' lists commands");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().map_err(|e| CliError::io(e.to_string()))?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| CliError::io(e.to_string()))?;
        if read == 0 {
            break; // EOF
        }

        let reply = shell.execute(&line);
        for message in reply.messages {
            println!("{}", message);
        }
        if reply.quit {
            break;
        }
    }

    Ok(())
}
