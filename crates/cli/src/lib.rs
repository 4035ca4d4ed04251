// rowsplit CLI - headless "split column X into rows" operations

pub mod exit_codes;
pub mod format;
pub mod session;
pub mod shell;
pub mod split;

use exit_codes::{EXIT_CODEC_ERROR, EXIT_IO_ERROR, EXIT_USAGE};

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO_ERROR, message: msg.into(), hint: None }
    }

    pub fn codec(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CODEC_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
