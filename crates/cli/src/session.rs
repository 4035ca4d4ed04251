//! A session owns the single current working dataset.
//!
//! Each operation takes the session explicitly and the dataset is only
//! replaced wholesale by a successful expansion — a failed decode or an
//! unactionable instruction leaves the held dataset untouched.

use std::path::{Path, PathBuf};

use rowsplit_engine::dataset::Dataset;
use rowsplit_engine::expand;
use rowsplit_engine::instruction::ParseFailure;

use crate::format;
use crate::CliError;

pub struct Session {
    dataset: Dataset,
    source: PathBuf,
    delimiter: u8,
    dirty: bool,
}

/// Stats from one applied expansion (the dataset itself stays in the
/// session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub column: char,
    pub rows_added: usize,
    pub cells_split: usize,
}

impl Session {
    /// Decode a file into a fresh session. Returns the session plus an
    /// optional import summary for display.
    pub fn open(path: &Path, delimiter: u8) -> Result<(Self, Option<String>), CliError> {
        let (dataset, summary) = format::read_dataset(path, delimiter)?;
        let session = Self {
            dataset,
            source: path.to_path_buf(),
            delimiter,
            dirty: false,
        };
        Ok((session, summary))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Apply an instruction. On success the current dataset is replaced;
    /// on parse failure it is left exactly as it was.
    pub fn apply(&mut self, text: &str) -> Result<ApplyOutcome, ParseFailure> {
        let expansion = expand::apply(&self.dataset, text)?;
        let outcome = ApplyOutcome {
            column: expansion.column,
            rows_added: expansion.rows_added,
            cells_split: expansion.cells_split,
        };
        self.dataset = expansion.dataset;
        self.dirty = self.dirty || outcome.rows_added > 0;
        Ok(outcome)
    }

    /// Write the current dataset to a file (format from extension).
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        format::write_dataset(&self.dataset, path, self.delimiter)
    }

    /// Default output path: `modified_<file-name>` next to the source.
    pub fn default_output(&self) -> PathBuf {
        let name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output.xlsx".to_string());
        self.source.with_file_name(format!("modified_{}", name))
    }
}
