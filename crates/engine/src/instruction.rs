//! Instruction text mini-grammar.
//!
//! The only recognized instruction is "... column X ...": the word `column`
//! (case-insensitive), whitespace, then a single letter naming the target
//! column. Anything else is a recognized no-op, not an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::dataset::column_index;

/// A parsed instruction. Kept as a typed variant so the grammar can grow
/// without ad hoc pattern matches spreading through callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    SplitColumn { letter: char, index: usize },
}

/// Why an instruction was not actionable. Neither case is a fault: the
/// caller leaves the dataset untouched and reports a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// The text does not mention "column" at all.
    NotRecognized,
    /// "column" is present but no single-letter target follows it.
    NoTargetColumn,
}

impl ParseFailure {
    pub fn message(&self) -> &'static str {
        match self {
            ParseFailure::NotRecognized => {
                "no instruction recognized (expected something like: split column B)"
            }
            ParseFailure::NoTargetColumn => {
                "no target column found (expected a single column letter, e.g. column B)"
            }
        }
    }
}

// The letter must be a standalone token: "column AA" is rejected rather
// than silently truncated to column A.
fn column_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)column\s+([a-z])\b").unwrap())
}

/// Extract the target column from free text. The first "column X" match
/// wins; multiple occurrences are not an error.
pub fn parse(text: &str) -> Result<Instruction, ParseFailure> {
    if !text.to_lowercase().contains("column") {
        return Err(ParseFailure::NotRecognized);
    }

    let caps = column_pattern()
        .captures(text)
        .ok_or(ParseFailure::NoTargetColumn)?;

    let letter = caps[1]
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .ok_or(ParseFailure::NoTargetColumn)?;
    let index = column_index(letter).ok_or(ParseFailure::NoTargetColumn)?;

    Ok(Instruction::SplitColumn { letter, index })
}
