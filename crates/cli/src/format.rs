//! File format inference and dataset read/write dispatch.

use std::path::Path;

use rowsplit_engine::dataset::Dataset;
use rowsplit_io::{csv, xlsx};

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Tsv,
    /// Anything calamine can open: xlsx, xlsm, xls, xlsb, ods.
    Excel,
}

pub fn infer_format(path: &Path) -> Result<Format, CliError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => Ok(Format::Csv),
        "tsv" => Ok(Format::Tsv),
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Format::Excel),
        _ => Err(CliError::args(format!(
            "cannot infer format of '{}'",
            path.display()
        ))
        .with_hint("supported extensions: csv, tsv, xlsx, xlsm, xls, xlsb, ods")),
    }
}

/// Decode a file into a dataset. The summary line (when present) describes
/// what was imported, for `note:` output.
pub fn read_dataset(path: &Path, delimiter: u8) -> Result<(Dataset, Option<String>), CliError> {
    let format = infer_format(path)?;
    match format {
        Format::Csv => {
            let ds = csv::import_with_delimiter(path, delimiter).map_err(CliError::codec)?;
            Ok((ds, None))
        }
        Format::Tsv => {
            let ds = csv::import_with_delimiter(path, b'\t').map_err(CliError::codec)?;
            Ok((ds, None))
        }
        Format::Excel => {
            let (ds, info) = xlsx::import(path).map_err(CliError::codec)?;
            Ok((ds, Some(info.summary())))
        }
    }
}

/// Encode a dataset to a file, format chosen by extension. Excel output is
/// always written as xlsx.
pub fn write_dataset(dataset: &Dataset, path: &Path, delimiter: u8) -> Result<(), CliError> {
    let format = infer_format(path)?;
    match format {
        Format::Csv => csv::export_with_delimiter(dataset, path, delimiter).map_err(CliError::codec),
        Format::Tsv => csv::export_with_delimiter(dataset, path, b'\t').map_err(CliError::codec),
        Format::Excel => {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !ext.eq_ignore_ascii_case("xlsx") {
                return Err(CliError::args(format!(
                    "cannot write '{}': only xlsx is supported for Excel output",
                    path.display()
                ))
                .with_hint("use an .xlsx, .csv, or .tsv output path"));
            }
            xlsx::export(dataset, path).map_err(CliError::codec)
        }
    }
}

/// Validate a `--delimiter` flag value.
pub fn delimiter_byte(delimiter: char) -> Result<u8, CliError> {
    u8::try_from(u32::from(delimiter))
        .map_err(|_| CliError::args("--delimiter must be a single ASCII character"))
}
