// Excel import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: first sheet only, projected to a header row plus data rows.
// Export: values only; formulas and styles are out of scope.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};
use rust_xlsxwriter::Workbook as XlsxWorkbook;

use rowsplit_engine::dataset::{CellValue, Dataset};

/// Maximum dimensions for an imported sheet (prevents DoS from huge files)
const MAX_ROWS: usize = 65536;
const MAX_COLS: usize = 256;

/// What was imported, for status messages.
#[derive(Debug, Default, Clone)]
pub struct ImportInfo {
    /// Name of the (first) sheet that was read
    pub sheet_name: String,
    /// Data rows in the resulting dataset (header excluded)
    pub data_rows: usize,
    /// Header width
    pub columns: usize,
    /// Whether rows or columns were dropped at the dimension caps
    pub truncated: bool,
}

impl ImportInfo {
    pub fn summary(&self) -> String {
        let mut s = format!(
            "sheet '{}': {} data row{}, {} column{}",
            self.sheet_name,
            self.data_rows,
            if self.data_rows == 1 { "" } else { "s" },
            self.columns,
            if self.columns == 1 { "" } else { "s" },
        );
        if self.truncated {
            s.push_str(" (truncated)");
        }
        s
    }
}

/// Import the first sheet of an Excel file.
pub fn import(path: &Path) -> Result<(Dataset, ImportInfo), String> {
    let workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open Excel file: {}", e))?;
    import_from_workbook(workbook)
}

/// Import the first sheet from an in-memory Excel file.
pub fn import_bytes(bytes: &[u8]) -> Result<(Dataset, ImportInfo), String> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| format!("Failed to open Excel data: {}", e))?;
    import_from_workbook(workbook)
}

fn import_from_workbook<RS: std::io::Read + std::io::Seek>(
    mut workbook: calamine::Sheets<RS>,
) -> Result<(Dataset, ImportInfo), String> {
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| "Excel file contains no sheets".to_string())?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let (dataset, truncated) = dataset_from_range(&range);
    let info = ImportInfo {
        sheet_name,
        data_rows: dataset.row_count(),
        columns: dataset.column_count(),
        truncated,
    };
    Ok((dataset, info))
}

/// Project a calamine cell range onto a header + data rows dataset.
///
/// The range may not start at column A; leading cells are padded with
/// `Empty` so column letters keep their on-sheet positions.
fn dataset_from_range(range: &Range<Data>) -> (Dataset, bool) {
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return (Dataset::default(), false);
    }

    let (_, start_col) = range.start().unwrap_or((0, 0));
    let col_offset = start_col as usize;
    let truncated = height > MAX_ROWS || col_offset + width > MAX_COLS;

    let mut grid: Vec<Vec<CellValue>> = Vec::with_capacity(height.min(MAX_ROWS));
    for row in range.rows().take(MAX_ROWS) {
        let mut cells: Vec<CellValue> = Vec::with_capacity(col_offset + row.len());
        cells.resize(col_offset, CellValue::Empty);
        for cell in row.iter().take(MAX_COLS.saturating_sub(col_offset)) {
            cells.push(convert_cell(cell));
        }
        // Missing trailing cells read as Empty, so drop them
        while cells.last().map(CellValue::is_empty).unwrap_or(false) {
            cells.pop();
        }
        grid.push(cells);
    }

    let header: Vec<String> = grid
        .first()
        .map(|row| row.iter().map(CellValue::raw_display).collect())
        .unwrap_or_default();
    let rows = if grid.is_empty() { Vec::new() } else { grid.split_off(1) };

    (Dataset::new(header, rows), truncated)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        // TRUE/FALSE text keeps the value visible after a round trip
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
        // Dates stay as serial numbers; date formatting is out of scope
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Export a dataset as an xlsx file.
pub fn export(dataset: &Dataset, path: &Path) -> Result<(), String> {
    let mut workbook = build_workbook(dataset)?;
    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    Ok(())
}

/// Export a dataset as in-memory xlsx bytes.
pub fn export_bytes(dataset: &Dataset) -> Result<Vec<u8>, String> {
    let mut workbook = build_workbook(dataset)?;
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Failed to encode XLSX data: {}", e))
}

fn build_workbook(dataset: &Dataset) -> Result<XlsxWorkbook, String> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, label) in dataset.header.iter().enumerate() {
        if !label.is_empty() {
            worksheet
                .write_string(0, col as u16, label)
                .map_err(|e| format!("Failed to write header cell {}: {}", col, e))?;
        }
    }

    for (row_idx, row) in dataset.rows.iter().enumerate() {
        let row32 = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let col16 = col_idx as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet
                        .write_string(row32, col16, s)
                        .map_err(|e| format!("Failed to write cell ({}, {}): {}", row_idx, col_idx, e))?;
                }
                CellValue::Number(n) => {
                    worksheet
                        .write_number(row32, col16, *n)
                        .map_err(|e| format!("Failed to write cell ({}, {}): {}", row_idx, col_idx, e))?;
                }
            }
        }
    }

    Ok(workbook)
}
