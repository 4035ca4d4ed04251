// CSV/TSV import/export

use std::io::Read;
use std::path::Path;

use rowsplit_engine::dataset::{CellValue, Dataset};

pub fn import(path: &Path) -> Result<Dataset, String> {
    import_with_delimiter(path, b',')
}

pub fn import_with_delimiter(path: &Path, delimiter: u8) -> Result<Dataset, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, delimiter)
}

/// Read file and convert to UTF-8 if needed (handles Excel-exported CSVs in
/// Windows-1252).
fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(content: &str, delimiter: u8) -> Result<Dataset, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut header: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<CellValue>> = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| e.to_string())?;
        if row_idx == 0 {
            header = record.iter().map(|f| f.to_string()).collect();
            continue;
        }

        let mut cells: Vec<CellValue> = record.iter().map(CellValue::from_input).collect();
        while cells.last().map(CellValue::is_empty).unwrap_or(false) {
            cells.pop();
        }
        rows.push(cells);
    }

    Ok(Dataset::new(header, rows))
}

pub fn export(dataset: &Dataset, path: &Path) -> Result<(), String> {
    export_with_delimiter(dataset, path, b',')
}

pub fn export_with_delimiter(dataset: &Dataset, path: &Path, delimiter: u8) -> Result<(), String> {
    // Rows may be variable width (trailing empties are trimmed on import),
    // so the writer must accept varying field counts.
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    writer
        .write_record(&dataset.header)
        .map_err(|e| e.to_string())?;

    for row in &dataset.rows {
        let record: Vec<String> = row.iter().map(CellValue::raw_display).collect();
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_csv_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "Name,Items\nBox,\"a, b c/d\"\nCrate,item1-3\n").unwrap();

        let ds = import(&path).unwrap();
        assert_eq!(ds.header, vec!["Name", "Items"]);
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.rows[0][1], CellValue::Text("a, b c/d".to_string()));
        assert_eq!(ds.rows[1][0], CellValue::Text("Crate".to_string()));
    }

    #[test]
    fn test_csv_numeric_fields_typed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "Name,Count\nBox,3\n").unwrap();

        let ds = import(&path).unwrap();
        assert_eq!(ds.rows[0][1], CellValue::Number(3.0));
    }

    #[test]
    fn test_csv_short_rows_trimmed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.csv");
        fs::write(&path, "A,B,C\nx,,\n").unwrap();

        let ds = import(&path).unwrap();
        assert_eq!(ds.rows[0], vec![CellValue::Text("x".to_string())]);
    }

    #[test]
    fn test_csv_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let ds = Dataset::new(
            vec!["Name".into(), "Items".into()],
            vec![
                vec![CellValue::Text("Box".into()), CellValue::Text("a b".into())],
                vec![CellValue::Text("Crate".into()), CellValue::Number(7.0)],
            ],
        );
        export(&ds, &path).unwrap();
        let imported = import(&path).unwrap();
        assert_eq!(imported, ds);
    }

    #[test]
    fn test_tsv_with_delimiter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv");

        let ds = Dataset::new(
            vec!["A".into(), "B".into()],
            vec![vec![CellValue::Text("x".into()), CellValue::Text("y".into())]],
        );
        export_with_delimiter(&ds, &path, b'\t').unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains('\t'));

        let imported = import_with_delimiter(&path, b'\t').unwrap();
        assert_eq!(imported, ds);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "café" in Windows-1252: e9 is not valid UTF-8
        fs::write(&path, [b'A', b'\n', b'c', b'a', b'f', 0xe9, b'\n']).unwrap();

        let ds = import(&path).unwrap();
        assert_eq!(ds.rows[0][0], CellValue::Text("café".to_string()));
    }
}
