//! Row expansion: apply the cell splitter to one column across all data
//! rows, emitting one row per produced value.

use serde::Serialize;

use crate::dataset::{CellValue, Dataset};
use crate::instruction::{self, Instruction, ParseFailure};
use crate::splitter::split_text;

/// Result of one expansion pass. The header is carried over unchanged; only
/// the data rows are replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expansion {
    #[serde(skip)]
    pub dataset: Dataset,
    /// Target column letter, for status messages.
    pub column: char,
    /// `new row count - original row count` (0 when nothing qualified).
    pub rows_added: usize,
    /// Number of cells that expanded into two or more rows.
    pub cells_split: usize,
}

/// Expand multi-value cells in one column into multiple rows.
///
/// Pure and infallible for any well-formed dataset: empty/absent target
/// cells and non-text cells keep their row unchanged, and a column index
/// beyond the data width is a valid no-op. Row order is preserved — clones
/// replace their originating row in place.
pub fn expand_column(dataset: &Dataset, col: usize) -> Expansion {
    let mut rows: Vec<Vec<CellValue>> = Vec::with_capacity(dataset.rows.len());
    let mut cells_split = 0usize;

    for row in &dataset.rows {
        let text = match row.get(col) {
            Some(CellValue::Text(s)) => s,
            // Numbers and empty/absent cells are never split
            _ => {
                rows.push(row.clone());
                continue;
            }
        };

        let values = split_text(text);
        if values.len() <= 1 {
            rows.push(row.clone());
            continue;
        }

        cells_split += 1;
        for value in values {
            let mut clone = row.clone();
            clone[col] = CellValue::Text(value);
            rows.push(clone);
        }
    }

    let rows_added = rows.len() - dataset.rows.len();
    Expansion {
        dataset: Dataset::new(dataset.header.clone(), rows),
        column: crate::dataset::column_letter(col).unwrap_or('?'),
        rows_added,
        cells_split,
    }
}

/// Parse an instruction and run the expansion it names.
///
/// On parse failure the dataset is untouched and the caller reports a
/// status message; nothing here is a fatal error.
pub fn apply(dataset: &Dataset, text: &str) -> Result<Expansion, ParseFailure> {
    let Instruction::SplitColumn { index, .. } = instruction::parse(text)?;
    Ok(expand_column(dataset, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sample(rows: Vec<Vec<CellValue>>) -> Dataset {
        Dataset::new(vec!["Name".into(), "Items".into()], rows)
    }

    #[test]
    fn test_unrecognized_instruction_is_noop() {
        let ds = sample(vec![vec![text("Box"), text("a, b")]]);
        assert_eq!(apply(&ds, "tidy this up"), Err(ParseFailure::NotRecognized));
    }

    #[test]
    fn test_single_value_cells_never_duplicate() {
        let ds = sample(vec![
            vec![text("Box"), text("one")],
            vec![text("Crate"), text("two")],
        ]);
        let exp = apply(&ds, "split column B").unwrap();
        assert_eq!(exp.rows_added, 0);
        assert_eq!(exp.cells_split, 0);
        assert_eq!(exp.dataset, ds);
    }

    #[test]
    fn test_delimiter_split_clones_other_cells() {
        let ds = sample(vec![vec![text("Box"), text("a, b c/d")]]);
        let exp = apply(&ds, "update column B").unwrap();

        assert_eq!(exp.rows_added, 3);
        assert_eq!(exp.cells_split, 1);
        assert_eq!(exp.dataset.rows.len(), 4);
        for (row, expected) in exp.dataset.rows.iter().zip(["a", "b", "c", "d"]) {
            assert_eq!(row[0], text("Box"));
            assert_eq!(row[1], text(expected));
        }
    }

    #[test]
    fn test_range_expansion_rows() {
        let ds = sample(vec![vec![text("Box"), text("item1-3")]]);
        let exp = apply(&ds, "split column B").unwrap();

        assert_eq!(exp.rows_added, 2);
        let items: Vec<String> = exp.dataset.rows.iter().map(|r| r[1].raw_display()).collect();
        assert_eq!(items, ["item1", "item2", "item3"]);
    }

    #[test]
    fn test_row_order_preserved_around_expansion() {
        let ds = sample(vec![
            vec![text("R1"), text("solo")],
            vec![text("R2"), text("a b c")],
            vec![text("R3"), text("last")],
        ]);
        let exp = apply(&ds, "split column B").unwrap();

        let names: Vec<String> = exp.dataset.rows.iter().map(|r| r[0].raw_display()).collect();
        assert_eq!(names, ["R1", "R2", "R2", "R2", "R3"]);
        let items: Vec<String> = exp.dataset.rows.iter().map(|r| r[1].raw_display()).collect();
        assert_eq!(items, ["solo", "a", "b", "c", "last"]);
    }

    #[test]
    fn test_idempotent_once_expanded() {
        let ds = sample(vec![vec![text("Box"), text("a/b")]]);
        let first = apply(&ds, "split column B").unwrap();
        assert_eq!(first.rows_added, 1);

        let second = apply(&first.dataset, "split column B").unwrap();
        assert_eq!(second.rows_added, 0);
        assert_eq!(second.dataset, first.dataset);
    }

    #[test]
    fn test_column_letter_case_insensitive() {
        let ds = sample(vec![vec![text("Box"), text("a b")]]);
        let lower = apply(&ds, "split column b").unwrap();
        let upper = apply(&ds, "split column B").unwrap();
        assert_eq!(lower.dataset, upper.dataset);
    }

    #[test]
    fn test_empty_target_cells_keep_rows() {
        let ds = sample(vec![
            vec![text("Box")],                         // absent target cell
            vec![text("Crate"), CellValue::Empty],     // explicit empty
            vec![text("Bag"), text("a b")],
        ]);
        let exp = apply(&ds, "split column B").unwrap();
        assert_eq!(exp.rows_added, 1);
        assert_eq!(exp.dataset.rows[0], vec![text("Box")]);
        assert_eq!(exp.dataset.rows[1], vec![text("Crate"), CellValue::Empty]);
    }

    #[test]
    fn test_number_cells_never_split() {
        let ds = sample(vec![vec![text("Box"), CellValue::Number(13.0)]]);
        let exp = apply(&ds, "split column B").unwrap();
        assert_eq!(exp.rows_added, 0);
        assert_eq!(exp.dataset.rows[0][1], CellValue::Number(13.0));
    }

    #[test]
    fn test_column_beyond_data_width_is_noop() {
        let ds = sample(vec![vec![text("Box"), text("a b")]]);
        let exp = apply(&ds, "split column Z").unwrap();
        assert_eq!(exp.rows_added, 0);
        assert_eq!(exp.dataset, ds);
    }

    #[test]
    fn test_header_carried_unchanged() {
        let ds = sample(vec![vec![text("Box"), text("a b")]]);
        let exp = apply(&ds, "split column B").unwrap();
        assert_eq!(exp.dataset.header, ds.header);
        assert_eq!(exp.column, 'B');
    }

    #[test]
    fn test_descending_range_keeps_row() {
        let ds = sample(vec![vec![text("Box"), text("item3-1")]]);
        let exp = apply(&ds, "split column B").unwrap();
        assert_eq!(exp.rows_added, 0);
        assert_eq!(exp.dataset.rows.len(), 1);
        assert_eq!(exp.dataset.rows[0][1], text("item3-1"));
    }
}
