//! Cell value splitting strategies.
//!
//! Two strategies, tried in order, first success wins:
//! 1. Range expansion: `"item1-3"` → `["item1", "item2", "item3"]`
//! 2. Delimiter split on runs of comma, forward slash, or whitespace

use std::sync::OnceLock;

use regex::Regex;

/// Upper bound on how many values a numeric suffix range may expand to.
/// A cell like "x1-9999999" is treated as unsplittable instead of
/// materializing millions of rows.
const MAX_RANGE_SPAN: u32 = 10_000;

fn range_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?)(\d+)-(\d+)$").unwrap())
}

fn delimiter_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,/\s]+").unwrap())
}

/// Split a text cell into its atomic values, left-to-right order preserved.
///
/// A one-element result means "not split" — the caller keeps the original
/// row verbatim.
pub fn split_text(value: &str) -> Vec<String> {
    if let Some(expanded) = expand_range(value) {
        return expanded;
    }
    split_delimited(value)
}

/// Expand a numeric suffix range (`"xxx1-3"` → `["xxx1", "xxx2", "xxx3"]`).
///
/// The prefix must be at least one character, so a bare `"1-3"` is not a
/// range. Returns `None` when the value is not shaped like a range. A descending
/// range (start > end), an overflowing bound, or a span beyond
/// `MAX_RANGE_SPAN` yields the original value as a single element, so the
/// originating row is kept rather than silently dropped.
fn expand_range(value: &str) -> Option<Vec<String>> {
    let caps = range_pattern().captures(value)?;
    let prefix = &caps[1];

    let keep_original = || Some(vec![value.to_string()]);

    let (start, end) = match (caps[2].parse::<u32>(), caps[3].parse::<u32>()) {
        (Ok(s), Ok(e)) => (s, e),
        _ => return keep_original(),
    };

    if start > end || end - start >= MAX_RANGE_SPAN {
        return keep_original();
    }

    Some((start..=end).map(|i| format!("{}{}", prefix, i)).collect())
}

/// Split on runs of comma, forward slash, or whitespace, discarding blank
/// fragments.
fn split_delimited(value: &str) -> Vec<String> {
    delimiter_pattern()
        .split(value)
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_expansion() {
        assert_eq!(split_text("item1-3"), vec!["item1", "item2", "item3"]);
    }

    #[test]
    fn test_range_expansion_nongreedy_prefix() {
        // The prefix may itself contain digits; the last number pair wins
        assert_eq!(split_text("a1b2-4"), vec!["a1b2", "a1b3", "a1b4"]);
    }

    #[test]
    fn test_range_single_value() {
        // start == end expands to one element, so the row is not split
        assert_eq!(split_text("item2-2"), vec!["item2"]);
    }

    #[test]
    fn test_range_descending_kept_whole() {
        // A descending range must not drop the value
        assert_eq!(split_text("item3-1"), vec!["item3-1"]);
    }

    #[test]
    fn test_range_huge_span_kept_whole() {
        assert_eq!(split_text("x1-9999999"), vec!["x1-9999999"]);
    }

    #[test]
    fn test_range_overflowing_bound_kept_whole() {
        let value = "x1-99999999999999999999";
        assert_eq!(split_text(value), vec![value]);
    }

    #[test]
    fn test_range_digit_prefix() {
        // The lazy prefix cedes all but one leading digit to the range bounds
        assert_eq!(split_text("12-3"), vec!["12", "13"]);
    }

    #[test]
    fn test_bare_numeric_range_kept_whole() {
        // No prefix at all means the value is not a range
        assert_eq!(split_text("1-3"), vec!["1-3"]);
    }

    #[test]
    fn test_delimiter_mixed() {
        assert_eq!(split_text("a, b c/d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_delimiter_runs_collapse() {
        assert_eq!(split_text("a,,  b //c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_delimiter_leading_trailing() {
        assert_eq!(split_text(", a, b,"), vec!["a", "b"]);
    }

    #[test]
    fn test_plain_value_not_split() {
        assert_eq!(split_text("widget"), vec!["widget"]);
    }

    #[test]
    fn test_range_takes_precedence_over_delimiters() {
        // Anchored range match wins before any delimiter split is tried
        assert_eq!(split_text("box 1-2"), vec!["box 1", "box 2"]);
    }
}
