//! Conversion between tune row strings and numbers.

use super::{TuneError, TuneResult};

/// Parse the row strings of a map into numbers.
///
/// Items are separated by commas and trimmed. Empty items and rows with no
/// numbers are skipped, so trailing commas and blank rows are tolerated.
pub fn parse_rows<S: AsRef<str>>(id: &str, rows: &[S]) -> TuneResult<Vec<Vec<f64>>> {
    let mut parsed = Vec::with_capacity(rows.len());

    for (row_idx, row) in rows.iter().enumerate() {
        let mut numbers = Vec::new();
        for item in row.as_ref().split(',').map(str::trim) {
            if item.is_empty() {
                continue;
            }
            let value = item
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| TuneError::InvalidNumber {
                    id: id.to_string(),
                    row: row_idx,
                    value: item.to_string(),
                })?;
            numbers.push(value);
        }
        if !numbers.is_empty() {
            parsed.push(numbers);
        }
    }

    Ok(parsed)
}

/// Render one table row with one decimal place per value.
pub fn format_row(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:.1}", v))
        .collect::<Vec<_>>()
        .join(", ")
}
