use crate::core::config::ShapeLimits;
use crate::core::model::RawRow;

/// Trims every cell, drops rows with no text, and rejects the table when
/// what remains is smaller than `limits`. A table with no text at all is
/// rejected even when both limits are zero.
///
/// The column count is taken from the first surviving row only; later rows
/// may be ragged and pass through unchanged.
pub fn filter_rows(rows: &[RawRow], limits: &ShapeLimits) -> Option<Vec<Vec<String>>> {
    let kept: Vec<Vec<String>> = rows
        .iter()
        .map(|row| normalize_row(row))
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    if kept.is_empty() || kept.len() < limits.min_rows {
        return None;
    }

    let col_count = kept.first().map_or(0, Vec::len);
    if col_count < limits.min_cols {
        return None;
    }

    Some(kept)
}

fn normalize_row(row: &RawRow) -> Vec<String> {
    row.iter()
        .map(|cell| cell.as_deref().map(str::trim).unwrap_or_default().to_string())
        .collect()
}
