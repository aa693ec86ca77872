use crate::core::numeric::is_numeric;

/// Guesses whether the first row labels the columns: at least `ratio` of
/// its cells must be non-numeric. Tables with fewer than two rows never
/// have a header.
pub fn detect_header(rows: &[Vec<String>], ratio: f64) -> bool {
    if rows.len() < 2 {
        return false;
    }

    let first_row = &rows[0];
    let non_numeric = first_row.iter().filter(|cell| !is_numeric(cell)).count();

    non_numeric as f64 >= first_row.len() as f64 * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATIO: f64 = 0.6;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn text_first_row_is_header() {
        let table = rows(&[&["Name", "Age", "City"], &["Bob", "30", "NYC"]]);
        assert!(detect_header(&table, RATIO));
    }

    #[test]
    fn numeric_year_labels_are_not_header() {
        let table = rows(&[&["2021", "2022", "2023"], &["10", "20", "30"]]);
        assert!(!detect_header(&table, RATIO));
    }

    #[test]
    fn single_row_has_no_header() {
        let table = rows(&[&["Name", "Age"]]);
        assert!(!detect_header(&table, RATIO));
    }

    #[test]
    fn ratio_is_inclusive() {
        // 3 of 5 text cells is exactly 60%.
        let table = rows(&[&["a", "b", "c", "1", "2"], &["x", "y", "z", "3", "4"]]);
        assert!(detect_header(&table, RATIO));

        let table = rows(&[&["a", "b", "1", "2", "3"], &["x", "y", "z", "3", "4"]]);
        assert!(!detect_header(&table, RATIO));
    }

    #[test]
    fn empty_cells_count_as_text() {
        let table = rows(&[&["", "", "5"], &["1", "2", "3"]]);
        assert!(detect_header(&table, RATIO));
    }
}
