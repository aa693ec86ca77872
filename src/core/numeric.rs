/// Characters stripped before a cell is parsed as a number.
const NUMBER_DECORATIONS: [char; 3] = [',', '$', '%'];

/// Returns true when `value` reads as a finite number once thousands
/// separators, currency and percent signs are removed.
///
/// `"1,234.56"`, `"$50"`, `"12%"` and `"-3e2"` are numeric; `"N/A"`, `""`
/// and `"inf"` are not.
pub fn is_numeric(value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }

    let cleaned: String = value
        .chars()
        .filter(|c| !NUMBER_DECORATIONS.contains(c))
        .collect();

    cleaned
        .trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}
