use crate::core::config::SourceProfile;

/// Scores how reliably a filtered grid was extracted.
///
/// `base + bonus (if every row has the same width) + weight * fill rate`,
/// capped at 1.0 and rounded to six decimal places.
pub fn estimate_confidence(rows: &[Vec<String>], profile: &SourceProfile) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }

    let first_width = rows[0].len();
    let consistent_cols = rows.iter().all(|row| row.len() == first_width);

    let total_cells: usize = rows.iter().map(Vec::len).sum();
    let filled_cells = rows
        .iter()
        .flatten()
        .filter(|cell| !cell.trim().is_empty())
        .count();
    let fill_rate = if total_cells > 0 {
        filled_cells as f64 / total_cells as f64
    } else {
        0.0
    };

    let mut score = profile.base;
    if consistent_cols {
        score += profile.column_consistency_bonus;
    }
    score += profile.fill_rate_weight * fill_rate;

    round_score(score).clamp(0.0, 1.0)
}

fn round_score(score: f64) -> f64 {
    (score * 1e6).round() / 1e6
}
