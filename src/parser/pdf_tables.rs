use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::core::error::Result;
use crate::core::model::{RawRow, RawTable, SourceKind, TablePosition};
use crate::parser::pages::PageSelection;
use crate::parser::pdf_reader::PdfReader;
use crate::parser::TableSource;

/// A tab, or two or more spaces, separates the cells of a text line.
static CELL_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\t\s*|\s{2,}").expect("cell gap pattern is valid"));

/// Blank lines tolerated inside one table before it is closed.
const MAX_BLANK_GAP: usize = 2;

/// Yields the tables found on the selected pages of a PDF.
pub struct PdfTableSource {
    reader: PdfReader,
    pages: Vec<usize>,
}

impl PdfTableSource {
    pub fn open(path: &Path, selection: &PageSelection) -> Result<Self> {
        let reader = PdfReader::open(path)?;
        let pages = selection.resolve(reader.page_count());
        info!(
            path = %reader.path().display(),
            page_count = reader.page_count(),
            selected = pages.len(),
            "opened PDF"
        );
        Ok(Self { reader, pages })
    }
}

impl TableSource for PdfTableSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Pdf
    }

    fn raw_tables(&self) -> Result<Vec<RawTable>> {
        let mut tables = Vec::new();

        for &page_idx in &self.pages {
            let page_box = self.reader.page_box(page_idx);
            let text = self.reader.page_text(page_idx)?;

            for (table_idx, rows) in detect_grids(&text).into_iter().enumerate() {
                let reported_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
                tables.push(RawTable {
                    reported_rows: rows.len(),
                    reported_cols,
                    position: TablePosition::Page {
                        page_idx,
                        table_idx,
                        width: page_box.width(),
                        height: page_box.height(),
                    },
                    rows,
                });
            }
        }

        Ok(tables)
    }
}

/// Groups consecutive multi-cell text lines into raw grids.
///
/// Short runs of blank lines inside a grid become rows of absent cells; a
/// single-cell line or a longer blank run closes the grid.
pub fn detect_grids(text: &str) -> Vec<Vec<RawRow>> {
    let mut grids = Vec::new();
    let mut current: Vec<RawRow> = Vec::new();
    let mut blank_run = 0;

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() {
            if !current.is_empty() {
                blank_run += 1;
                if blank_run > MAX_BLANK_GAP {
                    close_grid(&mut grids, &mut current);
                    blank_run = 0;
                }
            }
            continue;
        }

        let cells = split_cells(line);
        if cells.len() < 2 {
            close_grid(&mut grids, &mut current);
            blank_run = 0;
            continue;
        }

        let width = current.last().map_or(cells.len(), Vec::len);
        for _ in 0..blank_run {
            current.push(vec![None; width]);
        }
        blank_run = 0;
        current.push(cells.into_iter().map(Some).collect());
    }

    close_grid(&mut grids, &mut current);
    grids
}

fn split_cells(line: &str) -> Vec<String> {
    CELL_GAP.split(line).map(str::to_string).collect()
}

fn close_grid(grids: &mut Vec<Vec<RawRow>>, current: &mut Vec<RawRow>) {
    if !current.is_empty() {
        grids.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(row: &RawRow) -> Vec<&str> {
        row.iter().map(|cell| cell.as_deref().unwrap_or("<none>")).collect()
    }

    #[test]
    fn splits_on_wide_gaps_and_tabs() {
        assert_eq!(split_cells("Name   Age\tCity"), vec!["Name", "Age", "City"]);
        assert_eq!(split_cells("New York  10"), vec!["New York", "10"]);
    }

    #[test]
    fn groups_consecutive_tabular_lines() {
        let text = "Quarterly report\nRegion  Q1  Q2\nNorth  10  12\nSouth  8  9\nClosing remarks\n";
        let grids = detect_grids(text);

        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].len(), 3);
        assert_eq!(cells(&grids[0][1]), vec!["North", "10", "12"]);
    }

    #[test]
    fn short_blank_gaps_become_empty_rows() {
        let text = "a  b\n\nc  d\n";
        let grids = detect_grids(text);

        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].len(), 3);
        assert_eq!(cells(&grids[0][1]), vec!["<none>", "<none>"]);
    }

    #[test]
    fn long_blank_gaps_split_grids() {
        let text = "a  b\nc  d\n\n\n\ne  f\ng  h\n";
        let grids = detect_grids(text);
        assert_eq!(grids.len(), 2);
        assert_eq!(cells(&grids[1][0]), vec!["e", "f"]);
    }

    #[test]
    fn prose_yields_no_grids() {
        assert!(detect_grids("Just a paragraph of text.\nAnother line.\n").is_empty());
    }
}
