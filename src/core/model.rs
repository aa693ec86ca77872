use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::geometry::BBox;

/// A cell as handed over by a document parser. `None` and `Some("")` both
/// normalize to an empty string.
pub type RawCell = Option<String>;

pub type RawRow = Vec<RawCell>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Pdf,
    Docx,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Pdf => f.write_str("PDF"),
            SourceKind::Docx => f.write_str("DOCX"),
        }
    }
}

/// Where a raw table sits inside its document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TablePosition {
    /// PDF: zero-based page index and the table's index on that page.
    Page {
        page_idx: usize,
        table_idx: usize,
        width: f64,
        height: f64,
    },
    /// DOCX: zero-based ordinal among all tables of the document.
    Ordinal { index: usize, total: usize },
}

impl TablePosition {
    pub fn table_index(&self) -> usize {
        match self {
            TablePosition::Page { table_idx, .. } => *table_idx,
            TablePosition::Ordinal { index, .. } => *index,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
    pub position: TablePosition,
    /// Row count as reported by the source, before any filtering.
    pub reported_rows: usize,
    /// Column count as reported by the source, before any filtering.
    pub reported_cols: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    pub table_index: usize,
    pub row_count: usize,
    pub col_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_height: Option<f64>,
}

impl TableMetadata {
    pub fn from_raw(raw: &RawTable) -> Self {
        let (page_width, page_height) = match raw.position {
            TablePosition::Page { width, height, .. } => (Some(width), Some(height)),
            TablePosition::Ordinal { .. } => (None, None),
        };
        Self {
            table_index: raw.position.table_index(),
            row_count: raw.reported_rows,
            col_count: raw.reported_cols,
            page_width,
            page_height,
        }
    }
}

/// One normalized, scored table. `location` is a 1-based page number for
/// PDF sources and an estimated section number for DOCX sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTable {
    #[serde(rename = "page")]
    pub location: usize,
    pub bounding_box: Option<BBox>,
    pub rows: Vec<Vec<String>>,
    pub has_header: bool,
    pub confidence: f64,
    pub metadata: TableMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_with_camel_case_keys() {
        let table = CanonicalTable {
            location: 2,
            bounding_box: None,
            rows: vec![vec!["a".into(), "b".into()]],
            has_header: false,
            confidence: 0.75,
            metadata: TableMetadata {
                table_index: 0,
                row_count: 3,
                col_count: 2,
                page_width: None,
                page_height: None,
            },
        };

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "page": 2,
                "boundingBox": null,
                "rows": [["a", "b"]],
                "hasHeader": false,
                "confidence": 0.75,
                "metadata": { "tableIndex": 0, "rowCount": 3, "colCount": 2 }
            })
        );
    }

    #[test]
    fn page_metadata_carries_dimensions() {
        let raw = RawTable {
            rows: vec![],
            position: TablePosition::Page {
                page_idx: 0,
                table_idx: 1,
                width: 612.0,
                height: 792.0,
            },
            reported_rows: 4,
            reported_cols: 3,
        };
        let metadata = TableMetadata::from_raw(&raw);
        assert_eq!(metadata.table_index, 1);
        assert_eq!(metadata.page_width, Some(612.0));
        assert_eq!(metadata.page_height, Some(792.0));
    }
}
