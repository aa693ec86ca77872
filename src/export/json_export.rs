use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::CanonicalTable;
use crate::export::Exporter;

/// Writes tables as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_file: Option<PathBuf>,
}

impl JsonExporter {
    pub fn stdout() -> Self {
        Self { out_file: None }
    }

    pub fn to_file(path: PathBuf) -> Self {
        Self {
            out_file: Some(path),
        }
    }

    pub fn render(tables: &[CanonicalTable]) -> Result<String> {
        Ok(serde_json::to_string_pretty(tables)?)
    }
}

impl Exporter for JsonExporter {
    fn export(&self, tables: &[CanonicalTable]) -> Result<()> {
        let data = Self::render(tables)?;
        match &self.out_file {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, data)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{data}")?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

/// The single JSON object reported on stderr when a run fails.
pub fn error_object(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::TableMetadata;

    fn table() -> CanonicalTable {
        CanonicalTable {
            location: 1,
            bounding_box: None,
            rows: vec![vec!["Name".into(), "Age".into()], vec!["Bob".into(), "30".into()]],
            has_header: true,
            confidence: 1.0,
            metadata: TableMetadata {
                table_index: 0,
                row_count: 2,
                col_count: 2,
                page_width: Some(612.0),
                page_height: Some(792.0),
            },
        }
    }

    #[test]
    fn writes_array_to_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/tables.json");

        JsonExporter::to_file(path.clone()).export(&[table()])?;

        let parsed: Vec<CanonicalTable> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(parsed, vec![table()]);
        Ok(())
    }

    #[test]
    fn empty_run_renders_empty_array() -> Result<()> {
        assert_eq!(JsonExporter::render(&[])?, "[]");
        Ok(())
    }

    #[test]
    fn error_object_escapes_message() {
        let json = error_object("File not found: \"a.pdf\"");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"], "File not found: \"a.pdf\"");
    }
}
