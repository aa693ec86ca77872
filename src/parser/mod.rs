pub mod docx_reader;
pub mod pages;
pub mod pdf_reader;
pub mod pdf_tables;

pub use docx_reader::DocxTableSource;
pub use pages::PageSelection;
pub use pdf_reader::PdfReader;
pub use pdf_tables::PdfTableSource;

use std::path::Path;

use crate::core::error::{ExtractError, Result};
use crate::core::model::{RawTable, SourceKind};

/// A document parser that hands over raw grids with their positions.
///
/// Tables must come back in document order.
pub trait TableSource {
    fn kind(&self) -> SourceKind;

    fn raw_tables(&self) -> Result<Vec<RawTable>>;
}

impl SourceKind {
    /// Infers the source kind from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => Ok(SourceKind::Pdf),
            Some("docx") => Ok(SourceKind::Docx),
            _ => Err(ExtractError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Opens `path` with the parser for `kind`. Page selection only applies
/// to PDF documents.
pub fn open_source(
    path: &Path,
    kind: SourceKind,
    pages: &PageSelection,
) -> Result<Box<dyn TableSource>> {
    match kind {
        SourceKind::Pdf => Ok(Box::new(PdfTableSource::open(path, pages)?)),
        SourceKind::Docx => Ok(Box::new(DocxTableSource::open(path)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_kind_from_extension() {
        assert_eq!(SourceKind::from_path(Path::new("a/report.PDF")).unwrap(), SourceKind::Pdf);
        assert_eq!(SourceKind::from_path(Path::new("notes.docx")).unwrap(), SourceKind::Docx);
        assert!(matches!(
            SourceKind::from_path(Path::new("sheet.xlsx")),
            Err(ExtractError::UnsupportedFormat(_))
        ));
        assert!(SourceKind::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn missing_files_are_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.pdf");

        let err = open_source(&missing, SourceKind::Pdf, &PageSelection::All).err().unwrap();
        assert_eq!(err.to_string(), format!("File not found: {}", missing.display()));

        let err = open_source(&missing, SourceKind::Docx, &PageSelection::All).err().unwrap();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }

    #[test]
    fn garbage_files_fail_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"definitely not a zip").unwrap();

        let err = open_source(&path, SourceKind::Docx, &PageSelection::All).err().unwrap();
        assert!(err.to_string().starts_with("Failed to open DOCX"));

        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"plain text, no PDF header").unwrap();
        let err = open_source(&path, SourceKind::Pdf, &PageSelection::All).err().unwrap();
        assert!(err.to_string().starts_with("Failed to open PDF"));
    }
}
