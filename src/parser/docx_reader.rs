use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use tracing::info;
use zip::ZipArchive;

use crate::core::error::{ExtractError, Result};
use crate::core::model::{RawTable, SourceKind, TablePosition};
use crate::parser::TableSource;

const DOC_XML_PATH: &str = "word/document.xml";

/// Yields the top-level tables of a DOCX body in document order.
pub struct DocxTableSource {
    xml: String,
}

impl DocxTableSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|err| {
            ExtractError::open(SourceKind::Docx, format!("not a DOCX archive: {err}"))
        })?;
        let mut file = archive.by_name(DOC_XML_PATH).map_err(|err| {
            ExtractError::open(SourceKind::Docx, format!("missing {DOC_XML_PATH}: {err}"))
        })?;
        let mut xml = String::new();
        file.read_to_string(&mut xml).map_err(|err| {
            ExtractError::open(SourceKind::Docx, format!("unreadable {DOC_XML_PATH}: {err}"))
        })?;

        info!(path = %path.display(), bytes = xml.len(), "opened DOCX");
        Ok(Self { xml })
    }

    pub fn from_document_xml(xml: impl Into<String>) -> Self {
        Self { xml: xml.into() }
    }
}

impl TableSource for DocxTableSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Docx
    }

    fn raw_tables(&self) -> Result<Vec<RawTable>> {
        let tables = parse_tables(&self.xml)?;
        let total = tables.len();

        Ok(tables
            .into_iter()
            .enumerate()
            .map(|(index, table)| RawTable {
                reported_rows: table.rows.len(),
                reported_cols: table.grid_cols,
                position: TablePosition::Ordinal { index, total },
                rows: table
                    .rows
                    .into_iter()
                    .map(|row| row.into_iter().map(Some).collect())
                    .collect(),
            })
            .collect())
    }
}

#[derive(Debug, Default)]
struct DocxTable {
    rows: Vec<Vec<String>>,
    grid_cols: usize,
}

#[derive(Debug)]
struct CellText {
    text: String,
    paragraphs: usize,
    span: usize,
    continues_merge: bool,
}

impl Default for CellText {
    fn default() -> Self {
        Self {
            text: String::new(),
            paragraphs: 0,
            span: 1,
            continues_merge: false,
        }
    }
}

/// Walks `w:tbl` elements. Only depth-1 tables are collected; tables
/// nested in a cell contribute neither rows nor text.
///
/// Text box content and `mc:Fallback` branches are skipped entirely, so
/// tables drawn inside shapes are neither counted nor read twice.
#[derive(Debug, Default)]
struct TableWalker {
    tables: Vec<DocxTable>,
    depth: usize,
    hidden: usize,
    table: DocxTable,
    row: Option<Vec<String>>,
    cell: Option<CellText>,
    in_run: bool,
    in_text: bool,
}

impl TableWalker {
    fn start(&mut self, element: &BytesStart<'_>, empty: bool) {
        let name = element.local_name();
        let name = name.as_ref();

        if is_hidden_container(name) {
            if !empty {
                self.hidden += 1;
            }
            return;
        }
        if self.hidden > 0 {
            return;
        }

        if name == b"tbl" {
            if !empty {
                self.depth += 1;
                if self.depth == 1 {
                    self.table = DocxTable::default();
                }
            }
            return;
        }
        if self.depth != 1 {
            return;
        }

        match name {
            b"gridCol" => self.table.grid_cols += 1,
            b"tr" if !empty => self.row = Some(Vec::new()),
            b"tc" if !empty => self.cell = Some(CellText::default()),
            b"gridSpan" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.span = attribute(element, b"val")
                        .and_then(|val| val.parse::<usize>().ok())
                        .unwrap_or(1)
                        .max(1);
                }
            }
            b"vMerge" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.continues_merge = attribute(element, b"val")
                        .map_or(true, |val| val == "continue");
                }
            }
            b"p" => {
                if let Some(cell) = self.cell.as_mut() {
                    if cell.paragraphs > 0 {
                        cell.text.push('\n');
                    }
                    cell.paragraphs += 1;
                }
            }
            b"r" if !empty => self.in_run = true,
            b"t" if !empty => self.in_text = self.cell.is_some(),
            b"tab" if self.in_run => self.push_text("\t"),
            b"br" | b"cr" if self.in_run => self.push_text("\n"),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        if is_hidden_container(name) {
            self.hidden = self.hidden.saturating_sub(1);
            return;
        }
        if self.hidden > 0 {
            return;
        }

        if name == b"tbl" {
            if self.depth == 1 {
                self.tables.push(std::mem::take(&mut self.table));
                self.row = None;
                self.cell = None;
            }
            self.depth = self.depth.saturating_sub(1);
            return;
        }
        if self.depth != 1 {
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"r" => self.in_run = false,
            b"tc" => self.finish_cell(),
            b"tr" => {
                if let Some(row) = self.row.take() {
                    self.table.rows.push(row);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, content: &str) {
        if self.hidden == 0 && self.depth == 1 && self.in_text {
            self.push_text(content);
        }
    }

    fn push_text(&mut self, content: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.text.push_str(content);
        }
    }

    /// A merged cell is repeated once per grid column it spans; a vertical
    /// merge continuation repeats the text above it.
    fn finish_cell(&mut self) {
        let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) else {
            return;
        };

        let text = if cell.continues_merge {
            self.table
                .rows
                .last()
                .and_then(|above| above.get(row.len()))
                .cloned()
                .unwrap_or_default()
        } else {
            cell.text
        };

        for _ in 0..cell.span {
            row.push(text.clone());
        }
    }
}

fn is_hidden_container(name: &[u8]) -> bool {
    matches!(name, b"txbxContent" | b"Fallback")
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

fn parse_tables(xml: &str) -> Result<Vec<DocxTable>> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut walker = TableWalker::default();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| ExtractError::open(SourceKind::Docx, format!("malformed XML: {err}")))?;

        match event {
            Event::Start(element) => walker.start(&element, false),
            Event::Empty(element) => walker.start(&element, true),
            Event::End(element) => walker.end(element.local_name().as_ref()),
            Event::Text(text) => {
                let content = text.unescape().map_err(|err| {
                    ExtractError::open(SourceKind::Docx, format!("malformed XML text: {err}"))
                })?;
                walker.text(&content);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(walker.tables)
}
