use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::config::{HeuristicConfig, ShapeLimits};
use crate::core::confidence::estimate_confidence;
use crate::core::error::Result;
use crate::core::header::detect_header;
use crate::core::location::assign_location;
use crate::core::model::{CanonicalTable, RawTable, SourceKind, TableMetadata};
use crate::core::row_filter::filter_rows;
use crate::export::{Exporter, JsonExporter};
use crate::parser::{open_source, PageSelection, TableSource};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    /// Parser to use; inferred from the file extension when `None`.
    pub format: Option<SourceKind>,
    pub limits: ShapeLimits,
    pub heuristics: HeuristicConfig,
    pub pages: PageSelection,
    /// Accepted for compatibility; no OCR is performed.
    pub ocr: bool,
}

impl PipelineConfig {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            format: None,
            limits: ShapeLimits::default(),
            heuristics: HeuristicConfig::default(),
            pages: PageSelection::All,
            ocr: false,
        }
    }

    pub fn with_format(mut self, format: SourceKind) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_limits(mut self, limits: ShapeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_heuristics(mut self, heuristics: HeuristicConfig) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_ocr(mut self, ocr: bool) -> Self {
        self.ocr = ocr;
        self
    }
}

/// Turns raw grids into canonical tables. Holds no state between tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAssembler {
    limits: ShapeLimits,
    heuristics: HeuristicConfig,
}

impl TableAssembler {
    pub fn new(limits: ShapeLimits, heuristics: HeuristicConfig) -> Self {
        Self { limits, heuristics }
    }

    /// Normalizes one raw table, or returns `None` when it is too small to
    /// count as a table once empty rows are dropped.
    pub fn normalize(&self, raw: &RawTable, kind: SourceKind) -> Option<CanonicalTable> {
        let rows = filter_rows(&raw.rows, &self.limits)?;
        let has_header = detect_header(&rows, self.heuristics.header_ratio);
        let confidence = estimate_confidence(&rows, &self.heuristics.profile(kind));
        let location = assign_location(&raw.position, self.heuristics.section_bucket_size);

        Some(CanonicalTable {
            location,
            bounding_box: None,
            rows,
            has_header,
            confidence,
            metadata: TableMetadata::from_raw(raw),
        })
    }

    /// Normalizes every table of `source`, keeping the source's order.
    pub fn assemble(&self, source: &dyn TableSource) -> Result<Vec<CanonicalTable>> {
        let kind = source.kind();
        let raw_tables = source.raw_tables()?;
        let detected = raw_tables.len();

        let tables: Vec<CanonicalTable> = raw_tables
            .iter()
            .filter_map(|raw| self.normalize(raw, kind))
            .inspect(|table| {
                debug!(
                    page = table.location,
                    table_index = table.metadata.table_index,
                    rows = table.rows.len(),
                    has_header = table.has_header,
                    confidence = table.confidence,
                    "normalized table"
                );
            })
            .collect();

        info!(%kind, detected, emitted = tables.len(), "assembled tables");
        Ok(tables)
    }
}

/// Opens the input, extracts every table and releases the document before
/// returning. Any document-level failure fails the whole run.
pub fn build_tables(config: &PipelineConfig) -> Result<Vec<CanonicalTable>> {
    config.heuristics.validate()?;

    let kind = match config.format {
        Some(kind) => kind,
        None => SourceKind::from_path(&config.input)?,
    };
    if config.ocr {
        warn!("OCR was requested but is not supported; using the document text layer only");
    }

    let source = open_source(&config.input, kind, &config.pages)?;
    TableAssembler::new(config.limits, config.heuristics).assemble(source.as_ref())
}

/// Writes the tables as a JSON array to `output`, or to stdout.
pub fn export_tables(tables: &[CanonicalTable], output: Option<&Path>) -> anyhow::Result<()> {
    let exporter = match output {
        Some(path) => JsonExporter::to_file(path.to_path_buf()),
        None => JsonExporter::stdout(),
    };
    exporter.export(tables)
}
