pub mod json_export;

use anyhow::Result;

use crate::core::model::CanonicalTable;

pub use json_export::{error_object, JsonExporter};

pub trait Exporter {
    fn export(&self, tables: &[CanonicalTable]) -> Result<()>;
}
