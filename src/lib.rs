pub mod core;
pub mod export;
pub mod parser;
pub mod pipeline;

pub use crate::core::config::{HeuristicConfig, ShapeLimits, SourceProfile};
pub use crate::core::error::ExtractError;
pub use crate::core::model::{CanonicalTable, RawTable, SourceKind, TablePosition};
pub use crate::pipeline::{build_tables, export_tables, PipelineConfig, TableAssembler};
