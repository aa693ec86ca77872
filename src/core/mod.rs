pub mod config;
pub mod confidence;
pub mod error;
pub mod geometry;
pub mod header;
pub mod location;
pub mod model;
pub mod numeric;
pub mod row_filter;
