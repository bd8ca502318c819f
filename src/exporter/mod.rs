// file: src/exporter/mod.rs
// description: export of ingest results to disk

pub mod csv;
pub mod json;

pub use self::csv::CsvExporter;
pub use self::json::{ExportManifest, ExportedDashboard, JsonExporter};
