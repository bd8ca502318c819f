// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod remote;
pub mod schema;
pub mod utils;

pub use config::{AggregationConfig, AliasConfig, BackendConfig, Config, ExportConfig, IngestConfig};
pub use error::{PipelineError, Result};
pub use exporter::{CsvExporter, ExportManifest, JsonExporter};
pub use models::{
    AggregatedProduct, DashboardView, DatasetSummary, FilePayload, IngestReport,
    NormalizedRecord, UploadDescriptor,
};
pub use parser::{Decoder, LineParser, Sanitizer, SourceEncoding};
pub use pipeline::{
    Aggregator, IngestOutcome, IngestPipeline, IngestStats, ProgressTracker, RecordBuilder,
};
pub use remote::BackendClient;
pub use schema::{ColumnKind, ColumnMapping, ColumnRole, HeaderClassifier, HeaderSchema};
pub use utils::Validator;
