// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod aggregate;
pub mod payload;
pub mod record;
pub mod report;

pub use aggregate::{AggregatedProduct, DashboardView, DatasetSummary};
pub use payload::{FilePayload, UploadDescriptor};
pub use record::{CanonicalFields, DynamicField, DynamicFields, NormalizedRecord, UNKNOWN_PRODUCT};
pub use report::{ColumnProfile, IngestReport};
