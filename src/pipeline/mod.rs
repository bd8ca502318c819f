// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

pub mod aggregator;
pub mod builder;
pub mod orchestrator;
mod progress;

pub use aggregator::{Aggregator, DEFAULT_TOP_N};
pub use builder::{RecordBuilder, coerce_price, coerce_quantity};
pub use orchestrator::{IngestOutcome, IngestPipeline};
pub use progress::{IngestStats, ProgressTracker};
