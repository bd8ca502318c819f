// file: src/models/report.rs
// description: metadata describing one ingest run

use crate::parser::SourceEncoding;
use crate::schema::{ColumnKind, ColumnMapping};
use crate::utils::StageTiming;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub header: String,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub encoding: SourceEncoding,
    pub source_sha256: String,
    pub file_size: u64,
    pub line_count: usize,
    pub rows_parsed: usize,
    pub rows_dropped: usize,
    pub mapping: ColumnMapping,
    pub matched_name_column: Option<String>,
    pub matched_price_column: Option<String>,
    pub matched_quantity_column: Option<String>,
    pub columns: Vec<ColumnProfile>,
    pub timings: Vec<StageTiming>,
}

impl IngestReport {
    pub fn rows_kept(&self) -> usize {
        self.rows_parsed - self.rows_dropped
    }

    pub fn keep_ratio(&self) -> f64 {
        if self.rows_parsed == 0 {
            return 0.0;
        }
        self.rows_kept() as f64 / self.rows_parsed as f64
    }
}
