// file: src/exporter/csv.rs
// description: writes normalized records back out as csv with canonical columns appended

use super::json::export_stem;
use crate::error::{PipelineError, Result};
use crate::models::FilePayload;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PipelineError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Original headers in order, then `product_name,Price,Quantity`.
    /// Missing trailing values are written as empty cells.
    pub fn export(&self, source: &Path, payload: &FilePayload) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(format!("{}.normalized.csv", export_stem(source)));
        let mut writer = ::csv::Writer::from_path(&path)?;

        let mut header: Vec<&str> = payload.headers.iter().map(String::as_str).collect();
        header.extend(["product_name", "Price", "Quantity"]);
        writer.write_record(&header)?;

        for record in &payload.data {
            let mut row: Vec<String> = (0..payload.headers.len())
                .map(|idx| record.fields.at(idx).unwrap_or_default().to_string())
                .collect();
            row.push(record.product_name().to_string());
            row.push(record.price().to_string());
            row.push(record.quantity().to_string());
            writer.write_record(&row)?;
        }

        writer.flush().map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;

        info!("Wrote {} rows to {}", payload.data.len(), path.display());
        Ok(path)
    }
}
