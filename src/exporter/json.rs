// file: src/exporter/json.rs
// description: json export of ingest payloads and dashboard views

use crate::error::{PipelineError, Result};
use crate::models::{DashboardView, FilePayload};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportedDashboard<'a> {
    pub exported_at: String,
    #[serde(flatten)]
    pub view: &'a DashboardView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub source: String,
    pub total_records: usize,
    pub files: Vec<PathBuf>,
}

/// File stem used to name exports; falls back to `export` for odd paths.
pub(crate) fn export_stem(source: &Path) -> String {
    source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("export")
        .to_string()
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>, pretty: bool) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PipelineError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir, pretty })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let body = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        fs::write(&path, body).map_err(|source| PipelineError::FileOperation {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn export_payload(&self, source: &Path, payload: &FilePayload) -> Result<PathBuf> {
        self.write_json(&format!("{}.payload.json", export_stem(source)), payload)
    }

    pub fn export_dashboard(&self, source: &Path, view: &DashboardView) -> Result<PathBuf> {
        let exported = ExportedDashboard {
            exported_at: Utc::now().to_rfc3339(),
            view,
        };
        self.write_json(&format!("{}.dashboard.json", export_stem(source)), &exported)
    }

    /// Writes both documents for one ingested file.
    pub fn export_all(
        &self,
        source: &Path,
        payload: &FilePayload,
        view: &DashboardView,
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let files = vec![
            self.export_payload(source, payload)?,
            self.export_dashboard(source, view)?,
        ];

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            source: source.display().to_string(),
            total_records: payload.data.len(),
            files,
        };

        info!(
            "Export complete: {} records, {} files",
            manifest.total_records,
            manifest.files.len()
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregatedProduct, CanonicalFields, DatasetSummary, DynamicFields, NormalizedRecord};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn payload() -> FilePayload {
        FilePayload {
            data: vec![NormalizedRecord {
                canonical: CanonicalFields {
                    product_name: "사과".to_string(),
                    price: 1000.0,
                    quantity: 3,
                },
                fields: DynamicFields::zip(&["상품명".to_string()], &["사과".to_string()]),
            }],
            headers: vec!["상품명".to_string()],
        }
    }

    fn view() -> DashboardView {
        DashboardView {
            summary: DatasetSummary {
                product_count: 1,
                total_quantity: 3,
                total_sales: 3000.0,
                top_product: Some("사과".to_string()),
            },
            top_products: vec![AggregatedProduct {
                name: "사과".to_string(),
                total_quantity: 3,
                total_sales: 3000.0,
            }],
        }
    }

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("nested"), true);
        assert!(exporter.is_ok());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_export_all_writes_payload_and_dashboard() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path(), false).unwrap();

        let manifest = exporter
            .export_all(Path::new("/data/march_sales.csv"), &payload(), &view())
            .unwrap();

        assert_eq!(manifest.total_records, 1);
        assert_eq!(
            manifest.files,
            vec![
                dir.path().join("march_sales.payload.json"),
                dir.path().join("march_sales.dashboard.json"),
            ]
        );

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&manifest.files[0]).unwrap()).unwrap();
        assert_eq!(written["headers"][0], "상품명");
        assert_eq!(written["data"][0]["Quantity"], 3);

        let dashboard: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&manifest.files[1]).unwrap()).unwrap();
        assert!(dashboard["exported_at"].is_string());
        assert_eq!(dashboard["summary"]["totalSales"], 3000.0);
        assert_eq!(dashboard["topProducts"][0]["name"], "사과");
    }

    #[test]
    fn test_unwritable_output_dir_is_file_operation_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, "not a directory").unwrap();

        let err = JsonExporter::new(blocker.join("exports"), true).unwrap_err();
        assert!(matches!(err, PipelineError::FileOperation { .. }));
    }

    #[test]
    fn test_export_stem_fallback() {
        assert_eq!(export_stem(Path::new("a/b/sales.csv")), "sales");
        assert_eq!(export_stem(Path::new("/")), "export");
    }
}
