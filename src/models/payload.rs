// file: src/models/payload.rs
// description: payloads exchanged with presentation and the ingestion backend

use super::record::NormalizedRecord;
use crate::schema::ColumnMapping;
use serde::{Deserialize, Serialize};

/// Hand-off to presentation: `{ "data": [...], "headers": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilePayload {
    pub data: Vec<NormalizedRecord>,
    pub headers: Vec<String>,
}

impl FilePayload {
    /// An empty `data` set means "no usable data", not a failure.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Column description returned by a backend that ingested the file itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    pub file_id: String,
    pub filename: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    pub columns: Vec<String>,
    pub row_count: usize,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub matched_quantity_column: Option<String>,
    #[serde(default)]
    pub matched_price_column: Option<String>,
    #[serde(default)]
    pub date_column: Option<String>,
    #[serde(default)]
    pub target_column: Option<String>,
}

impl UploadDescriptor {
    /// Server-matched columns as indices into `columns`. The backend does
    /// not match a product column, so `product_name` is always `None` here.
    pub fn matched_mapping(&self) -> ColumnMapping {
        let position = |name: &Option<String>| {
            name.as_ref()
                .and_then(|name| self.columns.iter().position(|column| column == name))
        };

        ColumnMapping {
            product_name: None,
            price: position(&self.matched_price_column),
            quantity: position(&self.matched_quantity_column),
        }
    }
}
