// file: src/models/record.rs
// description: normalized sales record: typed canonical fields plus original columns
// reference: internal data structures

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sentinel for rows whose product could not be identified; such rows are dropped.
pub const UNKNOWN_PRODUCT: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFields {
    pub product_name: String,
    /// Treated as a per-unit price: revenue is `quantity * price`. A source
    /// column that already holds line totals will be over-counted.
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
}

impl CanonicalFields {
    pub fn revenue(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicField {
    pub header: String,
    pub value: Option<String>,
}

/// Every original column in header order, duplicates included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicFields(Vec<DynamicField>);

impl DynamicFields {
    /// Pairs headers with values by position; missing trailing values are `None`
    /// and values beyond the last header are ignored.
    pub fn zip(headers: &[String], values: &[String]) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(idx, header)| DynamicField {
                    header: header.clone(),
                    value: values.get(idx).cloned(),
                })
                .collect(),
        )
    }

    /// First value recorded under `header`.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|field| field.header == header)
            .and_then(|field| field.value.as_deref())
    }

    pub fn at(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|field| field.value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DynamicField> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub canonical: CanonicalFields,
    pub fields: DynamicFields,
}

impl NormalizedRecord {
    pub fn product_name(&self) -> &str {
        &self.canonical.product_name
    }

    pub fn price(&self) -> f64 {
        self.canonical.price
    }

    pub fn quantity(&self) -> i64 {
        self.canonical.quantity
    }
}

const CANONICAL_KEYS: [&str; 3] = ["product_name", "Price", "Quantity"];

/// Flat object: original columns first (first occurrence of a duplicated
/// header wins, missing values omitted), then the canonical keys, which
/// take precedence over same-named original columns.
impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut map = serializer.serialize_map(None)?;

        for field in self.fields.iter() {
            if CANONICAL_KEYS.contains(&field.header.as_str()) || !seen.insert(field.header.as_str()) {
                continue;
            }
            if let Some(value) = &field.value {
                map.serialize_entry(&field.header, value)?;
            }
        }

        map.serialize_entry("product_name", &self.canonical.product_name)?;
        map.serialize_entry("Price", &self.canonical.price)?;
        map.serialize_entry("Quantity", &self.canonical.quantity)?;
        map.end()
    }
}
