// file: src/pipeline/builder.rs
// description: turns tokenized rows into normalized records with typed canonical fields
// reference: lenient numeric coercion, defaults instead of errors

use crate::models::{CanonicalFields, DynamicFields, NormalizedRecord, UNKNOWN_PRODUCT};
use crate::parser::patterns::{FLOAT_PREFIX, INTEGER_PREFIX, PRICE_NOISE, QUANTITY_NOISE};
use crate::schema::HeaderSchema;
use tracing::trace;

/// Keeps digits, `.` and `-`, then reads the leading float literal.
/// Anything unreadable is `0`.
pub fn coerce_price(raw: &str) -> f64 {
    let stripped = PRICE_NOISE.replace_all(raw, "");
    FLOAT_PREFIX
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(0.0)
}

/// Keeps digits and `-`, then reads the leading integer literal.
/// Anything unreadable, including overflow, is `0`. Negatives are kept.
pub fn coerce_quantity(raw: &str) -> i64 {
    let stripped = QUANTITY_NOISE.replace_all(raw, "");
    INTEGER_PREFIX
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}

pub struct RecordBuilder<'a> {
    schema: &'a HeaderSchema,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(schema: &'a HeaderSchema) -> Self {
        Self { schema }
    }

    fn value_at<'r>(&self, row: &'r [String], index: Option<usize>) -> Option<&'r str> {
        index.and_then(|idx| row.get(idx)).map(String::as_str)
    }

    pub fn canonical(&self, row: &[String]) -> CanonicalFields {
        let mapping = &self.schema.mapping;

        let product_name = self
            .value_at(row, mapping.product_name)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PRODUCT)
            .to_string();

        let price = self
            .value_at(row, mapping.price)
            .map(coerce_price)
            .unwrap_or(0.0);

        let quantity = self
            .value_at(row, mapping.quantity)
            .map(coerce_quantity)
            .unwrap_or(0);

        CanonicalFields {
            product_name,
            price,
            quantity,
        }
    }

    /// `None` when the row has no identifiable product.
    pub fn build(&self, row: &[String]) -> Option<NormalizedRecord> {
        let canonical = self.canonical(row);
        if canonical.product_name == UNKNOWN_PRODUCT {
            trace!("Dropping row without product name: {:?}", row);
            return None;
        }

        Some(NormalizedRecord {
            canonical,
            fields: DynamicFields::zip(&self.schema.headers, row),
        })
    }

    /// Surviving records in input order plus the number of dropped rows.
    pub fn build_all(&self, rows: &[Vec<String>]) -> (Vec<NormalizedRecord>, usize) {
        let records: Vec<NormalizedRecord> = rows.iter().filter_map(|row| self.build(row)).collect();
        let dropped = rows.len() - records.len();
        (records, dropped)
    }
}
