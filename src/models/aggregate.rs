// file: src/models/aggregate.rs
// description: per-product totals and whole-dataset summary figures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedProduct {
    pub name: String,
    pub total_quantity: i64,
    pub total_sales: f64,
}

impl AggregatedProduct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_quantity: 0,
            total_sales: 0.0,
        }
    }

    /// Quantity totals saturate at the `i64` bounds instead of wrapping.
    pub fn add(&mut self, quantity: i64, price: f64) {
        self.total_quantity = self.total_quantity.saturating_add(quantity);
        self.total_sales += quantity as f64 * price;
    }
}

/// Summary-card figures over all surviving records, independent of any top-N cut.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub product_count: usize,
    pub total_quantity: i64,
    pub total_sales: f64,
    pub top_product: Option<String>,
}

/// What a dashboard needs: the summary cards plus the ranked chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub summary: DatasetSummary,
    pub top_products: Vec<AggregatedProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_sums() {
        let mut product = AggregatedProduct::new("A");
        product.add(2, 5.0);
        product.add(1, 5.0);
        assert_eq!(product.total_quantity, 3);
        assert_eq!(product.total_sales, 15.0);
    }

    #[test]
    fn test_camel_case_keys() {
        let json = serde_json::to_value(AggregatedProduct::new("A")).unwrap();
        assert_eq!(json["totalQuantity"], 0);
        assert_eq!(json["totalSales"], 0.0);
        assert_eq!(json["name"], "A");
    }
}
