// file: src/pipeline/aggregator.rs
// description: per-product roll-up, revenue ranking and summary figures

use crate::models::{AggregatedProduct, DashboardView, DatasetSummary, NormalizedRecord};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 8;

pub struct Aggregator {
    top_n: usize,
}

impl Aggregator {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// One aggregate per distinct product, sorted by total sales descending.
    /// Ties keep the order in which products first appeared.
    pub fn rank(&self, records: &[NormalizedRecord]) -> Vec<AggregatedProduct> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut products: Vec<AggregatedProduct> = Vec::new();

        for record in records {
            let name = record.product_name().trim();
            let idx = *positions.entry(name).or_insert_with(|| {
                products.push(AggregatedProduct::new(name));
                products.len() - 1
            });
            products[idx].add(record.quantity(), record.price());
        }

        // sort_by is stable
        products.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
        debug!("Aggregated {} records into {} products", records.len(), products.len());
        products
    }

    /// The chart series: `rank` cut to the configured top N.
    pub fn top(&self, records: &[NormalizedRecord]) -> Vec<AggregatedProduct> {
        let mut ranked = self.rank(records);
        ranked.truncate(self.top_n);
        ranked
    }

    /// Whole-dataset figures, unaffected by the top-N cut.
    pub fn summarize(&self, records: &[NormalizedRecord]) -> DatasetSummary {
        let ranked = self.rank(records);
        Self::summary_from(records, &ranked)
    }

    pub fn dashboard(&self, records: &[NormalizedRecord]) -> DashboardView {
        let mut ranked = self.rank(records);
        let summary = Self::summary_from(records, &ranked);
        ranked.truncate(self.top_n);
        DashboardView {
            summary,
            top_products: ranked,
        }
    }

    fn summary_from(records: &[NormalizedRecord], ranked: &[AggregatedProduct]) -> DatasetSummary {
        DatasetSummary {
            product_count: ranked.len(),
            total_quantity: records
                .iter()
                .map(NormalizedRecord::quantity)
                .fold(0i64, i64::saturating_add),
            total_sales: records.iter().map(|r| r.canonical.revenue()).sum(),
            top_product: ranked.first().map(|p| p.name.clone()),
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CanonicalFields, DynamicFields};
    use pretty_assertions::assert_eq;

    fn record(name: &str, quantity: i64, price: f64) -> NormalizedRecord {
        NormalizedRecord {
            canonical: CanonicalFields {
                product_name: name.to_string(),
                price,
                quantity,
            },
            fields: DynamicFields::default(),
        }
    }

    fn product(name: &str, total_quantity: i64, total_sales: f64) -> AggregatedProduct {
        AggregatedProduct {
            name: name.to_string(),
            total_quantity,
            total_sales,
        }
    }

    #[test]
    fn test_group_and_rank() {
        let records = vec![record("B", 10, 1.0), record("A", 2, 5.0), record("A", 1, 5.0)];
        let ranked = Aggregator::default().rank(&records);

        assert_eq!(ranked, vec![product("A", 3, 15.0), product("B", 10, 10.0)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            record("C", 1, 5.0),
            record("A", 5, 1.0),
            record("B", 10, 1.0),
            record("D", 1, 1.0),
            record("D", 4, 1.0),
        ];
        let names: Vec<String> = Aggregator::default()
            .rank(&records)
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_top_n_truncation_leaves_summary_intact() {
        let records: Vec<NormalizedRecord> = (0..12)
            .map(|i| record(&format!("P{}", i), 1, (i + 1) as f64))
            .collect();
        let aggregator = Aggregator::default();

        let top = aggregator.top(&records);
        assert_eq!(top.len(), 8);
        assert_eq!(top[0].name, "P11");
        assert_eq!(top[7].name, "P4");

        let summary = aggregator.summarize(&records);
        assert_eq!(summary.product_count, 12);
        assert_eq!(summary.total_quantity, 12);
        assert_eq!(summary.total_sales, 78.0);
        assert_eq!(summary.top_product.as_deref(), Some("P11"));
    }

    #[test]
    fn test_negative_quantities_reduce_totals() {
        let records = vec![record("A", 5, 2.0), record("A", -2, 2.0)];
        let ranked = Aggregator::new(3).rank(&records);
        assert_eq!(ranked, vec![product("A", 3, 6.0)]);
    }

    #[test]
    fn test_quantity_totals_saturate() {
        let records = vec![
            record("A", i64::MAX, 1.0),
            record("A", 1, 1.0),
            record("B", i64::MIN, 0.0),
            record("B", -1, 0.0),
        ];
        let aggregator = Aggregator::default();
        let ranked = aggregator.rank(&records);

        assert_eq!(ranked[0].total_quantity, i64::MAX);
        assert_eq!(ranked[1].total_quantity, i64::MIN);

        let summary = aggregator.summarize(&records[..2]);
        assert_eq!(summary.total_quantity, i64::MAX);
    }

    #[test]
    fn test_empty_input() {
        let view = Aggregator::new(3).dashboard(&[]);
        assert_eq!(view.summary, DatasetSummary::default());
        assert!(view.top_products.is_empty());
    }

    #[test]
    fn test_dashboard_combines_summary_and_top() {
        let records = vec![record("A", 1, 1.0), record("B", 1, 2.0), record("C", 1, 3.0)];
        let view = Aggregator::new(2).dashboard(&records);
        assert_eq!(view.summary.product_count, 3);
        assert_eq!(view.summary.total_sales, 6.0);
        assert_eq!(view.top_products.len(), 2);
        assert_eq!(view.top_products[0].name, "C");
    }
}
