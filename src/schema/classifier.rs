// file: src/schema/classifier.rs
// description: header cleaning and alias-based role classification
// reference: configurable keyword rules, first match wins

use super::roles::{ColumnMapping, ColumnRole, HeaderSchema};
use crate::config::AliasConfig;
use crate::parser::patterns::HEADER_NOISE;
use tracing::{debug, warn};

pub struct HeaderClassifier {
    product_name: Vec<String>,
    price: Vec<String>,
    quantity: Vec<String>,
}

fn lowercase_aliases(aliases: &[String]) -> Vec<String> {
    aliases
        .iter()
        .map(|alias| alias.trim().to_lowercase())
        .filter(|alias| !alias.is_empty())
        .collect()
}

impl HeaderClassifier {
    pub fn new(aliases: &AliasConfig) -> Self {
        Self {
            product_name: lowercase_aliases(&aliases.product_name),
            price: lowercase_aliases(&aliases.price),
            quantity: lowercase_aliases(&aliases.quantity),
        }
    }

    fn aliases(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::ProductName => &self.product_name,
            ColumnRole::Price => &self.price,
            ColumnRole::Quantity => &self.quantity,
        }
    }

    /// Drops punctuation and symbols. Falls back to the raw token when
    /// nothing survives so that no header disappears.
    pub fn clean_header(&self, raw: &str) -> String {
        let cleaned = HEADER_NOISE.replace_all(raw, "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            raw.to_string()
        } else {
            cleaned.to_string()
        }
    }

    /// Index of the first header containing any alias of `role`, in header order.
    pub fn find_index(&self, headers: &[String], role: ColumnRole) -> Option<usize> {
        let aliases = self.aliases(role);
        headers.iter().position(|header| {
            let lower = header.to_lowercase();
            aliases.iter().any(|alias| lower.contains(alias.as_str()))
        })
    }

    /// Roles are resolved independently; one header may serve several roles.
    pub fn classify(&self, headers: &[String]) -> ColumnMapping {
        let mut mapping = ColumnMapping::default();
        for role in ColumnRole::ALL {
            let index = self.find_index(headers, role);
            match index {
                Some(idx) => debug!("Header {:?} classified as {}", headers[idx], role),
                None => warn!("No header matched the {} role; using defaults", role),
            }
            mapping.set(role, index);
        }
        mapping
    }

    pub fn build_schema(&self, raw_header: &[String]) -> HeaderSchema {
        let headers: Vec<String> = raw_header
            .iter()
            .map(|raw| self.clean_header(raw))
            .collect();
        let mapping = self.classify(&headers);
        HeaderSchema { headers, mapping }
    }
}

impl Default for HeaderClassifier {
    fn default() -> Self {
        Self::new(&AliasConfig::default())
    }
}
