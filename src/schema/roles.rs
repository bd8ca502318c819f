// file: src/schema/roles.rs
// description: canonical column roles and the header-to-role mapping

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    ProductName,
    Price,
    Quantity,
}

impl ColumnRole {
    pub const ALL: [ColumnRole; 3] = [
        ColumnRole::ProductName,
        ColumnRole::Price,
        ColumnRole::Quantity,
    ];

    /// Key the role's value is published under in a normalized record.
    pub fn canonical_key(&self) -> &'static str {
        match self {
            ColumnRole::ProductName => "product_name",
            ColumnRole::Price => "Price",
            ColumnRole::Quantity => "Quantity",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::ProductName => write!(f, "product name"),
            ColumnRole::Price => write!(f, "price"),
            ColumnRole::Quantity => write!(f, "quantity"),
        }
    }
}

/// Header index per role; `None` when no header matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub product_name: Option<usize>,
    pub price: Option<usize>,
    pub quantity: Option<usize>,
}

impl ColumnMapping {
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::ProductName => self.product_name,
            ColumnRole::Price => self.price,
            ColumnRole::Quantity => self.quantity,
        }
    }

    pub fn set(&mut self, role: ColumnRole, index: Option<usize>) {
        match role {
            ColumnRole::ProductName => self.product_name = index,
            ColumnRole::Price => self.price = index,
            ColumnRole::Quantity => self.quantity = index,
        }
    }

    pub fn missing_roles(&self) -> Vec<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }

    /// Roles assigned to the header at `index`.
    pub fn roles_at(&self, index: usize) -> Vec<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .filter(|role| self.get(*role) == Some(index))
            .collect()
    }

    pub fn header_for<'a>(&self, role: ColumnRole, headers: &'a [String]) -> Option<&'a str> {
        self.get(role)
            .and_then(|idx| headers.get(idx))
            .map(String::as_str)
    }
}

/// Cleaned header row together with its role mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderSchema {
    pub headers: Vec<String>,
    pub mapping: ColumnMapping,
}
