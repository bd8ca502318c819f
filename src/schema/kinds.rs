// file: src/schema/kinds.rs
// description: value-type inference for the original columns of a file

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    String,
}

impl ColumnKind {
    /// Narrowest kind that fits every non-empty value. A column without
    /// any value is a string column.
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = false;
        let mut integer = true;
        let mut float = true;
        let mut boolean = true;

        for value in values.into_iter().map(str::trim).filter(|v| !v.is_empty()) {
            seen = true;
            integer = integer && value.parse::<i64>().is_ok();
            float = float && value.parse::<f64>().is_ok_and(f64::is_finite);
            boolean = boolean && matches!(value.to_ascii_lowercase().as_str(), "true" | "false");

            if !integer && !float && !boolean {
                return ColumnKind::String;
            }
        }

        match (seen, integer, float, boolean) {
            (false, ..) => ColumnKind::String,
            (true, true, _, _) => ColumnKind::Integer,
            (true, _, true, _) => ColumnKind::Float,
            (true, _, _, true) => ColumnKind::Boolean,
            _ => ColumnKind::String,
        }
    }
}
