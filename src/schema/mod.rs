// file: src/schema/mod.rs
// description: header cleaning, role classification and column typing
// reference: internal module structure

pub mod classifier;
pub mod kinds;
pub mod roles;

pub use classifier::HeaderClassifier;
pub use kinds::ColumnKind;
pub use roles::{ColumnMapping, ColumnRole, HeaderSchema};
