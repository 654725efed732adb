//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the transaction data model.
//! CONTEXT: Re-exports the record, field accessor and table types used by the
//! loader and the chart engine.

pub mod field;
pub mod number_format;
pub mod record;
pub mod table;

// Re-export commonly used types at the crate root
pub use field::{required_columns, CategoricalField, NumericField};
pub use number_format::{format_general, format_value, ValueFormat};
pub use record::{
    canonical_position, TransactionRecord, AGE_GROUP_ORDER, FREQUENCY_ORDER, SEASON_ORDER,
};
pub use table::Table;
