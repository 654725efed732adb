//! FILENAME: core/persistence/src/columns.rs
//! PURPOSE: Maps source headers to record fields and converts raw rows.
//! CONTEXT: Shared by the CSV and XLSX readers so both formats enforce the
//! same schema. Extra columns in the source are ignored.

use std::collections::HashMap;
use engine::{required_columns, TransactionRecord};
use crate::DataLoadError;

/// Normalizes a header: trims, lowercases, and turns spaces and hyphens into
/// underscores, so "Purchase Frequency Days" matches `purchase_frequency_days`.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Column positions for every required field.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    positions: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Resolves every required column against the header row.
    /// Fails on the first required column that is absent.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, DataLoadError> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h.as_ref())).collect();
        let mut positions = HashMap::new();

        for column in required_columns() {
            let index = normalized
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| DataLoadError::MissingColumn(column.to_string()))?;
            positions.insert(column, index);
        }

        Ok(ColumnMap { positions })
    }

    /// Builds a record from one data row. `row` is the 1-based data row
    /// number used in error messages.
    pub fn build_record<S: AsRef<str>>(
        &self,
        row: usize,
        fields: &[S],
    ) -> Result<TransactionRecord, DataLoadError> {
        let text = |column: &'static str| -> String {
            self.positions
                .get(column)
                .and_then(|&i| fields.get(i))
                .map(|s| s.as_ref().trim().to_string())
                .unwrap_or_default()
        };

        Ok(TransactionRecord {
            customer_id: text("customer_id"),
            age: self.parse_count(row, "age", &text("age"))?,
            age_group: text("age_group"),
            gender: text("gender"),
            item_purchased: text("item_purchased"),
            category: text("category"),
            purchase_amount: self.parse_amount(row, "purchase_amount", &text("purchase_amount"))?,
            location: text("location"),
            size: text("size"),
            color: text("color"),
            season: text("season"),
            review_rating: self.parse_amount(row, "review_rating", &text("review_rating"))?,
            subscription_status: text("subscription_status"),
            shipping_type: text("shipping_type"),
            discount_applied: text("discount_applied"),
            previous_purchases: self.parse_count(row, "previous_purchases", &text("previous_purchases"))?,
            payment_method: text("payment_method"),
            frequency_of_purchases: text("frequency_of_purchases"),
            purchase_frequency_days: self.parse_count(
                row,
                "purchase_frequency_days",
                &text("purchase_frequency_days"),
            )?,
        })
    }

    /// Parses a finite decimal value.
    fn parse_amount(&self, row: usize, column: &str, raw: &str) -> Result<f64, DataLoadError> {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid_value(row, column, raw))
    }

    /// Parses a non-negative whole number. Spreadsheet sources store these as
    /// floats ("12.0"), which are accepted when they carry no fraction.
    fn parse_count(&self, row: usize, column: &str, raw: &str) -> Result<u32, DataLoadError> {
        if let Ok(n) = raw.parse::<u32>() {
            return Ok(n);
        }

        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0 && *v >= 0.0 && *v <= u32::MAX as f64)
            .map(|v| v as u32)
            .ok_or_else(|| invalid_value(row, column, raw))
    }
}

fn invalid_value(row: usize, column: &str, raw: &str) -> DataLoadError {
    DataLoadError::InvalidValue {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    }
}
