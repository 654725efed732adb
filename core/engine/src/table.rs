//! FILENAME: core/engine/src/table.rs
//! PURPOSE: The in-memory transaction table.
//! CONTEXT: The loaded records are shared read-only behind an `Arc`; a
//! `Table` is that shared store plus a mask of which records are included.
//! Narrowing a table never copies or mutates records, it only produces a new
//! mask, so every filtered table stays a pure function of (records, mask).

use std::collections::HashSet;
use std::sync::Arc;
use crate::field::{CategoricalField, NumericField};
use crate::record::TransactionRecord;

/// A read-only view over the loaded transactions.
#[derive(Debug, Clone)]
pub struct Table {
    /// All loaded records, shared between every table derived from the same load.
    records: Arc<[TransactionRecord]>,

    /// Which records are included. Length = records.len(), true = included.
    filter_mask: Vec<bool>,

    /// Number of `true` entries in `filter_mask`.
    included: usize,
}

impl Table {
    /// Creates a table that includes every record.
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        let len = records.len();
        Table {
            records: records.into(),
            filter_mask: vec![true; len],
            included: len,
        }
    }

    /// Returns a new table keeping only the included records that satisfy `predicate`.
    /// The source table is left untouched.
    pub fn retain<P>(&self, predicate: P) -> Table
    where
        P: Fn(&TransactionRecord) -> bool,
    {
        let filter_mask: Vec<bool> = self
            .records
            .iter()
            .zip(self.filter_mask.iter())
            .map(|(record, &included)| included && predicate(record))
            .collect();
        let included = filter_mask.iter().filter(|&&x| x).count();

        Table {
            records: Arc::clone(&self.records),
            filter_mask,
            included,
        }
    }

    /// Returns an iterator over included records, in source order.
    pub fn rows(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records
            .iter()
            .zip(self.filter_mask.iter())
            .filter_map(|(record, &included)| if included { Some(record) } else { None })
    }

    /// Number of included records.
    pub fn len(&self) -> usize {
        self.included
    }

    pub fn is_empty(&self) -> bool {
        self.included == 0
    }

    /// Number of records in the underlying store, regardless of the mask.
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    /// Values of a numeric column over the included records.
    pub fn numeric_column(&self, field: NumericField) -> Vec<f64> {
        self.rows().map(|r| field.value(r)).collect()
    }

    /// Distinct values of a categorical column, in first-seen order.
    pub fn unique_values(&self, field: CategoricalField) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut values = Vec::new();

        for record in self.rows() {
            let value = field.value(record);
            if seen.insert(value) {
                values.push(value.to_string());
            }
        }

        values
    }

    /// Number of distinct values of a categorical column.
    pub fn distinct_count(&self, field: CategoricalField) -> usize {
        self.rows()
            .map(|r| field.value(r))
            .collect::<HashSet<&str>>()
            .len()
    }

    /// True when both tables share the same underlying record store.
    pub fn shares_records_with(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// The inclusion mask, indexed like the underlying records.
    pub fn mask(&self) -> &[bool] {
        &self.filter_mask
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
