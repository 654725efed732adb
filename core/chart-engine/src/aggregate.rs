//! FILENAME: core/chart-engine/src/aggregate.rs
//! Aggregation primitives shared by every view builder.
//!
//! Architecture:
//! - One pass over the included rows builds a map of GroupKey -> accumulator
//! - Group keys borrow their values from the shared record store
//! - Ordering (canonical, by value, by label) is applied after grouping
//!
//! Every function here is a pure function of the table it is given.

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use engine::{CategoricalField, NumericField, Table, TransactionRecord};
use crate::definition::SortDirection;
use crate::error::ChartError;

// ============================================================================
// ORDERED FLOAT
// ============================================================================

/// Wrapper around f64 that implements Eq, Ord and Hash for use as map keys.
/// Callers reject non-finite values before wrapping.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for OrderedFloat {}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // Treat -0.0 and 0.0 as one key
        let normalized = if self.0 == 0.0 { 0.0 } else { self.0 };
        normalized.to_bits().hash(state);
    }
}

impl OrderedFloat {
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

// ============================================================================
// GROUP KEY
// ============================================================================

/// A unique combination of categorical values, one per grouping field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey<'a> {
    pub values: SmallVec<[&'a str; 2]>,
}

impl<'a> GroupKey<'a> {
    pub fn from_record(fields: &[CategoricalField], record: &'a TransactionRecord) -> Self {
        GroupKey {
            values: fields.iter().map(|f| f.value(record)).collect(),
        }
    }

    /// The value at grouping level `level`, or "" if the key is shorter.
    pub fn at(&self, level: usize) -> &'a str {
        self.values.get(level).copied().unwrap_or("")
    }
}

// ============================================================================
// AGGREGATE ACCUMULATOR
// ============================================================================

/// Reductions a view can ask of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reduction {
    Sum,
    Count,
    Mean,
}

/// Accumulator for computing aggregates incrementally.
/// The running mean uses Welford's update for numerical stability.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateAccumulator {
    pub sum: f64,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: f64,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        AggregateAccumulator {
            sum: 0.0,
            count: 0,
            min: None,
            max: None,
            mean: 0.0,
        }
    }

    /// Adds a numeric value to the accumulator.
    pub fn add_number(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;

        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));

        let delta = value - self.mean;
        self.mean += delta / (self.count as f64);
    }

    /// Counts a row that carries no measure.
    pub fn add_row(&mut self) {
        self.count += 1;
    }

    /// Computes the final aggregate. The mean of an empty group is undefined.
    pub fn compute(&self, reduction: Reduction) -> Option<f64> {
        match reduction {
            Reduction::Sum => Some(self.sum),
            Reduction::Count => Some(self.count as f64),
            Reduction::Mean => {
                if self.count > 0 {
                    Some(self.mean)
                } else {
                    None
                }
            }
        }
    }

    /// Accumulates every value of `field` over the table's included rows.
    pub fn over(table: &Table, field: NumericField) -> Result<Self, ChartError> {
        let mut acc = AggregateAccumulator::new();
        for record in table.rows() {
            acc.add_number(checked_value(field, record)?);
        }
        Ok(acc)
    }
}

/// Reads a numeric field, rejecting NaN and infinities.
pub fn checked_value(field: NumericField, record: &TransactionRecord) -> Result<f64, ChartError> {
    let value = field.value(record);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::non_finite(field.column_name(), value))
    }
}

// ============================================================================
// GROUPING
// ============================================================================

/// The result of one group-by pass. Groups remember first-seen order.
#[derive(Debug, Clone)]
pub struct Grouping<'a> {
    order: Vec<GroupKey<'a>>,
    groups: FxHashMap<GroupKey<'a>, AggregateAccumulator>,
}

impl<'a> Grouping<'a> {
    /// Counts the included rows per combination of `fields`.
    pub fn count(table: &'a Table, fields: &[CategoricalField]) -> Self {
        let mut grouping = Grouping::empty();
        for record in table.rows() {
            grouping.accumulator(fields, record).add_row();
        }
        grouping
    }

    /// Accumulates `measure` per combination of `fields`.
    /// Fails on the first non-finite value.
    pub fn measure(
        table: &'a Table,
        fields: &[CategoricalField],
        measure: NumericField,
    ) -> Result<Self, ChartError> {
        let mut grouping = Grouping::empty();
        for record in table.rows() {
            let value = checked_value(measure, record)?;
            grouping.accumulator(fields, record).add_number(value);
        }
        Ok(grouping)
    }

    fn empty() -> Self {
        Grouping {
            order: Vec::new(),
            groups: FxHashMap::default(),
        }
    }

    fn accumulator(
        &mut self,
        fields: &[CategoricalField],
        record: &'a TransactionRecord,
    ) -> &mut AggregateAccumulator {
        let key = GroupKey::from_record(fields, record);
        let order = &mut self.order;
        self.groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            AggregateAccumulator::new()
        })
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> &[GroupKey<'a>] {
        &self.order
    }

    pub fn get(&self, key: &GroupKey<'a>) -> Option<&AggregateAccumulator> {
        self.groups.get(key)
    }

    /// Looks up a group by its values.
    pub fn lookup(&self, values: &[&'a str]) -> Option<&AggregateAccumulator> {
        let key = GroupKey {
            values: values.iter().copied().collect(),
        };
        self.groups.get(&key)
    }

    /// One (label, value) entry per single-field group, in first-seen order.
    /// Groups whose reduction is undefined are skipped.
    pub fn reduce(&self, reduction: Reduction) -> Vec<(String, f64)> {
        self.order
            .iter()
            .filter_map(|key| {
                let acc = self.groups.get(key)?;
                acc.compute(reduction).map(|v| (key.at(0).to_string(), v))
            })
            .collect()
    }
}

// ============================================================================
// ENTRY HELPERS
// ============================================================================

/// Count of rows per value of `field`, count descending, ties by label ascending.
pub fn value_counts(table: &Table, field: CategoricalField) -> Vec<(String, f64)> {
    let mut entries = Grouping::count(table, &[field]).reduce(Reduction::Count);
    sort_entries(&mut entries, SortDirection::Descending);
    entries
}

/// Count of rows per distinct numeric value, value ascending.
pub fn numeric_value_counts(table: &Table, field: NumericField) -> Result<Vec<(f64, u64)>, ChartError> {
    let mut counts: FxHashMap<OrderedFloat, u64> = FxHashMap::default();
    for record in table.rows() {
        *counts.entry(OrderedFloat(checked_value(field, record)?)).or_insert(0) += 1;
    }

    let mut entries: Vec<(OrderedFloat, u64)> = counts.into_iter().collect();
    entries.sort_by_key(|(value, _)| *value);
    Ok(entries.into_iter().map(|(v, c)| (v.as_f64(), c)).collect())
}

/// Reduces `measure` per value of `field`, in first-seen order.
pub fn grouped(
    table: &Table,
    field: CategoricalField,
    measure: NumericField,
    reduction: Reduction,
) -> Result<Vec<(String, f64)>, ChartError> {
    Ok(Grouping::measure(table, &[field], measure)?.reduce(reduction))
}

/// Sorts entries by value; equal values are ordered by label ascending.
pub fn sort_entries(entries: &mut [(String, f64)], direction: SortDirection) {
    entries.sort_by(|a, b| {
        let by_value = match direction {
            SortDirection::Ascending => a.1.total_cmp(&b.1),
            SortDirection::Descending => b.1.total_cmp(&a.1),
        };
        by_value.then_with(|| a.0.cmp(&b.0))
    });
}

/// Keeps the `n` largest entries, then re-sorts them ascending for
/// horizontal-bar presentation (largest bar last).
pub fn top_n(mut entries: Vec<(String, f64)>, n: usize) -> Vec<(String, f64)> {
    sort_entries(&mut entries, SortDirection::Descending);
    entries.truncate(n);
    entries.reverse();
    entries
}

/// Reorders entries to exactly `order`, filling absent labels with zero.
/// Labels outside `order` are dropped.
pub fn reindex(entries: &[(String, f64)], order: &[&str]) -> Vec<(String, f64)> {
    order
        .iter()
        .map(|label| {
            let value = entries
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| *v)
                .unwrap_or(0.0);
            (label.to_string(), value)
        })
        .collect()
}

/// Distinct values of `field` for use as an axis: canonical order when the
/// field has one (values outside it appended by label), otherwise by label.
pub fn axis_labels(table: &Table, field: CategoricalField) -> Vec<String> {
    let mut values = table.unique_values(field);
    match field.canonical_order() {
        Some(order) => values.sort_by(|a, b| {
            let pa = engine::canonical_position(order, a).unwrap_or(usize::MAX);
            let pb = engine::canonical_position(order, b).unwrap_or(usize::MAX);
            pa.cmp(&pb).then_with(|| a.cmp(b))
        }),
        None => values.sort(),
    }
    values
}

// ============================================================================
// CROSS TABULATION
// ============================================================================

/// Row counts for every (outer, inner) combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    /// Outer field values (x axis).
    pub categories: Vec<String>,
    /// Inner field values (one series each).
    pub series: Vec<String>,
    /// counts[s][c] = rows with inner = series[s] and outer = categories[c].
    pub counts: Vec<Vec<f64>>,
}

/// Counts rows by two categorical fields. Missing combinations are zero.
pub fn crosstab(table: &Table, outer: CategoricalField, inner: CategoricalField) -> CrossTab {
    let categories = axis_labels(table, outer);
    let series = axis_labels(table, inner);

    // Lookups borrow the labels; the grouping must be gone before they move.
    let counts = {
        let grouping = Grouping::count(table, &[outer, inner]);
        series
            .iter()
            .map(|s| {
                categories
                    .iter()
                    .map(|c| {
                        grouping
                            .lookup(&[c.as_str(), s.as_str()])
                            .map(|acc| acc.count as f64)
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect()
    };

    CrossTab { categories, series, counts }
}
