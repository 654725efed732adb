//! FILENAME: core/chart-engine/src/filter.rs
//! PURPOSE: The filter engine: narrows a table by a `FilterSpec`.
//! CONTEXT: Every constraint is an equality test ANDed into one row predicate,
//! so the order constraints are listed in never changes the result, and
//! filtering an already-filtered table by the same spec is a no-op.

use engine::{CategoricalField, Table};
use crate::definition::FilterSpec;

/// Returns the rows of `table` matching every constraint in `spec`.
/// An empty result is a valid table, not an error.
pub fn apply_filter(table: &Table, spec: &FilterSpec) -> Table {
    let constraints = spec.constraints();
    if constraints.is_empty() {
        return table.clone();
    }

    let filtered = apply_constraints(table, &constraints);
    log::debug!(
        "Filter {:?} kept {} of {} rows",
        constraints,
        filtered.len(),
        table.len()
    );
    filtered
}

/// Applies an arbitrary list of (field, literal) equality constraints.
pub fn apply_constraints(table: &Table, constraints: &[(CategoricalField, &str)]) -> Table {
    table.retain(|record| {
        constraints
            .iter()
            .all(|(field, value)| field.value(record) == *value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::TransactionRecord;

    fn create_test_table() -> Table {
        let rows = [
            ("1", "Male", "Clothing", "Yes"),
            ("2", "Female", "Footwear", "No"),
            ("3", "Male", "Footwear", "No"),
            ("4", "Female", "Clothing", "Yes"),
        ];
        Table::new(
            rows.iter()
                .map(|(id, gender, category, sub)| {
                    let mut r = TransactionRecord::new(*id, 10.0);
                    r.gender = gender.to_string();
                    r.category = category.to_string();
                    r.subscription_status = sub.to_string();
                    r
                })
                .collect(),
        )
    }

    fn ids(table: &Table) -> Vec<String> {
        table.rows().map(|r| r.customer_id.clone()).collect()
    }

    #[test]
    fn test_unconstrained_keeps_everything() {
        let table = create_test_table();
        let out = apply_filter(&table, &FilterSpec::unconstrained());
        assert_eq!(out.len(), 4);
        assert!(out.shares_records_with(&table));
    }

    #[test]
    fn test_constraints_are_anded() {
        let table = create_test_table();
        let spec = FilterSpec::from_selection("No", "Male", "All", "All", "All");
        assert_eq!(ids(&apply_filter(&table, &spec)), vec!["3"]);
    }

    #[test]
    fn test_no_match_yields_empty_table() {
        let table = create_test_table();
        let spec = FilterSpec::from_selection("All", "Other", "All", "All", "All");
        let out = apply_filter(&table, &spec);
        assert!(out.is_empty());
        assert_eq!(out.total_records(), 4);
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let table = create_test_table();
        let spec = FilterSpec::from_selection("Yes", "All", "Clothing", "All", "All");

        let once = apply_filter(&table, &spec);
        let twice = apply_filter(&once, &spec);
        assert_eq!(once.mask(), twice.mask());

        let reversed: Vec<_> = spec.constraints().into_iter().rev().collect();
        let stepwise = reversed
            .iter()
            .fold(table.clone(), |t, c| apply_constraints(&t, std::slice::from_ref(c)));
        assert_eq!(once.mask(), stepwise.mask());
    }
}
