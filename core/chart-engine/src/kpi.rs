//! FILENAME: core/chart-engine/src/kpi.rs
//! PURPOSE: The metric calculator behind the four summary cards.
//! CONTEXT: KPIs reflect the currently filtered table. Means over an empty
//! table are undefined and surface as `None` ("N/A" on the card).

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use engine::{format_value, NumericField, Table, ValueFormat};
use crate::aggregate::AggregateAccumulator;
use crate::error::ChartError;

/// The four summary scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Sum of purchase amounts (0 on an empty table).
    pub total_revenue: f64,
    pub average_order_value: Option<f64>,
    /// Distinct customer identifiers, not rows.
    pub total_customers: usize,
    pub average_rating: Option<f64>,
    /// Rows the KPIs were computed over.
    pub transactions: usize,
}

/// Card text for each KPI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDisplay {
    pub total_revenue: String,
    pub average_order_value: String,
    pub total_customers: String,
    pub average_rating: String,
}

const NOT_AVAILABLE: &str = "N/A";

impl Kpis {
    pub fn display(&self) -> KpiDisplay {
        let or_na = |value: Option<f64>, format: ValueFormat| {
            value
                .map(|v| format_value(v, format))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };

        KpiDisplay {
            total_revenue: format_value(self.total_revenue, ValueFormat::dollars()),
            average_order_value: or_na(self.average_order_value, ValueFormat::dollars()),
            total_customers: format_value(self.total_customers as f64, ValueFormat::count()),
            average_rating: or_na(self.average_rating, ValueFormat::Number { decimal_places: 1 }),
        }
    }
}

/// Reduces a (possibly filtered) table to its KPIs.
pub fn compute_kpis(table: &Table) -> Result<Kpis, ChartError> {
    let amounts = AggregateAccumulator::over(table, NumericField::PurchaseAmount)?;
    let ratings = AggregateAccumulator::over(table, NumericField::ReviewRating)?;

    let customers: HashSet<&str> = table.rows().map(|r| r.customer_id.as_str()).collect();

    Ok(Kpis {
        total_revenue: amounts.sum,
        average_order_value: if amounts.count > 0 {
            Some(amounts.sum / amounts.count as f64)
        } else {
            None
        },
        total_customers: customers.len(),
        average_rating: if ratings.count > 0 {
            Some(ratings.sum / ratings.count as f64)
        } else {
            None
        },
        transactions: table.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::TransactionRecord;

    fn create_test_table() -> Table {
        let mut records: Vec<TransactionRecord> = [("1", 10.0), ("2", 20.0), ("3", 30.0), ("3", 40.0)]
            .iter()
            .map(|(id, amount)| TransactionRecord::new(*id, *amount))
            .collect();
        for (r, rating) in records.iter_mut().zip([3.0, 3.5, 4.0, 5.0]) {
            r.review_rating = rating;
        }
        Table::new(records)
    }

    #[test]
    fn test_compute_kpis() {
        let kpis = compute_kpis(&create_test_table()).unwrap();
        assert_eq!(kpis.total_revenue, 100.0);
        assert_eq!(kpis.average_order_value, Some(25.0));
        assert_eq!(kpis.total_customers, 3);
        assert_eq!(kpis.average_rating, Some(3.875));
        assert_eq!(kpis.transactions, 4);
    }

    #[test]
    fn test_empty_table_kpis() {
        let kpis = compute_kpis(&Table::default()).unwrap();
        assert_eq!(kpis.total_revenue, 0.0);
        assert_eq!(kpis.average_order_value, None);
        assert_eq!(kpis.total_customers, 0);
        assert_eq!(kpis.average_rating, None);
    }

    #[test]
    fn test_display() {
        let display = compute_kpis(&create_test_table()).unwrap().display();
        assert_eq!(display.total_revenue, "$100");
        assert_eq!(display.average_order_value, "$25");
        assert_eq!(display.total_customers, "3");
        assert_eq!(display.average_rating, "3.9");

        let empty = compute_kpis(&Table::default()).unwrap().display();
        assert_eq!(empty.total_revenue, "$0");
        assert_eq!(empty.average_order_value, "N/A");
        assert_eq!(empty.average_rating, "N/A");
    }

    #[test]
    fn test_large_values_get_separators() {
        let kpis = Kpis {
            total_revenue: 233081.0,
            average_order_value: Some(59.764),
            total_customers: 3900,
            average_rating: Some(3.75),
            transactions: 3900,
        };
        let display = kpis.display();
        assert_eq!(display.total_revenue, "$233,081");
        assert_eq!(display.average_order_value, "$60");
        assert_eq!(display.total_customers, "3,900");
    }
}
