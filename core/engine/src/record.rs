//! FILENAME: core/engine/src/record.rs
//! PURPOSE: Defines a single customer transaction (one row of the dataset).
//! CONTEXT: Records are produced once by the loader and never mutated.
//! Categorical values are kept as loaded; the fixed display orders for the
//! ordered categories live here as constants so that no view ever derives
//! them from the data.

use serde::{Deserialize, Serialize};

// ============================================================================
// CANONICAL ORDERS
// ============================================================================

/// Display order for the derived age group column.
pub const AGE_GROUP_ORDER: [&str; 4] = ["Young Adult", "Adult", "Middle-aged", "Senior"];

/// Display order for seasons.
pub const SEASON_ORDER: [&str; 4] = ["Spring", "Summer", "Fall", "Winter"];

/// Display order for the frequency-of-purchase label.
pub const FREQUENCY_ORDER: [&str; 7] = [
    "Weekly",
    "Bi-Weekly",
    "Fortnightly",
    "Monthly",
    "Quarterly",
    "Every 3 Months",
    "Annually",
];

// ============================================================================
// TRANSACTION RECORD
// ============================================================================

/// One purchase made by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Customer identifier. A customer may appear on several rows.
    pub customer_id: String,
    pub age: u32,
    /// Bucketed age ("Young Adult", "Adult", ...), see `AGE_GROUP_ORDER`.
    pub age_group: String,
    pub gender: String,
    pub item_purchased: String,
    pub category: String,
    /// Purchase amount in USD.
    pub purchase_amount: f64,
    /// State or region.
    pub location: String,
    pub size: String,
    pub color: String,
    pub season: String,
    /// Review rating, bounded to (0, 5].
    pub review_rating: f64,
    /// "Yes" / "No".
    pub subscription_status: String,
    pub shipping_type: String,
    /// "Yes" / "No".
    pub discount_applied: String,
    pub previous_purchases: u32,
    pub payment_method: String,
    /// Frequency label, see `FREQUENCY_ORDER`.
    pub frequency_of_purchases: String,
    /// Days between purchases.
    pub purchase_frequency_days: u32,
}

impl TransactionRecord {
    /// Creates a record with the given id and amount and neutral values elsewhere.
    /// Handy for building fixtures; the loader always fills every field.
    pub fn new(customer_id: impl Into<String>, purchase_amount: f64) -> Self {
        TransactionRecord {
            customer_id: customer_id.into(),
            age: 0,
            age_group: String::new(),
            gender: String::new(),
            item_purchased: String::new(),
            category: String::new(),
            purchase_amount,
            location: String::new(),
            size: String::new(),
            color: String::new(),
            season: String::new(),
            review_rating: 0.0,
            subscription_status: String::new(),
            shipping_type: String::new(),
            discount_applied: String::new(),
            previous_purchases: 0,
            payment_method: String::new(),
            frequency_of_purchases: String::new(),
            purchase_frequency_days: 0,
        }
    }
}

/// Returns the position of `value` in a canonical order, if it belongs to it.
pub fn canonical_position(order: &[&str], value: &str) -> Option<usize> {
    order.iter().position(|v| *v == value)
}
