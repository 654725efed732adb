//! FILENAME: core/engine/src/field.rs
//! PURPOSE: Typed column references for transaction records.
//! CONTEXT: Filters and aggregations address columns through these enums
//! instead of string column names, so an unknown column is a compile error
//! rather than a runtime lookup failure.

use serde::{Deserialize, Serialize};
use crate::record::{TransactionRecord, AGE_GROUP_ORDER, FREQUENCY_ORDER, SEASON_ORDER};

// ============================================================================
// CATEGORICAL FIELDS
// ============================================================================

/// A column holding a categorical (text) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    CustomerId,
    AgeGroup,
    Gender,
    ItemPurchased,
    Category,
    Location,
    Size,
    Color,
    Season,
    SubscriptionStatus,
    ShippingType,
    DiscountApplied,
    PaymentMethod,
    FrequencyOfPurchases,
}

impl CategoricalField {
    /// Column header used in the source file.
    pub fn column_name(&self) -> &'static str {
        match self {
            CategoricalField::CustomerId => "customer_id",
            CategoricalField::AgeGroup => "age_group",
            CategoricalField::Gender => "gender",
            CategoricalField::ItemPurchased => "item_purchased",
            CategoricalField::Category => "category",
            CategoricalField::Location => "location",
            CategoricalField::Size => "size",
            CategoricalField::Color => "color",
            CategoricalField::Season => "season",
            CategoricalField::SubscriptionStatus => "subscription_status",
            CategoricalField::ShippingType => "shipping_type",
            CategoricalField::DiscountApplied => "discount_applied",
            CategoricalField::PaymentMethod => "payment_method",
            CategoricalField::FrequencyOfPurchases => "frequency_of_purchases",
        }
    }

    /// Reads this field from a record.
    pub fn value<'a>(&self, record: &'a TransactionRecord) -> &'a str {
        match self {
            CategoricalField::CustomerId => &record.customer_id,
            CategoricalField::AgeGroup => &record.age_group,
            CategoricalField::Gender => &record.gender,
            CategoricalField::ItemPurchased => &record.item_purchased,
            CategoricalField::Category => &record.category,
            CategoricalField::Location => &record.location,
            CategoricalField::Size => &record.size,
            CategoricalField::Color => &record.color,
            CategoricalField::Season => &record.season,
            CategoricalField::SubscriptionStatus => &record.subscription_status,
            CategoricalField::ShippingType => &record.shipping_type,
            CategoricalField::DiscountApplied => &record.discount_applied,
            CategoricalField::PaymentMethod => &record.payment_method,
            CategoricalField::FrequencyOfPurchases => &record.frequency_of_purchases,
        }
    }

    /// The fixed display order for ordered categories, if this field has one.
    pub fn canonical_order(&self) -> Option<&'static [&'static str]> {
        match self {
            CategoricalField::AgeGroup => Some(&AGE_GROUP_ORDER),
            CategoricalField::Season => Some(&SEASON_ORDER),
            CategoricalField::FrequencyOfPurchases => Some(&FREQUENCY_ORDER),
            _ => None,
        }
    }
}

// ============================================================================
// NUMERIC FIELDS
// ============================================================================

/// A column holding a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    Age,
    PurchaseAmount,
    ReviewRating,
    PreviousPurchases,
    PurchaseFrequencyDays,
}

impl NumericField {
    /// Column header used in the source file.
    pub fn column_name(&self) -> &'static str {
        match self {
            NumericField::Age => "age",
            NumericField::PurchaseAmount => "purchase_amount",
            NumericField::ReviewRating => "review_rating",
            NumericField::PreviousPurchases => "previous_purchases",
            NumericField::PurchaseFrequencyDays => "purchase_frequency_days",
        }
    }

    /// Reads this field from a record, widened to f64.
    pub fn value(&self, record: &TransactionRecord) -> f64 {
        match self {
            NumericField::Age => record.age as f64,
            NumericField::PurchaseAmount => record.purchase_amount,
            NumericField::ReviewRating => record.review_rating,
            NumericField::PreviousPurchases => record.previous_purchases as f64,
            NumericField::PurchaseFrequencyDays => record.purchase_frequency_days as f64,
        }
    }
}

/// Every column a source file must provide.
pub fn required_columns() -> Vec<&'static str> {
    let categorical = [
        CategoricalField::CustomerId,
        CategoricalField::AgeGroup,
        CategoricalField::Gender,
        CategoricalField::ItemPurchased,
        CategoricalField::Category,
        CategoricalField::Location,
        CategoricalField::Size,
        CategoricalField::Color,
        CategoricalField::Season,
        CategoricalField::SubscriptionStatus,
        CategoricalField::ShippingType,
        CategoricalField::DiscountApplied,
        CategoricalField::PaymentMethod,
        CategoricalField::FrequencyOfPurchases,
    ];
    let numeric = [
        NumericField::Age,
        NumericField::PurchaseAmount,
        NumericField::ReviewRating,
        NumericField::PreviousPurchases,
        NumericField::PurchaseFrequencyDays,
    ];

    categorical
        .iter()
        .map(|f| f.column_name())
        .chain(numeric.iter().map(|f| f.column_name()))
        .collect()
}
