//! FILENAME: core/chart-engine/src/options.rs
//! PURPOSE: The option enumerator feeding the five filter selectors.

use serde::{Deserialize, Serialize};
use engine::{CategoricalField, Table};
use crate::definition::ALL_SENTINEL;

/// Selectable values per filter field, each list starting with "All".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub subscription_status: Vec<String>,
    pub gender: Vec<String>,
    pub category: Vec<String>,
    pub shipping_type: Vec<String>,
    pub age_group: Vec<String>,
}

impl FilterOptions {
    /// Lists distinct values of each filter field in first-seen order.
    pub fn from_table(table: &Table) -> Self {
        FilterOptions {
            subscription_status: field_options(table, CategoricalField::SubscriptionStatus),
            gender: field_options(table, CategoricalField::Gender),
            category: field_options(table, CategoricalField::Category),
            shipping_type: field_options(table, CategoricalField::ShippingType),
            age_group: field_options(table, CategoricalField::AgeGroup),
        }
    }

    pub fn for_field(&self, field: CategoricalField) -> Option<&[String]> {
        match field {
            CategoricalField::SubscriptionStatus => Some(&self.subscription_status),
            CategoricalField::Gender => Some(&self.gender),
            CategoricalField::Category => Some(&self.category),
            CategoricalField::ShippingType => Some(&self.shipping_type),
            CategoricalField::AgeGroup => Some(&self.age_group),
            _ => None,
        }
    }
}

/// "All" followed by the field's distinct values.
pub fn field_options(table: &Table, field: CategoricalField) -> Vec<String> {
    std::iter::once(ALL_SENTINEL.to_string())
        .chain(table.unique_values(field))
        .collect()
}
