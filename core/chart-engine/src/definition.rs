//! FILENAME: core/chart-engine/src/definition.rs
//! Dashboard Definition - What the caller asks for.
//!
//! This module contains the types that DESCRIBE a request:
//! - `FilterSpec`: the up-to-five equality constraints narrowing the table
//! - `ViewKind` / `Section`: which chart, and where it sits on the dashboard
//! - `RenderContext`: presentation inputs (theme) passed explicitly
//!
//! Everything here is cheap to build and is constructed fresh per request.

use serde::{Deserialize, Serialize};
use engine::CategoricalField;
use crate::error::ChartError;

/// The selector value meaning "no constraint on this field".
pub const ALL_SENTINEL: &str = "All";

// ============================================================================
// FILTER SPECIFICATION
// ============================================================================

/// Up to five independent equality constraints. `None` = unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSpec {
    pub subscription_status: Option<String>,
    pub gender: Option<String>,
    pub category: Option<String>,
    pub shipping_type: Option<String>,
    pub age_group: Option<String>,
}

impl FilterSpec {
    /// The filterable fields, in selector order.
    pub const FIELDS: [CategoricalField; 5] = [
        CategoricalField::SubscriptionStatus,
        CategoricalField::Gender,
        CategoricalField::Category,
        CategoricalField::ShippingType,
        CategoricalField::AgeGroup,
    ];

    /// A spec that constrains nothing.
    pub fn unconstrained() -> Self {
        FilterSpec::default()
    }

    /// Builds a spec from raw selector strings. An exact "All" means unconstrained.
    pub fn from_selection(
        subscription_status: &str,
        gender: &str,
        category: &str,
        shipping_type: &str,
        age_group: &str,
    ) -> Self {
        FilterSpec {
            subscription_status: selection(subscription_status),
            gender: selection(gender),
            category: selection(category),
            shipping_type: selection(shipping_type),
            age_group: selection(age_group),
        }
    }

    /// Returns a copy with `field` constrained to `value`.
    /// Fails for fields that are not filterable.
    pub fn with(mut self, field: CategoricalField, value: impl Into<String>) -> Result<Self, ChartError> {
        *self.slot_mut(field)? = Some(value.into());
        Ok(self)
    }

    /// The constraint on `field`, if any.
    pub fn value_for(&self, field: CategoricalField) -> Option<&str> {
        match field {
            CategoricalField::SubscriptionStatus => self.subscription_status.as_deref(),
            CategoricalField::Gender => self.gender.as_deref(),
            CategoricalField::Category => self.category.as_deref(),
            CategoricalField::ShippingType => self.shipping_type.as_deref(),
            CategoricalField::AgeGroup => self.age_group.as_deref(),
            _ => None,
        }
    }

    /// The present constraints as (field, literal) pairs.
    pub fn constraints(&self) -> Vec<(CategoricalField, &str)> {
        FilterSpec::FIELDS
            .iter()
            .filter_map(|&field| self.value_for(field).map(|v| (field, v)))
            .collect()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.constraints().is_empty()
    }

    fn slot_mut(&mut self, field: CategoricalField) -> Result<&mut Option<String>, ChartError> {
        match field {
            CategoricalField::SubscriptionStatus => Ok(&mut self.subscription_status),
            CategoricalField::Gender => Ok(&mut self.gender),
            CategoricalField::Category => Ok(&mut self.category),
            CategoricalField::ShippingType => Ok(&mut self.shipping_type),
            CategoricalField::AgeGroup => Ok(&mut self.age_group),
            other => Err(ChartError::InvalidSelection {
                field: "filter field".to_string(),
                value: other.column_name().to_string(),
            }),
        }
    }
}

fn selection(raw: &str) -> Option<String> {
    if raw == ALL_SENTINEL {
        None
    } else {
        Some(raw.to_string())
    }
}

// ============================================================================
// CHART KINDS
// ============================================================================

/// Chart family handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Pie,
    /// Pie with a 0.4 hole.
    Donut,
    Histogram,
    Box,
    Scatter,
    Treemap,
    Heatmap,
    /// Several single-series bar panels sharing one x axis.
    Panels,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Vertical
    }
}

/// How the series of a cross-tab are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarMode {
    Stacked,
    Grouped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

// ============================================================================
// RENDER CONTEXT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// Presentation inputs for a render. Nothing here affects aggregated data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    pub theme: Theme,
}

impl RenderContext {
    pub fn new(theme: Theme) -> Self {
        RenderContext { theme }
    }

    /// Title text color that stays readable on the theme's background.
    pub fn title_color(&self) -> &'static str {
        match self.theme {
            Theme::Dark => "white",
            Theme::Light => "#2d3748",
        }
    }
}

// ============================================================================
// SECTIONS
// ============================================================================

/// Dashboard tab a view is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Overview,
    CustomerInsights,
    ProductPerformance,
    PurchaseBehavior,
    ShippingAndDelivery,
    GeographicAnalysis,
    AdvancedAnalytics,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Overview,
        Section::CustomerInsights,
        Section::ProductPerformance,
        Section::PurchaseBehavior,
        Section::ShippingAndDelivery,
        Section::GeographicAnalysis,
        Section::AdvancedAnalytics,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::CustomerInsights => "Customer Insights",
            Section::ProductPerformance => "Product Performance",
            Section::PurchaseBehavior => "Purchase Behavior",
            Section::ShippingAndDelivery => "Shipping & Delivery",
            Section::GeographicAnalysis => "Geographic Analysis",
            Section::AdvancedAnalytics => "Advanced Analytics",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::CustomerInsights => "customer_insights",
            Section::ProductPerformance => "product_performance",
            Section::PurchaseBehavior => "purchase_behavior",
            Section::ShippingAndDelivery => "shipping_delivery",
            Section::GeographicAnalysis => "geographic_analysis",
            Section::AdvancedAnalytics => "advanced_analytics",
        }
    }

    pub fn from_id(id: &str) -> Result<Section, ChartError> {
        Section::ALL
            .iter()
            .copied()
            .find(|s| s.id() == id)
            .ok_or_else(|| ChartError::InvalidSelection {
                field: "section".to_string(),
                value: id.to_string(),
            })
    }

    /// Views on this section, in display order.
    pub fn views(&self) -> Vec<ViewKind> {
        ViewKind::ALL
            .iter()
            .copied()
            .filter(|v| v.section() == *self)
            .collect()
    }
}

// ============================================================================
// VIEW KINDS
// ============================================================================

/// Every pre-canned chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    RevenueByCategory,
    RevenueBySeason,
    PurchaseAmountDistribution,
    CustomerByAgeGroup,
    GenderDistribution,
    CustomerCountByAgeGroup,
    PurchaseByAgeGroup,
    PreviousPurchasesDistribution,
    ReviewRatingDistribution,
    TopItems,
    TopColors,
    CategoryTreemap,
    AverageRatingByCategory,
    CategoryBySeason,
    SizeDistribution,
    PurchaseFrequency,
    PaymentMethods,
    SubscriptionByCategory,
    DiscountImpact,
    PurchaseFrequencyDays,
    ShippingDistribution,
    AveragePurchaseByShipping,
    ShippingByCategory,
    SubscriptionByShipping,
    TopStatesByRevenue,
    TopStatesByCustomers,
    TopStatesByAveragePurchase,
    CorrelationHeatmap,
    AgeVsPurchase,
    PreviousVsCurrentPurchase,
    RatingVsPurchase,
    AgeGroupMetrics,
}

/// Static presentation metadata for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewMeta {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub section: Section,
    pub x_title: Option<&'static str>,
    pub y_title: Option<&'static str>,
    pub legend_title: Option<&'static str>,
}

const AGE_GROUP: &str = "Age Group";
const CATEGORY: &str = "Category";
const PURCHASE_AMOUNT: &str = "Purchase Amount ($)";
const AVG_PURCHASE_AMOUNT: &str = "Average Purchase Amount ($)";
const TOTAL_REVENUE: &str = "Total Revenue ($)";
const NUMBER_OF_CUSTOMERS: &str = "Number of Customers";
const NUMBER_OF_PURCHASES: &str = "Number of Purchases";
const SHIPPING_TYPE: &str = "Shipping Type";
const STATE: &str = "State";
const SUBSCRIPTION: &str = "Subscription";

impl ViewKind {
    /// All views in dashboard display order (section by section).
    pub const ALL: [ViewKind; 32] = [
        ViewKind::RevenueByCategory,
        ViewKind::RevenueBySeason,
        ViewKind::PurchaseAmountDistribution,
        ViewKind::CustomerByAgeGroup,
        ViewKind::GenderDistribution,
        ViewKind::CustomerCountByAgeGroup,
        ViewKind::PurchaseByAgeGroup,
        ViewKind::PreviousPurchasesDistribution,
        ViewKind::ReviewRatingDistribution,
        ViewKind::TopItems,
        ViewKind::TopColors,
        ViewKind::CategoryTreemap,
        ViewKind::AverageRatingByCategory,
        ViewKind::CategoryBySeason,
        ViewKind::SizeDistribution,
        ViewKind::PurchaseFrequency,
        ViewKind::PaymentMethods,
        ViewKind::SubscriptionByCategory,
        ViewKind::DiscountImpact,
        ViewKind::PurchaseFrequencyDays,
        ViewKind::ShippingDistribution,
        ViewKind::AveragePurchaseByShipping,
        ViewKind::ShippingByCategory,
        ViewKind::SubscriptionByShipping,
        ViewKind::TopStatesByRevenue,
        ViewKind::TopStatesByCustomers,
        ViewKind::TopStatesByAveragePurchase,
        ViewKind::CorrelationHeatmap,
        ViewKind::AgeVsPurchase,
        ViewKind::PreviousVsCurrentPurchase,
        ViewKind::RatingVsPurchase,
        ViewKind::AgeGroupMetrics,
    ];

    pub fn meta(&self) -> ViewMeta {
        use ChartKind::*;
        use Section::*;

        let (id, title, kind, section, x_title, y_title, legend_title) = match self {
            ViewKind::RevenueByCategory => (
                "revenue_by_category", "Revenue by Category", Bar, Overview,
                Some(TOTAL_REVENUE), Some(CATEGORY), None,
            ),
            ViewKind::RevenueBySeason => (
                "revenue_by_season", "Revenue by Season", Donut, Overview,
                None, None, None,
            ),
            ViewKind::PurchaseAmountDistribution => (
                "purchase_amount_distribution", "Purchase Amount Distribution", Histogram, Overview,
                Some(PURCHASE_AMOUNT), Some(NUMBER_OF_PURCHASES), None,
            ),
            ViewKind::CustomerByAgeGroup => (
                "customer_by_age_group", "Customer Distribution by Age Group", Bar, Overview,
                Some(AGE_GROUP), Some(NUMBER_OF_CUSTOMERS), None,
            ),
            ViewKind::GenderDistribution => (
                "gender_distribution", "Gender Distribution", Pie, CustomerInsights,
                None, None, None,
            ),
            ViewKind::CustomerCountByAgeGroup => (
                "customer_count_by_age_group", "Customer Count by Age Group", Bar, CustomerInsights,
                Some(AGE_GROUP), Some(NUMBER_OF_CUSTOMERS), None,
            ),
            ViewKind::PurchaseByAgeGroup => (
                "purchase_by_age_group", "Purchase Amount by Age Group", Box, CustomerInsights,
                Some(AGE_GROUP), Some(PURCHASE_AMOUNT), None,
            ),
            ViewKind::PreviousPurchasesDistribution => (
                "previous_purchases_distribution", "Previous Purchases Distribution", Histogram, CustomerInsights,
                Some("Number of Previous Purchases"), Some(NUMBER_OF_CUSTOMERS), None,
            ),
            ViewKind::ReviewRatingDistribution => (
                "review_rating_distribution", "Review Rating Distribution", Bar, CustomerInsights,
                Some("Rating"), Some("Number of Reviews"), None,
            ),
            ViewKind::TopItems => (
                "top_items", "Top 10 Items Purchased", Bar, ProductPerformance,
                Some(NUMBER_OF_PURCHASES), Some("Item"), None,
            ),
            ViewKind::TopColors => (
                "top_colors", "Top 10 Colors Purchased", Bar, ProductPerformance,
                Some(NUMBER_OF_PURCHASES), Some("Color"), None,
            ),
            ViewKind::CategoryTreemap => (
                "category_treemap", "Category Breakdown", Treemap, ProductPerformance,
                None, None, None,
            ),
            ViewKind::AverageRatingByCategory => (
                "average_rating_by_category", "Average Rating by Category", Bar, ProductPerformance,
                Some(CATEGORY), Some("Average Rating"), None,
            ),
            ViewKind::CategoryBySeason => (
                "category_by_season", "Product Category by Season", Bar, ProductPerformance,
                Some("Season"), Some(NUMBER_OF_PURCHASES), Some(CATEGORY),
            ),
            ViewKind::SizeDistribution => (
                "size_distribution", "Size Distribution", Pie, ProductPerformance,
                None, None, None,
            ),
            ViewKind::PurchaseFrequency => (
                "purchase_frequency", "Purchase Frequency Distribution", Bar, PurchaseBehavior,
                Some("Frequency"), Some(NUMBER_OF_CUSTOMERS), None,
            ),
            ViewKind::PaymentMethods => (
                "payment_methods", "Payment Method Preferences", Bar, PurchaseBehavior,
                Some("Number of Transactions"), Some("Payment Method"), None,
            ),
            ViewKind::SubscriptionByCategory => (
                "subscription_by_category", "Subscription vs Non-Subscription by Category", Bar, PurchaseBehavior,
                Some(CATEGORY), Some(NUMBER_OF_CUSTOMERS), Some(SUBSCRIPTION),
            ),
            ViewKind::DiscountImpact => (
                "discount_impact", "Discount Impact on Purchase Amount", Box, PurchaseBehavior,
                Some("Discount Applied"), Some(PURCHASE_AMOUNT), None,
            ),
            ViewKind::PurchaseFrequencyDays => (
                "purchase_frequency_days", "Purchase Frequency (Days)", Bar, PurchaseBehavior,
                Some("Days Between Purchases"), Some(NUMBER_OF_CUSTOMERS), None,
            ),
            ViewKind::ShippingDistribution => (
                "shipping_distribution", "Shipping Type Distribution", Donut, ShippingAndDelivery,
                None, None, None,
            ),
            ViewKind::AveragePurchaseByShipping => (
                "average_purchase_by_shipping", "Average Purchase Amount by Shipping Type", Bar, ShippingAndDelivery,
                Some(SHIPPING_TYPE), Some(AVG_PURCHASE_AMOUNT), None,
            ),
            ViewKind::ShippingByCategory => (
                "shipping_by_category", "Shipping Type by Category", Bar, ShippingAndDelivery,
                Some(SHIPPING_TYPE), Some(NUMBER_OF_PURCHASES), Some(CATEGORY),
            ),
            ViewKind::SubscriptionByShipping => (
                "subscription_by_shipping", "Subscription Status vs Shipping Preference", Bar, ShippingAndDelivery,
                Some(SHIPPING_TYPE), Some(NUMBER_OF_CUSTOMERS), Some(SUBSCRIPTION),
            ),
            ViewKind::TopStatesByRevenue => (
                "top_states_by_revenue", "Top 15 States by Revenue", Bar, GeographicAnalysis,
                Some(TOTAL_REVENUE), Some(STATE), None,
            ),
            ViewKind::TopStatesByCustomers => (
                "top_states_by_customers", "Top 15 States by Customer Count", Bar, GeographicAnalysis,
                Some(NUMBER_OF_CUSTOMERS), Some(STATE), None,
            ),
            ViewKind::TopStatesByAveragePurchase => (
                "top_states_by_average_purchase", "Top 15 States by Average Purchase Amount", Bar, GeographicAnalysis,
                Some(AVG_PURCHASE_AMOUNT), Some(STATE), None,
            ),
            ViewKind::CorrelationHeatmap => (
                "correlation_heatmap", "Correlation Heatmap", Heatmap, AdvancedAnalytics,
                None, None, None,
            ),
            ViewKind::AgeVsPurchase => (
                "age_vs_purchase", "Age vs Purchase Amount", Scatter, AdvancedAnalytics,
                Some("Age"), Some(PURCHASE_AMOUNT), Some("Gender"),
            ),
            ViewKind::PreviousVsCurrentPurchase => (
                "previous_vs_current_purchase", "Previous Purchases vs Current Purchase Amount", Scatter, AdvancedAnalytics,
                Some("Previous Purchases"), Some("Current Purchase Amount ($)"), Some(SUBSCRIPTION),
            ),
            ViewKind::RatingVsPurchase => (
                "rating_vs_purchase", "Review Rating vs Purchase Amount", Box, AdvancedAnalytics,
                Some("Rating Group"), Some(PURCHASE_AMOUNT), None,
            ),
            ViewKind::AgeGroupMetrics => (
                "age_group_metrics", "Multi-Metric Comparison by Age Group", Panels, AdvancedAnalytics,
                Some(AGE_GROUP), None, None,
            ),
        };

        ViewMeta { id, title, kind, section, x_title, y_title, legend_title }
    }

    /// Stable snake_case identifier.
    pub fn id(&self) -> &'static str {
        self.meta().id
    }

    pub fn title(&self) -> &'static str {
        self.meta().title
    }

    pub fn section(&self) -> Section {
        self.meta().section
    }

    pub fn from_id(id: &str) -> Result<ViewKind, ChartError> {
        ViewKind::ALL
            .iter()
            .copied()
            .find(|v| v.id() == id)
            .ok_or_else(|| ChartError::InvalidSelection {
                field: "view".to_string(),
                value: id.to_string(),
            })
    }
}
