//! FILENAME: core/chart-engine/src/engine.rs
//! Chart Engine - Turns a filtered table into chart descriptions.
//!
//! Every view follows the same template:
//! 1. Filter the table by the request's FilterSpec (done once per call)
//! 2. Run one aggregation (value counts, grouped sum/mean, cross-tab,
//!    histogram, partition, top-N, correlation, OLS fit)
//! 3. Order the result (canonical order, by value, or by label)
//! 4. Package it with the view's titles and color rule
//!
//! Builders never share intermediates, so any subset of views can be built
//! in any order, or concurrently.

use engine::{
    format_general, format_value, CategoricalField, NumericField, Table, ValueFormat,
    AGE_GROUP_ORDER, FREQUENCY_ORDER,
};
use crate::aggregate::{
    axis_labels, checked_value, crosstab, grouped, numeric_value_counts, reindex, sort_entries,
    top_n, value_counts, Grouping, Reduction,
};
use crate::definition::{BarMode, FilterSpec, Orientation, RenderContext, SortDirection, ViewKind};
use crate::error::ChartError;
use crate::filter::apply_filter;
use crate::stats::{histogram, linear_fit, mean, median, pearson, round_to};
use crate::view::{
    Axis, ChartData, ChartDescription, ColorRule, DataPoint, Distribution, HierarchyNode, Panel,
    ScatterGroup, Series, ACCENT_COLOR, ALERT_COLOR, COLORS_PALETTE, DEEP_COLOR, GRADIENT_COLORS,
    PRIMARY_COLOR, SECONDARY_COLOR, SUCCESS_COLOR, WARNING_COLOR,
};

// ============================================================================
// CONSTANTS
// ============================================================================

const PURCHASE_AMOUNT_BINS: usize = 20;
const PREVIOUS_PURCHASES_BINS: usize = 15;
const TOP_ITEMS: usize = 10;
const TOP_STATES: usize = 15;

/// Fields of the correlation heatmap, in axis order.
pub const CORRELATION_FIELDS: [NumericField; 5] = [
    NumericField::Age,
    NumericField::PurchaseAmount,
    NumericField::ReviewRating,
    NumericField::PreviousPurchases,
    NumericField::PurchaseFrequencyDays,
];

/// Rating buckets for the rating-vs-purchase view: (lower, upper], label.
pub const RATING_BUCKETS: [(f64, f64, &str); 4] = [
    (0.0, 2.0, "1-2"),
    (2.0, 3.0, "2-3"),
    (3.0, 4.0, "3-4"),
    (4.0, 5.0, "4-5"),
];

/// Bucket label for a rating; bounds are exclusive below and inclusive above.
/// Ratings outside (0, 5] fall in no bucket.
pub fn rating_bucket(rating: f64) -> Option<&'static str> {
    RATING_BUCKETS
        .iter()
        .find(|(lower, upper, _)| rating > *lower && rating <= *upper)
        .map(|(_, _, label)| *label)
}

// ============================================================================
// CHART BUILDER
// ============================================================================

/// Builds views over one already-filtered table.
pub struct ChartBuilder<'a> {
    table: &'a Table,
    ctx: &'a RenderContext,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(table: &'a Table, ctx: &'a RenderContext) -> Self {
        ChartBuilder { table, ctx }
    }

    /// Builds one view.
    pub fn build(&self, view: ViewKind) -> Result<ChartDescription, ChartError> {
        match view {
            ViewKind::RevenueByCategory => self.revenue_by_category(),
            ViewKind::RevenueBySeason => self.revenue_by_season(),
            ViewKind::PurchaseAmountDistribution => self.purchase_amount_distribution(),
            ViewKind::CustomerByAgeGroup => self.age_group_counts(view, &COLORS_PALETTE),
            ViewKind::GenderDistribution => self.pie(view, CategoricalField::Gender, &[PRIMARY_COLOR, SECONDARY_COLOR]),
            ViewKind::CustomerCountByAgeGroup => self.age_group_counts(view, &GRADIENT_COLORS),
            ViewKind::PurchaseByAgeGroup => self.purchase_by_age_group(),
            ViewKind::PreviousPurchasesDistribution => self.previous_purchases_distribution(),
            ViewKind::ReviewRatingDistribution => self.review_rating_distribution(),
            ViewKind::TopItems => self.top_counts(view, CategoricalField::ItemPurchased, PRIMARY_COLOR),
            ViewKind::TopColors => self.top_counts(view, CategoricalField::Color, SECONDARY_COLOR),
            ViewKind::CategoryTreemap => self.category_treemap(),
            ViewKind::AverageRatingByCategory => self.average_rating_by_category(),
            ViewKind::CategoryBySeason => self.cross_tab(
                view,
                CategoricalField::Season,
                CategoricalField::Category,
                BarMode::Stacked,
                ColorRule::palette(&COLORS_PALETTE),
            ),
            ViewKind::SizeDistribution => self.pie(view, CategoricalField::Size, &COLORS_PALETTE),
            ViewKind::PurchaseFrequency => self.purchase_frequency(),
            ViewKind::PaymentMethods => self.payment_methods(),
            ViewKind::SubscriptionByCategory => self.cross_tab(
                view,
                CategoricalField::Category,
                CategoricalField::SubscriptionStatus,
                BarMode::Grouped,
                subscription_colors(),
            ),
            ViewKind::DiscountImpact => self.discount_impact(),
            ViewKind::PurchaseFrequencyDays => self.purchase_frequency_days(),
            ViewKind::ShippingDistribution => self.pie(view, CategoricalField::ShippingType, &COLORS_PALETTE),
            ViewKind::AveragePurchaseByShipping => self.average_purchase_by_shipping(),
            ViewKind::ShippingByCategory => self.cross_tab(
                view,
                CategoricalField::ShippingType,
                CategoricalField::Category,
                BarMode::Stacked,
                ColorRule::palette(&COLORS_PALETTE),
            ),
            ViewKind::SubscriptionByShipping => self.cross_tab(
                view,
                CategoricalField::ShippingType,
                CategoricalField::SubscriptionStatus,
                BarMode::Grouped,
                subscription_colors(),
            ),
            ViewKind::TopStatesByRevenue => self.top_states(view, Some(Reduction::Sum)),
            ViewKind::TopStatesByCustomers => self.top_states(view, None),
            ViewKind::TopStatesByAveragePurchase => self.top_states(view, Some(Reduction::Mean)),
            ViewKind::CorrelationHeatmap => self.correlation_heatmap(),
            ViewKind::AgeVsPurchase => self.scatter(
                view,
                CategoricalField::Gender,
                NumericField::Age,
                ColorRule::by_label(&[("Male", PRIMARY_COLOR), ("Female", SECONDARY_COLOR)], ACCENT_COLOR),
            ),
            ViewKind::PreviousVsCurrentPurchase => self.scatter(
                view,
                CategoricalField::SubscriptionStatus,
                NumericField::PreviousPurchases,
                subscription_colors(),
            ),
            ViewKind::RatingVsPurchase => self.rating_vs_purchase(),
            ViewKind::AgeGroupMetrics => self.age_group_metrics(),
        }
    }

    fn describe(&self, view: ViewKind, data: ChartData, colors: ColorRule) -> ChartDescription {
        ChartDescription::new(view, self.ctx, data, colors)
    }

    fn column(&self, field: NumericField) -> Result<Vec<f64>, ChartError> {
        self.table.rows().map(|r| checked_value(field, r)).collect()
    }

    // ------------------------------------------------------------------------
    // Single-field frequency
    // ------------------------------------------------------------------------

    fn age_group_counts(&self, view: ViewKind, palette: &[&str]) -> Result<ChartDescription, ChartError> {
        let counts = reindex(&value_counts(self.table, CategoricalField::AgeGroup), &AGE_GROUP_ORDER);
        let data = series(&counts, Some(ValueFormat::count()), Orientation::Vertical);
        Ok(self.describe(view, data, ColorRule::palette(palette)))
    }

    fn pie(&self, view: ViewKind, field: CategoricalField, palette: &[&str]) -> Result<ChartDescription, ChartError> {
        let counts = value_counts(self.table, field);
        let data = series(&counts, None, Orientation::Vertical);
        Ok(self.describe(view, data, ColorRule::palette(palette)))
    }

    fn review_rating_distribution(&self) -> Result<ChartDescription, ChartError> {
        let counts = numeric_value_counts(self.table, NumericField::ReviewRating)?;
        let points = counts
            .iter()
            .map(|(rating, count)| {
                DataPoint::new(format_general(*rating), *count as f64)
                    .with_text(format_value(*count as f64, ValueFormat::count()))
            })
            .collect();

        let colors = ColorRule::RatingThresholds {
            low_below: 3.0,
            mid_below: 4.0,
            low: ALERT_COLOR.to_string(),
            mid: WARNING_COLOR.to_string(),
            high: SUCCESS_COLOR.to_string(),
        };
        let data = ChartData::Series { points, orientation: Orientation::Vertical };
        Ok(self.describe(ViewKind::ReviewRatingDistribution, data, colors))
    }

    fn purchase_frequency(&self) -> Result<ChartDescription, ChartError> {
        let counts = reindex(
            &value_counts(self.table, CategoricalField::FrequencyOfPurchases),
            &FREQUENCY_ORDER,
        );
        let data = series(&counts, Some(ValueFormat::count()), Orientation::Vertical);
        Ok(self.describe(ViewKind::PurchaseFrequency, data, ColorRule::palette(&GRADIENT_COLORS)))
    }

    fn payment_methods(&self) -> Result<ChartDescription, ChartError> {
        let mut counts = value_counts(self.table, CategoricalField::PaymentMethod);
        sort_entries(&mut counts, SortDirection::Ascending);
        let data = series(&counts, Some(ValueFormat::count()), Orientation::Horizontal);
        Ok(self.describe(ViewKind::PaymentMethods, data, ColorRule::single(PRIMARY_COLOR)))
    }

    fn purchase_frequency_days(&self) -> Result<ChartDescription, ChartError> {
        let counts = numeric_value_counts(self.table, NumericField::PurchaseFrequencyDays)?;
        let points = counts
            .iter()
            .map(|(days, count)| {
                DataPoint::new(format_general(*days), *count as f64)
                    .with_text(format_value(*count as f64, ValueFormat::count()))
            })
            .collect();
        let data = ChartData::Series { points, orientation: Orientation::Vertical };
        Ok(self.describe(ViewKind::PurchaseFrequencyDays, data, ColorRule::single(PRIMARY_COLOR)))
    }

    // ------------------------------------------------------------------------
    // Grouped sum / mean
    // ------------------------------------------------------------------------

    fn revenue_by_category(&self) -> Result<ChartDescription, ChartError> {
        let mut revenue = grouped(self.table, CategoricalField::Category, NumericField::PurchaseAmount, Reduction::Sum)?;
        sort_entries(&mut revenue, SortDirection::Ascending);
        let data = series(&revenue, Some(ValueFormat::dollars()), Orientation::Horizontal);
        Ok(self.describe(ViewKind::RevenueByCategory, data, ColorRule::single(PRIMARY_COLOR)))
    }

    fn revenue_by_season(&self) -> Result<ChartDescription, ChartError> {
        let mut revenue = grouped(self.table, CategoricalField::Season, NumericField::PurchaseAmount, Reduction::Sum)?;
        sort_entries(&mut revenue, SortDirection::Ascending);
        let data = series(&revenue, Some(ValueFormat::dollars()), Orientation::Vertical);
        Ok(self.describe(ViewKind::RevenueBySeason, data, ColorRule::palette(&COLORS_PALETTE)))
    }

    fn average_rating_by_category(&self) -> Result<ChartDescription, ChartError> {
        let mut ratings = grouped(self.table, CategoricalField::Category, NumericField::ReviewRating, Reduction::Mean)?;
        sort_entries(&mut ratings, SortDirection::Descending);

        let points = ratings
            .iter()
            .map(|(label, value)| DataPoint::new(label.clone(), *value).with_text(format!("{:.2}", value)))
            .collect();
        let data = ChartData::Series { points, orientation: Orientation::Vertical };

        let mut desc = self
            .describe(ViewKind::AverageRatingByCategory, data, ColorRule::single(PRIMARY_COLOR))
            .with_y_range(0.0, 5.0);

        if let Some(overall) = mean(&self.column(NumericField::ReviewRating)?) {
            desc = desc.with_reference_line(Axis::Y, overall, format!("Overall Avg: {:.2}", overall), ALERT_COLOR);
        }
        Ok(desc)
    }

    fn average_purchase_by_shipping(&self) -> Result<ChartDescription, ChartError> {
        let mut averages = grouped(
            self.table,
            CategoricalField::ShippingType,
            NumericField::PurchaseAmount,
            Reduction::Mean,
        )?;
        sort_entries(&mut averages, SortDirection::Descending);
        let data = series(&averages, Some(ValueFormat::cents()), Orientation::Vertical);
        Ok(self.describe(ViewKind::AveragePurchaseByShipping, data, ColorRule::palette(&COLORS_PALETTE)))
    }

    // ------------------------------------------------------------------------
    // Top-N
    // ------------------------------------------------------------------------

    fn top_counts(&self, view: ViewKind, field: CategoricalField, color: &str) -> Result<ChartDescription, ChartError> {
        let top = top_n(value_counts(self.table, field), TOP_ITEMS);
        let data = series(&top, Some(ValueFormat::count()), Orientation::Horizontal);
        Ok(self.describe(view, data, ColorRule::single(color)))
    }

    /// Top states by revenue sum, mean purchase, or (with no reduction) row count.
    fn top_states(&self, view: ViewKind, reduction: Option<Reduction>) -> Result<ChartDescription, ChartError> {
        let (entries, format) = match reduction {
            Some(reduction) => {
                let entries = grouped(self.table, CategoricalField::Location, NumericField::PurchaseAmount, reduction)?;
                let format = match reduction {
                    Reduction::Sum => ValueFormat::dollars(),
                    _ => ValueFormat::cents(),
                };
                (entries, format)
            }
            None => (value_counts(self.table, CategoricalField::Location), ValueFormat::count()),
        };

        let top = top_n(entries, TOP_STATES);
        let data = series(&top, Some(format), Orientation::Horizontal);
        Ok(self.describe(view, data, ColorRule::scale(&GRADIENT_COLORS)))
    }

    // ------------------------------------------------------------------------
    // Cross-tab
    // ------------------------------------------------------------------------

    fn cross_tab(
        &self,
        view: ViewKind,
        outer: CategoricalField,
        inner: CategoricalField,
        mode: BarMode,
        colors: ColorRule,
    ) -> Result<ChartDescription, ChartError> {
        let tab = crosstab(self.table, outer, inner);
        let series = tab
            .series
            .into_iter()
            .zip(tab.counts)
            .map(|(name, values)| Series { name, values })
            .collect();

        let data = ChartData::MultiSeries {
            categories: tab.categories,
            series,
            mode,
        };
        Ok(self.describe(view, data, colors))
    }

    fn category_treemap(&self) -> Result<ChartDescription, ChartError> {
        let grouping = Grouping::count(
            self.table,
            &[CategoricalField::Category, CategoricalField::ItemPurchased],
        );

        let roots = axis_labels(self.table, CategoricalField::Category)
            .into_iter()
            .map(|category| {
                let mut items: Vec<(String, f64)> = grouping
                    .keys()
                    .iter()
                    .filter(|key| key.at(0) == category)
                    .filter_map(|key| grouping.get(key).map(|acc| (key.at(1).to_string(), acc.count as f64)))
                    .collect();
                sort_entries(&mut items, SortDirection::Descending);

                let children: Vec<HierarchyNode> = items
                    .into_iter()
                    .map(|(label, value)| HierarchyNode { label, value, children: Vec::new() })
                    .collect();
                HierarchyNode {
                    label: category,
                    value: children.iter().map(|c| c.value).sum(),
                    children,
                }
            })
            .collect();

        let mut scale = GRADIENT_COLORS;
        scale.reverse();
        Ok(self.describe(
            ViewKind::CategoryTreemap,
            ChartData::Hierarchy { roots },
            ColorRule::scale(&scale),
        ))
    }

    // ------------------------------------------------------------------------
    // Distributional
    // ------------------------------------------------------------------------

    fn purchase_amount_distribution(&self) -> Result<ChartDescription, ChartError> {
        let amounts = self.column(NumericField::PurchaseAmount)?;
        let data = ChartData::Histogram { bins: histogram(&amounts, PURCHASE_AMOUNT_BINS) };
        let desc = self.describe(ViewKind::PurchaseAmountDistribution, data, ColorRule::single(PRIMARY_COLOR));

        Ok(with_center_lines(desc, &amounts, |v| format_value(v, ValueFormat::cents())))
    }

    fn previous_purchases_distribution(&self) -> Result<ChartDescription, ChartError> {
        let counts = self.column(NumericField::PreviousPurchases)?;
        let data = ChartData::Histogram { bins: histogram(&counts, PREVIOUS_PURCHASES_BINS) };
        let desc = self.describe(ViewKind::PreviousPurchasesDistribution, data, ColorRule::single(SECONDARY_COLOR));

        Ok(with_center_lines(desc, &counts, |v| format!("{:.1}", v)))
    }

    // ------------------------------------------------------------------------
    // Per-category boxplots
    // ------------------------------------------------------------------------

    fn purchase_by_age_group(&self) -> Result<ChartDescription, ChartError> {
        let mut groups: Vec<Distribution> = AGE_GROUP_ORDER
            .iter()
            .map(|group| Distribution { name: group.to_string(), values: Vec::new() })
            .collect();

        for record in self.table.rows() {
            if let Some(index) = engine::canonical_position(&AGE_GROUP_ORDER, &record.age_group) {
                groups[index].values.push(checked_value(NumericField::PurchaseAmount, record)?);
            }
        }

        let data = ChartData::Distributions { groups };
        Ok(self.describe(ViewKind::PurchaseByAgeGroup, data, ColorRule::palette(&COLORS_PALETTE)))
    }

    fn discount_impact(&self) -> Result<ChartDescription, ChartError> {
        let labels = axis_labels(self.table, CategoricalField::DiscountApplied);
        let mut groups = Vec::with_capacity(labels.len());

        for label in labels {
            let values = self
                .table
                .rows()
                .filter(|r| r.discount_applied == label)
                .map(|r| checked_value(NumericField::PurchaseAmount, r))
                .collect::<Result<Vec<f64>, ChartError>>()?;
            groups.push(Distribution { name: format!("Discount: {}", label), values });
        }

        let colors = ColorRule::by_label(&[("Discount: Yes", PRIMARY_COLOR)], SECONDARY_COLOR);
        Ok(self.describe(ViewKind::DiscountImpact, ChartData::Distributions { groups }, colors))
    }

    fn rating_vs_purchase(&self) -> Result<ChartDescription, ChartError> {
        let mut groups: Vec<Distribution> = RATING_BUCKETS
            .iter()
            .map(|(_, _, label)| Distribution { name: label.to_string(), values: Vec::new() })
            .collect();

        for record in self.table.rows() {
            let rating = checked_value(NumericField::ReviewRating, record)?;
            if let Some(index) = rating_bucket(rating).and_then(|b| RATING_BUCKETS.iter().position(|(_, _, l)| *l == b)) {
                groups[index].values.push(checked_value(NumericField::PurchaseAmount, record)?);
            }
        }

        let data = ChartData::Distributions { groups };
        Ok(self.describe(ViewKind::RatingVsPurchase, data, ColorRule::palette(&COLORS_PALETTE)))
    }

    // ------------------------------------------------------------------------
    // Advanced
    // ------------------------------------------------------------------------

    fn correlation_heatmap(&self) -> Result<ChartDescription, ChartError> {
        let columns = CORRELATION_FIELDS
            .iter()
            .map(|f| self.column(*f))
            .collect::<Result<Vec<Vec<f64>>, ChartError>>()?;

        let n = columns.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = if i == j {
                    // A constant column has no defined self-correlation
                    pearson(&columns[i], &columns[i]).map(|_| 1.0)
                } else {
                    pearson(&columns[i], &columns[j]).map(|r| round_to(r, 2))
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        let labels = CORRELATION_FIELDS.iter().map(|f| f.column_name().to_string()).collect();
        let data = ChartData::Matrix { labels, values };
        Ok(self.describe(
            ViewKind::CorrelationHeatmap,
            data,
            ColorRule::scale(&["#f0e6f5", PRIMARY_COLOR, "#4a1f52"]),
        ))
    }

    /// Purchase amount against `x_field`, one group (with OLS trend) per value of `group_field`.
    fn scatter(
        &self,
        view: ViewKind,
        group_field: CategoricalField,
        x_field: NumericField,
        colors: ColorRule,
    ) -> Result<ChartDescription, ChartError> {
        let labels = axis_labels(self.table, group_field);
        let mut groups = Vec::with_capacity(labels.len());

        for label in labels {
            let mut x = Vec::new();
            let mut y = Vec::new();
            for record in self.table.rows().filter(|r| group_field.value(r) == label) {
                x.push(checked_value(x_field, record)?);
                y.push(checked_value(NumericField::PurchaseAmount, record)?);
            }
            let trend = linear_fit(&x, &y);
            groups.push(ScatterGroup { name: label, x, y, trend });
        }

        Ok(self.describe(view, ChartData::Scatter { groups }, colors))
    }

    fn age_group_metrics(&self) -> Result<ChartDescription, ChartError> {
        let purchase = grouped(self.table, CategoricalField::AgeGroup, NumericField::PurchaseAmount, Reduction::Mean)?;
        let rating = grouped(self.table, CategoricalField::AgeGroup, NumericField::ReviewRating, Reduction::Mean)?;
        let previous = grouped(self.table, CategoricalField::AgeGroup, NumericField::PreviousPurchases, Reduction::Mean)?;
        let counts = value_counts(self.table, CategoricalField::AgeGroup);

        let panels = vec![
            metric_panel("Avg Purchase Amount", PRIMARY_COLOR, &purchase, |v| format!("${:.2}", v)),
            metric_panel("Avg Rating", SECONDARY_COLOR, &rating, |v| format!("{:.2}", v)),
            metric_panel("Avg Previous Purchases", ACCENT_COLOR, &previous, |v| format!("{:.1}", v)),
            Panel {
                title: "Customer Count".to_string(),
                color: DEEP_COLOR.to_string(),
                points: reindex(&counts, &AGE_GROUP_ORDER)
                    .into_iter()
                    .map(|(label, count)| {
                        DataPoint::new(label, count).with_text(format_value(count, ValueFormat::count()))
                    })
                    .collect(),
            },
        ];

        let categories = AGE_GROUP_ORDER.iter().map(|s| s.to_string()).collect();
        let data = ChartData::Panels { categories, panels };
        Ok(self.describe(ViewKind::AgeGroupMetrics, data, ColorRule::palette(&[PRIMARY_COLOR, SECONDARY_COLOR, ACCENT_COLOR, DEEP_COLOR])))
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn series(entries: &[(String, f64)], format: Option<ValueFormat>, orientation: Orientation) -> ChartData {
    let points = entries
        .iter()
        .map(|(label, value)| {
            let point = DataPoint::new(label.clone(), *value);
            match format {
                Some(format) => point.with_text(format_value(*value, format)),
                None => point,
            }
        })
        .collect();
    ChartData::Series { points, orientation }
}

fn subscription_colors() -> ColorRule {
    ColorRule::by_label(&[("Yes", PRIMARY_COLOR), ("No", SECONDARY_COLOR)], ACCENT_COLOR)
}

/// Adds mean and median lines on the x axis. Nothing is added for empty input.
fn with_center_lines(desc: ChartDescription, values: &[f64], fmt: impl Fn(f64) -> String) -> ChartDescription {
    match (mean(values), median(values)) {
        (Some(m), Some(med)) => desc
            .with_reference_line(Axis::X, m, format!("Mean: {}", fmt(m)), ALERT_COLOR)
            .with_reference_line(Axis::X, med, format!("Median: {}", fmt(med)), SUCCESS_COLOR),
        _ => desc,
    }
}

/// One panel in canonical age order. Missing groups show 0 with "N/A".
fn metric_panel(
    title: &str,
    color: &str,
    entries: &[(String, f64)],
    fmt: impl Fn(f64) -> String,
) -> Panel {
    let points = AGE_GROUP_ORDER
        .iter()
        .map(|group| match entries.iter().find(|(label, _)| label == group) {
            Some((_, value)) => {
                let rounded = round_to(*value, 2);
                DataPoint::new(*group, rounded).with_text(fmt(rounded))
            }
            None => DataPoint::new(*group, 0.0).with_text("N/A"),
        })
        .collect();

    Panel {
        title: title.to_string(),
        color: color.to_string(),
        points,
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Filters `table` by `spec` and builds `view` over the result.
pub fn build_view(
    table: &Table,
    view: ViewKind,
    spec: &FilterSpec,
    ctx: &RenderContext,
) -> Result<ChartDescription, ChartError> {
    let filtered = apply_filter(table, spec);
    log::debug!("Building view '{}' over {} rows", view.id(), filtered.len());
    ChartBuilder::new(&filtered, ctx).build(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::TransactionRecord;

    fn create_test_record(id: &str, amount: f64, age_group: &str, rating: f64) -> TransactionRecord {
        let mut r = TransactionRecord::new(id, amount);
        r.age_group = age_group.to_string();
        r.review_rating = rating;
        r.category = "Clothing".to_string();
        r.item_purchased = format!("Item {}", id);
        r.discount_applied = (if amount > 20.0 { "Yes" } else { "No" }).to_string();
        r
    }

    fn create_test_table() -> Table {
        Table::new(vec![
            create_test_record("1", 10.0, "Adult", 2.0),
            create_test_record("2", 20.0, "Senior", 3.5),
            create_test_record("3", 30.0, "Adult", 4.1),
            create_test_record("4", 40.0, "Senior", 5.0),
        ])
    }

    fn build(table: &Table, view: ViewKind) -> ChartDescription {
        ChartBuilder::new(table, &RenderContext::default()).build(view).unwrap()
    }

    #[test]
    fn test_rating_bucket_boundaries() {
        assert_eq!(rating_bucket(2.0), Some("1-2"));
        assert_eq!(rating_bucket(2.01), Some("2-3"));
        assert_eq!(rating_bucket(5.0), Some("4-5"));
        assert_eq!(rating_bucket(0.0), None);
        assert_eq!(rating_bucket(5.1), None);
    }

    #[test]
    fn test_age_group_counts_canonical() {
        let desc = build(&create_test_table(), ViewKind::CustomerByAgeGroup);
        match desc.data {
            ChartData::Series { points, .. } => {
                let pairs: Vec<(&str, f64)> = points.iter().map(|p| (p.label.as_str(), p.value)).collect();
                assert_eq!(
                    pairs,
                    vec![("Young Adult", 0.0), ("Adult", 2.0), ("Middle-aged", 0.0), ("Senior", 2.0)]
                );
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_rating_vs_purchase_buckets() {
        let desc = build(&create_test_table(), ViewKind::RatingVsPurchase);
        match desc.data {
            ChartData::Distributions { groups } => {
                let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
                assert_eq!(names, vec!["1-2", "2-3", "3-4", "4-5"]);
                assert_eq!(groups[0].values, vec![10.0]);
                assert!(groups[1].values.is_empty());
                assert_eq!(groups[2].values, vec![20.0]);
                assert_eq!(groups[3].values, vec![30.0, 40.0]);
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_histogram_reference_lines() {
        let desc = build(&create_test_table(), ViewKind::PurchaseAmountDistribution);
        assert_eq!(desc.reference_lines.len(), 2);
        assert_eq!(desc.reference_lines[0].label, "Mean: $25.00");
        assert_eq!(desc.reference_lines[1].label, "Median: $25.00");
    }

    #[test]
    fn test_revenue_by_category_labels() {
        let desc = build(&create_test_table(), ViewKind::RevenueByCategory);
        match desc.data {
            ChartData::Series { points, orientation } => {
                assert_eq!(orientation, Orientation::Horizontal);
                assert_eq!(points[0].text.as_deref(), Some("$100"));
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_discount_impact_groups_by_label() {
        let desc = build(&create_test_table(), ViewKind::DiscountImpact);
        match desc.data {
            ChartData::Distributions { groups } => {
                assert_eq!(groups[0].name, "Discount: No");
                assert_eq!(groups[0].values, vec![10.0, 20.0]);
                assert_eq!(groups[1].name, "Discount: Yes");
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_age_group_metrics_missing_groups() {
        let desc = build(&create_test_table(), ViewKind::AgeGroupMetrics);
        match desc.data {
            ChartData::Panels { panels, categories } => {
                assert_eq!(categories.len(), 4);
                assert_eq!(panels.len(), 4);
                let avg = &panels[0].points;
                assert_eq!(avg[0].text.as_deref(), Some("N/A"));
                assert_eq!(avg[1].value, 20.0);
                assert_eq!(avg[1].text.as_deref(), Some("$20.00"));
                assert_eq!(panels[3].points[3].value, 2.0);
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_treemap_parent_sums_children() {
        let desc = build(&create_test_table(), ViewKind::CategoryTreemap);
        match desc.data {
            ChartData::Hierarchy { roots } => {
                assert_eq!(roots.len(), 1);
                assert_eq!(roots[0].label, "Clothing");
                assert_eq!(roots[0].value, 4.0);
                assert_eq!(roots[0].children.len(), 4);
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_value_fails_view() {
        let table = Table::new(vec![create_test_record("1", f64::INFINITY, "Adult", 3.0)]);
        let err = ChartBuilder::new(&table, &RenderContext::default())
            .build(ViewKind::RevenueByCategory)
            .unwrap_err();
        assert!(matches!(err, ChartError::Aggregation { .. }));
    }
}
