//! FILENAME: core/chart-engine/src/view.rs
//! Chart Description - The renderable output handed to the plotting collaborator.
//!
//! A description carries aggregated data plus presentation metadata (title,
//! axis titles, chart kind, color rule). It never contains pixels or markup;
//! drawing is entirely the collaborator's job.

use serde::{Deserialize, Serialize};
use crate::definition::{BarMode, ChartKind, Orientation, RenderContext, ViewKind};
use crate::stats::{HistogramBin, TrendLine};

// ============================================================================
// PALETTE
// ============================================================================

pub const PRIMARY_COLOR: &str = "#7b3785";
pub const SECONDARY_COLOR: &str = "#a855b8";
pub const ACCENT_COLOR: &str = "#d8b4e2";
pub const DEEP_COLOR: &str = "#6b2d73";
pub const COLORS_PALETTE: [&str; 5] = ["#7b3785", "#a855b8", "#d8b4e2", "#6b2d73", "#8e4a94"];
pub const GRADIENT_COLORS: [&str; 5] = ["#4a1f52", "#7b3785", "#a855b8", "#d8b4e2", "#f0e6f5"];

pub const ALERT_COLOR: &str = "#e74c3c";
pub const WARNING_COLOR: &str = "#f39c12";
pub const SUCCESS_COLOR: &str = "#27ae60";

/// How the collaborator should pick mark colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorRule {
    /// One color for every mark.
    Single(String),
    /// Colors assigned by mark position, cycling.
    Palette(Vec<String>),
    /// Colors keyed by label; unlisted labels use `fallback`.
    ByLabel {
        colors: Vec<(String, String)>,
        fallback: String,
    },
    /// Numeric label below `low_below` -> `low`, below `mid_below` -> `mid`, else `high`.
    RatingThresholds {
        low_below: f64,
        mid_below: f64,
        low: String,
        mid: String,
        high: String,
    },
    /// A continuous scale from smallest to largest value.
    ContinuousScale(Vec<String>),
}

impl ColorRule {
    pub fn single(color: &str) -> Self {
        ColorRule::Single(color.to_string())
    }

    pub fn palette(colors: &[&str]) -> Self {
        ColorRule::Palette(colors.iter().map(|c| c.to_string()).collect())
    }

    pub fn by_label(colors: &[(&str, &str)], fallback: &str) -> Self {
        ColorRule::ByLabel {
            colors: colors
                .iter()
                .map(|(label, color)| (label.to_string(), color.to_string()))
                .collect(),
            fallback: fallback.to_string(),
        }
    }

    pub fn scale(colors: &[&str]) -> Self {
        ColorRule::ContinuousScale(colors.iter().map(|c| c.to_string()).collect())
    }

    /// Resolves the color for a mark. Continuous scales resolve to their
    /// midpoint since the position depends on the value range.
    pub fn color_for(&self, label: &str, position: usize) -> Option<&str> {
        match self {
            ColorRule::Single(color) => Some(color.as_str()),
            ColorRule::Palette(colors) => {
                if colors.is_empty() {
                    None
                } else {
                    Some(colors[position % colors.len()].as_str())
                }
            }
            ColorRule::ByLabel { colors, fallback } => Some(
                colors
                    .iter()
                    .find(|(l, _)| l == label)
                    .map(|(_, c)| c.as_str())
                    .unwrap_or(fallback.as_str()),
            ),
            ColorRule::RatingThresholds { low_below, mid_below, low, mid, high } => {
                let rating: f64 = label.parse().ok()?;
                if rating < *low_below {
                    Some(low.as_str())
                } else if rating < *mid_below {
                    Some(mid.as_str())
                } else {
                    Some(high.as_str())
                }
            }
            ColorRule::ContinuousScale(colors) => colors.get(colors.len() / 2).map(|c| c.as_str()),
        }
    }
}

// ============================================================================
// PAYLOAD
// ============================================================================

/// One labelled value, with optional pre-formatted display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
    pub text: Option<String>,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        DataPoint {
            label: label.into(),
            value,
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A named series of values aligned to shared categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Raw values for one box; quartiles are left to the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterGroup {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// OLS fit over this group's points, when defined.
    pub trend: Option<TrendLine>,
}

/// A treemap node. Leaf values are counts; a parent's value is the sum of its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub label: String,
    pub value: f64,
    pub children: Vec<HierarchyNode>,
}

/// One single-series panel of a multi-panel chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub color: String,
    pub points: Vec<DataPoint>,
}

/// The aggregated data of a chart, shaped by aggregation pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    /// (label, value) pairs: bars, pie slices.
    Series {
        points: Vec<DataPoint>,
        orientation: Orientation,
    },
    /// Cross-tab: one series per inner value over shared categories.
    MultiSeries {
        categories: Vec<String>,
        series: Vec<Series>,
        mode: BarMode,
    },
    Histogram {
        bins: Vec<HistogramBin>,
    },
    /// Raw values per bucket, for box plots.
    Distributions {
        groups: Vec<Distribution>,
    },
    /// Square matrix over `labels`. `None` where undefined (constant input).
    Matrix {
        labels: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
    },
    Scatter {
        groups: Vec<ScatterGroup>,
    },
    Hierarchy {
        roots: Vec<HierarchyNode>,
    },
    Panels {
        categories: Vec<String>,
        panels: Vec<Panel>,
    },
    /// The builder failed; the view renders a "no data" state.
    Unavailable {
        reason: String,
    },
}

impl ChartData {
    /// True when the chart has nothing to draw (only zeros, or no marks at all).
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Series { points, .. } => points.iter().all(|p| p.value == 0.0),
            ChartData::MultiSeries { series, .. } => {
                series.iter().all(|s| s.values.iter().all(|v| *v == 0.0))
            }
            ChartData::Histogram { bins } => bins.iter().all(|b| b.count == 0),
            ChartData::Distributions { groups } => groups.iter().all(|g| g.values.is_empty()),
            ChartData::Matrix { values, .. } => values.iter().flatten().all(|v| v.is_none()),
            ChartData::Scatter { groups } => groups.iter().all(|g| g.x.is_empty()),
            ChartData::Hierarchy { roots } => roots.is_empty(),
            ChartData::Panels { panels, .. } => {
                panels.iter().all(|p| p.points.iter().all(|pt| pt.value == 0.0))
            }
            ChartData::Unavailable { .. } => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// A dashed annotation line (mean, median, overall average).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub axis: Axis,
    pub value: f64,
    pub label: String,
    pub color: String,
}

// ============================================================================
// CHART DESCRIPTION
// ============================================================================

/// Everything the collaborator needs to draw one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub view: ViewKind,
    pub kind: ChartKind,
    pub title: String,
    pub title_color: String,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub legend_title: Option<String>,
    pub data: ChartData,
    pub reference_lines: Vec<ReferenceLine>,
    pub colors: ColorRule,
    /// Fixed value-axis range, when the view pins one.
    pub y_range: Option<(f64, f64)>,
}

impl ChartDescription {
    /// Creates a description with the view's static metadata.
    pub fn new(view: ViewKind, ctx: &RenderContext, data: ChartData, colors: ColorRule) -> Self {
        let meta = view.meta();
        ChartDescription {
            view,
            kind: meta.kind,
            title: meta.title.to_string(),
            title_color: ctx.title_color().to_string(),
            x_title: meta.x_title.map(str::to_string),
            y_title: meta.y_title.map(str::to_string),
            legend_title: meta.legend_title.map(str::to_string),
            data,
            reference_lines: Vec::new(),
            colors,
            y_range: None,
        }
    }

    /// The "no data" description used when a builder fails.
    pub fn unavailable(view: ViewKind, ctx: &RenderContext, reason: impl Into<String>) -> Self {
        ChartDescription::new(
            view,
            ctx,
            ChartData::Unavailable { reason: reason.into() },
            ColorRule::single(PRIMARY_COLOR),
        )
    }

    pub fn with_reference_line(mut self, axis: Axis, value: f64, label: String, color: &str) -> Self {
        self.reference_lines.push(ReferenceLine {
            axis,
            value,
            label,
            color: color.to_string(),
        });
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.data, ChartData::Unavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Theme;

    #[test]
    fn test_new_uses_view_metadata() {
        let ctx = RenderContext::new(Theme::Dark);
        let desc = ChartDescription::new(
            ViewKind::TopItems,
            &ctx,
            ChartData::Series { points: vec![], orientation: Orientation::Horizontal },
            ColorRule::single(PRIMARY_COLOR),
        );
        assert_eq!(desc.title, "Top 10 Items Purchased");
        assert_eq!(desc.title_color, "white");
        assert_eq!(desc.x_title.as_deref(), Some("Number of Purchases"));
        assert_eq!(desc.y_title.as_deref(), Some("Item"));
        assert!(desc.is_empty());
    }

    #[test]
    fn test_zero_series_is_empty() {
        let data = ChartData::Series {
            points: vec![DataPoint::new("Adult", 0.0), DataPoint::new("Senior", 0.0)],
            orientation: Orientation::Vertical,
        };
        assert!(data.is_empty());

        let data = ChartData::Series {
            points: vec![DataPoint::new("Adult", 2.0)],
            orientation: Orientation::Vertical,
        };
        assert!(!data.is_empty());
    }

    #[test]
    fn test_color_rules() {
        let rating = ColorRule::RatingThresholds {
            low_below: 3.0,
            mid_below: 4.0,
            low: ALERT_COLOR.to_string(),
            mid: WARNING_COLOR.to_string(),
            high: SUCCESS_COLOR.to_string(),
        };
        assert_eq!(rating.color_for("2.9", 0), Some(ALERT_COLOR));
        assert_eq!(rating.color_for("3.5", 0), Some(WARNING_COLOR));
        assert_eq!(rating.color_for("4", 0), Some(SUCCESS_COLOR));

        let by_label = ColorRule::by_label(&[("Yes", PRIMARY_COLOR)], SECONDARY_COLOR);
        assert_eq!(by_label.color_for("Yes", 3), Some(PRIMARY_COLOR));
        assert_eq!(by_label.color_for("No", 0), Some(SECONDARY_COLOR));

        let palette = ColorRule::palette(&COLORS_PALETTE);
        assert_eq!(palette.color_for("x", 6), Some(COLORS_PALETTE[1]));
    }

    #[test]
    fn test_description_serializes() {
        let ctx = RenderContext::default();
        let desc = ChartDescription::unavailable(ViewKind::CorrelationHeatmap, &ctx, "boom");
        let json = serde_json::to_string(&desc).unwrap();
        assert!(json.contains("\"Unavailable\""));
        let back: ChartDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }
}
