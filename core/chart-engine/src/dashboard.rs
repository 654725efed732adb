//! FILENAME: core/chart-engine/src/dashboard.rs
//! PURPOSE: Facade used by the UI shell: options, KPIs and full renders.
//! CONTEXT: The loaded table is shared read-only by every view of a render.
//! Each view re-filters independently, so views can be built sequentially or
//! fanned out across threads with identical results. Builder failures and
//! empty filter results are absorbed here and reported as values.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use engine::Table;
use crate::definition::{FilterSpec, RenderContext, Section, ViewKind};
use crate::engine::build_view;
use crate::error::ChartError;
use crate::filter::apply_filter;
use crate::kpi::{compute_kpis, KpiDisplay, Kpis};
use crate::options::FilterOptions;
use crate::view::ChartDescription;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    Sequential,
    /// Builds views concurrently on the rayon pool and joins before returning.
    Parallel,
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Sequential
    }
}

/// Non-fatal conditions surfaced alongside a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DashboardWarning {
    /// The filter matched no rows; every view renders its "no data" state.
    EmptyResult { filter: FilterSpec },
    /// A view could not be built and was replaced by an unavailable description.
    ViewUnavailable { view: ViewKind, reason: String },
}

/// Everything one filter-selection event produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRender {
    pub filter: FilterSpec,
    pub kpis: Kpis,
    pub kpi_display: KpiDisplay,
    pub charts: Vec<ChartDescription>,
    pub warnings: Vec<DashboardWarning>,
}

/// The analytics dashboard over one loaded dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: Table,
}

impl Dashboard {
    pub fn new(table: Table) -> Self {
        Dashboard { table }
    }

    /// Selectable values for each filter, computed over the full dataset.
    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_table(&self.table)
    }

    /// KPIs for the filtered table.
    pub fn kpis(&self, spec: &FilterSpec) -> Result<Kpis, ChartError> {
        compute_kpis(&apply_filter(&self.table, spec))
    }

    /// Builds one view. Errors propagate to the caller.
    pub fn try_view(
        &self,
        view: ViewKind,
        spec: &FilterSpec,
        ctx: &RenderContext,
    ) -> Result<ChartDescription, ChartError> {
        build_view(&self.table, view, spec, ctx)
    }

    /// Builds one view, replacing a failure with an unavailable description.
    pub fn view(&self, view: ViewKind, spec: &FilterSpec, ctx: &RenderContext) -> ChartDescription {
        match self.try_view(view, spec, ctx) {
            Ok(desc) => desc,
            Err(e) => {
                log::error!("View '{}' unavailable: {}", view.id(), e);
                ChartDescription::unavailable(view, ctx, e.to_string())
            }
        }
    }

    /// Renders KPIs plus every view, in `ViewKind::ALL` order.
    pub fn render(&self, spec: &FilterSpec, ctx: &RenderContext, mode: RenderMode) -> DashboardRender {
        self.render_views(&ViewKind::ALL, spec, ctx, mode)
    }

    /// Renders KPIs plus the views of one section.
    pub fn render_section(
        &self,
        section: Section,
        spec: &FilterSpec,
        ctx: &RenderContext,
        mode: RenderMode,
    ) -> DashboardRender {
        self.render_views(&section.views(), spec, ctx, mode)
    }

    /// Renders KPIs plus `views`, preserving their order in both modes.
    pub fn render_views(
        &self,
        views: &[ViewKind],
        spec: &FilterSpec,
        ctx: &RenderContext,
        mode: RenderMode,
    ) -> DashboardRender {
        let mut warnings = Vec::new();

        let filtered = apply_filter(&self.table, spec);
        if filtered.is_empty() {
            log::warn!("Filter {:?} matched no rows", spec.constraints());
            warnings.push(DashboardWarning::EmptyResult { filter: spec.clone() });
        }

        let kpis = match compute_kpis(&filtered) {
            Ok(kpis) => kpis,
            Err(e) => {
                log::error!("KPIs unavailable: {}", e);
                Kpis {
                    total_revenue: 0.0,
                    average_order_value: None,
                    total_customers: 0,
                    average_rating: None,
                    transactions: filtered.len(),
                }
            }
        };

        let charts: Vec<ChartDescription> = match mode {
            RenderMode::Sequential => views.iter().map(|v| self.view(*v, spec, ctx)).collect(),
            RenderMode::Parallel => views.par_iter().map(|v| self.view(*v, spec, ctx)).collect(),
        };

        for chart in &charts {
            if let crate::view::ChartData::Unavailable { reason } = &chart.data {
                warnings.push(DashboardWarning::ViewUnavailable {
                    view: chart.view,
                    reason: reason.clone(),
                });
            }
        }

        log::info!(
            "Rendered {} views over {} rows ({:?})",
            charts.len(),
            filtered.len(),
            mode
        );

        DashboardRender {
            filter: spec.clone(),
            kpi_display: kpis.display(),
            kpis,
            charts,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::TransactionRecord;

    fn create_test_dashboard() -> Dashboard {
        let records = [("1", 10.0, "Male"), ("2", 20.0, "Female"), ("1", 30.0, "Male")]
            .iter()
            .map(|(id, amount, gender)| {
                let mut r = TransactionRecord::new(*id, *amount);
                r.gender = gender.to_string();
                r.review_rating = 4.0;
                r
            })
            .collect();
        Dashboard::new(Table::new(records))
    }

    #[test]
    fn test_render_covers_every_view_in_order() {
        let dashboard = create_test_dashboard();
        let render = dashboard.render(&FilterSpec::unconstrained(), &RenderContext::default(), RenderMode::Sequential);

        let views: Vec<ViewKind> = render.charts.iter().map(|c| c.view).collect();
        assert_eq!(views, ViewKind::ALL.to_vec());
        assert!(render.warnings.is_empty());
        assert_eq!(render.kpis.total_customers, 2);
    }

    #[test]
    fn test_empty_filter_warns() {
        let dashboard = create_test_dashboard();
        let spec = FilterSpec::from_selection("All", "Other", "All", "All", "All");
        let render = dashboard.render(&spec, &RenderContext::default(), RenderMode::Sequential);

        assert_eq!(render.warnings, vec![DashboardWarning::EmptyResult { filter: spec }]);
        assert_eq!(render.kpi_display.average_order_value, "N/A");
    }

    #[test]
    fn test_failed_view_becomes_unavailable() {
        let mut bad = TransactionRecord::new("9", f64::NAN);
        bad.gender = "Male".to_string();
        let dashboard = Dashboard::new(Table::new(vec![bad]));

        let desc = dashboard.view(ViewKind::RevenueByCategory, &FilterSpec::unconstrained(), &RenderContext::default());
        assert!(desc.is_unavailable());

        let render = dashboard.render_section(
            Section::Overview,
            &FilterSpec::unconstrained(),
            &RenderContext::default(),
            RenderMode::Sequential,
        );
        assert!(render
            .warnings
            .iter()
            .any(|w| matches!(w, DashboardWarning::ViewUnavailable { view: ViewKind::RevenueByCategory, .. })));
    }
}
