//! FILENAME: app/dashboard/src/report.rs
// PURPOSE: Turns a loaded dashboard plus the command line into one JSON document.

use crate::config::Cli;
use chart_engine::{Dashboard, DashboardRender, FilterOptions, FilterSpec, KpiDisplay, Kpis};
use serde::{Deserialize, Serialize};

/// Everything requested on the command line. Sections not asked for are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub filter: FilterSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<FilterOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpis: Option<Kpis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpi_display: Option<KpiDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<DashboardRender>,
}

pub fn build_report(dashboard: &Dashboard, cli: &Cli) -> anyhow::Result<Report> {
    let spec = cli.filter_spec();
    let ctx = cli.render_context();
    let mode = cli.render_mode();

    let options = cli.options.then(|| dashboard.options());

    let (kpis, kpi_display) = if cli.kpis {
        let kpis = dashboard.kpis(&spec)?;
        let display = kpis.display();
        (Some(kpis), Some(display))
    } else {
        (None, None)
    };

    let render = match cli.selected_views()? {
        Some(views) => Some(dashboard.render_views(&views, &spec, &ctx, mode)),
        None if cli.renders_everything() => Some(dashboard.render(&spec, &ctx, mode)),
        None => None,
    };

    Ok(Report {
        filter: spec,
        options,
        kpis,
        kpi_display,
        render,
    })
}

pub fn to_json(report: &Report, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}
