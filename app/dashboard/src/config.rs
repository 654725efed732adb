//! FILENAME: app/dashboard/src/config.rs
// PURPOSE: Command-line configuration: data source, filter selections, theme
// and which outputs to print.

use chart_engine::{ChartError, FilterSpec, RenderContext, RenderMode, Section, Theme, ViewKind, ALL_SENTINEL};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/customer_behavior.csv";

#[derive(Parser, Debug, Clone)]
#[command(name = "dashboard")]
#[command(about = "Customer behavior analytics: KPIs, filter options and chart descriptions as JSON")]
#[command(version)]
pub struct Cli {
    /// Dataset location (.csv or .xlsx)
    #[arg(long, env = "DASHBOARD_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    #[arg(long, default_value = ALL_SENTINEL)]
    pub subscription_status: String,

    #[arg(long, default_value = ALL_SENTINEL)]
    pub gender: String,

    #[arg(long, default_value = ALL_SENTINEL)]
    pub category: String,

    #[arg(long, default_value = ALL_SENTINEL)]
    pub shipping_type: String,

    #[arg(long, default_value = ALL_SENTINEL)]
    pub age_group: String,

    #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
    pub theme: ThemeArg,

    /// Print the selectable values of each filter
    #[arg(long)]
    pub options: bool,

    /// Print the KPI cards
    #[arg(long)]
    pub kpis: bool,

    /// Render one view by id, e.g. `revenue_by_category` (repeatable)
    #[arg(long = "view")]
    pub views: Vec<String>,

    /// Render every view of a section by id, e.g. `geographic_analysis`
    #[arg(long)]
    pub section: Option<String>,

    /// Build views concurrently
    #[arg(long)]
    pub parallel: bool,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

impl Cli {
    /// The five raw selections; `All` leaves a field unconstrained.
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec::from_selection(
            &self.subscription_status,
            &self.gender,
            &self.category,
            &self.shipping_type,
            &self.age_group,
        )
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.theme.into())
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.parallel {
            RenderMode::Parallel
        } else {
            RenderMode::Sequential
        }
    }

    /// Views to render: the section's views, then any `--view` not already listed.
    /// `None` when neither flag was given.
    pub fn selected_views(&self) -> Result<Option<Vec<ViewKind>>, ChartError> {
        if self.section.is_none() && self.views.is_empty() {
            return Ok(None);
        }

        let mut selected = match &self.section {
            Some(id) => Section::from_id(id)?.views(),
            None => Vec::new(),
        };
        for id in &self.views {
            let view = ViewKind::from_id(id)?;
            if !selected.contains(&view) {
                selected.push(view);
            }
        }
        Ok(Some(selected))
    }

    /// With no output flag at all, the whole dashboard is rendered.
    pub fn renders_everything(&self) -> bool {
        !self.options && !self.kpis && self.section.is_none() && self.views.is_empty()
    }
}
