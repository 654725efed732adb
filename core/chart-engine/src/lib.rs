//! FILENAME: core/chart-engine/src/lib.rs
//! Filtering, KPI and chart-construction layer of the customer analytics dashboard.
//!
//! This crate takes the loaded transaction table from `engine` and produces
//! declarative chart descriptions. It never draws anything.
//!
//! Layers:
//! - `definition`: What the caller asks for (filter spec, view kinds, render context)
//! - `aggregate` / `stats`: How values are grouped and summarized
//! - `view`: What the rendering collaborator receives
//! - `engine`: One builder per view
//! - `dashboard`: Options, KPIs and full renders for the UI shell

pub mod aggregate;
pub mod dashboard;
pub mod definition;
pub mod engine;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod options;
pub mod stats;
pub mod view;

pub use dashboard::{Dashboard, DashboardRender, DashboardWarning, RenderMode};
pub use definition::*;
pub use crate::engine::{build_view, rating_bucket, ChartBuilder, CORRELATION_FIELDS, RATING_BUCKETS};
pub use error::ChartError;
pub use filter::{apply_constraints, apply_filter};
pub use kpi::{compute_kpis, KpiDisplay, Kpis};
pub use options::{field_options, FilterOptions};
pub use view::*;
