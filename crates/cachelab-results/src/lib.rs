//! Result filtering, aggregation, and chart description building.
//!
//! The execution subsystem hands back a [`ResultStore`] pairing each
//! experiment's parameter tree with its recorded metrics; this crate turns
//! filtered subsets of that store into plot-ready statistical series and
//! assembles renderer-agnostic [`ChartDescriptor`] values.

mod aggregate;
mod plot;
mod stats;
mod store;

pub use aggregate::{reduce_all, reduce_series, DataPoint, SeriesData, SeriesSpec, XAxis};
pub use plot::{build_chart, ChartDescriptor, ChartKind, ChartSeries, PlotSpec};
pub use stats::{confidence_half_width, mean, sample_std_dev};
pub use store::{Condition, ResultRecord, ResultStore};
