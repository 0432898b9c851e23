//! Declarative chart descriptions handed to the rendering collaborator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{reduce_all, DataPoint, SeriesSpec, XAxis};
use crate::store::{Condition, ResultStore};

/// Mark geometry requested from the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Line chart with one line per series.
    #[default]
    Lines,
    /// Grouped bar chart with one bar group per x value.
    Bars,
}

/// Declarative plot request: what to aggregate and how to label it.
///
/// Style and legend maps are keyed by series key and passed through to the
/// descriptor unchanged; their string contents are renderer vocabulary this
/// crate does not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    /// Chart title.
    pub title: String,
    /// X-axis label.
    pub xlabel: String,
    /// Y-axis label.
    pub ylabel: String,
    /// Mark geometry.
    #[serde(default)]
    pub kind: ChartKind,
    /// X-axis parameter and requested values.
    pub xaxis: XAxis,
    /// Constraints applied to every series in addition to its own.
    #[serde(default)]
    pub filter: Condition,
    /// Series definitions.
    pub series: Vec<SeriesSpec>,
    /// Ask the renderer to draw confidence-interval error bars.
    #[serde(default)]
    pub errorbar: bool,
    /// Keep series with missing points as gaps instead of dropping them.
    #[serde(default)]
    pub plot_empty: bool,
    /// Renderer hint for legend placement.
    #[serde(default)]
    pub legend_loc: Option<String>,
    /// Style strings keyed by series key.
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
    /// Legend labels keyed by series key.
    #[serde(default)]
    pub legend: BTreeMap<String, String>,
}

/// One reduced series with its resolved presentation hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Key of the series spec that produced this series.
    pub key: String,
    /// Legend label; falls back to the key when no mapping exists.
    pub label: String,
    /// Style string for this series, when one was supplied.
    pub style: Option<String>,
    /// One entry per x value; `None` is a gap.
    pub points: Vec<Option<DataPoint>>,
}

/// Renderer-agnostic description of a finished chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    /// Chart title.
    pub title: String,
    /// X-axis label.
    pub xlabel: String,
    /// Y-axis label.
    pub ylabel: String,
    /// Mark geometry.
    pub kind: ChartKind,
    /// Parameter path plotted on the x axis.
    pub xparam: Vec<String>,
    /// X values in plot order.
    pub xvals: Vec<Value>,
    /// Reduced series in spec order (minus dropped incomplete ones).
    pub series: Vec<ChartSeries>,
    /// Whether error bars were requested.
    pub errorbar: bool,
    /// Legend placement hint.
    pub legend_loc: Option<String>,
}

/// Aggregates `store` per `spec` and assembles the chart description.
///
/// The global filter is conjoined with each series' own condition before
/// reduction. Pure function: neither input is mutated.
pub fn build_chart(store: &ResultStore, spec: &PlotSpec) -> ChartDescriptor {
    let specs: Vec<SeriesSpec> = spec
        .series
        .iter()
        .map(|series| SeriesSpec {
            key: series.key.clone(),
            condition: spec.filter.and(&series.condition),
            metric: series.metric.clone(),
        })
        .collect();
    let reduced = reduce_all(store, &spec.xaxis, &specs, spec.plot_empty);
    let series = reduced
        .into_iter()
        .map(|data| ChartSeries {
            label: spec
                .legend
                .get(&data.key)
                .cloned()
                .unwrap_or_else(|| data.key.clone()),
            style: spec.styles.get(&data.key).cloned(),
            key: data.key,
            points: data.points,
        })
        .collect();
    ChartDescriptor {
        title: spec.title.clone(),
        xlabel: spec.xlabel.clone(),
        ylabel: spec.ylabel.clone(),
        kind: spec.kind,
        xparam: spec.xaxis.param.clone(),
        xvals: spec.xaxis.values.clone(),
        series,
        errorbar: spec.errorbar,
        legend_loc: spec.legend_loc.clone(),
    }
}
