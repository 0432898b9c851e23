//! Reduction of filtered result subsets into chart-ready series.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stats;
use crate::store::{Condition, ResultStore};

/// X-axis description: which parameter varies and over which values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxis {
    /// Parameter-tree path plotted on the x axis.
    pub param: Vec<String>,
    /// Requested x values in plot order.
    pub values: Vec<Value>,
}

/// Declarative definition of one plotted series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Key used for legend and style lookups.
    pub key: String,
    /// Constraints selecting this series' records.
    pub condition: Condition,
    /// Path of the reduced metric inside each record's metric tree.
    pub metric: Vec<String>,
}

/// Reduced statistics for one (series, x value) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Arithmetic mean over the matched samples.
    pub mean: f64,
    /// Half-width of the 95% confidence interval.
    pub error: f64,
    /// Number of samples behind the point.
    pub samples: usize,
}

/// One reduced series; `None` marks an x value with no matching data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    /// Key of the series spec that produced this data.
    pub key: String,
    /// One entry per requested x value, in x order.
    pub points: Vec<Option<DataPoint>>,
}

impl SeriesData {
    /// True when every requested x value produced a data point.
    pub fn is_complete(&self) -> bool {
        self.points.iter().all(Option::is_some)
    }
}

/// Reduces one series over the requested x range.
///
/// For each x value the store is narrowed to records matching the series
/// condition plus the x constraint; the numeric leaf at the metric path of
/// each matching record forms the sample multiset. An empty multiset yields
/// an explicit missing point, never zero.
pub fn reduce_series(store: &ResultStore, xaxis: &XAxis, spec: &SeriesSpec) -> SeriesData {
    let points = xaxis
        .values
        .iter()
        .map(|xval| {
            let mut condition = spec.condition.clone();
            condition.push(xaxis.param.clone(), xval.clone());
            reduce_point(store, &condition, &spec.metric)
        })
        .collect();
    SeriesData {
        key: spec.key.clone(),
        points,
    }
}

fn reduce_point(
    store: &ResultStore,
    condition: &Condition,
    metric: &[String],
) -> Option<DataPoint> {
    let mut samples: Vec<f64> = store
        .iter()
        .filter(|record| condition.matches(&record.params))
        .filter_map(|record| record.metrics.leaf_at(metric).and_then(Value::as_f64))
        .collect();
    // Sorting makes the reduction independent of record order.
    samples.sort_by(f64::total_cmp);
    let mean = stats::mean(&samples)?;
    Some(DataPoint {
        mean,
        error: stats::confidence_half_width(&samples),
        samples: samples.len(),
    })
}

/// Reduces every series over the x range.
///
/// When `keep_gaps` is false, a series with at least one missing point is
/// dropped entirely; when true, missing points are retained as gaps.
pub fn reduce_all(
    store: &ResultStore,
    xaxis: &XAxis,
    specs: &[SeriesSpec],
    keep_gaps: bool,
) -> Vec<SeriesData> {
    specs
        .iter()
        .map(|spec| reduce_series(store, xaxis, spec))
        .filter(|series| keep_gaps || series.is_complete())
        .collect()
}
