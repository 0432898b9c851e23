use cachelab_core::tree::ConfigTree;
use cachelab_results::{
    reduce_all, reduce_series, Condition, ResultRecord, ResultStore, SeriesSpec, XAxis,
};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;

fn record(strategy: &str, alpha: f64, latency: f64) -> ResultRecord {
    let params: ConfigTree = serde_json::from_value(json!({
        "strategy": {"name": strategy},
        "workload": {"alpha": alpha},
    }))
    .expect("params");
    let metrics: ConfigTree = serde_json::from_value(json!({
        "LATENCY": {"MEAN": latency},
    }))
    .expect("metrics");
    ResultRecord::new(params, metrics)
}

fn latency_spec(strategy: &str) -> SeriesSpec {
    SeriesSpec {
        key: strategy.to_string(),
        condition: Condition::new().with(&["strategy", "name"], json!(strategy)),
        metric: vec!["LATENCY".into(), "MEAN".into()],
    }
}

fn alpha_axis(values: &[f64]) -> XAxis {
    XAxis {
        param: vec!["workload".into(), "alpha".into()],
        values: values.iter().map(|v| json!(v)).collect(),
    }
}

#[test]
fn mean_over_replicated_points() {
    // Three replications at the same sweep point.
    let store = ResultStore::from_records(vec![
        record("LCE", 0.6, 1.0),
        record("LCE", 0.6, 2.0),
        record("LCE", 0.6, 3.0),
    ]);
    let series = reduce_series(&store, &alpha_axis(&[0.6]), &latency_spec("LCE"));
    let point = series.points[0].expect("point");
    assert_eq!(point.mean, 2.0);
    assert_eq!(point.samples, 3);
    assert!(point.error > 0.0);
}

#[test]
fn empty_subset_is_missing_not_zero() {
    let store = ResultStore::from_records(vec![record("LCE", 0.6, 1.0)]);
    let series = reduce_series(&store, &alpha_axis(&[0.6, 0.8]), &latency_spec("LCE"));
    assert!(series.points[0].is_some());
    assert_eq!(series.points[1], None);
    assert!(!series.is_complete());
}

#[test]
fn non_numeric_metric_leaves_contribute_no_sample() {
    let params: ConfigTree =
        serde_json::from_value(json!({"strategy": {"name": "LCE"}, "workload": {"alpha": 0.6}}))
            .expect("params");
    let metrics: ConfigTree =
        serde_json::from_value(json!({"LATENCY": {"MEAN": "n/a"}})).expect("metrics");
    let store = ResultStore::from_records(vec![ResultRecord::new(params, metrics)]);
    let series = reduce_series(&store, &alpha_axis(&[0.6]), &latency_spec("LCE"));
    assert_eq!(series.points[0], None);
}

#[test]
fn reduction_is_independent_of_record_order() {
    let mut records = vec![
        record("LCE", 0.6, 11.25),
        record("LCE", 0.6, 9.5),
        record("LCE", 0.6, 10.125),
        record("LCE", 0.6, 12.75),
        record("LCE", 0.8, 8.5),
    ];
    let ordered = ResultStore::from_records(records.clone());
    let mut rng = StdRng::seed_from_u64(20240811);
    records.shuffle(&mut rng);
    let shuffled = ResultStore::from_records(records);

    let axis = alpha_axis(&[0.6, 0.8]);
    let spec = latency_spec("LCE");
    assert_eq!(
        reduce_series(&ordered, &axis, &spec),
        reduce_series(&shuffled, &axis, &spec)
    );
}

#[test]
fn incomplete_series_are_dropped_unless_gaps_are_kept() {
    let store = ResultStore::from_records(vec![
        record("LCE", 0.6, 1.0),
        record("LCE", 0.8, 2.0),
        record("NO_CACHE", 0.6, 5.0),
    ]);
    let axis = alpha_axis(&[0.6, 0.8]);
    let specs = vec![latency_spec("LCE"), latency_spec("NO_CACHE")];

    let dropped = reduce_all(&store, &axis, &specs, false);
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].key, "LCE");

    let kept = reduce_all(&store, &axis, &specs, true);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[1].key, "NO_CACHE");
    assert!(kept[1].points[0].is_some());
    assert_eq!(kept[1].points[1], None);
}
