use cachelab_core::tree::ConfigTree;
use cachelab_exp::{generate_queue, SweepDimension, SweepPlan};
use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;

fn make_plan() -> SweepPlan {
    let mut base = ConfigTree::new();
    base.set(&["workload", "name"], json!("STATIONARY")).expect("set");
    base.set(&["workload", "n_contents"], json!(300_000)).expect("set");
    base.set(&["cache_placement", "name"], json!("UNIFORM")).expect("set");
    base.set(&["content_placement", "name"], json!("UNIFORM")).expect("set");
    base.set(&["cache_policy", "name"], json!("LRU")).expect("set");
    SweepPlan {
        base,
        dimensions: vec![
            SweepDimension {
                name: "alpha".to_string(),
                path: vec!["workload".into(), "alpha".into()],
                values: (0..10).map(|i| json!(0.5 + 0.1 * i as f64)).collect(),
            },
            SweepDimension {
                name: "strategy".to_string(),
                path: vec!["strategy".into(), "name".into()],
                values: ["LCE", "LCD", "NO_CACHE", "PROB_CACHE"]
                    .iter()
                    .map(|s| json!(s))
                    .collect(),
            },
            SweepDimension {
                name: "network cache".to_string(),
                path: vec!["cache_placement".into(), "network_cache".into()],
                values: vec![json!(0.002), json!(0.004), json!(0.01)],
            },
        ],
    }
}

fn bench_sweep(c: &mut Criterion) {
    let plan = make_plan();
    c.bench_function("sweep_expand_120", |b| {
        b.iter(|| generate_queue(&plan).expect("expand"));
    });
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
