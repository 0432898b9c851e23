use cachelab_core::tree::ConfigTree;
use cachelab_exp::{
    from_json_slice, generate_queue, to_canonical_json_bytes, ExperimentQueue, SweepDimension,
    SweepPlan,
};
use serde_json::json;

fn make_plan() -> SweepPlan {
    let mut base = ConfigTree::new();
    base.set(&["workload", "name"], json!("STATIONARY")).expect("set");
    base.set(&["cache_placement", "name"], json!("UNIFORM")).expect("set");
    SweepPlan {
        base,
        dimensions: vec![
            SweepDimension {
                name: "alpha".to_string(),
                path: vec!["workload".into(), "alpha".into()],
                values: vec![json!(0.6), json!(0.8)],
            },
            SweepDimension {
                name: "network cache".to_string(),
                path: vec!["cache_placement".into(), "network_cache".into()],
                values: vec![json!(0.002), json!(0.004)],
            },
        ],
    }
}

#[test]
fn identical_plans_reproduce_identical_queues() {
    let plan = make_plan();
    let queue_a = generate_queue(&plan).expect("generate");
    let queue_b = generate_queue(&plan).expect("generate");
    assert_eq!(queue_a, queue_b);
    assert_eq!(queue_a.len(), 4);
    let bytes_a = to_canonical_json_bytes(&queue_a).expect("encode");
    let bytes_b = to_canonical_json_bytes(&queue_b).expect("encode");
    assert_eq!(bytes_a, bytes_b);
    assert_eq!(
        plan.stable_hash().expect("hash"),
        make_plan().stable_hash().expect("hash")
    );
}

#[test]
fn queue_roundtrips_through_canonical_json() {
    let queue = generate_queue(&make_plan()).expect("generate");
    let bytes = to_canonical_json_bytes(&queue).expect("encode");
    let decoded: ExperimentQueue = from_json_slice(&bytes).expect("decode");
    assert_eq!(queue, decoded);
}

#[test]
fn reordering_dimensions_changes_the_fingerprint() {
    let plan = make_plan();
    let mut flipped = make_plan();
    flipped.dimensions.reverse();
    assert_ne!(
        plan.stable_hash().expect("hash"),
        flipped.stable_hash().expect("hash")
    );
}
