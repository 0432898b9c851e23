//! Experiment campaign generation for the cachelab toolkit.
//!
//! A campaign starts from a base configuration tree and a list of swept
//! dimensions; expansion produces an ordered FIFO queue of independent
//! experiment configurations for the external execution subsystem.

mod hash;
mod serde;
mod sweep;

pub use hash::stable_hash_string;
pub use serde::{from_json_slice, to_canonical_json_bytes};
pub use sweep::{generate_queue, Experiment, ExperimentQueue, SweepDimension, SweepPlan};
