use std::collections::VecDeque;

use cachelab_core::errors::CachelabError;
use cachelab_core::tree::ConfigTree;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hash::stable_hash_string;

/// One swept dimension: a target path in the configuration tree and the
/// candidate values to explore, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepDimension {
    /// Short name used in experiment description strings.
    pub name: String,
    /// Path of the swept parameter inside the configuration tree.
    pub path: Vec<String>,
    /// Candidate values in exploration order.
    pub values: Vec<Value>,
}

/// Declarative description of a full experiment campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Base configuration shared by every experiment.
    pub base: ConfigTree,
    /// Swept dimensions; the first declared varies slowest.
    #[serde(default)]
    pub dimensions: Vec<SweepDimension>,
}

impl SweepPlan {
    /// Stable fingerprint of the plan, for reproducibility bookkeeping.
    pub fn stable_hash(&self) -> Result<String, CachelabError> {
        stable_hash_string(self)
    }
}

/// A fully-resolved experiment configuration, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    params: ConfigTree,
    desc: String,
}

impl Experiment {
    /// Builds an experiment from its parameter tree and description.
    pub fn new(params: ConfigTree, desc: impl Into<String>) -> Self {
        Self {
            params,
            desc: desc.into(),
        }
    }

    /// The experiment's parameter tree.
    pub fn params(&self) -> &ConfigTree {
        &self.params
    }

    /// Human-readable description naming every swept dimension and value.
    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Consumes the experiment, handing the parameter tree to the runner.
    pub fn into_params(self) -> ConfigTree {
        self.params
    }
}

/// FIFO queue of experiments consumed by the execution subsystem.
///
/// Insertion order is generation order; an experiment's identity is its
/// position in the queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentQueue {
    experiments: VecDeque<Experiment>,
}

impl ExperimentQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued experiments.
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// True when no experiments are queued.
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// Appends an experiment at the back.
    pub fn push(&mut self, experiment: Experiment) {
        self.experiments.push_back(experiment);
    }

    /// Removes and returns the oldest experiment.
    pub fn pop(&mut self) -> Option<Experiment> {
        self.experiments.pop_front()
    }

    /// Iterates experiments in queue order.
    pub fn iter(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.iter()
    }

    /// Moves every experiment of `other` to the back of this queue.
    ///
    /// Campaigns that pair different bases (for example one tree per
    /// topology/strategy pairing) expand each plan separately and
    /// concatenate the queues.
    pub fn append(&mut self, mut other: ExperimentQueue) {
        self.experiments.append(&mut other.experiments);
    }
}

/// Expands `plan` into the Cartesian product of its dimensions.
///
/// The first-declared dimension varies slowest and the last fastest, so
/// rerunning on identical inputs reproduces an identical queue. Every
/// experiment is built from an independent clone of the base tree. With no
/// dimensions the queue holds exactly one copy of the base; a dimension
/// with no candidate values produces an empty queue.
pub fn generate_queue(plan: &SweepPlan) -> Result<ExperimentQueue, CachelabError> {
    let mut queue = ExperimentQueue::new();
    let mut assignment = Vec::with_capacity(plan.dimensions.len());
    expand(plan, 0, &mut assignment, &mut queue)?;
    Ok(queue)
}

fn expand<'a>(
    plan: &'a SweepPlan,
    depth: usize,
    assignment: &mut Vec<&'a Value>,
    queue: &mut ExperimentQueue,
) -> Result<(), CachelabError> {
    if depth == plan.dimensions.len() {
        let mut params = plan.base.clone();
        for (dimension, value) in plan.dimensions.iter().zip(assignment.iter()) {
            params.set(&dimension.path, (*value).clone())?;
        }
        let desc = describe(&plan.dimensions, assignment);
        queue.push(Experiment::new(params, desc));
        return Ok(());
    }
    for value in &plan.dimensions[depth].values {
        assignment.push(value);
        expand(plan, depth + 1, assignment, queue)?;
        assignment.pop();
    }
    Ok(())
}

fn describe(dimensions: &[SweepDimension], assignment: &[&Value]) -> String {
    if dimensions.is_empty() {
        return "default configuration".to_string();
    }
    dimensions
        .iter()
        .zip(assignment)
        .map(|(dimension, value)| format!("{}: {}", dimension.name, format_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
