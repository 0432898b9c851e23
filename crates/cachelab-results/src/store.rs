use cachelab_core::tree::ConfigTree;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Equality constraints over parameter-tree paths.
///
/// A tree matches when every constraint path resolves to an equal leaf
/// value. A path that is missing from the tree (or blocked by a leaf) is a
/// non-match, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    constraints: Vec<(Vec<String>, Value)>,
}

impl Condition {
    /// Creates an empty condition, which matches every tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality constraint, builder style.
    pub fn with(mut self, path: &[&str], value: impl Into<Value>) -> Self {
        self.push(path.iter().map(|s| s.to_string()).collect(), value.into());
        self
    }

    /// Adds an equality constraint in place.
    pub fn push(&mut self, path: Vec<String>, value: Value) {
        self.constraints.push((path, value));
    }

    /// Builds a condition from every leaf of a nested pattern tree.
    pub fn from_tree(pattern: &ConfigTree) -> Self {
        let constraints = pattern
            .leaves()
            .into_iter()
            .map(|(path, value)| (path, value.clone()))
            .collect();
        Self { constraints }
    }

    /// Returns the conjunction of two constraint sets.
    pub fn and(&self, other: &Condition) -> Condition {
        let mut constraints = self.constraints.clone();
        constraints.extend(other.constraints.iter().cloned());
        Condition { constraints }
    }

    /// Number of constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// True when no constraints are present.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// True when every constraint path resolves to an equal leaf value.
    pub fn matches(&self, tree: &ConfigTree) -> bool {
        self.constraints
            .iter()
            .all(|(path, expected)| tree.leaf_at(path) == Some(expected))
    }
}

/// One experiment's parameter tree paired with its recorded metrics.
///
/// Metrics are a tree as well, so structured collector output (for example
/// a mean/variance submap per metric) is addressed by path exactly like
/// parameters are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Parameters of the experiment that produced the metrics.
    pub params: ConfigTree,
    /// Recorded metrics, keyed by collector name.
    pub metrics: ConfigTree,
}

impl ResultRecord {
    /// Pairs a parameter tree with its metrics.
    pub fn new(params: ConfigTree, metrics: ConfigTree) -> Self {
        Self { params, metrics }
    }
}

/// Ordered collection of experiment results.
///
/// The store is filled by the execution collaborator while results are
/// collected and is read-only afterwards: every query path takes `&self`
/// and filtering returns a new store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultStore {
    records: Vec<ResultRecord>,
}

impl ResultStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-collected records.
    pub fn from_records(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    /// Appends a record; used by the execution collaborator.
    pub fn add(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    /// Returns a new store holding only the records whose parameters match
    /// `condition`, preserving their relative order. The source store is
    /// left untouched.
    pub fn filter(&self, condition: &Condition) -> ResultStore {
        let records = self
            .records
            .iter()
            .filter(|record| condition.matches(&record.params))
            .cloned()
            .collect();
        ResultStore { records }
    }
}
