//! Visualization state captured at each observable step of an algorithm
//!
//! - [`Snapshot`]: one fully materialized frame (array, marks, pointers,
//!   variables, auxiliary payload, metrics, result)
//! - [`Trace`]: the immutable, ordered frame sequence of one run
//! - [`AuxiliaryState`]: family-specific structure (heap, buckets, partition, …)
//!
//! Frames are stored whole rather than as diffs so a player can jump to any
//! step with a single index lookup.

mod auxiliary;
mod trace;

pub use auxiliary::{AuxiliaryState, Run};
pub use trace::Trace;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic tag attached to an array index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Current,
    Minimum,
    Match,
    Mismatch,
    Found,
    Pattern,
    /// Outside the live search range
    Eliminated,
    /// Inside the range a generator is currently working on
    Active,
}

impl Mark {
    pub fn label(self) -> &'static str {
        match self {
            Mark::Comparing => "comparing",
            Mark::Swapping => "swapping",
            Mark::Sorted => "sorted",
            Mark::Pivot => "pivot",
            Mark::Current => "current",
            Mark::Minimum => "minimum",
            Mark::Match => "match",
            Mark::Mismatch => "mismatch",
            Mark::Found => "found",
            Mark::Pattern => "pattern",
            Mark::Eliminated => "eliminated",
            Mark::Active => "active",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Palette slot for a pointer annotation; renderers map it to real colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerColor {
    Primary,
    Secondary,
    Accent,
    Success,
    Danger,
}

/// A labelled cursor drawn under an array index (`low`, `mid`, `i`, …)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    pub index: usize,
    pub label: String,
    pub color: PointerColor,
}

/// Value of a watched variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Int(i64),
    Bool(bool),
    Text(String),
    List(Vec<i64>),
    Unset,
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Int(n) => write!(f, "{}", n),
            VarValue::Bool(b) => write!(f, "{}", b),
            VarValue::Text(s) => write!(f, "\"{}\"", s),
            VarValue::List(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            VarValue::Unset => write!(f, "-"),
        }
    }
}

impl From<i64> for VarValue {
    fn from(value: i64) -> Self {
        VarValue::Int(value)
    }
}

impl From<usize> for VarValue {
    fn from(value: usize) -> Self {
        VarValue::Int(value as i64)
    }
}

impl From<u32> for VarValue {
    fn from(value: u32) -> Self {
        VarValue::Int(i64::from(value))
    }
}

impl From<bool> for VarValue {
    fn from(value: bool) -> Self {
        VarValue::Bool(value)
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        VarValue::Text(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        VarValue::Text(value)
    }
}

impl From<Vec<i64>> for VarValue {
    fn from(value: Vec<i64>) -> Self {
        VarValue::List(value)
    }
}

impl<T: Into<VarValue>> From<Option<T>> for VarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(VarValue::Unset, Into::into)
    }
}

/// A named variable shown in the watch panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: VarValue,
    pub highlight: bool,
}

/// Running operation counters; never decrease along a trace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub comparisons: u64,
    pub swaps: u64,
}

/// A value together with how often it occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frequency {
    pub value: i64,
    pub count: usize,
}

/// Final answer of an algorithm, present only on the terminal snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TraceResult {
    #[serde(rename = "string")]
    Text(String),
    Indices(Vec<usize>),
    Boolean(bool),
    /// Index of the located element, `None` when absent
    Search(Option<usize>),
    Frequency(Frequency),
}

impl fmt::Display for TraceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceResult::Text(s) => write!(f, "\"{}\"", s),
            TraceResult::Indices(indices) if indices.is_empty() => write!(f, "no indices"),
            TraceResult::Indices(indices) => {
                let parts: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
                write!(f, "indices [{}]", parts.join(", "))
            }
            TraceResult::Boolean(b) => write!(f, "{}", b),
            TraceResult::Search(Some(index)) => write!(f, "found at index {}", index),
            TraceResult::Search(None) => write!(f, "not found"),
            TraceResult::Frequency(freq) => {
                write!(f, "{} (appears {} times)", freq.value, freq.count)
            }
        }
    }
}

/// Complete visualization state at one instant of execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub index: usize,
    pub array_state: Vec<i64>,
    pub marked_indices: BTreeMap<usize, Mark>,
    pub pointers: Vec<Pointer>,
    pub variables: Vec<Variable>,
    pub auxiliary_state: Option<AuxiliaryState>,
    pub message: String,
    pub expression: Option<String>,
    pub metrics: Metrics,
    pub result: Option<TraceResult>,
}

impl Snapshot {
    /// Frame 0: the untouched input with nothing marked
    pub fn initial(input: &[i64]) -> Self {
        Snapshot {
            index: 0,
            array_state: input.to_vec(),
            marked_indices: BTreeMap::new(),
            pointers: Vec::new(),
            variables: Vec::new(),
            auxiliary_state: None,
            message: "Initial state".to_string(),
            expression: None,
            metrics: Metrics::default(),
            result: None,
        }
    }

    pub fn mark_at(&self, index: usize) -> Option<Mark> {
        self.marked_indices.get(&index).copied()
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Pointers sitting on `index`, in emission order
    pub fn pointers_at(&self, index: usize) -> impl Iterator<Item = &Pointer> {
        self.pointers.iter().filter(move |p| p.index == index)
    }

    /// Indices carrying `mark`, ascending
    pub fn indices_marked(&self, mark: Mark) -> Vec<usize> {
        self.marked_indices
            .iter()
            .filter(|(_, m)| **m == mark)
            .map(|(i, _)| *i)
            .collect()
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough: element-sized slots plus fixed overhead for strings and payloads
        let array = self.array_state.len() * 8;
        let marks = self.marked_indices.len() * 16;
        let pointers = self.pointers.iter().map(|p| 24 + p.label.len()).sum::<usize>();
        let variables = self.variables.len() * 48;
        let auxiliary = self
            .auxiliary_state
            .as_ref()
            .map_or(0, AuxiliaryState::estimated_size);

        array + marks + pointers + variables + auxiliary + self.message.len()
    }
}
