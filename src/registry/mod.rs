//! Read-only algorithm registry
//!
//! Every algorithm the crate can trace is described once, in a fixed table
//! ([`catalog`]), and looked up by id through an index built on first use.
//! Descriptors are `'static` and never change after construction.
//!
//! - [`params`]: parameter schema and caller-supplied values
//! - [`catalog`]: the descriptor table

pub mod catalog;
pub mod params;

pub use params::{resolve_params, ParamKind, ParamSpec, ParamValue, Params};

use crate::algorithms::GenerateFn;
use crate::config::MAX_INPUT_LEN;
use crate::errors::ValidationError;
use crate::input::Notation;
use crate::snapshot::Trace;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Broad grouping used for listing and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Sorting,
    Distribution,
    Searching,
    Analysis,
    Strings,
}

impl Family {
    pub fn label(self) -> &'static str {
        match self {
            Family::Sorting => "Comparison sorts",
            Family::Distribution => "Distribution sorts",
            Family::Searching => "Searching",
            Family::Analysis => "Array analysis",
            Family::Strings => "Strings & stacks",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Big-O strings shown next to the pseudocode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

/// Everything known about one algorithm
#[derive(Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub family: Family,
    /// How raw input text is read for this algorithm
    pub notation: Notation,
    pub pseudocode: &'static [&'static str],
    pub complexity: Complexity,
    pub params: &'static [ParamSpec],
    /// Output is a permutation of the input
    pub rearranging: bool,
    #[serde(skip)]
    pub generator: GenerateFn,
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("id", &self.id)
            .field("family", &self.family)
            .field("params", &self.params.len())
            .finish()
    }
}

impl AlgorithmDescriptor {
    pub fn param(&self, id: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|spec| spec.id == id)
    }

    /// Fill defaults and validate `supplied` against this algorithm's schema
    pub fn resolve_params(&self, supplied: &Params) -> Result<Params, ValidationError> {
        resolve_params(self.params, supplied)
    }

    /// Run the step generator once and return its trace.
    ///
    /// A trace that breaks the structural invariants is a generator bug: it is
    /// logged, and debug builds panic on it.
    pub fn generate(&self, input: &[i64], params: &Params) -> Result<Trace, ValidationError> {
        if input.len() > MAX_INPUT_LEN {
            return Err(ValidationError::TooManyElements {
                algorithm: self.name,
                max: MAX_INPUT_LEN,
                got: input.len(),
            });
        }
        let params = self.resolve_params(params)?;
        let trace = (self.generator)(input, &params)?;

        if let Err(violation) = trace.check_invariants(input, self.rearranging) {
            tracing::error!(algorithm = self.id, %violation, "generator produced a malformed trace");
            if cfg!(debug_assertions) {
                panic!("{}: {}", self.id, violation);
            }
        }

        tracing::debug!(
            algorithm = self.id,
            len = input.len(),
            steps = trace.total_steps(),
            bytes = trace.memory_usage(),
            "generated trace"
        );
        Ok(trace)
    }
}

static INDEX: LazyLock<FxHashMap<&'static str, usize>> = LazyLock::new(|| {
    catalog::CATALOG
        .iter()
        .enumerate()
        .map(|(i, descriptor)| (descriptor.id, i))
        .collect()
});

/// Look up a descriptor by id
pub fn get_algorithm(id: &str) -> Option<&'static AlgorithmDescriptor> {
    INDEX.get(id).map(|&i| &catalog::CATALOG[i])
}

/// All descriptors, in catalogue order
pub fn all_algorithms() -> &'static [AlgorithmDescriptor] {
    catalog::CATALOG
}

/// Like [`get_algorithm`], as a `Result`
pub fn require_algorithm(id: &str) -> Result<&'static AlgorithmDescriptor, ValidationError> {
    get_algorithm(id).ok_or_else(|| ValidationError::UnknownAlgorithm(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_lookup_by_id() {
        let bubble = get_algorithm("bubble-sort").unwrap();
        assert_eq!(bubble.name, "Bubble sort");
        assert_eq!(bubble.family, Family::Sorting);
        assert!(get_algorithm("bogo-sort").is_none());
        assert_eq!(
            require_algorithm("bogo-sort").unwrap_err(),
            ValidationError::UnknownAlgorithm("bogo-sort".into())
        );
    }

    #[test]
    fn test_ids_unique_and_indexed() {
        let ids: FxHashSet<&str> = all_algorithms().iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), all_algorithms().len());
        for descriptor in all_algorithms() {
            let found = get_algorithm(descriptor.id).unwrap();
            assert!(std::ptr::eq(found, descriptor));
        }
    }

    #[test]
    fn test_every_descriptor_has_display_metadata() {
        for descriptor in all_algorithms() {
            assert!(!descriptor.name.is_empty(), "{}", descriptor.id);
            assert!(!descriptor.pseudocode.is_empty(), "{}", descriptor.id);
            assert!(!descriptor.complexity.worst.is_empty(), "{}", descriptor.id);
        }
    }

    #[test]
    fn test_generate_caps_input_length() {
        let input: Vec<i64> = (0..=MAX_INPUT_LEN as i64).collect();
        let err = get_algorithm("bubble-sort")
            .unwrap()
            .generate(&input, &Params::new())
            .unwrap_err();
        assert!(matches!(err, ValidationError::TooManyElements { got, .. } if got == MAX_INPUT_LEN + 1));
    }

    #[test]
    fn test_generate_fills_defaults() {
        let quick = get_algorithm("quick-sort").unwrap();
        let trace = quick.generate(&[3, 1, 2], &Params::new()).unwrap();
        assert_eq!(trace.terminal().array_state, vec![1, 2, 3]);

        let search = get_algorithm("binary-search").unwrap();
        assert_eq!(
            search.generate(&[1, 2, 3], &Params::new()).unwrap_err(),
            ValidationError::MissingParam("target".into())
        );
    }
}
