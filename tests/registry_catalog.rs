// Integration tests for the algorithm catalog: lookup, parameters and export

use std::collections::HashSet;

use algotrace::errors::ValidationError;
use algotrace::input::Notation;
use algotrace::registry::{all_algorithms, get_algorithm, require_algorithm, ParamValue, Params};
use algotrace::snapshot::TraceResult;

#[test]
fn test_ids_are_unique_and_resolvable() {
    let mut seen = HashSet::new();
    for descriptor in all_algorithms() {
        assert!(seen.insert(descriptor.id), "duplicate id {}", descriptor.id);
        let found = get_algorithm(descriptor.id).unwrap();
        assert_eq!(found.name, descriptor.name);
        assert!(!descriptor.pseudocode.is_empty());
    }
}

#[test]
fn test_unknown_id() {
    assert!(get_algorithm("bogo-sort").is_none());
    let err = require_algorithm("bogo-sort").unwrap_err();
    assert!(matches!(err, ValidationError::UnknownAlgorithm(ref id) if id == "bogo-sort"));
    assert_eq!(err.to_string(), "Unknown algorithm 'bogo-sort'");
}

#[test]
fn test_descriptor_json_omits_generator() {
    let descriptor = get_algorithm("quick-sort").unwrap();
    let json = serde_json::to_value(descriptor).unwrap();
    assert_eq!(json["id"], "quick-sort");
    assert_eq!(json["family"], "sorting");
    assert!(json.get("generator").is_none());
    assert!(json["params"].as_array().is_some_and(|p| !p.is_empty()));
}

#[test]
fn test_parse_then_generate() {
    let descriptor = get_algorithm("merge-sort").unwrap();
    let input = descriptor.notation.parse("[8, -3, 5, 0, 5]").unwrap();
    let trace = descriptor.generate(&input, &Params::new()).unwrap();
    assert_eq!(trace.initial().array_state, input);
    assert_eq!(trace.terminal().array_state, vec![-3, 0, 5, 5, 8]);
}

#[test]
fn test_brackets_parse_then_generate() {
    let descriptor = get_algorithm("balanced-brackets").unwrap();
    assert_eq!(descriptor.notation, Notation::BracketString);
    let balanced = descriptor.notation.parse("({[]})").unwrap();
    let trace = descriptor.generate(&balanced, &Params::new()).unwrap();
    assert_eq!(trace.result(), Some(&TraceResult::Boolean(true)));

    let broken = descriptor.notation.parse("(]").unwrap();
    let trace = descriptor.generate(&broken, &Params::new()).unwrap();
    assert_eq!(trace.result(), Some(&TraceResult::Boolean(false)));
}

#[test]
fn test_missing_and_unknown_params() {
    let search = get_algorithm("linear-search").unwrap();
    let err = search.generate(&[1, 2, 3], &Params::new()).unwrap_err();
    assert!(matches!(err, ValidationError::MissingParam(ref p) if p == "target"));

    let sort = get_algorithm("bubble-sort").unwrap();
    let extra = Params::new().with_number("target", 1);
    assert!(sort.generate(&[2, 1], &extra).is_err());
}

#[test]
fn test_assignment_reaches_generator() {
    let (key, value) = Params::parse_assignment("target=7").unwrap();
    assert_eq!(key, "target");
    assert_eq!(value, ParamValue::Number(7));

    let params: Params = [(key, value)].into_iter().collect();
    let trace = get_algorithm("linear-search")
        .unwrap()
        .generate(&[4, 7, 9], &params)
        .unwrap();
    assert_eq!(trace.result(), Some(&TraceResult::Search(Some(1))));
}

#[test]
fn test_input_cap_rejected() {
    let too_long: Vec<i64> = (0..200).collect();
    let err = get_algorithm("insertion-sort")
        .unwrap()
        .generate(&too_long, &Params::new())
        .unwrap_err();
    assert!(matches!(err, ValidationError::TooManyElements { got: 200, .. }));
}

#[test]
fn test_trace_serializes_camel_case() {
    let trace = get_algorithm("selection-sort")
        .unwrap()
        .generate(&[3, 1, 2], &Params::new())
        .unwrap();
    let json = serde_json::to_value(&trace).unwrap();
    let text = json.to_string();
    assert!(text.contains("arrayState"));
    assert!(text.contains("markedIndices"));
}
