//! # Structural Comparison
//!
//! Exact structural equality between a stored snapshot and a freshly
//! normalized component, stopping at the first divergence.
//!
//! Rules, applied top-down at every node:
//!
//! 1. Different kinds (sequence / mapping / scalar) fail with [`Divergence::Kind`].
//! 2. Sequences of different length fail with [`Divergence::Length`]; otherwise
//!    elements are compared in ascending index order.
//! 3. Mappings with different key sets fail with [`Divergence::Keys`] before any
//!    shared key is visited; otherwise values are compared in key order.
//! 4. Scalars must be equal as JSON values. `1` and `1.0` are different.
//!
//! The traversal uses an explicit stack, so tree depth is bounded by memory
//! rather than by the call stack. Visit order is the same as a recursive
//! depth-first walk.

mod path;
mod report;

pub use path::{PathSegment, ValuePath};
pub use report::{Divergence, MismatchReport, ValueKind};

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Pass,
    Mismatch(MismatchReport),
}

impl Comparison {
    pub fn into_result(self) -> Result<(), MismatchReport> {
        match self {
            Comparison::Pass => Ok(()),
            Comparison::Mismatch(report) => Err(report),
        }
    }
}

/// Step from a parent node to one of its children.
#[derive(Clone, Copy)]
enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Child-to-parent links for every node pushed so far. The full
/// [`ValuePath`] is only built for the node that diverges.
#[derive(Default)]
struct Trail<'a> {
    links: Vec<(Option<usize>, Step<'a>)>,
}

impl<'a> Trail<'a> {
    fn push(&mut self, parent: Option<usize>, step: Step<'a>) -> Option<usize> {
        self.links.push((parent, step));
        Some(self.links.len() - 1)
    }

    fn path(&self, mut at: Option<usize>) -> ValuePath {
        let mut segments = Vec::new();
        while let Some(i) = at {
            let (parent, step) = self.links[i];
            segments.push(match step {
                Step::Key(key) => PathSegment::Key(key.to_string()),
                Step::Index(index) => PathSegment::Index(index),
            });
            at = parent;
        }
        segments.into_iter().rev().collect()
    }
}

/// Compares `expected` (the snapshot) against `actual` (the component).
pub fn compare(expected: &Value, actual: &Value) -> Comparison {
    let mut trail = Trail::default();
    let mut stack = vec![(None, expected, actual)];

    while let Some((node, expected, actual)) = stack.pop() {
        let divergence = match (expected, actual) {
            (Value::Array(exp), Value::Array(act)) => {
                if exp.len() != act.len() {
                    Some(Divergence::Length {
                        expected: exp.clone(),
                        actual: act.clone(),
                    })
                } else {
                    // Reversed so index 0 is popped first.
                    for (i, (e, a)) in exp.iter().zip(act).enumerate().rev() {
                        stack.push((trail.push(node, Step::Index(i)), e, a));
                    }
                    None
                }
            }
            (Value::Object(exp), Value::Object(act)) => {
                let same_keys = exp.len() == act.len() && exp.keys().all(|k| act.contains_key(k));
                if !same_keys {
                    Some(Divergence::Keys {
                        expected: sorted_keys(exp),
                        actual: sorted_keys(act),
                    })
                } else {
                    for (k, e) in exp.iter().rev() {
                        if let Some(a) = act.get(k) {
                            stack.push((trail.push(node, Step::Key(k)), e, a));
                        }
                    }
                    None
                }
            }
            (exp, act) if ValueKind::of(exp) != ValueKind::of(act) => Some(Divergence::Kind {
                expected: ValueKind::of(exp),
                actual: ValueKind::of(act),
            }),
            (exp, act) => (exp != act).then(|| Divergence::Value {
                expected: exp.clone(),
                actual: act.clone(),
            }),
        };

        if let Some(divergence) = divergence {
            return Comparison::Mismatch(MismatchReport {
                path: trail.path(node),
                divergence,
            });
        }
    }

    Comparison::Pass
}

fn sorted_keys(map: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn mismatch(expected: Value, actual: Value) -> MismatchReport {
        match compare(&expected, &actual) {
            Comparison::Mismatch(report) => report,
            Comparison::Pass => panic!("expected a mismatch between {expected} and {actual}"),
        }
    }

    #[rstest]
    #[case::null(json!(null))]
    #[case::string(json!("wow"))]
    #[case::empty_containers(json!({"a": [], "b": {}}))]
    #[case::component(json!({
        "type": "Div",
        "namespace": "html",
        "props": {"id": "x", "children": [{"type": "P", "props": {"children": ["wow", 1, 2.5, true, null]}}]}
    }))]
    fn identical_values_pass(#[case] value: Value) {
        assert_eq!(compare(&value, &value.clone()), Comparison::Pass);
    }

    #[test]
    fn leaf_value_mismatch_reports_path() {
        let report = mismatch(
            json!({"type": "Div", "props": {"children": ["wow"]}}),
            json!({"type": "Div", "props": {"children": ["different"]}}),
        );

        assert_eq!(report.path.to_string(), "props.children[0]");
        assert_eq!(
            report.divergence,
            Divergence::Value {
                expected: json!("wow"),
                actual: json!("different"),
            }
        );
    }

    #[test]
    fn sequence_vs_mapping_is_a_kind_mismatch() {
        let report = mismatch(
            json!({"children": [1, 2, 3]}),
            json!({"children": {"a": 1}}),
        );

        assert_eq!(report.path.to_string(), "children");
        assert_eq!(
            report.divergence,
            Divergence::Kind {
                expected: ValueKind::Sequence,
                actual: ValueKind::Mapping,
            }
        );
    }

    #[test]
    fn scalar_vs_container_is_a_kind_mismatch() {
        let report = mismatch(json!("text"), json!(["text"]));

        assert!(report.path.is_root());
        assert_eq!(
            report.divergence,
            Divergence::Kind {
                expected: ValueKind::Scalar,
                actual: ValueKind::Sequence,
            }
        );
    }

    #[test]
    fn length_mismatch_keeps_both_sequences() {
        let report = mismatch(json!([1, 2, 3]), json!([1, 2]));

        assert_eq!(
            report.divergence,
            Divergence::Length {
                expected: vec![json!(1), json!(2), json!(3)],
                actual: vec![json!(1), json!(2)],
            }
        );
    }

    #[test]
    fn length_mismatch_is_reported_before_elements() {
        let report = mismatch(json!([["x"], 2]), json!([["y"]]));

        assert!(report.path.is_root());
        assert!(matches!(report.divergence, Divergence::Length { .. }));
    }

    #[test]
    fn only_the_single_differing_index_is_reported() {
        let report = mismatch(json!([0, 1, 2, 3, 4]), json!([0, 1, 9, 3, 4]));

        assert_eq!(report.path.segments(), &[PathSegment::Index(2)]);
    }

    #[test]
    fn first_divergence_wins() {
        let report = mismatch(json!([0, 1, 2, 3]), json!([0, 7, 2, 8]));

        assert_eq!(report.path.to_string(), "[1]");
    }

    #[test]
    fn depth_first_order_across_siblings() {
        // The nested difference under index 0 is found before the one at index 1.
        let report = mismatch(
            json!([{"a": [1, {"b": 1}]}, 5]),
            json!([{"a": [1, {"b": 2}]}, 6]),
        );

        assert_eq!(report.path.to_string(), "[0].a[1].b");
    }

    #[test]
    fn key_set_mismatch_takes_precedence_over_shared_keys() {
        let report = mismatch(
            json!({"id": "x", "children": ["wow"]}),
            json!({"className": "x", "children": ["different"]}),
        );

        assert!(report.path.is_root());
        assert_eq!(
            report.divergence,
            Divergence::Keys {
                expected: vec!["children".into(), "id".into()],
                actual: vec!["children".into(), "className".into()],
            }
        );
    }

    #[test]
    fn extra_key_is_a_key_set_mismatch() {
        let report = mismatch(json!({"a": 1}), json!({"a": 1, "b": 2}));

        assert_eq!(report.divergence.unexpected_keys(), vec!["b"]);
        assert!(report.divergence.missing_keys().is_empty());
    }

    #[rstest]
    #[case::int_vs_float(json!(1), json!(1.0))]
    #[case::string_vs_number(json!("1"), json!(1))]
    #[case::null_vs_false(json!(null), json!(false))]
    #[case::case_sensitive(json!("Div"), json!("div"))]
    fn scalars_compare_exactly(#[case] expected: Value, #[case] actual: Value) {
        let report = mismatch(expected.clone(), actual.clone());

        assert_eq!(report.divergence, Divergence::Value { expected, actual });
    }

    #[test]
    fn very_deep_trees_do_not_overflow() {
        let depth = 3_000;
        let mut expected = json!("leaf");
        let mut actual = json!("other");
        for _ in 0..depth {
            expected = Value::Array(vec![expected]);
            actual = Value::Array(vec![actual]);
        }

        let report = mismatch(expected, actual);

        assert_eq!(report.path.segments().len(), depth);
    }

    #[test]
    fn into_result() {
        assert!(compare(&json!(1), &json!(1)).into_result().is_ok());
        assert!(compare(&json!(1), &json!(2)).into_result().is_err());
    }
}
