//! Numbered outline of a normalized tree, logged when a snapshot mismatches.
//!
//! Every mapping entry gets the next element id and is indented two spaces
//! per mapping level. Sequence elements are walked without an id of their own.

use serde_json::Value;

pub fn render(value: &Value) -> String {
    let mut out = String::from("Component skeleton:\n");
    let mut next_id = 0;
    let mut stack = vec![Step::Node(value, 0)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Node(Value::Object(map), depth) => {
                stack.extend(map.iter().rev().map(|(key, item)| Step::Entry(key, item, depth)));
            }
            Step::Node(Value::Array(items), depth) => {
                stack.extend(items.iter().rev().map(|item| Step::Node(item, depth)));
            }
            Step::Node(_, _) => {}
            Step::Entry(key, item, depth) => {
                next_id += 1;
                let indent = " ".repeat((depth + 1) * 2);
                out.push_str(&format!("{next_id} - {indent}{key} - {}\n", summary(item)));
                stack.push(Step::Node(item, depth + 1));
            }
        }
    }

    out
}

/// Pending work, popped in the order a depth-first walk would visit it.
enum Step<'a> {
    Node(&'a Value, usize),
    Entry(&'a str, &'a Value, usize),
}

fn summary(value: &Value) -> String {
    match value {
        Value::Object(map) => format!("{{{} keys}}", map.len()),
        Value::Array(items) => format!("[{} items]", items.len()),
        scalar => scalar.to_string(),
    }
}
