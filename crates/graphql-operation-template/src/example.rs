//! Generation of example requests for root operations.

use crate::schema::{OperationDescriptor, OperationKind};
use crate::type_ref::{placeholder_value, render_type};
use serde::Serialize;
use serde_json::{Map, Value};

/// The selection set emitted for every example. Return types are not inspected, so callers are
/// expected to replace these fields.
const PLACEHOLDER_SELECTIONS: [&str; 2] = ["id", "name"];

/// An example request for an operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedExample {
    pub query_text: String,
    pub variables: Map<String, Value>,
}

impl GeneratedExample {
    /// An example with no query text signals that nothing could be generated
    pub fn is_empty(&self) -> bool {
        self.query_text.is_empty()
    }
}

/// Generate an example request for an operation.
///
/// Variables are declared and passed in argument declaration order, with types rendered from the
/// argument type references and values from [`placeholder_value`]. An operation without a name
/// produces an empty example.
pub fn generate(kind: OperationKind, operation: &OperationDescriptor) -> GeneratedExample {
    if operation.name.is_empty() {
        return GeneratedExample::default();
    }

    let mut query_text = format!("{kind} {}", capitalize(&operation.name));

    if !operation.args.is_empty() {
        let declarations = operation
            .args
            .iter()
            .map(|arg| format!("${}: {}", arg.name, render_type(&arg.type_ref)))
            .collect::<Vec<_>>()
            .join(", ");
        query_text.push_str(&format!("({declarations})"));
    }

    query_text.push_str(" {\n  ");
    query_text.push_str(&operation.name);

    if !operation.args.is_empty() {
        let arguments = operation
            .args
            .iter()
            .map(|arg| format!("{name}: ${name}", name = arg.name))
            .collect::<Vec<_>>()
            .join(", ");
        query_text.push_str(&format!("({arguments})"));
    }

    query_text.push_str(" {\n");
    for selection in PLACEHOLDER_SELECTIONS {
        query_text.push_str(&format!("    {selection}\n"));
    }
    query_text.push_str("  }\n}");

    let variables = operation
        .args
        .iter()
        .map(|arg| (arg.name.clone(), placeholder_value(&arg.type_ref)))
        .collect();

    GeneratedExample {
        query_text,
        variables,
    }
}

/// Uppercase the first character, leaving the rest untouched
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
