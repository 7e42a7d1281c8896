//! Rendering of type references and the placeholder values derived from them.

use crate::schema::{TypeKind, TypeRef};
use serde_json::{Map, Value, json};

/// The name used when a type reference does not resolve to a named type
const FALLBACK_TYPE_NAME: &str = "String";

/// Render a type reference in GraphQL syntax, e.g. `[Int!]!`.
///
/// A reference which never reaches a named type renders as `String`.
pub fn render_type(type_ref: &TypeRef) -> String {
    let inner = || {
        type_ref
            .of_type
            .as_deref()
            .map(render_type)
            .unwrap_or_else(|| FALLBACK_TYPE_NAME.to_string())
    };
    match type_ref.kind {
        TypeKind::NonNull => format!("{}!", inner()),
        TypeKind::List => format!("[{}]", inner()),
        _ => type_ref
            .name
            .clone()
            .unwrap_or_else(|| FALLBACK_TYPE_NAME.to_string()),
    }
}

/// The named type at the end of a chain of wrappers
#[derive(Debug, PartialEq, Eq)]
pub struct UnwrappedType<'a> {
    pub name: &'a str,
    pub is_list: bool,
}

/// Follow `NON_NULL` and `LIST` wrappers down to the named type, noting whether any level is a
/// list
pub fn unwrap_type(type_ref: &TypeRef) -> UnwrappedType<'_> {
    let mut current = type_ref;
    let mut is_list = false;
    loop {
        is_list |= current.kind == TypeKind::List;
        match (current.kind.is_wrapper(), current.of_type.as_deref()) {
            (true, Some(inner)) => current = inner,
            _ => break,
        }
    }
    UnwrappedType {
        name: current.name.as_deref().unwrap_or(FALLBACK_TYPE_NAME),
        is_list,
    }
}

/// An example value for a variable of the given type.
///
/// Lists at any depth produce a single element array, regardless of how many list levels there
/// are.
pub fn placeholder_value(type_ref: &TypeRef) -> Value {
    let UnwrappedType { name, is_list } = unwrap_type(type_ref);
    let value = match name {
        "Int" => json!(1),
        "Float" => json!(1.0),
        "Boolean" => json!(true),
        "ID" => json!("ID1"),
        input if input.ends_with("Input") => Value::Object(Map::new()),
        other => Value::String(format!("{other}1")),
    };
    if is_list {
        Value::Array(vec![value])
    } else {
        value
    }
}
