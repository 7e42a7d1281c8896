use graphql_operation_template::{
    ArgumentDescriptor, FullType, OperationDescriptor, TypeKind, render_type,
};

/// `name(arg: Type, ...): ReturnType`, without parentheses when there are no arguments
pub(super) fn signature(field: &OperationDescriptor) -> String {
    let mut signature = field.name.clone();
    if !field.args.is_empty() {
        let args = field
            .args
            .iter()
            .map(argument)
            .collect::<Vec<_>>()
            .join(", ");
        signature.push_str(&format!("({args})"));
    }
    if let Some(type_ref) = &field.type_ref {
        signature.push_str(&format!(": {}", render_type(type_ref)));
    }
    signature
}

/// A one-line summary of a field, with its description and deprecation
pub(super) fn field_line(field: &OperationDescriptor) -> String {
    let mut line = signature(field);
    if let Some(description) = first_line(field.description.as_deref()) {
        line.push_str(&format!(" - {description}"));
    }
    if field.is_deprecated {
        line.push_str(&deprecation(field.deprecation_reason.as_deref()));
    }
    line
}

/// A field along with a description of each argument
pub(super) fn field_details(field: &OperationDescriptor) -> String {
    let mut text = signature(field);
    if let Some(description) = field.description.as_deref().filter(|d| !d.is_empty()) {
        text.push_str(&format!("\n\n{description}"));
    }
    if field.is_deprecated {
        text.push_str(&format!(
            "\n\nDeprecated{}",
            field
                .deprecation_reason
                .as_deref()
                .map(|reason| format!(": {reason}"))
                .unwrap_or_default()
        ));
    }
    if !field.args.is_empty() {
        text.push_str("\n\nArguments:");
        for arg in &field.args {
            text.push_str(&format!("\n  {}", input_line(arg)));
        }
    }
    text
}

/// Everything known about a named type
pub(super) fn type_details(full_type: &FullType) -> String {
    let mut text = format!("{} ({})", full_type.name, full_type.kind);
    if let Some(description) = full_type.description.as_deref().filter(|d| !d.is_empty()) {
        text.push_str(&format!("\n{description}"));
    }

    if !full_type.interfaces.is_empty() {
        text.push_str(&format!(
            "\n\nImplements: {}",
            type_names(&full_type.interfaces)
        ));
    }
    if !full_type.fields.is_empty() {
        text.push_str("\n\nFields:");
        for field in &full_type.fields {
            text.push_str(&format!("\n  {}", field_line(field)));
        }
    }
    if !full_type.input_fields.is_empty() {
        text.push_str("\n\nInput fields:");
        for field in &full_type.input_fields {
            text.push_str(&format!("\n  {}", input_line(field)));
        }
    }
    if !full_type.enum_values.is_empty() {
        text.push_str("\n\nValues:");
        for value in &full_type.enum_values {
            text.push_str(&format!("\n  {}", value.name));
            if let Some(description) = first_line(value.description.as_deref()) {
                text.push_str(&format!(" - {description}"));
            }
            if value.is_deprecated {
                text.push_str(&deprecation(value.deprecation_reason.as_deref()));
            }
        }
    }
    if !full_type.possible_types.is_empty() {
        text.push_str(&format!(
            "\n\nPossible types: {}",
            type_names(&full_type.possible_types)
        ));
    }
    if full_type.kind == TypeKind::Scalar {
        text.push_str("\n\nScalar values are sent and received as JSON primitives.");
    }
    text
}

fn argument(arg: &ArgumentDescriptor) -> String {
    let mut text = format!("{}: {}", arg.name, render_type(&arg.type_ref));
    if let Some(default) = &arg.default_value {
        text.push_str(&format!(" = {default}"));
    }
    text
}

fn input_line(arg: &ArgumentDescriptor) -> String {
    let mut line = argument(arg);
    if let Some(description) = first_line(arg.description.as_deref()) {
        line.push_str(&format!(" - {description}"));
    }
    line
}

fn deprecation(reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!(" (deprecated: {reason})"),
        None => " (deprecated)".to_string(),
    }
}

fn first_line(description: Option<&str>) -> Option<&str> {
    description
        .and_then(|description| description.lines().next())
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

fn type_names(type_refs: &[graphql_operation_template::TypeRef]) -> String {
    type_refs
        .iter()
        .map(render_type)
        .collect::<Vec<_>>()
        .join(", ")
}
