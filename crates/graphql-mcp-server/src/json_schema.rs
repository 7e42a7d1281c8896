use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde_json::{Value, json};
use tracing::error;

/// The JSON schema of a tool input type, as the object MCP expects
pub(crate) fn input_schema<T: JsonSchema>() -> JsonObject {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(schema)) => schema,
        _ => {
            error!(
                input = std::any::type_name::<T>(),
                "Failed to generate input schema"
            );
            JsonObject::from_iter([("type".to_string(), json!("object"))])
        }
    }
}
