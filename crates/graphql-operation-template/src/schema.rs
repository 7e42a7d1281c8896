//! Serde model of a GraphQL introspection result.
//!
//! Only the parts required to describe root operations and named types are modelled. Lists that
//! the introspection system reports as `null` (for example the `fields` of a scalar) decode as
//! empty vectors.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The `data` of an introspection response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntrospectionResult {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

/// A GraphQL server's description of itself
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    #[serde(default)]
    pub query_type: Option<RootType>,

    #[serde(default)]
    pub mutation_type: Option<RootType>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub types: Vec<FullType>,
}

/// A root operation type along with its fields, which are the operations of that kind
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RootType {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub fields: Vec<OperationDescriptor>,
}

/// A field of an object type. Fields of the root types are operations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub args: Vec<ArgumentDescriptor>,

    #[serde(rename = "type", default)]
    pub type_ref: Option<TypeRef>,

    #[serde(default)]
    pub is_deprecated: bool,

    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// Fields of non-root object types share the operation shape
pub type FieldDescriptor = OperationDescriptor;

/// An argument of a field, or a field of an input object
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDescriptor {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub type_ref: TypeRef,

    #[serde(default)]
    pub default_value: Option<String>,
}

/// The kind of a type reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    #[serde(other)]
    Other,
}

impl TypeKind {
    /// Whether this kind wraps another type rather than naming one
    pub fn is_wrapper(self) -> bool {
        matches!(self, TypeKind::List | TypeKind::NonNull)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
            TypeKind::Other => "OTHER",
        })
    }
}

/// A reference to a type. `NON_NULL` and `LIST` wrap another reference in `of_type`; any other
/// kind names a type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    pub fn scalar(name: impl Into<String>) -> Self {
        Self::named(TypeKind::Scalar, name)
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    pub fn list(inner: TypeRef) -> Self {
        Self {
            kind: TypeKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }
}

/// A named type with its members
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub fields: Vec<FieldDescriptor>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub input_fields: Vec<ArgumentDescriptor>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub interfaces: Vec<TypeRef>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub enum_values: Vec<EnumValue>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub possible_types: Vec<TypeRef>,
}

impl FullType {
    /// Introspection types (`__Schema`, `__Type`, ...) are built in
    pub fn is_built_in(&self) -> bool {
        self.name.starts_with("__")
    }

    /// Look up an output field by name, ignoring case when there is no exact match
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        find_by_name(&self.fields, name, |field| &field.name)
    }

    /// Look up an input field by name, ignoring case when there is no exact match
    pub fn input_field(&self, name: &str) -> Option<&ArgumentDescriptor> {
        find_by_name(&self.input_fields, name, |field| &field.name)
    }
}

/// A value of an enum type
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_deprecated: bool,

    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// The kind of a root operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IntrospectionSchema {
    /// The root type for an operation kind, if the schema defines one
    pub fn root_type(&self, kind: OperationKind) -> Option<&RootType> {
        match kind {
            OperationKind::Query => self.query_type.as_ref(),
            OperationKind::Mutation => self.mutation_type.as_ref(),
        }
    }

    /// The operations of a kind, in declaration order
    pub fn operations(&self, kind: OperationKind) -> &[OperationDescriptor] {
        self.root_type(kind)
            .map(|root| root.fields.as_slice())
            .unwrap_or_default()
    }

    /// Look up a named type, ignoring case when there is no exact match
    pub fn type_by_name(&self, name: &str) -> Option<&FullType> {
        find_by_name(&self.types, name, |full_type| &full_type.name)
    }
}

fn find_by_name<'a, T>(
    items: &'a [T],
    name: &str,
    name_of: impl Fn(&T) -> &String,
) -> Option<&'a T> {
    items
        .iter()
        .find(|item| name_of(item) == name)
        .or_else(|| {
            items
                .iter()
                .find(|item| name_of(item).eq_ignore_ascii_case(name))
        })
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
