//! Library for working with the introspection result of a remote GraphQL API.
//!
//! The crate covers three things:
//!
//! * A serde data model for the parts of an introspection result needed to describe the root
//!   operations and named types of a schema ([`schema`]).
//! * Resolution of a root operation by name. An exact, case-insensitive match always wins.
//!   Otherwise the shortest operation name containing the requested name is chosen
//!   ([`resolve`]).
//! * Generation of an example request for an operation, with variable declarations rendered from
//!   the argument type references and placeholder values for each variable ([`example`]).
//!
//! Everything here is pure: fetching the introspection result is left to the caller, using the
//! document in [`INTROSPECTION_QUERY`].

pub mod error;
pub mod example;
pub mod resolve;
pub mod schema;
pub mod type_ref;

pub use error::NotFound;
pub use example::{GeneratedExample, generate};
pub use resolve::{filter_operations, resolve};
pub use schema::{
    ArgumentDescriptor, EnumValue, FullType, IntrospectionResult, IntrospectionSchema,
    OperationDescriptor, OperationKind, RootType, TypeKind, TypeRef,
};
pub use type_ref::{placeholder_value, render_type};

/// A full introspection query. The response `data` decodes into an [`IntrospectionResult`].
pub const INTROSPECTION_QUERY: &str = include_str!("introspection.graphql");
