//! An MCP server exposing a remote GraphQL API to LLM clients.
//!
//! Requests to the API are authenticated with an OAuth client-credentials token, and the schema
//! is discovered through introspection. Tools cover schema exploration, example generation for
//! root operations, raw query execution, and a handful of fixed business queries.

pub mod auth;
pub mod errors;
pub mod graphql;
mod json_schema;
pub mod queries;
pub mod schema_cache;
pub mod server;
pub(crate) mod tools;
