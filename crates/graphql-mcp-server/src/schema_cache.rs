//! The introspected schema, fetched once and shared between tools

use crate::errors::SchemaError;
use crate::graphql::GraphQLClient;
use graphql_operation_template::{
    INTROSPECTION_QUERY, IntrospectionResult, IntrospectionSchema, OperationKind,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Holds the schema of the GraphQL endpoint.
///
/// The schema is introspected on first use and kept until [`SchemaCache::refresh`] replaces it.
/// Callers arriving while a fetch is in progress wait for it instead of starting another.
pub struct SchemaCache {
    client: GraphQLClient,
    slot: Mutex<Option<Arc<IntrospectionSchema>>>,
}

impl SchemaCache {
    pub fn new(client: GraphQLClient) -> Self {
        Self {
            client,
            slot: Mutex::new(None),
        }
    }

    /// A cache that starts out holding a known schema
    pub fn with_schema(client: GraphQLClient, schema: IntrospectionSchema) -> Self {
        Self {
            client,
            slot: Mutex::new(Some(Arc::new(schema))),
        }
    }

    /// The cached schema, introspecting the endpoint if nothing is cached yet
    pub async fn schema(&self) -> Result<Arc<IntrospectionSchema>, SchemaError> {
        let mut slot = self.slot.lock().await;
        if let Some(schema) = slot.as_ref() {
            return Ok(schema.clone());
        }

        let schema = Arc::new(self.fetch().await?);
        *slot = Some(schema.clone());
        Ok(schema)
    }

    /// Introspect the endpoint again, replacing the cached schema on success
    pub async fn refresh(&self) -> Result<Arc<IntrospectionSchema>, SchemaError> {
        let mut slot = self.slot.lock().await;
        let schema = Arc::new(self.fetch().await?);
        *slot = Some(schema.clone());
        Ok(schema)
    }

    async fn fetch(&self) -> Result<IntrospectionSchema, SchemaError> {
        let response = self
            .client
            .execute_query(INTROSPECTION_QUERY, None)
            .await?
            .into_result()?;

        if response.data.get("__schema").is_none_or(|schema| schema.is_null()) {
            return Err(SchemaError::MissingSchema);
        }
        let IntrospectionResult { schema } = serde_json::from_value(response.data)?;

        info!(
            endpoint = %self.client.endpoint(),
            queries = schema.operations(OperationKind::Query).len(),
            mutations = schema.operations(OperationKind::Mutation).len(),
            types = schema.types.len(),
            "Loaded GraphQL schema"
        );
        Ok(schema)
    }
}
