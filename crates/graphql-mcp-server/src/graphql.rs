//! Execute GraphQL documents against the remote endpoint

use crate::auth::TokenProvider;
use crate::errors::{GraphQLResponseError, TransportError};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// A single entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphQLError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQLError {
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::String(message) => Self::from_message(message),
            other => serde_json::from_value(other.clone())
                .unwrap_or_else(|_| Self::from_message(other.to_string())),
        }
    }
}

/// A decoded GraphQL response.
///
/// Bodies carrying `data` or `errors` are treated as a standard response envelope, with `data`
/// defaulting to `null`. Anything else is taken to be the data itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLResponse {
    pub data: Value,
    pub errors: Vec<GraphQLError>,
}

impl GraphQLResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Fail when the response carries errors but no data. Responses with partial data succeed.
    pub fn into_result(self) -> Result<Self, GraphQLResponseError> {
        if self.has_errors() && self.data.is_null() {
            Err(GraphQLResponseError {
                errors: self.errors,
            })
        } else {
            Ok(self)
        }
    }
}

impl From<Value> for GraphQLResponse {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(mut envelope)
                if envelope.contains_key("data") || envelope.contains_key("errors") =>
            {
                let data = envelope.remove("data").unwrap_or(Value::Null);
                let errors = match envelope.remove("errors") {
                    Some(Value::Array(errors)) => {
                        errors.into_iter().map(GraphQLError::from_value).collect()
                    }
                    None | Some(Value::Null) => vec![],
                    Some(other) => vec![GraphQLError::from_value(other)],
                };
                Self { data, errors }
            }
            data => Self {
                data,
                errors: vec![],
            },
        }
    }
}

/// Sends documents to the GraphQL endpoint, authenticated with a token from a [`TokenProvider`]
#[derive(Clone)]
pub struct GraphQLClient {
    http: reqwest::Client,
    endpoint: Url,
    tokens: Arc<TokenProvider>,
}

impl GraphQLClient {
    pub fn new(http: reqwest::Client, endpoint: Url, tokens: Arc<TokenProvider>) -> Self {
        Self {
            http,
            endpoint,
            tokens,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Execute a document with optional variables.
    ///
    /// The token is sent as the `authorization` header exactly as issued, without a scheme
    /// prefix.
    pub async fn execute_query(
        &self,
        document: &str,
        variables: Option<Value>,
    ) -> Result<GraphQLResponse, TransportError> {
        let token = self.tokens.access_token().await?;

        let mut body = json!({ "query": document });
        if let (Some(variables), Value::Object(request)) = (variables, &mut body) {
            request.insert("variables".to_string(), variables);
        }
        debug!(endpoint = %self.endpoint, body = %body, "Executing GraphQL request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!(%status, "GraphQL endpoint returned an error status");
            return Err(TransportError::Status { status, body: text });
        }

        serde_json::from_str::<Value>(&text)
            .map(GraphQLResponse::from)
            .map_err(|error| TransportError::InvalidResponse(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ClientCredentials;
    use mockito::{Matcher, Server};
    use secrecy::SecretString;

    async fn client(server: &mut Server) -> GraphQLClient {
        server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(r#"{"access_token":"raw-token","expires_in":3600}"#)
            .create_async()
            .await;

        let http = reqwest::Client::new();
        let tokens = TokenProvider::new(
            http.clone(),
            ClientCredentials {
                token_url: Url::parse(&format!("{}/oauth/token", server.url())).unwrap(),
                client_id: "client".to_string(),
                client_secret: SecretString::from("secret".to_string()),
            },
        );
        GraphQLClient::new(
            http,
            Url::parse(&format!("{}/graphql", server.url())).unwrap(),
            Arc::new(tokens),
        )
    }

    #[tokio::test]
    async fn sends_the_raw_token_and_variables() {
        let mut server = Server::new_async().await;
        let client = client(&mut server).await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "raw-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "query": "query GetCustomerOrder($biId: String!) { getCustomerOrder(biId: $biId) { id } }",
                "variables": { "biId": "BI-42" }
            })))
            .with_status(200)
            .with_body(r#"{"data":{"getCustomerOrder":{"id":"1"}}}"#)
            .create_async()
            .await;

        let response = client
            .execute_query(
                "query GetCustomerOrder($biId: String!) { getCustomerOrder(biId: $biId) { id } }",
                Some(json!({ "biId": "BI-42" })),
            )
            .await
            .unwrap();

        assert_eq!(response.data, json!({ "getCustomerOrder": { "id": "1" } }));
        assert!(!response.has_errors());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn omits_variables_when_there_are_none() {
        let mut server = Server::new_async().await;
        let client = client(&mut server).await;
        let mock = server
            .mock("POST", "/graphql")
            .match_body(Matcher::Json(json!({ "query": "{ _heartbeat }" })))
            .with_status(200)
            .with_body(r#"{"data":{"_heartbeat":true}}"#)
            .create_async()
            .await;

        client.execute_query("{ _heartbeat }", None).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_statuses_carry_the_body() {
        let mut server = Server::new_async().await;
        let client = client(&mut server).await;
        server
            .mock("POST", "/graphql")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let error = client.execute_query("{ a }", None).await.unwrap_err();

        assert!(matches!(
            &error,
            TransportError::Status { status, body } if *status == 403 && body == "forbidden"
        ));
    }

    #[tokio::test]
    async fn undecodable_bodies_are_invalid_responses() {
        let mut server = Server::new_async().await;
        let client = client(&mut server).await;
        server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        assert!(matches!(
            client.execute_query("{ a }", None).await,
            Err(TransportError::InvalidResponse(_))
        ));
    }

    #[test]
    fn decodes_standard_envelopes() {
        let response = GraphQLResponse::from(json!({
            "data": null,
            "errors": [
                { "message": "Not authorised", "path": ["getCustomerOrder"] },
                "plain string error"
            ]
        }));

        assert!(response.data.is_null());
        assert_eq!(response.errors.len(), 2);
        assert_eq!(response.errors[0].path, Some(json!(["getCustomerOrder"])));
        assert_eq!(response.errors[1].message, "plain string error");
        assert!(response.into_result().is_err());
    }

    #[test]
    fn partial_data_with_errors_is_still_a_result() {
        let response = GraphQLResponse::from(json!({
            "data": { "deals": [] },
            "errors": [{ "message": "fundingNodes unavailable" }]
        }));

        let response = response.into_result().unwrap();
        assert!(response.has_errors());
        assert_eq!(response.data, json!({ "deals": [] }));
    }

    #[test]
    fn bare_bodies_are_data() {
        let response = GraphQLResponse::from(json!({ "getCustomerOrder": { "id": "1" } }));

        assert_eq!(response.data, json!({ "getCustomerOrder": { "id": "1" } }));
        assert!(response.errors.is_empty());
    }
}
