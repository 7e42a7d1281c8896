//! Finding root operations by name.

use crate::error::NotFound;
use crate::schema::{IntrospectionSchema, OperationDescriptor, OperationKind};
use tracing::debug;

/// Resolve an operation of the given kind by name.
///
/// A case-insensitive exact match is returned immediately. Otherwise every operation whose name
/// contains the requested name (ignoring case) is a candidate, and the shortest name wins. Ties
/// keep declaration order. Preferring the shortest name is a heuristic with no stronger
/// justification than matching the behaviour clients already rely on.
pub fn resolve<'a>(
    schema: &'a IntrospectionSchema,
    kind: OperationKind,
    requested: &str,
) -> Result<&'a OperationDescriptor, NotFound> {
    let candidates = schema.operations(kind);

    if let Some(exact) = candidates
        .iter()
        .find(|operation| operation.name.eq_ignore_ascii_case(requested))
    {
        return Ok(exact);
    }

    let needle = requested.to_lowercase();
    let resolved = candidates
        .iter()
        .filter(|operation| operation.name.to_lowercase().contains(&needle))
        .min_by_key(|operation| operation.name.len())
        .ok_or_else(|| NotFound {
            kind,
            name: requested.to_string(),
        })?;

    debug!(
        requested,
        resolved = %resolved.name,
        "Resolved {kind} by partial name match"
    );
    Ok(resolved)
}

/// The operations of a kind whose name or description contains the search term (ignoring case),
/// in declaration order. Without a search term, every operation is returned.
pub fn filter_operations<'a>(
    schema: &'a IntrospectionSchema,
    kind: OperationKind,
    search: Option<&str>,
) -> Vec<&'a OperationDescriptor> {
    let needle = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    schema
        .operations(kind)
        .iter()
        .filter(|operation| match &needle {
            None => true,
            Some(needle) => {
                operation.name.to_lowercase().contains(needle)
                    || operation
                        .description
                        .as_ref()
                        .is_some_and(|description| description.to_lowercase().contains(needle))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RootType;

    fn operation(name: &str) -> OperationDescriptor {
        OperationDescriptor {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn schema(queries: &[&str], mutations: &[&str]) -> IntrospectionSchema {
        IntrospectionSchema {
            query_type: Some(RootType {
                name: Some("Query".to_string()),
                fields: queries.iter().copied().map(operation).collect(),
            }),
            mutation_type: Some(RootType {
                name: Some("Mutation".to_string()),
                fields: mutations.iter().copied().map(operation).collect(),
            }),
            types: vec![],
        }
    }

    #[test]
    fn exact_match_beats_substring_match() {
        let schema = schema(&["orders", "order"], &[]);

        let resolved = resolve(&schema, OperationKind::Query, "Order").unwrap();

        assert_eq!(resolved.name, "order");
    }

    #[test]
    fn shortest_substring_match_wins() {
        let schema = schema(&["getOrderDetails", "getOrder", "listDeals"], &[]);

        let resolved = resolve(&schema, OperationKind::Query, "Order").unwrap();

        assert_eq!(resolved.name, "getOrder");
    }

    #[test]
    fn equal_length_matches_keep_declaration_order() {
        let schema = schema(&["orderB", "orderA"], &[]);

        let resolved = resolve(&schema, OperationKind::Query, "order").unwrap();

        assert_eq!(resolved.name, "orderB");
    }

    #[test]
    fn searches_only_the_requested_kind() {
        let schema = schema(&["getOrder"], &["createOrder"]);

        assert_eq!(
            resolve(&schema, OperationKind::Mutation, "order")
                .unwrap()
                .name,
            "createOrder"
        );
        assert_eq!(
            resolve(&schema, OperationKind::Query, "create"),
            Err(NotFound {
                kind: OperationKind::Query,
                name: "create".to_string()
            })
        );
    }

    #[test]
    fn missing_root_type_is_not_found() {
        let schema = IntrospectionSchema {
            query_type: Some(RootType {
                name: Some("Query".to_string()),
                fields: vec![operation("getOrder")],
            }),
            ..Default::default()
        };

        let error = resolve(&schema, OperationKind::Mutation, "getOrder").unwrap_err();

        assert_eq!(
            error.to_string(),
            "No mutation operation matching 'getOrder' was found"
        );
    }

    #[test]
    fn filters_by_name_and_description() {
        let mut schema = schema(&["_heartbeat", "getCustomerOrder", "getDeal"], &[]);
        if let Some(root) = schema.query_type.as_mut() {
            for field in root.fields.iter_mut().filter(|f| f.name == "getDeal") {
                field.description = Some("Deal including its funding NODES".to_string());
            }
        }

        let names = |search: Option<&str>| {
            filter_operations(&schema, OperationKind::Query, search)
                .into_iter()
                .map(|operation| operation.name.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(names(Some("heartbeat")), vec!["_heartbeat"]);
        assert_eq!(names(Some("ORDER")), vec!["getCustomerOrder"]);
        assert_eq!(names(Some("funding nodes")), vec!["getDeal"]);
        assert_eq!(names(Some("  ")).len(), 3);
        assert_eq!(names(None).len(), 3);
        assert!(names(Some("price")).is_empty());
    }
}
