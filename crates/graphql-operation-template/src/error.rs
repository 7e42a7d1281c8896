use crate::schema::OperationKind;

/// No operation of the requested kind matched the requested name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No {kind} operation matching '{name}' was found")]
pub struct NotFound {
    pub kind: OperationKind,
    pub name: String,
}
