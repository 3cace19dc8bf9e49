use std::fmt;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        })
    }
}

/// Failures talking to the employee store.
///
/// Network, server and rejected-payload errors are not told apart: a call either
/// failed while listing or failed while mutating.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to fetch employees: {source}")]
    Fetch {
        #[source]
        source: BoxError,
    },
    #[error("employee {operation} failed: {source}")]
    Mutation {
        operation: MutationKind,
        #[source]
        source: BoxError,
    },
    #[error("cannot address employee '{id}' under endpoint {endpoint}")]
    InvalidEndpoint { endpoint: String, id: String },
}

impl StoreError {
    pub fn fetch(source: impl Into<BoxError>) -> Self {
        StoreError::Fetch {
            source: source.into(),
        }
    }

    pub fn mutation(operation: MutationKind, source: impl Into<BoxError>) -> Self {
        StoreError::Mutation {
            operation,
            source: source.into(),
        }
    }

    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, StoreError::Fetch { .. })
    }

    pub fn is_mutation_failure(&self) -> bool {
        !self.is_fetch_failure()
    }
}
