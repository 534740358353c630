//! Error type for expression building.
//!
//! Every error is raised synchronously at the builder call that caused it.
//! Compilation itself never fails.

/// Errors produced while assembling an expression or an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// A builder call received an argument that matches none of the shapes
    /// accepted for its operator.
    #[error("Malformed argument for {operation}: {message}")]
    MalformedArgument {
        /// The operator or function name that was called.
        operation: String,
        /// Explanation.
        message: String,
    },
    /// An attribute path string could not be parsed.
    #[error("Invalid attribute path '{path}': {message}")]
    InvalidPath {
        /// The offending path text.
        path: String,
        /// Explanation.
        message: String,
    },
    /// The same attribute path was targeted by more than one update action.
    #[error("Conflicting update targets: path '{path}' is already targeted by a {existing} action")]
    ConflictingUpdateTarget {
        /// The rendered path.
        path: String,
        /// The clause keyword already holding the path.
        existing: &'static str,
    },
    /// An operation that addresses a single item was built without a key.
    #[error("{operation} requires a primary key")]
    MissingKey {
        /// The operation name.
        operation: &'static str,
    },
    /// A `Query` was built without a key condition.
    #[error("Query requires a key condition expression")]
    MissingKeyCondition,
    /// A `PutItem` was built without an item payload.
    #[error("PutItem requires an item")]
    MissingItem,
}

impl ExpressionError {
    pub(crate) fn malformed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedArgument {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience result type for builder operations.
pub type ExpressionResult<T> = Result<T, ExpressionError>;
