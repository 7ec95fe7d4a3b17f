use thiserror::Error;

pub type CypherResult<T> = Result<T, CypherError>;

/// Caller-input contract violations, all detected before any text leaves the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CypherError {
    #[error("Cannot serialize value of type {type_name} to Cypher: {reason}")]
    Serialization {
        type_name: &'static str,
        reason: String,
    },

    #[error("{clause} requires either a literal or an expression, none was given")]
    MissingDiscriminant { clause: String },

    #[error("{clause} accepts either a literal or an expression, not both")]
    ConflictingDiscriminant { clause: String },

    #[error("Malformed {clause} item: {reason}")]
    ResultShape { clause: String, reason: String },

    #[error("Subgraph {filter} filter has {got} positions but the path has {expected}")]
    ShapeMismatch {
        filter: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Raised by `Order::from_str`. Inside an ORDER BY entry it is reported as
    /// [`CypherError::ResultShape`] instead.
    #[error("Unknown ordering direction: {0}")]
    UnknownOrder(String),

    #[error("{clause} pattern cannot directly follow another {clause} pattern")]
    InvalidPatternChain { clause: &'static str },

    #[error("Invalid CSV source {path}: {reason}")]
    InvalidCsvSource { path: String, reason: String },
}

impl CypherError {
    pub(crate) fn unmappable(type_name: &'static str) -> Self {
        CypherError::Serialization {
            type_name,
            reason: "values of this type only appear in query results".to_string(),
        }
    }
}
