use graphmill_client::ClientError;
use graphmill_cypher::CypherError;
use thiserror::Error;

pub type BuildResult<T> = Result<T, QueryBuilderError>;

#[derive(Error, Debug)]
pub enum QueryBuilderError {
    /// Rejected input, raised by the builder call that received it.
    #[error(transparent)]
    Cypher(#[from] CypherError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Query builder has no connection to execute against")]
    NoConnection,
}

impl From<anyhow::Error> for QueryBuilderError {
    fn from(err: anyhow::Error) -> Self {
        QueryBuilderError::Client(ClientError::Backend(err))
    }
}
