use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Failure reported by the connection; passed through as-is, never retried.
    #[error("Database error: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("Query returned no results")]
    EmptyResult,

    #[error("Query returned {0} results where exactly one was expected")]
    MultipleResults(usize),

    #[error("Result row has no column named {0}")]
    MissingAlias(String),

    #[error("Port {port} on host {host} did not start accepting connections in time")]
    WaitForPort { host: String, port: u16 },
}
