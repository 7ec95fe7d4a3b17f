use crate::result::ResultRow;
use crate::ClientError;
use graphmill_cypher::Value;
use indexmap::IndexMap;

/// Query parameters, referenced in the query text as `$name`.
pub type Parameters = IndexMap<String, Value>;

/// Forward-only, single-pass stream of result rows. Iterating it again means
/// executing the query again.
pub type Rows = Box<dyn Iterator<Item = Result<ResultRow, ClientError>> + Send>;

/// The wire client that actually talks to the database.
///
/// Implementations own transport, authentication, timeouts and transactions.
/// Errors are returned as-is and wrapped by callers into [`ClientError::Backend`].
pub trait Connection: Send + Sync {
    /// Runs a query and discards whatever it returns.
    fn execute(&self, query: &str, parameters: &Parameters) -> anyhow::Result<()>;

    /// Runs a query and streams its rows.
    fn execute_and_fetch(&self, query: &str, parameters: &Parameters) -> anyhow::Result<Rows>;

    fn is_active(&self) -> bool {
        true
    }
}

/// An empty row stream, for queries that produce nothing.
pub fn no_rows() -> Rows {
    Box::new(std::iter::empty())
}
