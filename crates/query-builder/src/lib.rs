//! Fluent Cypher query building and execution.
//!
//! ```
//! use graphmill_query_builder::prelude::*;
//!
//! # fn main() -> Result<(), QueryBuilderError> {
//! let query = QueryBuilder::new()
//!     .create()
//!     .node(NodeSpec::new().labels("Person").property("name", "Ron"))?
//!     .construct_query();
//! assert_eq!(query, "CREATE (:Person {name: 'Ron'})");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod state;

pub use builder::CypherBuilder;
pub use dialect::{MemgraphQueryBuilder, Neo4jQueryBuilder, QueryBuilder};
pub use error::{BuildResult, QueryBuilderError};
pub use state::BuilderState;

pub mod prelude {
    pub use crate::builder::CypherBuilder;
    pub use crate::dialect::{MemgraphQueryBuilder, Neo4jQueryBuilder, QueryBuilder};
    pub use crate::error::{BuildResult, QueryBuilderError};
    pub use graphmill_client::{Connection, Parameters, ResultRow, Rows};
    pub use graphmill_cypher::prelude::*;
}

#[cfg(test)]
mod tests;
