//! Concrete builders. The portable one speaks only the shared grammar;
//! database dialects add their own extensions on top.

mod memgraph;
mod neo4j;

pub use memgraph::MemgraphQueryBuilder;
pub use neo4j::Neo4jQueryBuilder;

use crate::state::BuilderState;

/// Gives a builder type its constructors and wires it to [`crate::builder::CypherBuilder`].
macro_rules! impl_builder {
    ($name:ident) => {
        impl $name {
            /// A builder that can only render text.
            pub fn new() -> Self {
                $name {
                    state: $crate::state::BuilderState::new(None),
                }
            }

            /// A builder that can also execute through `connection`.
            pub fn connected(connection: std::sync::Arc<dyn graphmill_client::Connection>) -> Self {
                $name {
                    state: $crate::state::BuilderState::new(Some(connection)),
                }
            }

            /// Attaches a connection after the fact, e.g. to run a query built offline.
            pub fn with_connection(
                mut self,
                connection: std::sync::Arc<dyn graphmill_client::Connection>,
            ) -> Self {
                self.state.set_connection(connection);
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::builder::CypherBuilder for $name {
            fn state(&self) -> &$crate::state::BuilderState {
                &self.state
            }

            fn state_mut(&mut self) -> &mut $crate::state::BuilderState {
                &mut self.state
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    "{}",
                    $crate::builder::CypherBuilder::construct_query(self)
                )
            }
        }
    };
}

pub(crate) use impl_builder;

/// Builder limited to the grammar every supported database understands.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    state: BuilderState,
}

impl_builder!(QueryBuilder);
