use super::impl_builder;
use crate::state::BuilderState;

/// Builder for Neo4j. Neo4j has no projection procedures or CSV loader
/// extensions, so it offers the portable grammar unchanged.
#[derive(Debug, Clone)]
pub struct Neo4jQueryBuilder {
    state: BuilderState,
}

impl_builder!(Neo4jQueryBuilder);
