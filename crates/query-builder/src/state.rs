use crate::error::BuildResult;
use graphmill_client::Connection;
use graphmill_cypher::clause::{render_clauses, Clause, ClauseKind};
use graphmill_cypher::{CypherError, SerializerConfig};
use std::fmt;
use std::sync::Arc;

/// Ordered fragments of one query plus what is needed to run it.
///
/// Fragments are only ever appended, except by dialects that splice
/// generated fragments in front of one already present.
#[derive(Clone, Default)]
pub struct BuilderState {
    clauses: Vec<Clause>,
    connection: Option<Arc<dyn Connection>>,
    config: SerializerConfig,
    fetch_results: bool,
}

impl fmt::Debug for BuilderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderState")
            .field("clauses", &self.clauses)
            .field("connected", &self.connection.is_some())
            .field("config", &self.config)
            .field("fetch_results", &self.fetch_results)
            .finish()
    }
}

impl BuilderState {
    pub fn new(connection: Option<Arc<dyn Connection>>) -> Self {
        BuilderState {
            connection,
            ..Default::default()
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn connection(&self) -> Option<&Arc<dyn Connection>> {
        self.connection.as_ref()
    }

    pub fn set_connection(&mut self, connection: Arc<dyn Connection>) {
        self.connection = Some(connection);
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SerializerConfig) {
        self.config = config;
    }

    /// Whether execution should stream rows back rather than discard them.
    pub fn fetch_results(&self) -> bool {
        self.fetch_results
    }

    pub fn push(&mut self, clause: Clause) {
        self.fetch_results |= clause.returns_rows();
        self.clauses.push(clause);
    }

    /// Appends a node or relationship pattern, which may not directly follow
    /// a pattern of the same kind.
    pub fn push_pattern(&mut self, clause: Clause) -> BuildResult<()> {
        let kind = clause.kind();
        if self.clauses.last().map(Clause::kind) == Some(kind) {
            let clause = match kind {
                ClauseKind::Node => "Node",
                _ => "Relationship",
            };
            return Err(CypherError::InvalidPatternChain { clause }.into());
        }
        self.push(clause);
        Ok(())
    }

    pub fn last_index_of(&self, kind: ClauseKind) -> Option<usize> {
        self.clauses.iter().rposition(|clause| clause.kind() == kind)
    }

    /// Replaces the fragment at `index` with `replacement`, preceded by `prefix`.
    /// `index` must come from [`BuilderState::last_index_of`].
    pub fn splice(&mut self, index: usize, prefix: Vec<Clause>, replacement: Clause) {
        self.clauses[index] = replacement;
        for (offset, clause) in prefix.into_iter().enumerate() {
            self.clauses.insert(index + offset, clause);
        }
    }

    pub fn render(&self) -> String {
        render_clauses(&self.clauses)
    }
}
