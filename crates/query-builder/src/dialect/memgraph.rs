use super::impl_builder;
use crate::builder::CypherBuilder;
use crate::error::BuildResult;
use crate::state::BuilderState;
use graphmill_cypher::clause::{
    CallArguments, Clause, ClauseKind, LoadCsvClause, Subgraph, GRAPH_VARIABLE,
};
use tracing::debug;

/// Builder for Memgraph, adding `LOAD CSV` and procedure calls over a
/// projected subgraph.
#[derive(Debug, Clone)]
pub struct MemgraphQueryBuilder {
    state: BuilderState,
}

impl_builder!(MemgraphQueryBuilder);

impl MemgraphQueryBuilder {
    /// `LOAD CSV FROM 'path' WITH HEADER AS row` (or `NO HEADER`).
    ///
    /// Local paths are read by the database server, not by this process.
    pub fn load_csv(mut self, path: &str, header: bool, row: &str) -> BuildResult<Self> {
        let clause = LoadCsvClause::new(path, header, row)?;
        self.state_mut().push(Clause::LoadCsv(clause));
        Ok(self)
    }

    /// Calls `procedure` on a projection of the graph instead of the whole
    /// database. The path match and projection are placed in front of the
    /// call and the projected graph becomes its first argument:
    ///
    /// ```text
    /// MATCH p = (n0)-[r0]->(n1) WHERE (n0:A) AND (n1:B) AND (type(r0) = 'T')
    /// WITH project(p) AS graph
    /// CALL mod.proc(graph, 'x')
    /// ```
    pub fn call_subgraph(
        self,
        procedure: &str,
        arguments: impl Into<CallArguments>,
        subgraph: Subgraph,
    ) -> BuildResult<Self> {
        let (path, project) = subgraph.compile()?;
        let mut builder = self.call(procedure, arguments)?;

        let state = builder.state_mut();
        let Some(index) = state.last_index_of(ClauseKind::Call) else {
            return Ok(builder);
        };
        let call = match &state.clauses()[index] {
            Clause::Call(call) => call.with_leading_argument(GRAPH_VARIABLE),
            _ => return Ok(builder),
        };

        debug!(procedure, index, "projecting subgraph for procedure call");
        state.splice(
            index,
            vec![Clause::PathMatch(path), Clause::Project(project)],
            Clause::Call(call),
        );
        Ok(builder)
    }
}
