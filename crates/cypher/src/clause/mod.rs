//! Clause fragments. Each one is validated when constructed and renders to
//! trimmed Cypher text; a query is its fragments joined by single spaces.

mod condition;
mod pattern;
mod projection;
mod reading;
mod subgraph;
mod update;

pub use condition::{Connective, Operand, Operator, SetClause, WhereClause};
pub use pattern::{Direction, NodePattern, NodeSpec, RelSpec, RelationshipPattern};
pub use projection::{
    Order, OrderByClause, OrderEntry, Ordering, PagingClause, ResultClause, ResultEntry,
    ResultKeyword, Results,
};
pub use reading::{
    CallArguments, CallClause, CsvSource, LoadCsvClause, UnionClause, UnwindClause,
};
pub use subgraph::{PathMatchClause, PositionFilter, ProjectClause, Subgraph, GRAPH_VARIABLE};
pub use update::{DeleteClause, ForeachClause, Items, RemoveClause};

use crate::serialize::ToCypher;
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    Match { optional: bool },
    Merge,
    Create,
    Node(NodePattern),
    Relationship(RelationshipPattern),
    Where(WhereClause),
    Set(SetClause),
    Delete(DeleteClause),
    Remove(RemoveClause),
    Result(ResultClause),
    OrderBy(OrderByClause),
    Paging(PagingClause),
    Unwind(UnwindClause),
    Call(CallClause),
    Foreach(ForeachClause),
    Union(UnionClause),
    LoadCsv(LoadCsvClause),
    PathMatch(PathMatchClause),
    Project(ProjectClause),
    /// Text injected verbatim.
    Custom(String),
}

/// Fieldless tag of a [`Clause`], used to find fragments by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Match,
    Merge,
    Create,
    Node,
    Relationship,
    Where,
    Set,
    Delete,
    Remove,
    Return,
    Yield,
    With,
    OrderBy,
    Paging,
    Unwind,
    Call,
    Foreach,
    Union,
    LoadCsv,
    PathMatch,
    Project,
    Custom,
}

impl Clause {
    pub fn kind(&self) -> ClauseKind {
        match self {
            Clause::Match { .. } => ClauseKind::Match,
            Clause::Merge => ClauseKind::Merge,
            Clause::Create => ClauseKind::Create,
            Clause::Node(_) => ClauseKind::Node,
            Clause::Relationship(_) => ClauseKind::Relationship,
            Clause::Where(_) => ClauseKind::Where,
            Clause::Set(_) => ClauseKind::Set,
            Clause::Delete(_) => ClauseKind::Delete,
            Clause::Remove(_) => ClauseKind::Remove,
            Clause::Result(result) => match result.keyword() {
                ResultKeyword::Return => ClauseKind::Return,
                ResultKeyword::Yield => ClauseKind::Yield,
                ResultKeyword::With => ClauseKind::With,
            },
            Clause::OrderBy(_) => ClauseKind::OrderBy,
            Clause::Paging(_) => ClauseKind::Paging,
            Clause::Unwind(_) => ClauseKind::Unwind,
            Clause::Call(_) => ClauseKind::Call,
            Clause::Foreach(_) => ClauseKind::Foreach,
            Clause::Union(_) => ClauseKind::Union,
            Clause::LoadCsv(_) => ClauseKind::LoadCsv,
            Clause::PathMatch(_) => ClauseKind::PathMatch,
            Clause::Project(_) => ClauseKind::Project,
            Clause::Custom(_) => ClauseKind::Custom,
        }
    }

    /// Whether executing a query containing this fragment produces rows.
    pub fn returns_rows(&self) -> bool {
        match self {
            Clause::Result(result) => result.keyword() == ResultKeyword::Return,
            Clause::Custom(text) => text.contains(" RETURN "),
            _ => false,
        }
    }
}

impl ToCypher for Clause {
    fn to_cypher(&self) -> String {
        match self {
            Clause::Match { optional: true } => "OPTIONAL MATCH".to_string(),
            Clause::Match { optional: false } => "MATCH".to_string(),
            Clause::Merge => "MERGE".to_string(),
            Clause::Create => "CREATE".to_string(),
            Clause::Node(c) => c.to_cypher(),
            Clause::Relationship(c) => c.to_cypher(),
            Clause::Where(c) => c.to_cypher(),
            Clause::Set(c) => c.to_cypher(),
            Clause::Delete(c) => c.to_cypher(),
            Clause::Remove(c) => c.to_cypher(),
            Clause::Result(c) => c.to_cypher(),
            Clause::OrderBy(c) => c.to_cypher(),
            Clause::Paging(c) => c.to_cypher(),
            Clause::Unwind(c) => c.to_cypher(),
            Clause::Call(c) => c.to_cypher(),
            Clause::Foreach(c) => c.to_cypher(),
            Clause::Union(c) => c.to_cypher(),
            Clause::LoadCsv(c) => c.to_cypher(),
            Clause::PathMatch(c) => c.to_cypher(),
            Clause::Project(c) => c.to_cypher(),
            Clause::Custom(text) => text.clone(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cypher())
    }
}

/// Joins rendered fragments with single spaces.
pub fn render_clauses(clauses: &[Clause]) -> String {
    clauses.iter().map(ToCypher::to_cypher).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::SerializerConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_matches_individual_renders() {
        let config = SerializerConfig::default();
        let clauses = vec![
            Clause::Match { optional: true },
            Clause::Node(NodePattern::new(NodeSpec::new().variable("n"), &config).unwrap()),
            Clause::Result(ResultClause::new(ResultKeyword::Return, Results::All).unwrap()),
        ];
        let expected = format!(
            "{} {} {}",
            clauses[0].to_cypher(),
            clauses[1].to_cypher(),
            clauses[2].to_cypher()
        );
        assert_eq!(render_clauses(&clauses), expected);
        assert_eq!(expected, "OPTIONAL MATCH (n) RETURN *");
    }

    #[test]
    fn test_render_is_idempotent() {
        let clause = Clause::Custom("MATCH (n) RETURN n".to_string());
        assert_eq!(clause.to_cypher(), clause.to_cypher());
        assert_eq!(clause.to_string(), "MATCH (n) RETURN n");
    }

    #[test]
    fn test_row_producing_clauses() {
        assert!(Clause::Custom("MATCH (n) RETURN n".to_string()).returns_rows());
        assert!(!Clause::Custom("RETURN 1".to_string()).returns_rows());
        let with = ResultClause::new(ResultKeyword::With, Results::All).unwrap();
        assert!(!Clause::Result(with).returns_rows());
    }
}
