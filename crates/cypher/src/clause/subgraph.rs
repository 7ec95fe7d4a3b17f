//! Subgraph projection for procedure calls.
//!
//! A procedure that should only see part of the graph is fed a projected
//! graph instead of the whole database:
//!
//! ```text
//! MATCH p = (n0)-[r0]->(n1) WHERE (n0:A) AND (n1:B) AND (type(r0) = 'T')
//! WITH project(p) AS graph
//! CALL mod.proc(graph, 'x')
//! ```

use crate::clause::pattern::Direction;
use crate::error::{CypherError, CypherResult};
use crate::serialize::{quote_string, ToCypher};
use itertools::Itertools;

/// Variable the projected graph is bound to and passed to the procedure as.
pub const GRAPH_VARIABLE: &str = "graph";
const PATH_VARIABLE: &str = "p";

/// Label or type filters for a path: one set shared by every position, or one set per position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionFilter {
    Uniform(Vec<String>),
    PerPosition(Vec<Vec<String>>),
}

impl PositionFilter {
    fn at(&self, position: usize) -> &[String] {
        match self {
            PositionFilter::Uniform(names) => names,
            PositionFilter::PerPosition(sets) => sets.get(position).map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    fn positions(&self) -> Option<usize> {
        match self {
            PositionFilter::Uniform(_) => None,
            PositionFilter::PerPosition(sets) => Some(sets.len()),
        }
    }
}

impl From<&str> for PositionFilter {
    fn from(name: &str) -> Self {
        PositionFilter::Uniform(vec![name.to_string()])
    }
}

impl From<Vec<&str>> for PositionFilter {
    fn from(names: Vec<&str>) -> Self {
        PositionFilter::Uniform(names.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for PositionFilter {
    fn from(names: Vec<String>) -> Self {
        PositionFilter::Uniform(names)
    }
}

impl From<Vec<Vec<&str>>> for PositionFilter {
    fn from(sets: Vec<Vec<&str>>) -> Self {
        PositionFilter::PerPosition(
            sets.into_iter()
                .map(|set| set.into_iter().map(String::from).collect())
                .collect(),
        )
    }
}

impl From<Vec<Vec<String>>> for PositionFilter {
    fn from(sets: Vec<Vec<String>>) -> Self {
        PositionFilter::PerPosition(sets)
    }
}

/// Shape of the projected subgraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subgraph {
    node_labels: Option<PositionFilter>,
    relationship_types: Option<PositionFilter>,
    directions: Option<Vec<Direction>>,
    path_pattern: Option<String>,
}

impl Subgraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project every path matching a hand-written pattern, e.g. `(a:A)-[:T*1..3]->(b)`.
    pub fn from_pattern(pattern: impl Into<String>) -> Self {
        Subgraph {
            path_pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    pub fn node_labels(mut self, labels: impl Into<PositionFilter>) -> Self {
        self.node_labels = Some(labels.into());
        self
    }

    pub fn relationship_types(mut self, types: impl Into<PositionFilter>) -> Self {
        self.relationship_types = Some(types.into());
        self
    }

    pub fn directions(mut self, directions: Vec<Direction>) -> Self {
        self.directions = Some(directions);
        self
    }

    /// Number of relationships in the path. Explicit directions decide it first,
    /// then per-position relationship types, then per-position node labels.
    fn path_length(&self) -> usize {
        if let Some(directions) = &self.directions {
            return directions.len().max(1);
        }
        if let Some(n) = self.relationship_types.as_ref().and_then(PositionFilter::positions) {
            return n.max(1);
        }
        if let Some(n) = self.node_labels.as_ref().and_then(PositionFilter::positions) {
            return n.saturating_sub(1).max(1);
        }
        1
    }

    fn validate(&self, length: usize) -> CypherResult<()> {
        if let Some(got) = self.node_labels.as_ref().and_then(PositionFilter::positions) {
            if got != length + 1 {
                return Err(CypherError::ShapeMismatch {
                    filter: "node label",
                    expected: length + 1,
                    got,
                });
            }
        }
        if let Some(got) = self.relationship_types.as_ref().and_then(PositionFilter::positions) {
            if got != length {
                return Err(CypherError::ShapeMismatch {
                    filter: "relationship type",
                    expected: length,
                    got,
                });
            }
        }
        Ok(())
    }

    /// Builds the `MATCH ... WITH project(p) AS graph` pair that goes before the CALL.
    pub fn compile(&self) -> CypherResult<(PathMatchClause, ProjectClause)> {
        if let Some(pattern) = &self.path_pattern {
            return Ok((
                PathMatchClause {
                    pattern: pattern.clone(),
                    conditions: Vec::new(),
                },
                ProjectClause,
            ));
        }

        let length = self.path_length();
        self.validate(length)?;

        let mut pattern = String::from("(n0)");
        for i in 0..length {
            let direction = self
                .directions
                .as_ref()
                .and_then(|directions| directions.get(i).copied())
                .unwrap_or_default();
            pattern.push_str(&direction.wrap(&format!("r{}", i)));
            pattern.push_str(&format!("(n{})", i + 1));
        }

        let mut conditions = Vec::new();
        if let Some(labels) = &self.node_labels {
            for i in 0..=length {
                let set = labels.at(i);
                if !set.is_empty() {
                    conditions.push(format!(
                        "({})",
                        set.iter().map(|label| format!("n{}:{}", i, label)).join(" OR ")
                    ));
                }
            }
        }
        if let Some(types) = &self.relationship_types {
            for i in 0..length {
                let set = types.at(i);
                if !set.is_empty() {
                    conditions.push(format!(
                        "({})",
                        set.iter()
                            .map(|rel_type| format!("type(r{}) = {}", i, quote_string(rel_type)))
                            .join(" OR ")
                    ));
                }
            }
        }

        Ok((PathMatchClause { pattern, conditions }, ProjectClause))
    }
}

/// `MATCH p = <pattern> [WHERE cond AND cond ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatchClause {
    pattern: String,
    conditions: Vec<String>,
}

impl ToCypher for PathMatchClause {
    fn to_cypher(&self) -> String {
        let head = format!("MATCH {} = {}", PATH_VARIABLE, self.pattern);
        if self.conditions.is_empty() {
            head
        } else {
            format!("{} WHERE {}", head, self.conditions.join(" AND "))
        }
    }
}

/// `WITH project(p) AS graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectClause;

impl ToCypher for ProjectClause {
    fn to_cypher(&self) -> String {
        format!("WITH project({}) AS {}", PATH_VARIABLE, GRAPH_VARIABLE)
    }
}
