use crate::error::{CypherError, CypherResult};
use crate::serialize::ToCypher;

/// One or more expressions, e.g. the variables of a DELETE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Items(Vec<String>);

impl Items {
    fn require(self, clause: &str) -> CypherResult<Vec<String>> {
        let items: Vec<String> = self
            .0
            .into_iter()
            .filter(|item| !item.trim().is_empty())
            .collect();
        if items.is_empty() {
            return Err(CypherError::ResultShape {
                clause: clause.to_string(),
                reason: "at least one item is required".to_string(),
            });
        }
        Ok(items)
    }
}

impl From<&str> for Items {
    fn from(item: &str) -> Self {
        Items(vec![item.to_string()])
    }
}

impl From<String> for Items {
    fn from(item: String) -> Self {
        Items(vec![item])
    }
}

impl<S: Into<String>> From<Vec<S>> for Items {
    fn from(items: Vec<S>) -> Self {
        Items(items.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Items {
    fn from(items: [S; N]) -> Self {
        Items(items.into_iter().map(Into::into).collect())
    }
}

/// `[DETACH] DELETE a, b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteClause {
    items: Vec<String>,
    detach: bool,
}

impl DeleteClause {
    pub fn new(items: impl Into<Items>, detach: bool) -> CypherResult<Self> {
        Ok(DeleteClause {
            items: items.into().require("DELETE")?,
            detach,
        })
    }
}

impl ToCypher for DeleteClause {
    fn to_cypher(&self) -> String {
        let keyword = if self.detach { "DETACH DELETE" } else { "DELETE" };
        format!("{} {}", keyword, self.items.join(", "))
    }
}

/// `REMOVE n.prop, n:Label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveClause {
    items: Vec<String>,
}

impl RemoveClause {
    pub fn new(items: impl Into<Items>) -> CypherResult<Self> {
        Ok(RemoveClause {
            items: items.into().require("REMOVE")?,
        })
    }
}

impl ToCypher for RemoveClause {
    fn to_cypher(&self) -> String {
        format!("REMOVE {}", self.items.join(", "))
    }
}

/// `FOREACH ( var IN list | clause clause ... )`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeachClause {
    variable: String,
    expression: String,
    update_clauses: Vec<String>,
}

impl ForeachClause {
    pub fn new(
        variable: impl Into<String>,
        expression: impl Into<String>,
        update_clauses: impl Into<Items>,
    ) -> CypherResult<Self> {
        Ok(ForeachClause {
            variable: variable.into(),
            expression: expression.into(),
            update_clauses: update_clauses.into().require("FOREACH")?,
        })
    }
}

impl ToCypher for ForeachClause {
    fn to_cypher(&self) -> String {
        format!(
            "FOREACH ( {} IN {} | {} )",
            self.variable,
            self.expression,
            self.update_clauses.join(" ")
        )
    }
}
