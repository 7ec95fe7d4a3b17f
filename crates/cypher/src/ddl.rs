//! Label-property indexes and constraints.

use crate::serialize::ToCypher;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index {
    pub label: String,
    pub property: Option<String>,
}

impl Index {
    /// Label-only index.
    pub fn label(label: impl Into<String>) -> Self {
        Index {
            label: label.into(),
            property: None,
        }
    }

    pub fn label_property(label: impl Into<String>, property: impl Into<String>) -> Self {
        Index {
            label: label.into(),
            property: Some(property.into()),
        }
    }

    pub fn create_statement(&self) -> String {
        format!("CREATE INDEX ON {}", self.to_cypher())
    }

    pub fn drop_statement(&self) -> String {
        format!("DROP INDEX ON {}", self.to_cypher())
    }
}

impl ToCypher for Index {
    fn to_cypher(&self) -> String {
        match &self.property {
            Some(property) => format!(":{}({})", self.label, property),
            None => format!(":{}", self.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constraint {
    Unique {
        label: String,
        properties: Vec<String>,
    },
    Exists {
        label: String,
        property: String,
    },
}

impl Constraint {
    pub fn unique<I, S>(label: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::Unique {
            label: label.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exists(label: impl Into<String>, property: impl Into<String>) -> Self {
        Constraint::Exists {
            label: label.into(),
            property: property.into(),
        }
    }

    pub fn create_statement(&self) -> String {
        format!("CREATE CONSTRAINT ON {}", self.to_cypher())
    }

    pub fn drop_statement(&self) -> String {
        format!("DROP CONSTRAINT ON {}", self.to_cypher())
    }
}

impl ToCypher for Constraint {
    fn to_cypher(&self) -> String {
        match self {
            Constraint::Unique { label, properties } => format!(
                "(n:{}) ASSERT {} IS UNIQUE",
                label,
                properties.iter().map(|p| format!("n.{}", p)).join(", ")
            ),
            Constraint::Exists { label, property } => {
                format!("(n:{}) ASSERT EXISTS (n.{})", label, property)
            }
        }
    }
}
