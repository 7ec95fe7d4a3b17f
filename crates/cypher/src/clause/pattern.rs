use crate::algorithm::Algorithm;
use crate::error::CypherResult;
use crate::labels::{serialize_labels, Labels};
use crate::models::{Node, Relationship};
use crate::serialize::{serialize_properties, SerializerConfig, ToCypher};
use crate::value::{PropertyMap, Value};

/// Description of a node pattern, turned into a [`NodePattern`] once its
/// properties have been serialized.
///
/// ```
/// # use graphmill_cypher::prelude::*;
/// let spec = NodeSpec::new().labels("Person").variable("p").property("name", "Ron");
/// let pattern = NodePattern::new(spec, &SerializerConfig::default()).unwrap();
/// assert_eq!(pattern.to_cypher(), "(p:Person {name: 'Ron'})");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSpec {
    variable: Option<String>,
    labels: Labels,
    properties: PropertyMap,
}

impl NodeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels and properties of a stored node. The identity is not part of the pattern.
    pub fn from_record(node: &Node) -> Self {
        NodeSpec {
            variable: None,
            labels: node.labels().iter().cloned().collect(),
            properties: node.properties().clone(),
        }
    }

    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn labels(mut self, labels: impl Into<Labels>) -> Self {
        let labels: Labels = labels.into();
        for label in labels.iter() {
            self.labels.push(label);
        }
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: PropertyMap) -> Self {
        self.properties.extend(properties);
        self
    }
}

/// `(variable:Labels {props})`, every part optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePattern {
    variable: String,
    labels: String,
    properties: String,
}

impl NodePattern {
    pub fn new(spec: NodeSpec, config: &SerializerConfig) -> CypherResult<Self> {
        Ok(NodePattern {
            properties: serialize_properties(&spec.properties, config)?,
            labels: serialize_labels(spec.labels),
            variable: spec.variable.unwrap_or_default(),
        })
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl ToCypher for NodePattern {
    fn to_cypher(&self) -> String {
        let head = format!("{}{}", self.variable, self.labels);
        match (head.is_empty(), self.properties.is_empty()) {
            (_, true) => format!("({})", head),
            (true, false) => format!("({})", self.properties),
            (false, false) => format!("({} {})", head, self.properties),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Outgoing,
    Incoming,
    Undirected,
}

impl Direction {
    /// Wraps a bracket interior in the arrow for this direction.
    pub fn wrap(&self, interior: &str) -> String {
        match self {
            Direction::Outgoing => format!("-[{}]->", interior),
            Direction::Incoming => format!("<-[{}]-", interior),
            Direction::Undirected => format!("-[{}]-", interior),
        }
    }
}

/// Description of a relationship pattern. Direction comes from the builder
/// call (`to` or `from_`) unless [`RelSpec::undirected`] is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelSpec {
    variable: Option<String>,
    rel_type: Option<String>,
    properties: PropertyMap,
    algorithm: Option<Algorithm>,
    undirected: bool,
}

impl RelSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `RelSpec::new().rel_type(..)`.
    pub fn typed(rel_type: impl Into<String>) -> Self {
        Self::new().rel_type(rel_type)
    }

    pub fn from_record(relationship: &Relationship) -> Self {
        RelSpec {
            rel_type: Some(relationship.rel_type().clone()),
            properties: relationship.properties().clone(),
            ..Default::default()
        }
    }

    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn rel_type(mut self, rel_type: impl Into<String>) -> Self {
        self.rel_type = Some(rel_type.into());
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn properties(mut self, properties: PropertyMap) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn algorithm(mut self, algorithm: impl Into<Algorithm>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    pub fn undirected(mut self) -> Self {
        self.undirected = true;
        self
    }
}

/// `-[r:TYPE *ALGO {props}]->` and its incoming and undirected forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipPattern {
    variable: String,
    rel_type: String,
    algorithm: String,
    properties: String,
    direction: Direction,
}

impl RelationshipPattern {
    /// `direction` is ignored for specs marked undirected.
    pub fn new(spec: RelSpec, direction: Direction, config: &SerializerConfig) -> CypherResult<Self> {
        Ok(RelationshipPattern {
            properties: serialize_properties(&spec.properties, config)?,
            rel_type: serialize_labels(spec.rel_type),
            algorithm: spec
                .algorithm
                .map(|algorithm| algorithm.to_cypher())
                .unwrap_or_default(),
            variable: spec.variable.unwrap_or_default(),
            direction: if spec.undirected {
                Direction::Undirected
            } else {
                direction
            },
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl ToCypher for RelationshipPattern {
    fn to_cypher(&self) -> String {
        let head = format!("{}{}", self.variable, self.rel_type);
        let interior = [head.as_str(), self.algorithm.as_str(), self.properties.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.direction.wrap(&interior)
    }
}
