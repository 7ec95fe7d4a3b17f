//! Graph entities as they come back in query results.

use crate::value::{PropertyMap, Value};
use derive_getters::Getters;
use std::collections::BTreeSet;

#[derive(Getters, Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// database-assigned identity, absent for nodes not yet stored
    id: Option<i64>,
    labels: BTreeSet<String>,
    properties: PropertyMap,
}

impl Node {
    pub fn new<L, S>(id: Option<i64>, labels: L, properties: PropertyMap) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node {
            id,
            labels: labels.into_iter().map(Into::into).collect(),
            properties,
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

#[derive(Getters, Debug, Clone, Default, PartialEq)]
pub struct Relationship {
    id: Option<i64>,
    rel_type: String,
    start_node_id: Option<i64>,
    end_node_id: Option<i64>,
    properties: PropertyMap,
}

impl Relationship {
    pub fn new(rel_type: impl Into<String>, properties: PropertyMap) -> Self {
        Relationship {
            rel_type: rel_type.into(),
            properties,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn between(mut self, start_node_id: i64, end_node_id: i64) -> Self {
        self.start_node_id = Some(start_node_id);
        self.end_node_id = Some(end_node_id);
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Alternating nodes and relationships; a path of `n` relationships has `n + 1` nodes.
#[derive(Getters, Debug, Clone, Default, PartialEq)]
pub struct Path {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
}

impl Path {
    pub fn new(nodes: Vec<Node>, relationships: Vec<Relationship>) -> Self {
        Path {
            nodes,
            relationships,
        }
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}
