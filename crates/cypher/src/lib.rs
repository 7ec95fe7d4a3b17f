//! Cypher values, clause fragments and their text rendering.
//!
//! Everything here is pure: fragments check their input when built and
//! render deterministically. Assembling fragments into queries and running
//! them lives in `graphmill-query-builder`.

pub mod algorithm;
pub mod clause;
pub mod ddl;
pub mod error;
pub mod labels;
pub mod models;
pub mod serialize;
pub mod temporal;
pub mod value;

pub use error::{CypherError, CypherResult};
pub use labels::{serialize_labels, Labels};
pub use models::{Node, Path, Relationship};
pub use serialize::{
    quote_string, serialize, serialize_map, serialize_properties, serialize_with, NanPolicy,
    SerializerConfig, ToCypher,
};
pub use temporal::Temporal;
pub use value::{raw, EnumValue, Point, PropertyMap, Raw, Value};

/// Common imports for building patterns and conditions.
pub mod prelude {
    pub use crate::algorithm::{
        AllShortestPaths, BreadthFirstSearch, DepthFirstSearch, WeightedShortestPath,
    };
    pub use crate::clause::{
        Direction, NodePattern, NodeSpec, Operand, Operator, Order, OrderEntry, RelSpec,
        Results, Subgraph,
    };
    pub use crate::models::{Node, Path, Relationship};
    pub use crate::serialize::{NanPolicy, SerializerConfig, ToCypher};
    pub use crate::value::{raw, EnumValue, Point, PropertyMap, Raw, Value};
    pub use crate::{props, results};
}
