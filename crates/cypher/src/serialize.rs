//! Conversion of [`Value`]s into Cypher literal text.

use crate::error::{CypherError, CypherResult};
use crate::value::{EnumValue, Point, PropertyMap, Value};
use serde::{Deserialize, Serialize};

/// Rendering of an already-validated fragment into Cypher text.
///
/// Fragments check their inputs when they are built, so rendering itself cannot fail.
pub trait ToCypher {
    fn to_cypher(&self) -> String;
}

/// What to do with `NaN` and the infinities, which Cypher has no literal for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NanPolicy {
    /// Fail with a serialization error.
    #[default]
    Reject,
    /// Emit `null` in place of the number.
    Null,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializerConfig {
    #[serde(default)]
    pub nan: NanPolicy,
}

impl SerializerConfig {
    pub fn with_nan_policy(mut self, nan: NanPolicy) -> Self {
        self.nan = nan;
        self
    }
}

/// Serialize with the default configuration.
pub fn serialize(value: &Value) -> CypherResult<String> {
    serialize_with(value, &SerializerConfig::default())
}

pub fn serialize_with(value: &Value, config: &SerializerConfig) -> CypherResult<String> {
    match value {
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => serialize_float(*f, config),
        Value::Decimal(d) => Ok(d.to_string()),
        Value::String(s) => Ok(quote_string(s)),
        Value::List(items) => {
            let items = items
                .iter()
                .map(|item| serialize_with(item, config))
                .collect::<CypherResult<Vec<_>>>()?;
            Ok(format!("[{}]", items.join(", ")))
        }
        Value::Map(map) => serialize_map(map, config),
        Value::Raw(expression) => Ok(expression.clone()),
        Value::Temporal(t) => Ok(format!("{}({})", t.constructor(), quote_string(&t.iso8601()))),
        Value::Enum(EnumValue { name, member }) => Ok(format!("{}::{}", name, member)),
        Value::Point(point) => serialize_point(point, config),
        Value::Node(_) | Value::Relationship(_) | Value::Path(_) => {
            Err(CypherError::unmappable(value.type_name()))
        }
    }
}

/// `{key: value, ...}` with unquoted keys. An empty map yields `{}`.
pub fn serialize_map(map: &PropertyMap, config: &SerializerConfig) -> CypherResult<String> {
    let pairs = map
        .iter()
        .map(|(key, value)| Ok(format!("{}: {}", key, serialize_with(value, config)?)))
        .collect::<CypherResult<Vec<_>>>()?;
    Ok(format!("{{{}}}", pairs.join(", ")))
}

/// Inline properties of a pattern: the map literal, or nothing at all when empty.
pub fn serialize_properties(map: &PropertyMap, config: &SerializerConfig) -> CypherResult<String> {
    if map.is_empty() {
        Ok(String::new())
    } else {
        serialize_map(map, config)
    }
}

fn serialize_float(f: f64, config: &SerializerConfig) -> CypherResult<String> {
    if f.is_finite() {
        // Debug keeps the trailing `.0` on whole numbers and prints the shortest
        // representation that reads back to the same f64
        return Ok(format!("{:?}", f));
    }
    match config.nan {
        NanPolicy::Null => Ok("null".to_string()),
        NanPolicy::Reject => Err(CypherError::Serialization {
            type_name: "Float",
            reason: format!("{} has no Cypher literal", f),
        }),
    }
}

fn serialize_point(point: &Point, config: &SerializerConfig) -> CypherResult<String> {
    let mut parts = Vec::with_capacity(4);
    for (axis, coordinate) in point.coordinates() {
        parts.push(format!("{}: {}", axis, serialize_float(coordinate, config)?));
    }
    parts.push(format!("srid: {}", point.srid()));
    Ok(format!("point({{{}}})", parts.join(", ")))
}

/// Single-quoted Cypher string literal.
///
/// The escaping is delegated to `serde_json`, which handles backslashes and
/// every control character, and the result is then re-quoted: `\"` no longer
/// needs escaping while a bare `'` now does.
pub fn quote_string(s: &str) -> String {
    let json = serde_json::Value::String(s.to_string()).to_string();
    let inner = &json[1..json.len() - 1];

    let mut out = String::with_capacity(inner.len() + 2);
    out.push('\'');
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('"') => out.push('"'),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push_str("\\\\"),
            },
            '\'' => out.push_str("\\'"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}
