use crate::models::{Node, Path, Relationship};
use crate::temporal::Temporal;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use decimal_rs::Decimal;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

/// Property name to value mapping. Insertion order is kept so rendered maps
/// read the way they were written.
pub type PropertyMap = IndexMap<String, Value>;

/// Every value the serializer understands, plus the graph entities that only
/// ever come back from query execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    String(String),
    List(Vec<Value>),
    Map(PropertyMap),
    /// Emitted verbatim: a variable, a property reference, a label.
    Raw(String),
    Temporal(Temporal),
    Enum(EnumValue),
    Point(Point),
    Node(Node),
    Relationship(Relationship),
    Path(Path),
}

impl Value {
    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Raw(_) => "Raw",
            Value::Temporal(_) => "Temporal",
            Value::Enum(_) => "Enum",
            Value::Point(_) => "Point",
            Value::Node(_) => "Node",
            Value::Relationship(_) => "Relationship",
            Value::Path(_) => "Path",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Value::Relationship(rel) => Some(rel),
            _ => None,
        }
    }
}

/// Marks a string as an expression that must not be quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raw(String);

impl Raw {
    pub fn new(expression: impl Into<String>) -> Self {
        Raw(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Raw {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Raw {
    fn from(s: &str) -> Self {
        Raw(s.to_string())
    }
}

impl From<String> for Raw {
    fn from(s: String) -> Self {
        Raw(s)
    }
}

macro_rules! impl_raw_from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Raw {
            fn from(i: $t) -> Self {
                Raw(i.to_string())
            }
        })*
    };
}
impl_raw_from_integer!(i32, u32, i64, u64, usize);

/// Shorthand for [`Raw::new`].
pub fn raw(expression: impl Into<String>) -> Raw {
    Raw::new(expression)
}

/// A member of a database-side enum type, rendered as `Name::Member`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub name: String,
    pub member: String,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, member: impl Into<String>) -> Self {
        EnumValue {
            name: name.into(),
            member: member.into(),
        }
    }
}

/// Spatial point in one of the four supported coordinate reference systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Point {
    Cartesian2d { x: f64, y: f64 },
    Cartesian3d { x: f64, y: f64, z: f64 },
    Wgs84_2d { longitude: f64, latitude: f64 },
    Wgs84_3d { longitude: f64, latitude: f64, height: f64 },
}

impl Point {
    pub fn srid(&self) -> i64 {
        match self {
            Point::Cartesian2d { .. } => 7203,
            Point::Cartesian3d { .. } => 9157,
            Point::Wgs84_2d { .. } => 4326,
            Point::Wgs84_3d { .. } => 4979,
        }
    }

    /// Coordinates in the order they are written inside `point({...})`.
    pub fn coordinates(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Point::Cartesian2d { x, y } => vec![("x", x), ("y", y)],
            Point::Cartesian3d { x, y, z } => vec![("x", x), ("y", y), ("z", z)],
            Point::Wgs84_2d {
                longitude,
                latitude,
            } => vec![("longitude", longitude), ("latitude", latitude)],
            Point::Wgs84_3d {
                longitude,
                latitude,
                height,
            } => vec![
                ("longitude", longitude),
                ("latitude", latitude),
                ("height", height),
            ],
        }
    }
}

// --- Conversions ---

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Integer(i as i64)
            }
        })*
    };
}
impl_from_integer!(i8, u8, i16, u16, i32, u32, i64, isize);

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        // anything above i64::MAX keeps its precision as a decimal
        i64::try_from(i)
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Decimal(Decimal::from(i)))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::from(i as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<Raw> for Value {
    fn from(r: Raw) -> Self {
        Value::Raw(r.0)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Value::Point(p)
    }
}

impl From<Temporal> for Value {
    fn from(t: Temporal) -> Self {
        Value::Temporal(t)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Temporal(Temporal::Date(d))
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Temporal(Temporal::LocalTime(t))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::Temporal(Temporal::LocalDateTime(dt))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(dt: DateTime<Tz>) -> Self {
        let offset = dt.offset().fix();
        Value::Temporal(Temporal::DateTime(dt.with_timezone(&offset)))
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Temporal(Temporal::Duration(d))
    }
}

impl From<Node> for Value {
    fn from(n: Node) -> Self {
        Value::Node(n)
    }
}

impl From<Relationship> for Value {
    fn from(r: Relationship) -> Self {
        Value::Relationship(r)
    }
}

impl From<Path> for Value {
    fn from(p: Path) -> Self {
        Value::Path(p)
    }
}

impl From<PropertyMap> for Value {
    fn from(map: PropertyMap) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(map: BTreeMap<String, T>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(vec: Vec<T>) -> Self {
        Value::List(vec.into_iter().map(Into::into).collect())
    }
}

/// Fixed-size numeric vectors and matrices (`[[f64; 3]; 3]`) become nested lists.
impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(array: [T; N]) -> Self {
        Value::List(array.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(slice: &[T]) -> Self {
        Value::List(slice.iter().cloned().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Builds a [`PropertyMap`] keeping the written order.
///
/// # Example
/// ```
/// # use graphmill_cypher::{props, Value};
/// let properties = props! { "name" => "Ron", "age" => 42 };
/// assert_eq!(properties["name"], Value::from("Ron"));
/// assert_eq!(properties.get_index(1).map(|(k, _)| k.as_str()), Some("age"));
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::value::PropertyMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::value::PropertyMap::new();
        $(map.insert(::std::string::String::from($key), $crate::value::Value::from($value));)+
        map
    }};
}
