use crate::connection::Rows;
use crate::{ClientError, ClientResult};
use graphmill_cypher::Value;
use indexmap::IndexMap;
use std::ops::Index;

/// One decoded record, keyed by the aliases of the RETURN clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow(IndexMap<String, Value>);

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(alias.into(), value.into());
        self
    }

    pub fn get(&self, alias: &str) -> Option<&Value> {
        self.0.get(alias)
    }

    /// Like [`ResultRow::get`], failing with [`ClientError::MissingAlias`].
    pub fn try_get(&self, alias: &str) -> ClientResult<&Value> {
        self.0
            .get(alias)
            .ok_or_else(|| ClientError::MissingAlias(alias.to_string()))
    }

    pub fn into_value(mut self, alias: &str) -> ClientResult<Value> {
        self.0
            .shift_remove(alias)
            .ok_or_else(|| ClientError::MissingAlias(alias.to_string()))
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }
}

impl From<IndexMap<String, Value>> for ResultRow {
    fn from(columns: IndexMap<String, Value>) -> Self {
        ResultRow(columns)
    }
}

/// Decodes a JSON object payload; every column goes through `Value::from`.
impl TryFrom<serde_json::Value> for ResultRow {
    type Error = ClientError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Object(columns) => Ok(ResultRow(
                columns
                    .into_iter()
                    .map(|(alias, value)| (alias, Value::from(value)))
                    .collect(),
            )),
            other => Err(ClientError::Backend(anyhow::anyhow!(
                "expected a JSON object for a result row, got {}",
                other
            ))),
        }
    }
}

impl Index<&str> for ResultRow {
    type Output = Value;

    /// Panics when the alias is absent; use [`ResultRow::get`] otherwise.
    fn index(&self, alias: &str) -> &Self::Output {
        &self.0[alias]
    }
}

impl IntoIterator for ResultRow {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The value under `alias` in the only row. Fails on zero rows, on more than
/// one row, and when the row lacks the alias.
pub fn single(mut rows: Rows, alias: &str) -> ClientResult<Value> {
    let first = rows.next().ok_or(ClientError::EmptyResult)??;
    let extra = rows.count();
    if extra > 0 {
        return Err(ClientError::MultipleResults(extra + 1));
    }
    first.into_value(alias)
}

/// The value under `alias` in the first row; later rows are left unread.
pub fn first(mut rows: Rows, alias: &str) -> ClientResult<Value> {
    rows.next().ok_or(ClientError::EmptyResult)??.into_value(alias)
}
