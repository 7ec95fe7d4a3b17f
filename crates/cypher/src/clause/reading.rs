use crate::error::{CypherError, CypherResult};
use crate::serialize::{quote_string, serialize_with, SerializerConfig, ToCypher};
use crate::value::{Raw, Value};

/// Positional procedure arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CallArguments {
    #[default]
    None,
    /// Argument text written as-is, e.g. `n, 10`.
    Raw(String),
    /// Each value serialized and comma-joined.
    Values(Vec<Value>),
}

impl CallArguments {
    fn render(&self, config: &SerializerConfig) -> CypherResult<String> {
        match self {
            CallArguments::None => Ok(String::new()),
            CallArguments::Raw(text) => Ok(text.clone()),
            CallArguments::Values(values) => Ok(values
                .iter()
                .map(|value| serialize_with(value, config))
                .collect::<CypherResult<Vec<_>>>()?
                .join(", ")),
        }
    }
}

impl From<()> for CallArguments {
    fn from(_: ()) -> Self {
        CallArguments::None
    }
}

/// A plain string is a single string literal argument.
impl From<&str> for CallArguments {
    fn from(literal: &str) -> Self {
        CallArguments::Values(vec![Value::from(literal)])
    }
}

impl From<Raw> for CallArguments {
    fn from(raw: Raw) -> Self {
        CallArguments::Raw(raw.into_string())
    }
}

impl From<Value> for CallArguments {
    fn from(value: Value) -> Self {
        CallArguments::Values(vec![value])
    }
}

impl<T: Into<Value>> From<Vec<T>> for CallArguments {
    fn from(values: Vec<T>) -> Self {
        CallArguments::Values(values.into_iter().map(Into::into).collect())
    }
}

/// `CALL module.procedure(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallClause {
    procedure: String,
    arguments: String,
}

impl CallClause {
    pub fn new(
        procedure: impl Into<String>,
        arguments: impl Into<CallArguments>,
        config: &SerializerConfig,
    ) -> CypherResult<Self> {
        Ok(CallClause {
            procedure: procedure.into(),
            arguments: arguments.into().render(config)?,
        })
    }

    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    /// Same call with `variable` inserted as the first argument.
    pub fn with_leading_argument(&self, variable: &str) -> Self {
        let arguments = if self.arguments.is_empty() {
            variable.to_string()
        } else {
            format!("{}, {}", variable, self.arguments)
        };
        CallClause {
            procedure: self.procedure.clone(),
            arguments,
        }
    }
}

impl ToCypher for CallClause {
    fn to_cypher(&self) -> String {
        format!("CALL {}({})", self.procedure, self.arguments)
    }
}

/// `UNWIND list AS variable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwindClause {
    list_expression: String,
    variable: String,
}

impl UnwindClause {
    pub fn new(list_expression: impl Into<Raw>, variable: impl Into<String>) -> Self {
        UnwindClause {
            list_expression: list_expression.into().into_string(),
            variable: variable.into(),
        }
    }

    /// Unwinds a literal list, serialized up front.
    pub fn literal(
        list: impl Into<Value>,
        variable: impl Into<String>,
        config: &SerializerConfig,
    ) -> CypherResult<Self> {
        Ok(UnwindClause {
            list_expression: serialize_with(&list.into(), config)?,
            variable: variable.into(),
        })
    }
}

impl ToCypher for UnwindClause {
    fn to_cypher(&self) -> String {
        format!("UNWIND {} AS {}", self.list_expression, self.variable)
    }
}

/// `UNION`, or `UNION ALL` when duplicates are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnionClause {
    pub include_duplicates: bool,
}

impl ToCypher for UnionClause {
    fn to_cypher(&self) -> String {
        if self.include_duplicates {
            "UNION ALL".to_string()
        } else {
            "UNION".to_string()
        }
    }
}

const REMOTE_PREFIXES: [&str; 4] = ["http://", "https://", "ftp://", "s3://"];

/// Where a CSV file is read from. Both forms render the path exactly as
/// given; the loader on the server side is what treats them differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    Local(String),
    /// A URL, checked to parse but kept in its original spelling.
    Remote(String),
}

impl CsvSource {
    pub fn parse(path: &str) -> CypherResult<Self> {
        let lowered = path.to_ascii_lowercase();
        if !REMOTE_PREFIXES.iter().any(|prefix| lowered.starts_with(prefix)) {
            return Ok(CsvSource::Local(path.to_string()));
        }
        url::Url::parse(path).map_err(|e| CypherError::InvalidCsvSource {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(CsvSource::Remote(path.to_string()))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, CsvSource::Remote(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            CsvSource::Local(path) | CsvSource::Remote(path) => path,
        }
    }
}

/// `LOAD CSV FROM 'path' WITH HEADER AS row` (or `NO HEADER`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadCsvClause {
    source: CsvSource,
    header: bool,
    row: String,
}

impl LoadCsvClause {
    pub fn new(path: &str, header: bool, row: impl Into<String>) -> CypherResult<Self> {
        if path.trim().is_empty() {
            return Err(CypherError::InvalidCsvSource {
                path: path.to_string(),
                reason: "path is empty".to_string(),
            });
        }
        Ok(LoadCsvClause {
            source: CsvSource::parse(path)?,
            header,
            row: row.into(),
        })
    }

    pub fn source(&self) -> &CsvSource {
        &self.source
    }
}

impl ToCypher for LoadCsvClause {
    fn to_cypher(&self) -> String {
        format!(
            "LOAD CSV FROM {} {} HEADER AS {}",
            quote_string(self.source.as_str()),
            if self.header { "WITH" } else { "NO" },
            self.row
        )
    }
}
