use crate::error::{CypherError, CypherResult};
use crate::serialize::ToCypher;
use crate::value::Raw;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// One unchecked projection entry: an expression, optionally followed by its alias.
///
/// Entries are only checked when the clause is built, so shapes such as a
/// three-element tuple can be written and then rejected with a proper error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry(Vec<String>);

impl From<&str> for ResultEntry {
    fn from(expression: &str) -> Self {
        ResultEntry(vec![expression.to_string()])
    }
}

impl From<String> for ResultEntry {
    fn from(expression: String) -> Self {
        ResultEntry(vec![expression])
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for ResultEntry {
    fn from((expression, alias): (A, B)) -> Self {
        ResultEntry(vec![expression.into(), alias.into()])
    }
}

impl<A: Into<String>, B: Into<String>, C: Into<String>> From<(A, B, C)> for ResultEntry {
    fn from((a, b, c): (A, B, C)) -> Self {
        ResultEntry(vec![a.into(), b.into(), c.into()])
    }
}

impl From<Vec<String>> for ResultEntry {
    fn from(parts: Vec<String>) -> Self {
        ResultEntry(parts)
    }
}

/// What a RETURN, YIELD or WITH projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Results {
    /// Rendered as `*`.
    #[default]
    All,
    Items(Vec<ResultEntry>),
}

impl From<()> for Results {
    fn from(_: ()) -> Self {
        Results::All
    }
}

impl From<&str> for Results {
    fn from(expression: &str) -> Self {
        Results::Items(vec![expression.into()])
    }
}

impl From<String> for Results {
    fn from(expression: String) -> Self {
        Results::Items(vec![expression.into()])
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for Results {
    fn from(pair: (A, B)) -> Self {
        Results::Items(vec![pair.into()])
    }
}

impl<A: Into<String>, B: Into<String>, C: Into<String>> From<(A, B, C)> for Results {
    fn from(triple: (A, B, C)) -> Self {
        Results::Items(vec![triple.into()])
    }
}

impl<T: Into<ResultEntry>> From<Vec<T>> for Results {
    fn from(entries: Vec<T>) -> Self {
        Results::Items(entries.into_iter().map(Into::into).collect())
    }
}

/// Ordered `expression -> alias` map.
impl From<IndexMap<String, String>> for Results {
    fn from(aliases: IndexMap<String, String>) -> Self {
        Results::Items(aliases.into_iter().map(ResultEntry::from).collect())
    }
}

/// Mixed projection lists: `results!["p2", ("p1", "first")]`.
#[macro_export]
macro_rules! results {
    () => {
        $crate::clause::Results::All
    };
    ($($entry:expr),+ $(,)?) => {
        $crate::clause::Results::Items(vec![$($crate::clause::ResultEntry::from($entry)),+])
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKeyword {
    Return,
    Yield,
    With,
}

impl ResultKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKeyword::Return => "RETURN",
            ResultKeyword::Yield => "YIELD",
            ResultKeyword::With => "WITH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ResultItem {
    expression: String,
    alias: Option<String>,
}

impl ResultItem {
    fn validate(entry: ResultEntry, keyword: ResultKeyword) -> CypherResult<Self> {
        let shape_error = |reason: String| CypherError::ResultShape {
            clause: keyword.as_str().to_string(),
            reason,
        };
        let mut parts = entry.0.into_iter();
        let (expression, alias) = match (parts.next(), parts.next(), parts.next()) {
            (Some(expression), alias, None) => (expression, alias),
            (None, _, _) => return Err(shape_error("empty entry".to_string())),
            (Some(_), _, Some(_)) => {
                return Err(shape_error(format!(
                    "expected an expression and at most one alias, got {} parts",
                    3 + parts.count()
                )))
            }
        };
        if expression.trim().is_empty() {
            return Err(shape_error("empty expression".to_string()));
        }
        // an alias equal to the expression, or an empty one, projects the bare expression
        let alias = alias.filter(|alias| !alias.is_empty() && *alias != expression);
        Ok(ResultItem { expression, alias })
    }
}

impl ToCypher for ResultItem {
    fn to_cypher(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.expression, alias),
            None => self.expression.clone(),
        }
    }
}

/// `RETURN`, `YIELD` or `WITH` followed by `*` or a comma-separated projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultClause {
    keyword: ResultKeyword,
    items: Vec<ResultItem>,
}

impl ResultClause {
    pub fn new(keyword: ResultKeyword, results: Results) -> CypherResult<Self> {
        let items = match results {
            Results::All => Vec::new(),
            Results::Items(entries) => entries
                .into_iter()
                .map(|entry| ResultItem::validate(entry, keyword))
                .collect::<CypherResult<Vec<_>>>()?,
        };
        Ok(ResultClause { keyword, items })
    }

    pub fn keyword(&self) -> ResultKeyword {
        self.keyword
    }
}

impl ToCypher for ResultClause {
    fn to_cypher(&self) -> String {
        if self.items.is_empty() {
            return format!("{} *", self.keyword.as_str());
        }
        format!(
            "{} {}",
            self.keyword.as_str(),
            self.items.iter().map(ToCypher::to_cypher).join(", ")
        )
    }
}

/// Sort direction. The long and short spellings render the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Asc,
    Ascending,
    Desc,
    Descending,
}

impl Order {
    pub fn keyword(&self) -> &'static str {
        match self {
            Order::Asc | Order::Ascending => "ASC",
            Order::Desc | Order::Descending => "DESC",
        }
    }
}

impl FromStr for Order {
    type Err = CypherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Order::Asc),
            "ASCENDING" => Ok(Order::Ascending),
            "DESC" => Ok(Order::Desc),
            "DESCENDING" => Ok(Order::Descending),
            _ => Err(CypherError::UnknownOrder(s.to_string())),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One unchecked ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEntry {
    Expression(String),
    Directed(String, Order),
    /// Expression and direction spelled as text, checked at construction.
    Textual(Vec<String>),
}

impl From<&str> for OrderEntry {
    fn from(expression: &str) -> Self {
        OrderEntry::Expression(expression.to_string())
    }
}

impl From<String> for OrderEntry {
    fn from(expression: String) -> Self {
        OrderEntry::Expression(expression)
    }
}

impl<S: Into<String>> From<(S, Order)> for OrderEntry {
    fn from((expression, order): (S, Order)) -> Self {
        OrderEntry::Directed(expression.into(), order)
    }
}

impl From<(&str, &str)> for OrderEntry {
    fn from((expression, order): (&str, &str)) -> Self {
        OrderEntry::Textual(vec![expression.to_string(), order.to_string()])
    }
}

impl From<(&str, &str, &str)> for OrderEntry {
    fn from((a, b, c): (&str, &str, &str)) -> Self {
        OrderEntry::Textual(vec![a.to_string(), b.to_string(), c.to_string()])
    }
}

/// Full ORDER BY input: a single entry or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering(Vec<OrderEntry>);

impl From<OrderEntry> for Ordering {
    fn from(entry: OrderEntry) -> Self {
        Ordering(vec![entry])
    }
}

impl From<&str> for Ordering {
    fn from(expression: &str) -> Self {
        Ordering(vec![expression.into()])
    }
}

impl From<(&str, Order)> for Ordering {
    fn from(entry: (&str, Order)) -> Self {
        Ordering(vec![entry.into()])
    }
}

impl From<(&str, &str)> for Ordering {
    fn from(entry: (&str, &str)) -> Self {
        Ordering(vec![entry.into()])
    }
}

impl From<(&str, &str, &str)> for Ordering {
    fn from(entry: (&str, &str, &str)) -> Self {
        Ordering(vec![entry.into()])
    }
}

impl From<Vec<OrderEntry>> for Ordering {
    fn from(entries: Vec<OrderEntry>) -> Self {
        Ordering(entries)
    }
}

impl From<Vec<&str>> for Ordering {
    fn from(entries: Vec<&str>) -> Self {
        Ordering(entries.into_iter().map(OrderEntry::from).collect())
    }
}

impl From<Vec<(&str, Order)>> for Ordering {
    fn from(entries: Vec<(&str, Order)>) -> Self {
        Ordering(entries.into_iter().map(OrderEntry::from).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByClause {
    items: Vec<(String, Option<Order>)>,
}

impl OrderByClause {
    pub fn new(ordering: Ordering) -> CypherResult<Self> {
        let shape_error = |reason: String| CypherError::ResultShape {
            clause: "ORDER BY".to_string(),
            reason,
        };
        if ordering.0.is_empty() {
            return Err(shape_error("at least one ordering entry is required".to_string()));
        }
        let mut items = Vec::with_capacity(ordering.0.len());
        for entry in ordering.0 {
            let (expression, order) = match entry {
                OrderEntry::Expression(expression) => (expression, None),
                OrderEntry::Directed(expression, order) => (expression, Some(order)),
                OrderEntry::Textual(parts) => match parts.as_slice() {
                    [expression, order] => {
                        let order = order
                            .parse::<Order>()
                            .map_err(|e| shape_error(e.to_string()))?;
                        (expression.clone(), Some(order))
                    }
                    _ => {
                        return Err(shape_error(format!(
                            "expected an expression and a direction, got {} parts",
                            parts.len()
                        )))
                    }
                },
            };
            if expression.trim().is_empty() {
                return Err(shape_error("empty expression".to_string()));
            }
            items.push((expression, order));
        }
        Ok(OrderByClause { items })
    }
}

impl ToCypher for OrderByClause {
    fn to_cypher(&self) -> String {
        let mut items = self.items.iter().map(|(expression, order)| match order {
            Some(order) => format!("{} {}", expression, order.keyword()),
            None => expression.clone(),
        });
        format!("ORDER BY {}", items.join(", "))
    }
}

/// `LIMIT n` or `SKIP n`, where `n` is an integer or an expression such as a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingClause {
    keyword: &'static str,
    amount: String,
}

impl PagingClause {
    pub fn limit(amount: impl Into<Raw>) -> Self {
        PagingClause {
            keyword: "LIMIT",
            amount: amount.into().into_string(),
        }
    }

    pub fn skip(amount: impl Into<Raw>) -> Self {
        PagingClause {
            keyword: "SKIP",
            amount: amount.into().into_string(),
        }
    }
}

impl ToCypher for PagingClause {
    fn to_cypher(&self) -> String {
        format!("{} {}", self.keyword, self.amount)
    }
}
