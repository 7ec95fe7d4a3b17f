//! Traversal algorithms built into Memgraph, written inside a relationship pattern:
//! `-[:Road *BFS ..10 (r, n | r.length <= 200)]->`.

use crate::serialize::ToCypher;

const DEFAULT_TOTAL_WEIGHT: &str = "total_weight";
const DEFAULT_WEIGHT_PROPERTY: &str = "r.weight";

/// `(r, n | expression)`, where `r` and `n` are the relationship and node being expanded.
fn lambda(expression: &str) -> String {
    format!("(r, n | {})", expression)
}

fn qualify_weight(property: &str) -> String {
    if property.contains('.') {
        property.to_string()
    } else {
        format!("r.{}", property)
    }
}

fn bounds(lower: Option<u32>, upper: Option<u32>) -> Option<String> {
    if lower.is_none() && upper.is_none() {
        return None;
    }
    let lower = lower.map(|b| b.to_string()).unwrap_or_default();
    let upper = upper.map(|b| b.to_string()).unwrap_or_default();
    Some(format!("{}..{}", lower, upper))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Algorithm {
    BreadthFirst(BreadthFirstSearch),
    DepthFirst(DepthFirstSearch),
    WeightedShortest(WeightedShortestPath),
    AllShortest(AllShortestPaths),
}

impl ToCypher for Algorithm {
    fn to_cypher(&self) -> String {
        match self {
            Algorithm::BreadthFirst(a) => a.to_cypher(),
            Algorithm::DepthFirst(a) => a.to_cypher(),
            Algorithm::WeightedShortest(a) => a.to_cypher(),
            Algorithm::AllShortest(a) => a.to_cypher(),
        }
    }
}

/// Depth-bounded expansion shared by BFS and DFS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Expansion {
    lower_bound: Option<u32>,
    upper_bound: Option<u32>,
    condition: Option<String>,
}

impl Expansion {
    fn render(&self, keyword: &str) -> String {
        let mut parts = vec![keyword.to_string()];
        parts.extend(bounds(self.lower_bound, self.upper_bound));
        parts.extend(self.condition.as_deref().map(lambda));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadthFirstSearch(Expansion);

impl BreadthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lower_bound(mut self, bound: u32) -> Self {
        self.0.lower_bound = Some(bound);
        self
    }

    pub fn upper_bound(mut self, bound: u32) -> Self {
        self.0.upper_bound = Some(bound);
        self
    }

    /// Filter lambda body, e.g. `r.length <= 200 AND n.name != 'Metz'`.
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.0.condition = Some(condition.into());
        self
    }
}

impl ToCypher for BreadthFirstSearch {
    fn to_cypher(&self) -> String {
        self.0.render("*BFS")
    }
}

/// Rendered as a bare `*`, the openCypher variable-length expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthFirstSearch(Expansion);

impl DepthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lower_bound(mut self, bound: u32) -> Self {
        self.0.lower_bound = Some(bound);
        self
    }

    pub fn upper_bound(mut self, bound: u32) -> Self {
        self.0.upper_bound = Some(bound);
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.0.condition = Some(condition.into());
        self
    }
}

impl ToCypher for DepthFirstSearch {
    fn to_cypher(&self) -> String {
        self.0.render("*")
    }
}

/// Weighted search: `*KEYWORD [upper] (r, n | weight) total [(r, n | condition)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Weighted {
    upper_bound: Option<u32>,
    condition: Option<String>,
    total_weight_var: String,
    weight_property: String,
}

impl Default for Weighted {
    fn default() -> Self {
        Weighted {
            upper_bound: None,
            condition: None,
            total_weight_var: DEFAULT_TOTAL_WEIGHT.to_string(),
            weight_property: DEFAULT_WEIGHT_PROPERTY.to_string(),
        }
    }
}

impl Weighted {
    fn render(&self, keyword: &str) -> String {
        let mut parts = vec![keyword.to_string()];
        parts.extend(self.upper_bound.map(|b| b.to_string()));
        parts.push(lambda(&self.weight_property));
        parts.push(self.total_weight_var.clone());
        parts.extend(self.condition.as_deref().map(lambda));
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedShortestPath(Weighted);

impl WeightedShortestPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upper_bound(mut self, bound: u32) -> Self {
        self.0.upper_bound = Some(bound);
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.0.condition = Some(condition.into());
        self
    }

    pub fn total_weight_var(mut self, variable: impl Into<String>) -> Self {
        self.0.total_weight_var = variable.into();
        self
    }

    /// A bare property name is read off the relationship: `length` becomes `r.length`.
    pub fn weight_property(mut self, property: &str) -> Self {
        self.0.weight_property = qualify_weight(property);
        self
    }
}

impl ToCypher for WeightedShortestPath {
    fn to_cypher(&self) -> String {
        self.0.render("*WSHORTEST")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllShortestPaths(Weighted);

impl AllShortestPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upper_bound(mut self, bound: u32) -> Self {
        self.0.upper_bound = Some(bound);
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.0.condition = Some(condition.into());
        self
    }

    pub fn total_weight_var(mut self, variable: impl Into<String>) -> Self {
        self.0.total_weight_var = variable.into();
        self
    }

    pub fn weight_property(mut self, property: &str) -> Self {
        self.0.weight_property = qualify_weight(property);
        self
    }
}

impl ToCypher for AllShortestPaths {
    fn to_cypher(&self) -> String {
        self.0.render("*ALLSHORTEST")
    }
}

impl From<BreadthFirstSearch> for Algorithm {
    fn from(a: BreadthFirstSearch) -> Self {
        Algorithm::BreadthFirst(a)
    }
}

impl From<DepthFirstSearch> for Algorithm {
    fn from(a: DepthFirstSearch) -> Self {
        Algorithm::DepthFirst(a)
    }
}

impl From<WeightedShortestPath> for Algorithm {
    fn from(a: WeightedShortestPath) -> Self {
        Algorithm::WeightedShortest(a)
    }
}

impl From<AllShortestPaths> for Algorithm {
    fn from(a: AllShortestPaths) -> Self {
        Algorithm::AllShortest(a)
    }
}
