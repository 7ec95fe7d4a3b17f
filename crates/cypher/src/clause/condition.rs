use crate::error::{CypherError, CypherResult};
use crate::serialize::{serialize_with, SerializerConfig, ToCypher};
use crate::value::{Raw, Value};
use std::fmt;
use std::str::FromStr;

/// Comparison and assignment operators shared by WHERE and SET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Assignment,
    Equal,
    GreaterOrEqual,
    Greater,
    Inequal,
    LabelFilter,
    Less,
    LessOrEqual,
    NotEqual,
    Increment,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Assignment | Operator::Equal => "=",
            Operator::GreaterOrEqual => ">=",
            Operator::Greater => ">",
            Operator::Inequal => "<>",
            Operator::LabelFilter => ":",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::NotEqual => "!=",
            Operator::Increment => "+=",
        }
    }
}

impl FromStr for Operator {
    type Err = CypherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Operator::Equal),
            ">=" => Ok(Operator::GreaterOrEqual),
            ">" => Ok(Operator::Greater),
            "<>" => Ok(Operator::Inequal),
            ":" => Ok(Operator::LabelFilter),
            "<" => Ok(Operator::Less),
            "<=" => Ok(Operator::LessOrEqual),
            "!=" => Ok(Operator::NotEqual),
            "+=" => Ok(Operator::Increment),
            other => Err(CypherError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand side of a condition or assignment: exactly one of a literal
/// value (serialized and quoted as needed) or an expression (emitted verbatim).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operand {
    literal: Option<Value>,
    expression: Option<String>,
}

impl Operand {
    pub fn literal(value: impl Into<Value>) -> Self {
        Operand {
            literal: Some(value.into()),
            expression: None,
        }
    }

    pub fn expression(expression: impl Into<String>) -> Self {
        Operand {
            literal: None,
            expression: Some(expression.into()),
        }
    }

    pub fn with_literal(mut self, value: impl Into<Value>) -> Self {
        self.literal = Some(value.into());
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub(crate) fn resolve(&self, clause: &str, config: &SerializerConfig) -> CypherResult<String> {
        match (&self.literal, &self.expression) {
            (Some(value), None) => serialize_with(value, config),
            (None, Some(expression)) => Ok(expression.clone()),
            (None, None) => Err(CypherError::MissingDiscriminant {
                clause: clause.to_string(),
            }),
            (Some(_), Some(_)) => Err(CypherError::ConflictingDiscriminant {
                clause: clause.to_string(),
            }),
        }
    }
}

impl From<Raw> for Operand {
    fn from(raw: Raw) -> Self {
        Operand::expression(raw.into_string())
    }
}

/// `item OP value`, except label filters which are written without spaces (`n:User`).
fn render_condition(item: &str, operator: Operator, value: &str) -> String {
    if operator == Operator::LabelFilter {
        format!("{}{}{}", item, operator.symbol(), value)
    } else {
        format!("{} {} {}", item, operator.symbol(), value)
    }
}

/// Keyword opening a condition. Conditions render in call order; nothing is regrouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    Where,
    And,
    Or,
    Xor,
}

impl Connective {
    pub fn keyword(&self) -> &'static str {
        match self {
            Connective::Where => "WHERE",
            Connective::And => "AND",
            Connective::Or => "OR",
            Connective::Xor => "XOR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    connective: Connective,
    negated: bool,
    condition: String,
}

impl WhereClause {
    pub fn new(
        connective: Connective,
        negated: bool,
        item: &str,
        operator: Operator,
        operand: &Operand,
        config: &SerializerConfig,
    ) -> CypherResult<Self> {
        let keyword = if negated {
            format!("{} NOT", connective.keyword())
        } else {
            connective.keyword().to_string()
        };
        let value = operand.resolve(&keyword, config)?;
        Ok(WhereClause {
            connective,
            negated,
            condition: render_condition(item, operator, &value),
        })
    }

    pub fn connective(&self) -> Connective {
        self.connective
    }
}

impl ToCypher for WhereClause {
    fn to_cypher(&self) -> String {
        if self.negated {
            format!("{} NOT {}", self.connective.keyword(), self.condition)
        } else {
            format!("{} {}", self.connective.keyword(), self.condition)
        }
    }
}

/// `SET item OP value`. With a map literal, `=` replaces every property and
/// `+=` merges into them; with [`Operator::LabelFilter`] the expression is a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetClause {
    assignment: String,
}

impl SetClause {
    pub fn new(
        item: &str,
        operator: Operator,
        operand: &Operand,
        config: &SerializerConfig,
    ) -> CypherResult<Self> {
        let value = operand.resolve("SET", config)?;
        Ok(SetClause {
            assignment: render_condition(item, operator, &value),
        })
    }
}

impl ToCypher for SetClause {
    fn to_cypher(&self) -> String {
        format!("SET {}", self.assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;
    use pretty_assertions::assert_eq;

    fn cfg() -> SerializerConfig {
        SerializerConfig::default()
    }

    #[test]
    fn test_where_expression_is_unquoted() {
        let clause = WhereClause::new(
            Connective::Where,
            false,
            "p1.name",
            Operator::Equal,
            &Operand::expression("p2.name"),
            &cfg(),
        )
        .unwrap();
        assert_eq!(clause.to_cypher(), "WHERE p1.name = p2.name");
    }

    #[test]
    fn test_where_literal_is_serialized() {
        let clause = WhereClause::new(
            Connective::Where,
            false,
            "p.age",
            Operator::Greater,
            &Operand::literal(18),
            &cfg(),
        )
        .unwrap();
        assert_eq!(clause.to_cypher(), "WHERE p.age > 18");

        let clause = WhereClause::new(
            Connective::And,
            true,
            "p.name",
            Operator::Inequal,
            &Operand::literal("Ron"),
            &cfg(),
        )
        .unwrap();
        assert_eq!(clause.to_cypher(), "AND NOT p.name <> 'Ron'");
    }

    #[test]
    fn test_label_filter_has_no_spaces() {
        let clause = WhereClause::new(
            Connective::Or,
            false,
            "n",
            Operator::LabelFilter,
            &Operand::expression("User"),
            &cfg(),
        )
        .unwrap();
        assert_eq!(clause.to_cypher(), "OR n:User");
    }

    #[test]
    fn test_operand_discriminant() {
        let missing = WhereClause::new(
            Connective::Xor,
            true,
            "n.id",
            Operator::Equal,
            &Operand::default(),
            &cfg(),
        )
        .unwrap_err();
        assert_eq!(
            missing,
            CypherError::MissingDiscriminant {
                clause: "XOR NOT".to_string()
            }
        );

        let both = SetClause::new(
            "n.id",
            Operator::Assignment,
            &Operand::literal(1).with_expression("m.id"),
            &cfg(),
        )
        .unwrap_err();
        assert!(matches!(both, CypherError::ConflictingDiscriminant { .. }));
    }

    #[test]
    fn test_set_forms() {
        let replace = SetClause::new(
            "n",
            Operator::Assignment,
            &Operand::literal(props! { "name" => "Ron", "age" => 3 }),
            &cfg(),
        )
        .unwrap();
        assert_eq!(replace.to_cypher(), "SET n = {name: 'Ron', age: 3}");

        let merge = SetClause::new(
            "n",
            Operator::Increment,
            &Operand::literal(props! { "age" => 4 }),
            &cfg(),
        )
        .unwrap();
        assert_eq!(merge.to_cypher(), "SET n += {age: 4}");

        let label = SetClause::new(
            "n",
            Operator::LabelFilter,
            &Operand::expression("Admin"),
            &cfg(),
        )
        .unwrap();
        assert_eq!(label.to_cypher(), "SET n:Admin");
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!("<>".parse::<Operator>().unwrap(), Operator::Inequal);
        assert_eq!(" += ".parse::<Operator>().unwrap(), Operator::Increment);
        assert_eq!(
            "==".parse::<Operator>().unwrap_err(),
            CypherError::UnknownOperator("==".to_string())
        );
    }
}
