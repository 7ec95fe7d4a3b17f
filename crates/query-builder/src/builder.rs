use crate::error::{BuildResult, QueryBuilderError};
use crate::state::BuilderState;
use graphmill_client::{first, no_rows, single, Parameters, Rows};
use graphmill_cypher::clause::{
    CallArguments, CallClause, Clause, Connective, DeleteClause, Direction, ForeachClause, Items,
    NodePattern, NodeSpec, Operand, Operator, OrderByClause, Ordering, PagingClause, RelSpec,
    RelationshipPattern, RemoveClause, ResultClause, ResultKeyword, Results, SetClause,
    UnionClause, UnwindClause, WhereClause,
};
use graphmill_cypher::{Raw, SerializerConfig, Value};
use tracing::{instrument, trace};

/// Chained construction of a Cypher query, one fragment per call.
///
/// Every method consumes the builder and hands it back, so a query reads
/// left to right:
///
/// ```
/// # use graphmill_query_builder::prelude::*;
/// # fn main() -> Result<(), QueryBuilderError> {
/// let query = QueryBuilder::new()
///     .match_()
///     .node(NodeSpec::new().labels("Person").variable("p1"))?
///     .to(RelSpec::typed("KNOWS"))?
///     .node(NodeSpec::new().labels("Person").variable("p2"))?
///     .where_("p1.name", Operator::Equal, Operand::expression("p2.name"))?
///     .return_(results![("p1", "first"), "p2"])?
///     .construct_query();
/// assert_eq!(
///     query,
///     "MATCH (p1:Person) -[:KNOWS]-> (p2:Person) WHERE p1.name = p2.name RETURN p1 AS first, p2"
/// );
/// # Ok(())
/// # }
/// ```
///
/// Methods that take caller values check them immediately and return a
/// `Result`; a malformed chain fails at the offending call, never at execution.
pub trait CypherBuilder: Sized {
    fn state(&self) -> &BuilderState;

    fn state_mut(&mut self) -> &mut BuilderState;

    /// Serializer settings used by every later fragment.
    fn with_config(mut self, config: SerializerConfig) -> Self {
        self.state_mut().set_config(config);
        self
    }

    fn match_(mut self) -> Self {
        self.state_mut().push(Clause::Match { optional: false });
        self
    }

    fn optional_match(mut self) -> Self {
        self.state_mut().push(Clause::Match { optional: true });
        self
    }

    fn merge(mut self) -> Self {
        self.state_mut().push(Clause::Merge);
        self
    }

    fn create(mut self) -> Self {
        self.state_mut().push(Clause::Create);
        self
    }

    fn node(mut self, spec: NodeSpec) -> BuildResult<Self> {
        let pattern = NodePattern::new(spec, self.state().config())?;
        self.state_mut().push_pattern(Clause::Node(pattern))?;
        Ok(self)
    }

    /// Outgoing relationship `-[...]->`, or `-[...]-` for an undirected `RelSpec`.
    fn to(mut self, spec: RelSpec) -> BuildResult<Self> {
        let pattern = RelationshipPattern::new(spec, Direction::Outgoing, self.state().config())?;
        self.state_mut().push_pattern(Clause::Relationship(pattern))?;
        Ok(self)
    }

    /// Incoming relationship `<-[...]-`, or `-[...]-` for an undirected `RelSpec`.
    fn from_(mut self, spec: RelSpec) -> BuildResult<Self> {
        let pattern = RelationshipPattern::new(spec, Direction::Incoming, self.state().config())?;
        self.state_mut().push_pattern(Clause::Relationship(pattern))?;
        Ok(self)
    }

    #[doc(hidden)]
    fn condition(
        mut self,
        connective: Connective,
        negated: bool,
        item: &str,
        operator: Operator,
        operand: Operand,
    ) -> BuildResult<Self> {
        let clause = WhereClause::new(
            connective,
            negated,
            item,
            operator,
            &operand,
            self.state().config(),
        )?;
        self.state_mut().push(Clause::Where(clause));
        Ok(self)
    }

    fn where_(self, item: &str, operator: Operator, operand: impl Into<Operand>) -> BuildResult<Self> {
        self.condition(Connective::Where, false, item, operator, operand.into())
    }

    fn where_not(self, item: &str, operator: Operator, operand: impl Into<Operand>) -> BuildResult<Self> {
        self.condition(Connective::Where, true, item, operator, operand.into())
    }

    fn and_where(self, item: &str, operator: Operator, operand: impl Into<Operand>) -> BuildResult<Self> {
        self.condition(Connective::And, false, item, operator, operand.into())
    }

    fn and_not_where(
        self,
        item: &str,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> BuildResult<Self> {
        self.condition(Connective::And, true, item, operator, operand.into())
    }

    fn or_where(self, item: &str, operator: Operator, operand: impl Into<Operand>) -> BuildResult<Self> {
        self.condition(Connective::Or, false, item, operator, operand.into())
    }

    fn or_not_where(
        self,
        item: &str,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> BuildResult<Self> {
        self.condition(Connective::Or, true, item, operator, operand.into())
    }

    fn xor_where(self, item: &str, operator: Operator, operand: impl Into<Operand>) -> BuildResult<Self> {
        self.condition(Connective::Xor, false, item, operator, operand.into())
    }

    fn xor_not_where(
        self,
        item: &str,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> BuildResult<Self> {
        self.condition(Connective::Xor, true, item, operator, operand.into())
    }

    fn set_(mut self, item: &str, operator: Operator, operand: impl Into<Operand>) -> BuildResult<Self> {
        let clause = SetClause::new(item, operator, &operand.into(), self.state().config())?;
        self.state_mut().push(Clause::Set(clause));
        Ok(self)
    }

    fn delete(mut self, items: impl Into<Items>) -> BuildResult<Self> {
        self.state_mut()
            .push(Clause::Delete(DeleteClause::new(items, false)?));
        Ok(self)
    }

    /// `DETACH DELETE`, also removing the relationships of deleted nodes.
    fn detach_delete(mut self, items: impl Into<Items>) -> BuildResult<Self> {
        self.state_mut()
            .push(Clause::Delete(DeleteClause::new(items, true)?));
        Ok(self)
    }

    fn remove(mut self, items: impl Into<Items>) -> BuildResult<Self> {
        self.state_mut()
            .push(Clause::Remove(RemoveClause::new(items)?));
        Ok(self)
    }

    /// `RETURN`; `()` returns everything (`RETURN *`).
    fn return_(mut self, results: impl Into<Results>) -> BuildResult<Self> {
        let clause = ResultClause::new(ResultKeyword::Return, results.into())?;
        self.state_mut().push(Clause::Result(clause));
        Ok(self)
    }

    fn yield_(mut self, results: impl Into<Results>) -> BuildResult<Self> {
        let clause = ResultClause::new(ResultKeyword::Yield, results.into())?;
        self.state_mut().push(Clause::Result(clause));
        Ok(self)
    }

    fn with_(mut self, results: impl Into<Results>) -> BuildResult<Self> {
        let clause = ResultClause::new(ResultKeyword::With, results.into())?;
        self.state_mut().push(Clause::Result(clause));
        Ok(self)
    }

    fn order_by(mut self, ordering: impl Into<Ordering>) -> BuildResult<Self> {
        let clause = OrderByClause::new(ordering.into())?;
        self.state_mut().push(Clause::OrderBy(clause));
        Ok(self)
    }

    fn limit(mut self, amount: impl Into<Raw>) -> Self {
        self.state_mut().push(Clause::Paging(PagingClause::limit(amount)));
        self
    }

    fn skip(mut self, amount: impl Into<Raw>) -> Self {
        self.state_mut().push(Clause::Paging(PagingClause::skip(amount)));
        self
    }

    /// `UNWIND expression AS variable`, the expression written verbatim.
    fn unwind(mut self, list_expression: impl Into<Raw>, variable: &str) -> Self {
        self.state_mut()
            .push(Clause::Unwind(UnwindClause::new(list_expression, variable)));
        self
    }

    /// `UNWIND [...] AS variable` over a serialized literal list.
    fn unwind_literal(mut self, list: impl Into<Value>, variable: &str) -> BuildResult<Self> {
        let clause = UnwindClause::literal(list, variable, self.state().config())?;
        self.state_mut().push(Clause::Unwind(clause));
        Ok(self)
    }

    fn call(mut self, procedure: &str, arguments: impl Into<CallArguments>) -> BuildResult<Self> {
        let clause = CallClause::new(procedure, arguments, self.state().config())?;
        self.state_mut().push(Clause::Call(clause));
        Ok(self)
    }

    /// `FOREACH ( variable IN expression | clauses )`. Nested clauses can be
    /// written by hand or taken from another builder's `construct_query()`.
    fn foreach(
        mut self,
        variable: &str,
        expression: &str,
        update_clauses: impl Into<Items>,
    ) -> BuildResult<Self> {
        let clause = ForeachClause::new(variable, expression, update_clauses)?;
        self.state_mut().push(Clause::Foreach(clause));
        Ok(self)
    }

    fn union(mut self) -> Self {
        self.state_mut().push(Clause::Union(UnionClause {
            include_duplicates: false,
        }));
        self
    }

    fn union_all(mut self) -> Self {
        self.state_mut().push(Clause::Union(UnionClause {
            include_duplicates: true,
        }));
        self
    }

    /// Injects text verbatim. Text containing ` RETURN ` makes execution fetch rows.
    fn add_custom_cypher(mut self, cypher: &str) -> Self {
        self.state_mut().push(Clause::Custom(cypher.to_string()));
        self
    }

    /// The query text, fragments joined by single spaces.
    fn construct_query(&self) -> String {
        self.state().render()
    }

    fn execute(self) -> BuildResult<Rows> {
        self.execute_with(&Parameters::new())
    }

    /// Runs the query. Rows are streamed when the query returns any; otherwise
    /// the query runs for its side effects and an empty sequence comes back.
    #[instrument(
        name = "graphmill.query.execute",
        skip(self, parameters),
        fields(
            clauses = self.state().clauses().len(),
            fetch = self.state().fetch_results()
        ),
        err
    )]
    fn execute_with(self, parameters: &Parameters) -> BuildResult<Rows> {
        let query = self.construct_query();
        let connection = self
            .state()
            .connection()
            .ok_or(QueryBuilderError::NoConnection)?;

        trace!("query: {}", &query);

        if self.state().fetch_results() {
            Ok(connection.execute_and_fetch(&query, parameters)?)
        } else {
            connection.execute(&query, parameters)?;
            Ok(no_rows())
        }
    }

    /// Executes and returns `alias` from the only result row.
    fn get_single(self, alias: &str) -> BuildResult<Value> {
        Ok(single(self.execute()?, alias)?)
    }

    /// Executes and returns `alias` from the first result row.
    fn get_first(self, alias: &str) -> BuildResult<Value> {
        Ok(first(self.execute()?, alias)?)
    }
}
