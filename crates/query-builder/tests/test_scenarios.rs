use graphmill_cypher::CypherError;
use graphmill_query_builder::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_create_labelled_node() {
    let query = QueryBuilder::new()
        .create()
        .node(NodeSpec::new().labels("Person").property("name", "Ron"))
        .unwrap()
        .construct_query();
    assert_eq!(query, "CREATE (:Person {name: 'Ron'})");
}

#[test]
fn test_where_expression_is_not_quoted() {
    let query = QueryBuilder::new()
        .where_("p1.name", Operator::Equal, Operand::expression("p2.name"))
        .unwrap()
        .construct_query();
    assert_eq!(query, "WHERE p1.name = p2.name");
}

#[test]
fn test_where_numeric_literal_is_not_quoted() {
    let query = QueryBuilder::new()
        .where_("p.age", Operator::Greater, Operand::literal(18))
        .unwrap()
        .construct_query();
    assert_eq!(query, "WHERE p.age > 18");
}

#[test]
fn test_return_with_alias() {
    let query = QueryBuilder::new()
        .return_(results![("p1", "first"), "p2"])
        .unwrap()
        .construct_query();
    assert_eq!(query, "RETURN p1 AS first, p2");
}

#[test]
fn test_three_part_return_entry_is_rejected() {
    let err = QueryBuilder::new()
        .return_(results![("a", "b", "c")])
        .unwrap_err();
    assert!(matches!(
        err,
        QueryBuilderError::Cypher(CypherError::ResultShape { .. })
    ));
}

#[test]
fn test_subgraph_projection_call() {
    let query = MemgraphQueryBuilder::new()
        .call_subgraph(
            "mod.proc",
            "x",
            Subgraph::new()
                .node_labels(vec![vec!["A"], vec!["B"]])
                .relationship_types(vec!["T"]),
        )
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "MATCH p = (n0)-[r0]->(n1) WHERE (n0:A) AND (n1:B) AND (type(r0) = 'T') \
         WITH project(p) AS graph CALL mod.proc(graph, 'x')"
    );
}

#[test]
fn test_query_is_space_joined_fragments() {
    let builder = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n").labels("User"))
        .unwrap()
        .where_("n.email", Operator::Equal, Operand::literal("a@b.c"))
        .unwrap()
        .return_(())
        .unwrap();
    let fragments: Vec<String> = builder
        .state()
        .clauses()
        .iter()
        .map(ToCypher::to_cypher)
        .collect();
    assert_eq!(
        fragments,
        vec!["MATCH", "(n:User)", "WHERE n.email = 'a@b.c'", "RETURN *"]
    );
    assert_eq!(builder.construct_query(), fragments.join(" "));
}

#[test]
fn test_string_literals_cannot_break_out_of_quotes() {
    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n"))
        .unwrap()
        .where_(
            "n.name",
            Operator::Equal,
            Operand::literal("x' OR 1=1 //"),
        )
        .unwrap()
        .construct_query();
    assert_eq!(query, r"MATCH (n) WHERE n.name = 'x\' OR 1=1 //'");
}

#[test]
fn test_temporal_and_enum_literals() {
    use chrono::NaiveDate;

    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let query = QueryBuilder::new()
        .create()
        .node(
            NodeSpec::new()
                .labels("Event")
                .property("on", date)
                .property("kind", EnumValue::new("Kind", "Launch")),
        )
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "CREATE (:Event {on: date('2024-02-29'), kind: Kind::Launch})"
    );
}
