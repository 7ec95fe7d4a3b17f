use crate::prelude::*;
use graphmill_cypher::clause::ClauseKind;
use graphmill_cypher::CypherError;
use pretty_assertions::assert_eq;

#[test]
fn test_create_node_with_properties() {
    let query = QueryBuilder::new()
        .create()
        .node(NodeSpec::new().labels("Person").property("name", "Ron"))
        .unwrap()
        .construct_query();
    assert_eq!(query, "CREATE (:Person {name: 'Ron'})");
}

#[test]
fn test_match_where_return() {
    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().labels("Person").variable("p"))
        .unwrap()
        .where_("p.age", Operator::Greater, Operand::literal(18))
        .unwrap()
        .and_where("p.name", Operator::Inequal, Operand::literal("Kate"))
        .unwrap()
        .return_("p")
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "MATCH (p:Person) WHERE p.age > 18 AND p.name <> 'Kate' RETURN p"
    );
}

#[test]
fn test_connectives_render_in_call_order() {
    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n"))
        .unwrap()
        .where_not("n.a", Operator::Equal, Operand::literal(1))
        .unwrap()
        .or_where("n.b", Operator::Less, Operand::literal(2))
        .unwrap()
        .and_not_where("n.c", Operator::GreaterOrEqual, Operand::literal(3))
        .unwrap()
        .xor_where("n", Operator::LabelFilter, Operand::expression("User"))
        .unwrap()
        .or_not_where("n.d", Operator::NotEqual, Operand::expression("n.e"))
        .unwrap()
        .xor_not_where("n.f", Operator::LessOrEqual, Operand::literal(4.5))
        .unwrap()
        .return_(())
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "MATCH (n) WHERE NOT n.a = 1 OR n.b < 2 AND NOT n.c >= 3 XOR n:User \
         OR NOT n.d != n.e XOR NOT n.f <= 4.5 RETURN *"
    );
}

#[test]
fn test_raw_operand() {
    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n"))
        .unwrap()
        .where_("n.created", Operator::Less, raw("datetime()"))
        .unwrap()
        .construct_query();
    assert_eq!(query, "MATCH (n) WHERE n.created < datetime()");
}

#[test]
fn test_relationship_chain() {
    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("a"))
        .unwrap()
        .to(RelSpec::typed("KNOWS").variable("r"))
        .unwrap()
        .node(NodeSpec::new().variable("b"))
        .unwrap()
        .from_(RelSpec::typed("LIKES"))
        .unwrap()
        .node(NodeSpec::new().variable("c"))
        .unwrap()
        .return_(vec!["a", "b", "c"])
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "MATCH (a) -[r:KNOWS]-> (b) <-[:LIKES]- (c) RETURN a, b, c"
    );
}

#[test]
fn test_consecutive_patterns_are_rejected() {
    let err = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("a"))
        .unwrap()
        .node(NodeSpec::new().variable("b"))
        .unwrap_err();
    assert!(matches!(
        err,
        QueryBuilderError::Cypher(CypherError::InvalidPatternChain { clause: "Node" })
    ));

    let err = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new())
        .unwrap()
        .to(RelSpec::new())
        .unwrap()
        .from_(RelSpec::new())
        .unwrap_err();
    assert!(matches!(
        err,
        QueryBuilderError::Cypher(CypherError::InvalidPatternChain {
            clause: "Relationship"
        })
    ));
}

#[test]
fn test_set_remove_delete() {
    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().labels("User").variable("u"))
        .unwrap()
        .set_("u.active", Operator::Assignment, Operand::literal(false))
        .unwrap()
        .set_("u", Operator::Increment, Operand::literal(props! { "visits" => 1 }))
        .unwrap()
        .remove(["u.token", "u:Pending"])
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "MATCH (u:User) SET u.active = false SET u += {visits: 1} REMOVE u.token, u:Pending"
    );

    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n"))
        .unwrap()
        .detach_delete("n")
        .unwrap()
        .construct_query();
    assert_eq!(query, "MATCH (n) DETACH DELETE n");

    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n"))
        .unwrap()
        .to(RelSpec::new().variable("r"))
        .unwrap()
        .node(NodeSpec::new())
        .unwrap()
        .delete(vec!["r"])
        .unwrap()
        .construct_query();
    assert_eq!(query, "MATCH (n) -[r]-> () DELETE r");
}

#[test]
fn test_empty_item_lists_are_rejected() {
    let err = QueryBuilder::new().delete(Vec::<String>::new()).unwrap_err();
    assert!(matches!(
        err,
        QueryBuilderError::Cypher(CypherError::ResultShape { .. })
    ));
    assert!(QueryBuilder::new().remove("").is_err());
}

#[test]
fn test_order_limit_skip() {
    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n"))
        .unwrap()
        .return_(())
        .unwrap()
        .order_by(vec![
            OrderEntry::from(("n.age", Order::Desc)),
            OrderEntry::from("n.name"),
        ])
        .unwrap()
        .skip(5)
        .limit("$page_size")
        .construct_query();
    assert_eq!(
        query,
        "MATCH (n) RETURN * ORDER BY n.age DESC, n.name SKIP 5 LIMIT $page_size"
    );
}

#[test]
fn test_unknown_order_is_rejected() {
    let err = QueryBuilder::new().order_by(("n.age", "upwards")).unwrap_err();
    assert!(matches!(
        err,
        QueryBuilderError::Cypher(CypherError::ResultShape { ref clause, ref reason })
            if clause == "ORDER BY" && reason.contains("upwards")
    ));
}

#[test]
fn test_with_and_yield() {
    let query = QueryBuilder::new()
        .call("db.labels", ())
        .unwrap()
        .yield_("label")
        .unwrap()
        .with_(("count(label)", "total"))
        .unwrap()
        .return_("total")
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "CALL db.labels() YIELD label WITH count(label) AS total RETURN total"
    );
}

#[test]
fn test_unwind_forms() {
    let query = QueryBuilder::new()
        .unwind_literal(vec![1, 2, 3], "x")
        .unwrap()
        .unwind("range(1, x)", "y")
        .return_(vec!["x", "y"])
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "UNWIND [1, 2, 3] AS x UNWIND range(1, x) AS y RETURN x, y"
    );
}

#[test]
fn test_foreach_with_nested_builder() {
    let inner = QueryBuilder::new()
        .create()
        .node(NodeSpec::new().labels("Tick").property("at", raw("i")))
        .unwrap()
        .construct_query();
    let query = QueryBuilder::new()
        .foreach("i", "[1, 2]", inner.as_str())
        .unwrap()
        .construct_query();
    assert_eq!(query, "FOREACH ( i IN [1, 2] | CREATE (:Tick {at: i}) )");
}

#[test]
fn test_union_variants() {
    let query = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().labels("A").variable("n"))
        .unwrap()
        .return_("n")
        .unwrap()
        .union_all()
        .match_()
        .node(NodeSpec::new().labels("B").variable("n"))
        .unwrap()
        .return_("n")
        .unwrap()
        .union()
        .add_custom_cypher("RETURN 1 AS n")
        .construct_query();
    assert_eq!(
        query,
        "MATCH (n:A) RETURN n UNION ALL MATCH (n:B) RETURN n UNION RETURN 1 AS n"
    );
}

#[test]
fn test_optional_match_and_merge() {
    let query = QueryBuilder::new()
        .merge()
        .node(NodeSpec::new().labels("City").variable("c").property("name", "Zagreb"))
        .unwrap()
        .optional_match()
        .node(NodeSpec::new().variable("c"))
        .unwrap()
        .from_(RelSpec::typed("LIVES_IN"))
        .unwrap()
        .node(NodeSpec::new().variable("p"))
        .unwrap()
        .return_(vec!["c", "p"])
        .unwrap()
        .construct_query();
    assert_eq!(
        query,
        "MERGE (c:City {name: 'Zagreb'}) OPTIONAL MATCH (c) <-[:LIVES_IN]- (p) RETURN c, p"
    );
}

#[test]
fn test_fetch_flag_follows_return() {
    let builder = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n"))
        .unwrap();
    assert!(!builder.state().fetch_results());

    let builder = builder.with_(()).unwrap();
    assert!(!builder.state().fetch_results());

    let builder = builder.return_("n").unwrap();
    assert!(builder.state().fetch_results());

    let custom = QueryBuilder::new().add_custom_cypher("MATCH (n) RETURN n");
    assert!(custom.state().fetch_results());
    let custom = QueryBuilder::new().add_custom_cypher("RETURN 1");
    assert!(!custom.state().fetch_results());
}

#[test]
fn test_nan_policy_is_per_builder() {
    let err = QueryBuilder::new()
        .create()
        .node(NodeSpec::new().property("score", f64::NAN))
        .unwrap_err();
    assert!(matches!(
        err,
        QueryBuilderError::Cypher(CypherError::Serialization { .. })
    ));

    let query = QueryBuilder::new()
        .with_config(SerializerConfig::default().with_nan_policy(NanPolicy::Null))
        .create()
        .node(NodeSpec::new().property("score", f64::NAN))
        .unwrap()
        .construct_query();
    assert_eq!(query, "CREATE ({score: null})");
}

#[test]
fn test_construct_query_is_idempotent() {
    let builder = QueryBuilder::new()
        .match_()
        .node(NodeSpec::new().variable("n"))
        .unwrap()
        .return_("n")
        .unwrap();
    assert_eq!(builder.construct_query(), builder.construct_query());
    assert_eq!(builder.to_string(), builder.construct_query());
    assert_eq!(builder.state().clauses().len(), 3);
    assert_eq!(
        builder.state().last_index_of(ClauseKind::Return),
        Some(2)
    );
}

#[test]
fn test_failed_call_leaves_no_fragment() {
    let builder = QueryBuilder::new().match_();
    let cloned = builder.clone();
    assert!(builder
        .return_(vec![("a", "b", "c")])
        .is_err());
    assert_eq!(cloned.state().clauses().len(), 1);
    assert_eq!(cloned.construct_query(), "MATCH");
}
