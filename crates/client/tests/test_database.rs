use graphmill_client::{
    ClientError, Connection, GraphDatabase, Parameters, ResultRow, Rows,
};
use graphmill_cypher::ddl::{Constraint, Index};
use graphmill_cypher::Value;
use pretty_assertions::assert_eq;
use std::sync::Mutex;

/// Records every statement and answers fetches with canned rows.
#[derive(Default)]
struct ScriptedConnection {
    statements: Mutex<Vec<String>>,
    responses: Mutex<Vec<(String, Vec<ResultRow>)>>,
}

impl ScriptedConnection {
    fn respond(self, query: &str, rows: Vec<ResultRow>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((query.to_string(), rows));
        self
    }

    fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

impl Connection for ScriptedConnection {
    fn execute(&self, query: &str, _parameters: &Parameters) -> anyhow::Result<()> {
        if query.contains("FAIL") {
            anyhow::bail!("syntax error near FAIL");
        }
        self.statements.lock().unwrap().push(query.to_string());
        Ok(())
    }

    fn execute_and_fetch(&self, query: &str, _parameters: &Parameters) -> anyhow::Result<Rows> {
        self.statements.lock().unwrap().push(query.to_string());
        let rows = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default();
        Ok(Box::new(rows.into_iter().map(Ok)))
    }
}

#[test]
fn test_index_and_constraint_statements() {
    let db = GraphDatabase::new(ScriptedConnection::default());
    db.create_index(&Index::label_property("User", "email")).unwrap();
    db.drop_index(&Index::label("User")).unwrap();
    db.create_constraint(&Constraint::unique("User", ["email"])).unwrap();
    db.drop_constraint(&Constraint::exists("User", "name")).unwrap();
    db.drop_database().unwrap();

    assert_eq!(
        db.connection().statements(),
        vec![
            "CREATE INDEX ON :User(email)",
            "DROP INDEX ON :User",
            "CREATE CONSTRAINT ON (n:User) ASSERT n.email IS UNIQUE",
            "DROP CONSTRAINT ON (n:User) ASSERT EXISTS (n.name)",
            "MATCH (n) DETACH DELETE n",
        ]
    );
}

#[test]
fn test_reading_indexes_and_constraints() {
    let connection = ScriptedConnection::default()
        .respond(
            "SHOW INDEX INFO",
            vec![
                ResultRow::new()
                    .with("index type", "label+property")
                    .with("label", "User")
                    .with("property", "email"),
                ResultRow::new()
                    .with("index type", "label")
                    .with("label", "Post")
                    .with("property", Value::Null),
            ],
        )
        .respond(
            "SHOW CONSTRAINT INFO",
            vec![
                ResultRow::new()
                    .with("constraint type", "unique")
                    .with("label", "User")
                    .with("properties", vec!["email", "tenant"]),
                ResultRow::new()
                    .with("constraint type", "exists")
                    .with("label", "User")
                    .with("properties", "name"),
            ],
        );
    let db = GraphDatabase::new(connection);

    assert_eq!(
        db.get_indexes().unwrap(),
        vec![Index::label_property("User", "email"), Index::label("Post")]
    );
    assert_eq!(
        db.get_constraints().unwrap(),
        vec![
            Constraint::unique("User", ["email", "tenant"]),
            Constraint::exists("User", "name"),
        ]
    );
}

#[test]
fn test_get_variable_assume_one() {
    let connection = ScriptedConnection::default()
        .respond(
            "MATCH (n) RETURN count(n) AS total",
            vec![ResultRow::new().with("total", 3)],
        )
        .respond(
            "MATCH (n) RETURN n.id AS id",
            vec![ResultRow::new().with("id", 1), ResultRow::new().with("id", 2)],
        );
    let db = GraphDatabase::new(connection);

    assert_eq!(
        db.get_variable_assume_one("MATCH (n) RETURN count(n) AS total", "total")
            .unwrap(),
        Value::Integer(3)
    );
    assert!(matches!(
        db.get_variable_assume_one("MATCH (n) RETURN n.id AS id", "id"),
        Err(ClientError::MultipleResults(2))
    ));
    assert!(matches!(
        db.get_variable_assume_one("MATCH (n:Missing) RETURN n", "n"),
        Err(ClientError::EmptyResult)
    ));
    assert!(matches!(
        db.get_variable_assume_one("MATCH (n) RETURN count(n) AS total", "count"),
        Err(ClientError::MissingAlias(_))
    ));
}

#[test]
fn test_backend_errors_are_wrapped() {
    let db = GraphDatabase::new(ScriptedConnection::default());
    let err = db.execute("FAIL", &Parameters::new()).unwrap_err();
    assert!(matches!(err, ClientError::Backend(_)));
    assert!(err.to_string().contains("syntax error near FAIL"));
}

fn scripted_schema() -> ScriptedConnection {
    ScriptedConnection::default()
        .respond(
            "SHOW INDEX INFO",
            vec![
                ResultRow::new()
                    .with("index type", "label+property")
                    .with("label", "User")
                    .with("property", "email"),
                ResultRow::new()
                    .with("index type", "label")
                    .with("label", "Post")
                    .with("property", Value::Null),
            ],
        )
        .respond(
            "SHOW CONSTRAINT INFO",
            vec![
                ResultRow::new()
                    .with("constraint type", "unique")
                    .with("label", "User")
                    .with("properties", vec!["email"]),
                ResultRow::new()
                    .with("constraint type", "exists")
                    .with("label", "User")
                    .with("properties", "name"),
                ResultRow::new()
                    .with("constraint type", "exists")
                    .with("label", "Post")
                    .with("properties", "title"),
            ],
        )
}

#[test]
fn test_ensure_indexes_applies_the_difference() {
    let db = GraphDatabase::new(scripted_schema());
    db.ensure_indexes(&[
        Index::label_property("User", "email"),
        Index::label_property("Post", "slug"),
    ])
    .unwrap();

    assert_eq!(
        db.connection().statements(),
        vec![
            "SHOW INDEX INFO",
            "DROP INDEX ON :Post",
            "CREATE INDEX ON :Post(slug)",
        ]
    );
}

#[test]
fn test_ensure_indexes_when_already_in_sync() {
    let db = GraphDatabase::new(scripted_schema());
    db.ensure_indexes(&[Index::label("Post"), Index::label_property("User", "email")])
        .unwrap();
    assert_eq!(db.connection().statements(), vec!["SHOW INDEX INFO"]);
}

#[test]
fn test_ensure_constraints_applies_the_difference() {
    let db = GraphDatabase::new(scripted_schema());
    db.ensure_constraints(&[
        Constraint::unique("User", ["email"]),
        Constraint::exists("Post", "title"),
        Constraint::unique("Post", ["slug"]),
    ])
    .unwrap();

    assert_eq!(
        db.connection().statements(),
        vec![
            "SHOW CONSTRAINT INFO",
            "DROP CONSTRAINT ON (n:User) ASSERT EXISTS (n.name)",
            "CREATE CONSTRAINT ON (n:Post) ASSERT n.slug IS UNIQUE",
        ]
    );
}

#[test]
fn test_constraints_by_kind() {
    let db = GraphDatabase::new(scripted_schema());
    assert_eq!(
        db.get_exists_constraints().unwrap(),
        vec![
            Constraint::exists("User", "name"),
            Constraint::exists("Post", "title"),
        ]
    );
    assert_eq!(
        db.get_unique_constraints().unwrap(),
        vec![Constraint::unique("User", ["email"])]
    );
}
