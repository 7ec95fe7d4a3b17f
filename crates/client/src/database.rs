use crate::connection::{Connection, Parameters, Rows};
use crate::result::single;
use crate::{ClientError, ClientResult};
use graphmill_cypher::ddl::{Constraint, Index};
use graphmill_cypher::Value;
use indexmap::IndexSet;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

const SHOW_INDEXES: &str = "SHOW INDEX INFO";
const SHOW_CONSTRAINTS: &str = "SHOW CONSTRAINT INFO";
const DELETE_EVERYTHING: &str = "MATCH (n) DETACH DELETE n";

/// Database-level operations on top of a [`Connection`].
#[derive(Debug)]
pub struct GraphDatabase<C: Connection> {
    connection: Arc<C>,
}

impl<C: Connection> Clone for GraphDatabase<C> {
    fn clone(&self) -> Self {
        GraphDatabase {
            connection: Arc::clone(&self.connection),
        }
    }
}

impl<C: Connection> GraphDatabase<C> {
    pub fn new(connection: C) -> Self {
        GraphDatabase {
            connection: Arc::new(connection),
        }
    }

    pub fn connection(&self) -> Arc<C> {
        Arc::clone(&self.connection)
    }

    #[instrument(name = "graphmill.database.execute", skip(self, parameters), err)]
    pub fn execute(&self, query: &str, parameters: &Parameters) -> ClientResult<()> {
        trace!("query: {}", query);
        self.connection.execute(query, parameters)?;
        Ok(())
    }

    #[instrument(name = "graphmill.database.execute_and_fetch", skip(self, parameters), err)]
    pub fn execute_and_fetch(&self, query: &str, parameters: &Parameters) -> ClientResult<Rows> {
        trace!("query: {}", query);
        Ok(self.connection.execute_and_fetch(query, parameters)?)
    }

    /// Runs a query expected to return exactly one row and takes `alias` out of it.
    pub fn get_variable_assume_one(&self, query: &str, alias: &str) -> ClientResult<Value> {
        single(self.execute_and_fetch(query, &Parameters::new())?, alias)
    }

    pub fn create_index(&self, index: &Index) -> ClientResult<()> {
        self.execute(&index.create_statement(), &Parameters::new())
    }

    pub fn drop_index(&self, index: &Index) -> ClientResult<()> {
        self.execute(&index.drop_statement(), &Parameters::new())
    }

    /// Indexes currently defined, read from `SHOW INDEX INFO`.
    pub fn get_indexes(&self) -> ClientResult<Vec<Index>> {
        let mut indexes = Vec::new();
        for row in self.execute_and_fetch(SHOW_INDEXES, &Parameters::new())? {
            let row = row?;
            let label = text_column(row.try_get("label")?, "label")?;
            let property = match row.get("property") {
                None | Some(Value::Null) => None,
                Some(value) => Some(text_column(value, "property")?),
            };
            indexes.push(Index { label, property });
        }
        debug!(count = indexes.len(), "read indexes");
        Ok(indexes)
    }

    /// Makes the database's indexes equal to `indexes`: existing ones not listed
    /// are dropped, then listed ones not present are created.
    #[instrument(name = "graphmill.database.ensure_indexes", skip_all, err)]
    pub fn ensure_indexes(&self, indexes: &[Index]) -> ClientResult<()> {
        let existing: IndexSet<Index> = self.get_indexes()?.into_iter().collect();
        let desired: IndexSet<&Index> = indexes.iter().collect();
        for obsolete in existing.iter().filter(|index| !desired.contains(index)) {
            self.drop_index(obsolete)?;
        }
        for missing in desired.into_iter().filter(|index| !existing.contains(*index)) {
            self.create_index(missing)?;
        }
        Ok(())
    }

    pub fn drop_indexes(&self) -> ClientResult<()> {
        for index in self.get_indexes()? {
            self.drop_index(&index)?;
        }
        Ok(())
    }

    pub fn create_constraint(&self, constraint: &Constraint) -> ClientResult<()> {
        self.execute(&constraint.create_statement(), &Parameters::new())
    }

    pub fn drop_constraint(&self, constraint: &Constraint) -> ClientResult<()> {
        self.execute(&constraint.drop_statement(), &Parameters::new())
    }

    /// Constraints currently defined, read from `SHOW CONSTRAINT INFO`.
    pub fn get_constraints(&self) -> ClientResult<Vec<Constraint>> {
        let mut constraints = Vec::new();
        for row in self.execute_and_fetch(SHOW_CONSTRAINTS, &Parameters::new())? {
            let row = row?;
            let kind = text_column(row.try_get("constraint type")?, "constraint type")?;
            let label = text_column(row.try_get("label")?, "label")?;
            let properties = match row.try_get("properties")? {
                Value::List(items) => items
                    .iter()
                    .map(|item| text_column(item, "properties"))
                    .collect::<ClientResult<Vec<_>>>()?,
                other => vec![text_column(other, "properties")?],
            };
            let constraint = match kind.as_str() {
                "unique" => Constraint::unique(label, properties),
                "exists" => match properties.into_iter().next() {
                    Some(property) => Constraint::exists(label, property),
                    None => continue,
                },
                other => {
                    debug!(kind = other, "skipping unsupported constraint");
                    continue;
                }
            };
            constraints.push(constraint);
        }
        Ok(constraints)
    }

    pub fn get_exists_constraints(&self) -> ClientResult<Vec<Constraint>> {
        Ok(self
            .get_constraints()?
            .into_iter()
            .filter(|constraint| matches!(constraint, Constraint::Exists { .. }))
            .collect())
    }

    pub fn get_unique_constraints(&self) -> ClientResult<Vec<Constraint>> {
        Ok(self
            .get_constraints()?
            .into_iter()
            .filter(|constraint| matches!(constraint, Constraint::Unique { .. }))
            .collect())
    }

    /// Same as [`GraphDatabase::ensure_indexes`], for constraints.
    #[instrument(name = "graphmill.database.ensure_constraints", skip_all, err)]
    pub fn ensure_constraints(&self, constraints: &[Constraint]) -> ClientResult<()> {
        let existing: IndexSet<Constraint> = self.get_constraints()?.into_iter().collect();
        let desired: IndexSet<&Constraint> = constraints.iter().collect();
        for obsolete in existing.iter().filter(|constraint| !desired.contains(constraint)) {
            self.drop_constraint(obsolete)?;
        }
        for missing in desired.into_iter().filter(|constraint| !existing.contains(*constraint)) {
            self.create_constraint(missing)?;
        }
        Ok(())
    }

    /// Removes every node and relationship. Indexes and constraints are kept.
    pub fn drop_database(&self) -> ClientResult<()> {
        self.execute(DELETE_EVERYTHING, &Parameters::new())
    }
}

fn text_column(value: &Value, column: &str) -> ClientResult<String> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        ClientError::Backend(anyhow::anyhow!(
            "column {} should be text, found {}",
            column,
            value.type_name()
        ))
    })
}
