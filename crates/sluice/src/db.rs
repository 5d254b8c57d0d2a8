use crate::{Config, Connection, Response, Result, Schema, Serializer, Statement};

use sluice_core::{expr::Expr, lower_query, model};
use std::sync::Arc;
use tracing::debug;

/// Compiles queries against one schema and runs them on a connection.
///
/// Cloning is cheap; clones share the schema.
#[derive(Debug, Clone)]
pub struct Db {
    schema: Arc<Schema>,
    config: Config,
}

impl Db {
    pub fn new(schema: Schema) -> Db {
        Db::with_config(schema, Config::default())
    }

    pub fn with_config(schema: Schema, config: Config) -> Db {
        Db {
            schema: Arc::new(schema),
            config,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lowers a query expression into the statement it describes.
    pub fn lower(&self, expr: &Expr) -> Result<model::Statement> {
        let query = lower_query(expr, &*self.schema)?;
        Ok(query.into_statement())
    }

    /// Renders a statement of the relational model.
    pub fn serialize(&self, stmt: &model::Statement) -> Result<Statement> {
        Serializer::with_config(&*self.schema, self.config.clone()).serialize(stmt)
    }

    /// Lowers and renders a query expression.
    pub fn compile(&self, expr: &Expr) -> Result<Statement> {
        let stmt = self.lower(expr)?;
        self.serialize(&stmt)
    }

    /// Compiles `expr` and executes it on `conn`.
    ///
    /// Fails if the connection answers with something the statement cannot
    /// return, such as several rows for a `First`.
    pub async fn exec(&self, conn: &mut dyn Connection, expr: &Expr) -> Result<Response> {
        let stmt = self.compile(expr)?;
        self.exec_statement(conn, &stmt).await
    }

    /// Executes an already rendered statement on `conn`.
    pub async fn exec_statement(
        &self,
        conn: &mut dyn Connection,
        stmt: &Statement,
    ) -> Result<Response> {
        debug!(text = %stmt.text, params = stmt.params.len(), "executing statement");
        let response = conn.exec(stmt).await?;
        response.check(stmt.result)
    }
}
