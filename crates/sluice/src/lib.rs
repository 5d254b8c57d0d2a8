//! Compiles query expressions over mapped tables into SQL Server statements.
//!
//! [`Db`] ties the pipeline together: a query expression is lowered into the
//! relational model by [`sluice_core`], rendered by [`sluice_sql`] and handed
//! to a [`Connection`] for execution.

mod connection;
pub use connection::{Connection, Response};

pub mod db;
pub use db::Db;

pub use sluice_core::{expr, lower, model, schema, visit, Error, Result, Schema};
pub use sluice_sql::{Config, Params, ResultShape, Serializer, Statement};

pub use async_trait::async_trait;
