#[macro_use]
mod fmt;
use fmt::ToSql;

mod column;
use column::ColumnAlias;

mod config;
pub use config::Config;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::Ident;

mod params;
pub use params::Params;

// Fragment serializers
mod delete;
mod filter;
mod function;
mod insert;
mod operator;
mod projection;
mod select;
mod statement;
mod sync;
mod ty;
mod update;

use crate::Statement;

use indexmap::IndexSet;
use sluice_core::{
    expr::Value,
    model::{self, Alias, Field},
    schema::{Column, Entity, Mapping},
    Error, Result,
};
use tracing::debug;

/// Serialize a statement to SQL Server text
pub struct Serializer<'a> {
    /// Mapping against which column and table names are resolved
    mapping: &'a dyn Mapping,

    config: Config,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: String,

    /// Where to store parameters
    params: Params,

    /// Table aliases, numbered in order of first appearance in `dst`
    aliases: IndexSet<Alias>,

    /// Column aliases, numbered in order of first appearance in `dst`
    columns: IndexSet<Alias>,

    /// Tables in scope, innermost last. Unqualified fields resolve against
    /// the innermost one.
    scopes: Vec<Scope<'a>>,

    /// Prefix every field with the alias of its table.
    qualify: bool,

    /// Let inequalities against a field also match rows where the field is
    /// NULL.
    null_fallback: bool,
}

#[derive(Clone, Copy)]
struct Scope<'a> {
    /// `None` for statements that address the table by name
    alias: Option<Alias>,

    entity: &'a Entity,
}

impl<'a> Serializer<'a> {
    pub fn new(mapping: &'a dyn Mapping) -> Serializer<'a> {
        Serializer::with_config(mapping, Config::default())
    }

    pub fn with_config(mapping: &'a dyn Mapping, config: Config) -> Serializer<'a> {
        Serializer { mapping, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Renders `stmt`.
    ///
    /// Nothing is returned on failure: a statement either renders completely
    /// or not at all.
    pub fn serialize(&self, stmt: &model::Statement) -> Result<Statement> {
        let mut f = Formatter {
            serializer: self,
            dst: String::new(),
            params: Params::new(),
            aliases: IndexSet::new(),
            columns: IndexSet::new(),
            scopes: vec![],
            qualify: false,
            null_fallback: false,
        };

        let result = statement::to_sql(stmt, &mut f)?;

        debug!(
            stmt = stmt.name(),
            text = %f.dst,
            params = f.params.len(),
            ?result,
            "serialized statement"
        );

        Ok(Statement {
            text: f.dst,
            params: f.params,
            result,
        })
    }

    fn entity(&self, name: &str) -> Result<&'a Entity> {
        let mapping: &'a dyn Mapping = self.mapping;
        mapping.entity(name)
    }
}

impl<'a> Formatter<'a> {
    fn entity(&self, name: &str) -> Result<&'a Entity> {
        self.serializer.entity(name)
    }

    /// The entity `select` reads rows of.
    fn entity_of(&self, select: &model::Select) -> Result<&'a Entity> {
        match select.entity() {
            Some(name) => self.entity(name),
            None => Err(Error::invalid_statement("select has no data source")),
        }
    }

    /// Runs `body` with `scope` as the innermost table.
    fn scoped<R>(
        &mut self,
        scope: Scope<'a>,
        body: impl FnOnce(&mut Formatter<'a>) -> Result<R>,
    ) -> Result<R> {
        self.scopes.push(scope);
        let ret = body(self);
        self.scopes.pop();
        ret
    }

    /// Runs `body` with the field rendering flags reset, for a nested select.
    fn nested<R>(&mut self, body: impl FnOnce(&mut Formatter<'a>) -> Result<R>) -> Result<R> {
        let qualify = std::mem::replace(&mut self.qualify, false);
        let null_fallback = std::mem::replace(&mut self.null_fallback, false);
        let ret = body(self);
        self.qualify = qualify;
        self.null_fallback = null_fallback;
        ret
    }

    /// Resolves the table `field` is read from and its column.
    fn column(&self, field: &Field) -> Result<(Scope<'a>, &'a Column)> {
        let scope = match field.table {
            Some(alias) => self
                .scopes
                .iter()
                .rev()
                .find(|scope| scope.alias == Some(alias))
                .copied()
                .ok_or_else(|| {
                    Error::invalid_statement(format!(
                        "field `{}` refers to a table that is not in scope",
                        field.name
                    ))
                })?,
            None => *self
                .scopes
                .last()
                .ok_or_else(|| Error::invalid_statement("field outside of any table"))?,
        };

        let column = scope.entity.resolve(&field.name, field.key.as_deref())?;
        Ok((scope, column))
    }

    /// Rejects string values longer than `column` holds.
    fn check_length(&self, column: &Column, value: &Value) -> Result<()> {
        if !self.serializer.config.check_string_length {
            return Ok(());
        }

        if let (Some(max), Some(value)) = (column.max_length, value.as_str()) {
            let len = value.chars().count();
            if len > max {
                return Err(Error::string_truncation(&column.name, len, max));
            }
        }
        Ok(())
    }

    fn push_param(&mut self, value: Value) -> String {
        self.params
            .push(&self.serializer.config.param_prefix, value)
    }
}

/// The column of `source` holding the same property or dynamic key as
/// `column`.
fn matching_column<'a>(column: &Column, source: &'a Entity) -> Option<&'a Column> {
    match (&column.property, &column.key) {
        (Some(property), _) => source.column_for_property(property),
        (None, Some(key)) => source.column_for_key(key),
        (None, None) => None,
    }
}
