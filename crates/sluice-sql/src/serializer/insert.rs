use super::{matching_column, ty::SqlType, Comma, Formatter, Ident, ToSql};
use crate::ResultShape;

use indexmap::IndexMap;
use sluice_core::{
    expr::Value,
    model::{Alias, Insert, InsertSource, Select},
    schema::{Column, Entity},
    Error, Result,
};

pub(super) fn statement(f: &mut Formatter<'_>, insert: &Insert) -> Result<ResultShape> {
    let entity = f.entity(&insert.entity)?;

    match &insert.source {
        InsertSource::Values(values) => insert_values(f, entity, values),
        InsertSource::Select(select) => {
            insert_select(f, entity, select)?;
            Ok(ResultShape::None)
        }
    }
}

/// Inserts one row. Columns the database fills in are skipped; an identity
/// column is read back.
fn insert_values(
    f: &mut Formatter<'_>,
    entity: &Entity,
    values: &IndexMap<String, Value>,
) -> Result<ResultShape> {
    let mut columns: Vec<(&Column, &Value)> = vec![];
    for (name, value) in values {
        let column = entity.resolve_name(name)?;
        if column.is_generated() {
            continue;
        }
        f.check_length(column, value)?;
        columns.push((column, value));
    }

    fmt!(f, "INSERT INTO " Ident(&entity.table));

    if columns.is_empty() {
        fmt!(f, " DEFAULT VALUES");
    } else {
        let names = Comma(columns.iter().map(|(column, _)| Ident(&column.name)));
        let values = Comma(columns.iter().map(|(_, value)| *value));
        fmt!(f, " (" names ") VALUES (" values ")");
    }

    match entity.identity() {
        Some(identity) => {
            fmt!(f, "; SELECT CAST(SCOPE_IDENTITY() AS " SqlType(&identity.ty) ")");
            Ok(ResultShape::Scalar)
        }
        None => Ok(ResultShape::None),
    }
}

/// Copies the rows of `select` into the table of `target`, matching columns
/// by property or dynamic key.
fn insert_select(f: &mut Formatter<'_>, target: &Entity, select: &Select) -> Result<()> {
    let source = f.entity_of(select)?;

    let columns: Vec<_> = target
        .columns
        .iter()
        .filter(|column| !column.is_generated())
        .filter_map(|column| Some((column, matching_column(column, source)?)))
        .collect();

    if columns.is_empty() {
        return Err(Error::invalid_statement(format!(
            "`{}` and `{}` share no writable columns",
            source.name, target.name
        )));
    }

    let targets = Comma(columns.iter().map(|(target, _)| Ident(&target.name)));
    let sources = Comma(columns.iter().map(|(_, source)| Ident(&source.name)));

    fmt!(f, "INSERT INTO " Ident(&target.table) " (" targets ") SELECT " sources " FROM (" select ") AS " Alias::next());
    Ok(())
}
