use super::{
    matching_column, select::where_clause, Comma, Formatter, Ident, Scope, ToSql,
};

use sluice_core::{
    model::{Alias, Data, Projection, Select, Sync, SyncMode, Table},
    schema::{Column, Entity},
    Error, Result,
};

/// One `SET` item, copying a source column into a target column.
struct SetColumn<'a> {
    target: Alias,
    target_column: &'a Column,
    source: Alias,
    source_column: &'a Column,
}

impl ToSql for &Sync {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let target_entity = f.entity_of(&self.target)?;
        let source_entity = f.entity_of(&self.source)?;

        let target = match &self.target.data {
            Some(Data::Table(table)) if is_filtered_table(&self.target) => table,
            _ => {
                return Err(Error::invalid_statement(
                    "sync target must be a filtered table",
                ))
            }
        };

        // A plain source table is joined directly, anything else as a derived
        // table.
        let (source, source_table) = match &self.source.data {
            Some(Data::Table(table)) if is_filtered_table(&self.source) => {
                (table.alias, Some(table))
            }
            _ => (Alias::next(), None),
        };

        let copies: Vec<_> = columns(self, target_entity, source_entity)?
            .into_iter()
            .map(|(target_column, source_column)| SetColumn {
                target: target.alias,
                target_column,
                source,
                source_column,
            })
            .collect();

        let target_scope = Scope {
            alias: Some(target.alias),
            entity: target_entity,
        };
        let source_scope = Scope {
            alias: Some(source),
            entity: source_entity,
        };

        fmt!(f, "UPDATE " target.alias " SET " Comma(copies) " FROM " target " INNER JOIN ");

        match source_table {
            Some(table) => fmt!(f, table),
            None => {
                let select = &self.source;
                fmt!(f, "(" select ") AS " source);
            }
        }

        let qualify = std::mem::replace(&mut f.qualify, true);
        let ret = join(f, self, target_scope, source_scope, source_table);
        f.qualify = qualify;
        ret
    }
}

/// Renders the join condition and the target filter.
fn join<'a>(
    f: &mut Formatter<'a>,
    sync: &Sync,
    target: Scope<'a>,
    source: Scope<'a>,
    source_table: Option<&Table>,
) -> Result<()> {
    fmt!(f, " ON ");
    f.scoped(target, |f| {
        let key = &sync.target_key;
        fmt!(f, key " = ");
        Ok(())
    })?;
    f.scoped(source, |f| {
        let key = &sync.source_key;
        fmt!(f, key);

        // A derived source already applied its own filter
        if let (Some(_), Some(filter)) = (source_table, &sync.source.filter) {
            fmt!(f, " AND " filter);
        }
        Ok(())
    })?;

    // Rows whose target value is NULL still differ from a non-NULL source
    let null_fallback = std::mem::replace(&mut f.null_fallback, true);
    let ret = f.scoped(target, |f| where_clause(f, &sync.target));
    f.null_fallback = null_fallback;
    ret
}

/// A select reading one table, optionally filtered.
fn is_filtered_table(select: &Select) -> bool {
    matches!(select.data, Some(Data::Table(_)))
        && select.top.is_none()
        && select.fetch.is_none()
        && !select.has_layers()
        && !select.randomize
        && select.projection.is_empty()
        && select.order_by.is_empty()
}

/// The target columns a sync writes, each with the source column it reads.
/// Key, join key and generated columns are skipped.
fn columns<'a>(
    sync: &Sync,
    target: &'a Entity,
    source: &'a Entity,
) -> Result<Vec<(&'a Column, &'a Column)>> {
    let listed = sync
        .fields
        .iter()
        .map(|field| match field {
            Projection::Field(field) => target.resolve(&field.name, field.key.as_deref()),
            _ => Err(Error::invalid_statement(
                "sync fields must be properties or dynamic keys",
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    let selected: Vec<&Column> = match sync.mode {
        SyncMode::Include => listed,
        SyncMode::Exclude => target
            .sync_columns()
            .filter(|column| !listed.contains(column))
            .collect(),
    };

    // Rows are matched on the key, so it is never rewritten
    let key = match &sync.target_key {
        Projection::Field(field) => Some(target.resolve(&field.name, field.key.as_deref())?),
        _ => None,
    };

    let mut columns = vec![];
    for column in selected {
        if column.primary_key || column.is_generated() || key == Some(column) {
            continue;
        }

        let matched = matching_column(column, source).ok_or_else(|| {
            let name = column
                .property
                .as_deref()
                .or(column.key.as_deref())
                .unwrap_or(&column.name);
            Error::unknown_column(&source.name, name)
        })?;
        columns.push((column, matched));
    }

    if columns.is_empty() {
        return Err(Error::invalid_statement(format!(
            "sync of `{}` writes no columns",
            target.name
        )));
    }

    Ok(columns)
}

impl ToSql for SetColumn<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, self.target "." Ident(&self.target_column.name) " = " self.source "." Ident(&self.source_column.name));
        Ok(())
    }
}
