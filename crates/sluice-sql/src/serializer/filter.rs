use super::{ident::Qualified, Comma, Delimited, Formatter, Ident, ToSql};

use sluice_core::{
    model::{Filter, Select},
    schema::Entity,
    Error, Result,
};

const SUB_QUERY: &str = "__SubQuery__";

/// The `WHERE` clause of an update or delete against the table of an
/// entity.
pub(super) struct FilterClause<'a>(pub(super) &'a Entity, pub(super) Option<&'a Filter>);

impl ToSql for FilterClause<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let FilterClause(entity, filter) = self;

        match filter {
            None => {}
            Some(Filter::Where(filter)) => fmt!(f, " WHERE " filter),
            Some(Filter::Select(select)) => {
                let select: &Select = select;

                // Rows are matched to the select on their key
                let keys = entity.key_columns();
                if keys.is_empty() {
                    return Err(Error::invalid_statement(format!(
                        "entity `{}` has no key to match rows of a select on",
                        entity.name
                    )));
                }

                let projected = Comma(keys.iter().map(|key| Qualified(SUB_QUERY, &key.name)));
                let matches = Delimited(
                    keys.iter().map(|key| {
                        (
                            Qualified(SUB_QUERY, &key.name),
                            (" = ", Qualified(&entity.table, &key.name)),
                        )
                    }),
                    " AND ",
                );

                fmt!(f, " WHERE EXISTS (SELECT " projected " FROM (" select ") AS " Ident(SUB_QUERY) " WHERE " matches ")");
            }
        }
        Ok(())
    }
}
