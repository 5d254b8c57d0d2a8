use super::{ColumnAlias, Comma, Formatter, Ident, ToSql};

use sluice_core::{
    model::{Alias, Field, Projection},
    Result,
};

/// A projection where a value is expected.
impl ToSql for &Projection {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            Projection::Field(field) => field.to_sql(f)?,
            Projection::Constant(constant) => constant.value.to_sql(f)?,
            Projection::Function(function) => {
                let function = &**function;

                if function.is_predicate() {
                    fmt!(f, "CASE WHEN " function " THEN 1 ELSE 0 END");
                } else {
                    function.to_sql(f)?;
                }
            }
            Projection::Wildcard => fmt!(f, "*"),
        }
        Ok(())
    }
}

impl ToSql for &Field {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let (scope, column) = f.column(self)?;

        let qualifier = match self.table {
            Some(_) => scope.alias,
            None if f.qualify => scope.alias,
            None => None,
        };

        fmt!(f, qualifier.map(|alias| (alias, ".")) Ident(&column.name));
        Ok(())
    }
}

/// The select list of a select. Empty selects every column.
pub(super) struct SelectList<'a>(pub(super) &'a [Projection]);

struct SelectItem<'a>(&'a Projection);

impl ToSql for SelectList<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        if self.0.is_empty() {
            fmt!(f, "*");
        } else {
            fmt!(f, Comma(self.0.iter().map(SelectItem)));
        }
        Ok(())
    }
}

impl ToSql for SelectItem<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let projection = self.0;

        // Computed values need a name to be read from a derived table
        match projection {
            Projection::Constant(constant) => {
                fmt!(f, projection " AS " ColumnAlias(constant.alias));
            }
            Projection::Function(_) => {
                fmt!(f, projection " AS " ColumnAlias(Alias::next()));
            }
            Projection::Field(_) | Projection::Wildcard => fmt!(f, projection),
        }
        Ok(())
    }
}
