use super::{filter::FilterClause, Formatter, Ident, Scope, ToSql};

use sluice_core::{model::Delete, Result};

impl ToSql for &Delete {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let entity = f.entity(&self.entity)?;
        let top = if self.allow_multiple { "" } else { "TOP (1) " };

        let scope = Scope {
            alias: None,
            entity,
        };

        f.scoped(scope, |f| {
            fmt!(f, "DELETE " top "FROM " Ident(&entity.table) FilterClause(entity, self.filter.as_ref()));
            Ok(())
        })
    }
}
