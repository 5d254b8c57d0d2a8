use super::{filter::FilterClause, Comma, Formatter, Ident, Scope, ToSql};

use sluice_core::{
    expr::Value,
    model::Update,
    schema::Column,
    Error, Result,
};

struct Assignment<'a>(&'a Column, &'a Value);

impl ToSql for &Update {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let entity = f.entity(&self.entity)?;

        let mut assignments = vec![];
        for (name, value) in &self.assignments {
            let column = entity.resolve_name(name)?;
            if column.is_generated() {
                return Err(Error::invalid_statement(format!(
                    "column `{}` is generated by the database",
                    column.name
                )));
            }
            f.check_length(column, value)?;
            assignments.push(Assignment(column, value));
        }

        if assignments.is_empty() {
            return Err(Error::invalid_statement("update assigns no columns"));
        }

        let scope = Scope {
            alias: None,
            entity,
        };

        f.scoped(scope, |f| {
            fmt!(f, "UPDATE " Ident(&entity.table) " SET " Comma(assignments) FilterClause(entity, self.filter.as_ref()));
            Ok(())
        })
    }
}

impl ToSql for Assignment<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, Ident(&self.0.name) " = " self.1);
        Ok(())
    }
}
