use super::{insert, select, Formatter, ToSql};
use crate::ResultShape;

use sluice_core::{model::Statement, Result};

/// Renders `stmt`, returning how its result is read.
pub(super) fn to_sql(stmt: &Statement, f: &mut Formatter<'_>) -> Result<ResultShape> {
    match stmt {
        Statement::Select(select) => select::statement(f, select),
        Statement::Insert(stmt) => insert::statement(f, stmt),
        Statement::Update(stmt) => {
            fmt!(f, stmt);
            Ok(ResultShape::None)
        }
        Statement::Delete(stmt) => {
            fmt!(f, stmt);
            Ok(ResultShape::None)
        }
        Statement::Sync(stmt) => {
            let stmt = &**stmt;
            fmt!(f, stmt);
            Ok(ResultShape::None)
        }
    }
}
