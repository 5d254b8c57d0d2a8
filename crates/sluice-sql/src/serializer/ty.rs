use super::{Formatter, ToSql};

use sluice_core::{expr::Type, Error, Result};

/// The SQL Server type values of a type are stored as.
pub(super) struct SqlType<'a>(pub(super) &'a Type);

impl ToSql for SqlType<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let name = match self.0.non_nullable() {
            Type::String => "nvarchar(MAX)",
            Type::I16 => "smallint",
            Type::I32 => "int",
            Type::I64 => "bigint",
            Type::Bool => "bit",
            Type::F32 => "real",
            Type::F64 => "float",
            Type::Uuid => "uniqueidentifier",
            Type::Bytes => "varbinary(MAX)",
            Type::Object => "sql_variant",
            ty => {
                return Err(Error::invalid_statement(format!(
                    "type {ty:?} has no SQL Server counterpart"
                )))
            }
        };

        fmt!(f, name);
        Ok(())
    }
}
