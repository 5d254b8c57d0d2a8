use super::{ty::SqlType, Formatter, ToSql};

use sluice_core::{model::Function, Result};

/// Indices arrive 0-based and are shifted to the 1-based positions SQL
/// Server's string functions take.
impl ToSql for &Function {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        use Function::*;

        match self {
            StartsWith { text, value } => fmt!(f, text " LIKE " value " + '%'"),
            Contains { text, value } => fmt!(f, text " LIKE '%' + " value " + '%'"),
            EndsWith { text, value } => fmt!(f, text " LIKE '%' + " value),
            ToUpper(text) => fmt!(f, "UPPER(" text ")"),
            ToLower(text) => fmt!(f, "LOWER(" text ")"),
            Trim(text) => fmt!(f, "LTRIM(RTRIM(" text "))"),
            TrimStart(text) => fmt!(f, "LTRIM(" text ")"),
            TrimEnd(text) => fmt!(f, "RTRIM(" text ")"),
            ToString(value) => fmt!(f, "CAST(" value " AS nvarchar(MAX))"),
            Substring { text, start } => {
                fmt!(f, "RIGHT(" text ", LEN(" text ") - " start ")")
            }
            SubstringLength {
                text,
                start,
                length,
            } => fmt!(f, "SUBSTRING(" text ", " start " + 1, " length ")"),
            Replace { text, old, new } => fmt!(f, "REPLACE(" text ", " old ", " new ")"),
            Insert { text, index, value } => {
                fmt!(f, "STUFF(" text ", " index " + 1, 0, " value ")")
            }
            IndexOf { text, value } => fmt!(f, "(CHARINDEX(" value ", " text ") - 1)"),
            IndexOfFrom { text, value, start } => {
                fmt!(f, "(CHARINDEX(" value ", " text ", " start " + 1) - 1)")
            }
            Hash { value, algorithm } => {
                fmt!(f, "HASHBYTES('" algorithm.name() "', " value ")")
            }
            ToHex(value) => fmt!(f, "CONVERT(nvarchar(MAX), " value ", 1)"),
            Length(text) => fmt!(f, "LEN(" text ")"),
            Coalesce { first, second } => fmt!(f, "COALESCE(" first ", " second ")"),
            Convert { value, ty } => fmt!(f, "CAST(" value " AS " SqlType(ty) ")"),
        }
        Ok(())
    }
}
