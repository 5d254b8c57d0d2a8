use super::{Formatter, ToSql};

use sluice_core::{model::Alias, Result};

/// Names a computed value of a select list, `[cN]`.
#[derive(Debug)]
pub(super) struct ColumnAlias(pub(super) Alias);

impl ToSql for ColumnAlias {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let (n, _) = f.columns.insert_full(self.0);
        fmt!(f, "[c" n "]");
        Ok(())
    }
}
