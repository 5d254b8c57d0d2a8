use super::{Formatter, ToSql};

use sluice_core::{model::Alias, Result};

/// A bracket-quoted identifier.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        f.dst.push('[');
        for c in self.0.as_ref().chars() {
            if c == ']' {
                f.dst.push(']');
            }
            f.dst.push(c);
        }
        f.dst.push(']');
        Ok(())
    }
}

/// Table aliases render as `[tN]`, numbered by first appearance.
impl ToSql for Alias {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let (n, _) = f.aliases.insert_full(self);
        fmt!(f, "[t" n "]");
        Ok(())
    }
}

/// A column of a named table or derived table, `[table].[column]`.
pub(super) struct Qualified<T, C>(pub(super) T, pub(super) C);

impl<T: AsRef<str>, C: AsRef<str>> ToSql for Qualified<T, C> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, Ident(self.0) "." Ident(self.1));
        Ok(())
    }
}
