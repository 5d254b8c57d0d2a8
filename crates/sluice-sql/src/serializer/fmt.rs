use super::Formatter;

use sluice_core::Result;

macro_rules! fmt {
    ($f:expr, $( $fragments:expr )*) => {{
        $(
            $fragments.to_sql($f)?;
        )*
    }};
}

pub(super) trait ToSql {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()>;
}

impl ToSql for &str {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        f.dst.push_str(self);
        Ok(())
    }
}

impl ToSql for &String {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        self.as_str().to_sql(f)
    }
}

impl ToSql for u64 {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        f.dst.push_str(&self.to_string());
        Ok(())
    }
}

impl ToSql for usize {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        (self as u64).to_sql(f)
    }
}

impl<T: ToSql> ToSql for Option<T> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        if let Some(inner) = self {
            inner.to_sql(f)?;
        }
        Ok(())
    }
}

impl<T1: ToSql, T2: ToSql> ToSql for (T1, T2) {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(f, self.0 self.1);
        Ok(())
    }
}
