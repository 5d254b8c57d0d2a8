use super::{Formatter, ToSql};

use indexmap::IndexMap;
use sluice_core::{expr::Value, Result};

/// Named statement parameters, in the order they appear in the text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Params {
    values: IndexMap<String, Value>,
}

impl Params {
    pub fn new() -> Params {
        Params::default()
    }

    /// Adds a value under the next generated name and returns the name.
    pub(super) fn push(&mut self, prefix: &str, value: Value) -> String {
        let name = format!("{prefix}{}", self.values.len());
        self.values.insert(name.clone(), value);
        name
    }

    /// Looks a parameter up by name, ignoring case and an optional leading
    /// `@`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let name = name.strip_prefix('@').unwrap_or(name);
        self.values
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.values.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Every literal renders as a parameter placeholder.
impl ToSql for &Value {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let name = f.push_param(self.clone());
        fmt!(f, "@" name.as_str());
        Ok(())
    }
}
