use super::Entity;
use crate::{expr::Value, Result};

/// Looks up how an entity is stored.
pub trait Mapping {
    fn entity(&self, name: &str) -> Result<&Entity>;
}

/// Resolves a queryable value found in a query expression to the table that
/// backs it.
pub trait ResolveTable {
    /// Returns `None` when the value is not a mapped table. The value is then
    /// an ordinary constant.
    fn resolve_table(&self, value: &Value) -> Option<TableRef>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub entity: String,

    /// Table name in the database
    pub table: String,
}

impl<T: Mapping + ?Sized> Mapping for &T {
    fn entity(&self, name: &str) -> Result<&Entity> {
        (**self).entity(name)
    }
}

impl<T: ResolveTable + ?Sized> ResolveTable for &T {
    fn resolve_table(&self, value: &Value) -> Option<TableRef> {
        (**self).resolve_table(value)
    }
}
