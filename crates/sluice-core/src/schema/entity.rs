use super::Column;
use crate::{Error, Result};

/// How one entity maps onto a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,

    /// Name of the table in the database
    pub table: String,

    pub columns: Vec<Column>,
}

#[derive(Debug)]
pub struct EntityBuilder {
    entity: Entity,
}

impl Entity {
    /// Starts an entity stored in the table of the same name.
    pub fn builder(name: impl Into<String>) -> EntityBuilder {
        let name = name.into();
        EntityBuilder {
            entity: Entity {
                table: name.clone(),
                name,
                columns: vec![],
            },
        }
    }

    pub fn column_for_property(&self, property: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.property.as_deref() == Some(property))
    }

    /// Dynamic keys are matched ignoring case.
    pub fn column_for_key(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|column| {
            column
                .key
                .as_deref()
                .is_some_and(|k| k.eq_ignore_ascii_case(key))
        })
    }

    /// Resolves a field to its column.
    pub fn resolve(&self, property: &str, key: Option<&str>) -> Result<&Column> {
        let column = match key {
            Some(key) => self.column_for_key(key),
            None => self.column_for_property(property),
        };

        column.ok_or_else(|| Error::unknown_column(&self.name, key.unwrap_or(property)))
    }

    /// Resolves an assignment target: a property name, or failing that a
    /// dynamic key. An exact property match wins, otherwise case is ignored.
    pub fn resolve_name(&self, name: &str) -> Result<&Column> {
        self.column_for_property(name)
            .or_else(|| {
                self.columns.iter().find(|column| {
                    column
                        .property
                        .as_deref()
                        .is_some_and(|p| p.eq_ignore_ascii_case(name))
                })
            })
            .or_else(|| self.column_for_key(name))
            .ok_or_else(|| Error::unknown_column(&self.name, name))
    }

    pub fn identity(&self) -> Option<&Column> {
        self.columns.iter().find(|column| column.identity)
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// Columns identifying a row: the primary key, or the identity column if
    /// no primary key is mapped.
    pub fn key_columns(&self) -> Vec<&Column> {
        let primary_key: Vec<_> = self.primary_key_columns().collect();
        if !primary_key.is_empty() {
            return primary_key;
        }
        self.identity().into_iter().collect()
    }

    /// Columns a sync may write: every column except key, identity and
    /// computed ones.
    pub fn sync_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns
            .iter()
            .filter(|column| !column.primary_key && !column.is_generated())
    }
}

impl EntityBuilder {
    pub fn table(mut self, table: impl Into<String>) -> EntityBuilder {
        self.entity.table = table.into();
        self
    }

    pub fn column(mut self, column: Column) -> EntityBuilder {
        self.entity.columns.push(column);
        self
    }

    pub fn build(self) -> Entity {
        self.entity
    }
}
