//! Entity to table mapping.

mod column;
pub use column::Column;

mod entity;
pub use entity::{Entity, EntityBuilder};

mod mapping;
pub use mapping::{Mapping, ResolveTable, TableRef};

use crate::{expr::Value, Error, Result};
use indexmap::IndexMap;

/// An in-memory mapping registry.
#[derive(Debug, Default, Clone)]
pub struct Schema {
    entities: IndexMap<String, Entity>,
}

impl Schema {
    pub fn new() -> Schema {
        Schema::default()
    }

    /// Registers an entity, replacing any previous entity of the same name.
    pub fn add(&mut self, entity: Entity) -> &mut Schema {
        self.entities.insert(entity.name.clone(), entity);
        self
    }

    pub fn with(mut self, entity: Entity) -> Schema {
        self.add(entity);
        self
    }

    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Entity> + '_ {
        self.entities.values()
    }
}

impl Mapping for Schema {
    fn entity(&self, name: &str) -> Result<&Entity> {
        self.entities
            .get(name)
            .ok_or_else(|| Error::unknown_entity(name))
    }
}

impl ResolveTable for Schema {
    fn resolve_table(&self, value: &Value) -> Option<TableRef> {
        let Value::Queryable(name) = value else {
            return None;
        };

        let entity = self.entities.get(name)?;
        Some(TableRef {
            entity: entity.name.clone(),
            table: entity.table.clone(),
        })
    }
}
