use super::{Select, Table};
use crate::expr::Value;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Entity whose table receives the rows
    pub entity: String,

    pub source: InsertSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// One row, keyed by property name or dynamic key
    Values(IndexMap<String, Value>),

    /// Every row a select returns
    Select(Box<Select>),
}

impl Insert {
    pub fn values(entity: impl Into<String>, values: IndexMap<String, Value>) -> Insert {
        Insert {
            entity: entity.into(),
            source: InsertSource::Values(values),
        }
    }

    /// Copies the rows of `select` into `target`.
    pub fn copy(select: Select, target: &Table) -> Insert {
        Insert {
            entity: target.entity.clone(),
            source: InsertSource::Select(Box::new(select)),
        }
    }
}
