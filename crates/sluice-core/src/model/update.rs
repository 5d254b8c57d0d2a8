use super::Filter;
use crate::expr::Value;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub entity: String,

    /// New values, keyed by property name or dynamic key
    pub assignments: IndexMap<String, Value>,

    /// Rows to update. `None` updates every row.
    pub filter: Option<Filter>,
}

impl Update {
    pub fn new(entity: impl Into<String>, assignments: IndexMap<String, Value>) -> Update {
        Update {
            entity: entity.into(),
            assignments,
            filter: None,
        }
    }

    pub fn filter(mut self, filter: impl Into<Filter>) -> Update {
        self.filter = Some(filter.into());
        self
    }
}
