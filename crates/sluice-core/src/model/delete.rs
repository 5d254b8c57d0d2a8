use super::Filter;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub entity: String,

    /// Rows to delete. `None` deletes every row.
    pub filter: Option<Filter>,

    /// When `false`, at most one row is deleted
    pub allow_multiple: bool,
}

impl Delete {
    pub fn new(entity: impl Into<String>) -> Delete {
        Delete {
            entity: entity.into(),
            filter: None,
            allow_multiple: true,
        }
    }

    pub fn filter(mut self, filter: impl Into<Filter>) -> Delete {
        self.filter = Some(filter.into());
        self
    }

    pub fn single(mut self) -> Delete {
        self.allow_multiple = false;
        self
    }
}
