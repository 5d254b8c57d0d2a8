use super::{Projection, Select, SyncMode};

/// Updates target rows from the source rows they match on the key.
#[derive(Debug, Clone, PartialEq)]
pub struct Sync {
    /// Rows values are copied from
    pub source: Select,

    /// Rows that are updated
    pub target: Select,

    pub source_key: Projection,
    pub target_key: Projection,

    /// Whether `fields` lists the columns to copy or the ones to skip
    pub mode: SyncMode,

    pub fields: Vec<Projection>,
}
