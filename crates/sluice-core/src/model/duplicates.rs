use super::{OrderBy, Projection};

/// Keeps every row of a group sharing `key` except the first.
///
/// `order` decides which row of a group counts as the first. It holds at
/// most two entries; without any the entity key is used.
#[derive(Debug, Clone, PartialEq)]
pub struct Duplicates {
    pub key: Projection,
    pub order: Vec<OrderBy>,
}
