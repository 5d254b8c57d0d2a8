use super::{OrderBy, Projection};

/// Keeps one row per distinct `key`.
///
/// The kept row is the first one by `order`, or by the entity key when no
/// order is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Distinct {
    pub key: Projection,
    pub order: Option<OrderBy>,
}
