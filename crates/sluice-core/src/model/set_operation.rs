use super::Select;

/// A correlated existence check against another query.
///
/// `select` already carries the key equalities that tie its rows to the
/// outer select.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    pub kind: SetOperationKind,
    pub select: Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperationKind {
    /// `EXISTS`
    Intersect,

    /// `NOT EXISTS`
    Compliment,
}
