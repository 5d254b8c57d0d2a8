use super::{Operator, Select};

/// Rows affected by an update or delete.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Rows matching a predicate
    Where(Operator),

    /// Rows whose key appears in a select
    Select(Box<Select>),
}

impl From<Operator> for Filter {
    fn from(value: Operator) -> Self {
        Filter::Where(value)
    }
}

impl From<Select> for Filter {
    fn from(value: Select) -> Self {
        Filter::Select(Box::new(value))
    }
}
