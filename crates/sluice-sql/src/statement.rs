use crate::Params;

/// A rendered statement, ready to hand to a connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,

    /// Parameter values, in order of first use in `text`
    pub params: Params,

    pub result: ResultShape,
}

/// How the rows a statement returns are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// Nothing is read back
    None,

    /// A single value
    Scalar,

    /// Exactly one row
    Single,

    /// At most one row
    SingleOrNone,

    /// Any number of rows
    Multiple,
}

impl ResultShape {
    pub fn is_scalar(self) -> bool {
        matches!(self, ResultShape::Scalar)
    }

    /// Returns `true` when the statement returns rows.
    pub fn has_rows(self) -> bool {
        matches!(
            self,
            ResultShape::Single | ResultShape::SingleOrNone | ResultShape::Multiple
        )
    }
}
