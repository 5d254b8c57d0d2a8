use super::{Expr, Type};

/// A node kind introduced by a client of the crate. Visitors only see its
/// operands; lowering rejects it unless a visitor overrides
/// `visit_extension`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprExtension {
    pub name: String,
    pub operands: Vec<Expr>,
    pub ty: Type,
}

impl From<ExprExtension> for Expr {
    fn from(value: ExprExtension) -> Self {
        Self::Extension(value)
    }
}
