use super::{Expr, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNewArray {
    /// Element type
    pub ty: Type,
    pub items: Vec<Expr>,
}

impl Expr {
    pub fn new_array(ty: Type, items: Vec<Expr>) -> Self {
        ExprNewArray { ty, items }.into()
    }
}

impl From<ExprNewArray> for Expr {
    fn from(value: ExprNewArray) -> Self {
        Self::NewArray(value)
    }
}
