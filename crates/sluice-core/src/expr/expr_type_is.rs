use super::{Expr, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprTypeIs {
    pub expr: Box<Expr>,
    pub ty: Type,
}

impl Expr {
    pub fn type_is(expr: impl Into<Self>, ty: Type) -> Self {
        ExprTypeIs {
            expr: Box::new(expr.into()),
            ty,
        }
        .into()
    }
}

impl From<ExprTypeIs> for Expr {
    fn from(value: ExprTypeIs) -> Self {
        Self::TypeIs(value)
    }
}
