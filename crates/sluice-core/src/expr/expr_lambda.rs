use super::{Expr, ExprParameter};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprLambda {
    pub params: Vec<ExprParameter>,
    pub body: Box<Expr>,
}

impl Expr {
    pub fn lambda(params: Vec<ExprParameter>, body: impl Into<Self>) -> Self {
        ExprLambda {
            params,
            body: Box::new(body.into()),
        }
        .into()
    }
}

impl From<ExprLambda> for Expr {
    fn from(value: ExprLambda) -> Self {
        Self::Lambda(value)
    }
}
