use super::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprConditional {
    pub test: Box<Expr>,
    pub if_true: Box<Expr>,
    pub if_false: Box<Expr>,
}

impl Expr {
    pub fn conditional(
        test: impl Into<Self>,
        if_true: impl Into<Self>,
        if_false: impl Into<Self>,
    ) -> Self {
        ExprConditional {
            test: Box::new(test.into()),
            if_true: Box::new(if_true.into()),
            if_false: Box::new(if_false.into()),
        }
        .into()
    }
}

impl From<ExprConditional> for Expr {
    fn from(value: ExprConditional) -> Self {
        Self::Conditional(value)
    }
}
