use super::{Expr, Type, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnary {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

impl ExprUnary {
    pub fn ty(&self) -> Type {
        match &self.op {
            UnaryOp::Not => Type::Bool,
            UnaryOp::Convert(ty) => ty.clone(),
            UnaryOp::Negate | UnaryOp::Quote => self.operand.ty(),
        }
    }
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: impl Into<Self>) -> Self {
        ExprUnary {
            op,
            operand: Box::new(operand.into()),
        }
        .into()
    }

    pub fn not(operand: impl Into<Self>) -> Self {
        Expr::unary(UnaryOp::Not, operand)
    }

    pub fn negate(operand: impl Into<Self>) -> Self {
        Expr::unary(UnaryOp::Negate, operand)
    }

    pub fn quote(operand: impl Into<Self>) -> Self {
        Expr::unary(UnaryOp::Quote, operand)
    }

    pub fn convert(operand: impl Into<Self>, ty: Type) -> Self {
        Expr::unary(UnaryOp::Convert(ty), operand)
    }
}

impl From<ExprUnary> for Expr {
    fn from(value: ExprUnary) -> Self {
        Self::Unary(value)
    }
}
