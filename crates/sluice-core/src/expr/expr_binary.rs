use super::{BinaryOp, Expr, Type};

/// A binary operation between two expressions.
///
/// # Examples
///
/// ```text
/// x.Age == 33        // Equal
/// x.Age + 1          // Add
/// a && b             // AndAlso
/// x.Nickname ?? ""   // Coalesce
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinary {
    /// The left-hand side expression.
    pub lhs: Box<Expr>,

    /// The operator to apply.
    pub op: BinaryOp,

    /// The right-hand side expression.
    pub rhs: Box<Expr>,
}

impl ExprBinary {
    pub fn ty(&self) -> Type {
        if self.op.is_comparison() || self.op.is_logical() {
            Type::Bool
        } else if self.op.is_coalesce() {
            self.rhs.ty()
        } else {
            self.lhs.ty()
        }
    }
}

#[allow(clippy::should_implement_trait)]
impl Expr {
    pub fn binary(lhs: impl Into<Self>, op: BinaryOp, rhs: impl Into<Self>) -> Self {
        ExprBinary {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn eq(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::Equal, rhs)
    }

    pub fn ne(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::NotEqual, rhs)
    }

    pub fn lt(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::LessThan, rhs)
    }

    pub fn le(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::LessThanOrEqual, rhs)
    }

    pub fn gt(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::GreaterThan, rhs)
    }

    pub fn ge(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::GreaterThanOrEqual, rhs)
    }

    /// Short-circuiting and (`&&`)
    pub fn and(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::AndAlso, rhs)
    }

    /// Short-circuiting or (`||`)
    pub fn or(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::OrElse, rhs)
    }

    pub fn add(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::Add, rhs)
    }

    pub fn sub(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::Subtract, rhs)
    }

    pub fn mul(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::Multiply, rhs)
    }

    pub fn div(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::Divide, rhs)
    }

    pub fn rem(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::Modulo, rhs)
    }

    pub fn coalesce(self, rhs: impl Into<Self>) -> Self {
        Expr::binary(self, BinaryOp::Coalesce, rhs)
    }
}

impl From<ExprBinary> for Expr {
    fn from(value: ExprBinary) -> Self {
        Self::Binary(value)
    }
}
