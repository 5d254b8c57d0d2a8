use super::Operand;
use crate::expr::BinaryOp;

/// A logical, comparison or arithmetic operation over two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub op: OperatorKind,
    pub lhs: Operand,
    pub rhs: Operand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    And,
    Or,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    pub fn new(op: OperatorKind, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Operator {
        Operator {
            op,
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    pub fn and(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Operator {
        Operator::new(OperatorKind::And, lhs, rhs)
    }

    pub fn equal(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Operator {
        Operator::new(OperatorKind::Equal, lhs, rhs)
    }

    /// Joins `operators` with `And`, left-deep. Returns `None` when empty.
    pub fn and_all(operators: impl IntoIterator<Item = Operator>) -> Option<Operator> {
        operators
            .into_iter()
            .reduce(|lhs, rhs| Operator::and(lhs, rhs))
    }
}

impl OperatorKind {
    /// Maps an expression operator. Operators without a SQL counterpart map
    /// to `None`.
    pub fn from_binary(op: BinaryOp) -> Option<OperatorKind> {
        Some(match op {
            BinaryOp::And | BinaryOp::AndAlso => OperatorKind::And,
            BinaryOp::Or | BinaryOp::OrElse => OperatorKind::Or,
            BinaryOp::Equal => OperatorKind::Equal,
            BinaryOp::NotEqual => OperatorKind::NotEqual,
            BinaryOp::LessThan => OperatorKind::LessThan,
            BinaryOp::LessThanOrEqual => OperatorKind::LessThanOrEqual,
            BinaryOp::GreaterThan => OperatorKind::GreaterThan,
            BinaryOp::GreaterThanOrEqual => OperatorKind::GreaterThanOrEqual,
            BinaryOp::Add => OperatorKind::Add,
            BinaryOp::Subtract => OperatorKind::Subtract,
            BinaryOp::Multiply => OperatorKind::Multiply,
            BinaryOp::Divide => OperatorKind::Divide,
            BinaryOp::Modulo => OperatorKind::Modulo,
            BinaryOp::Coalesce
            | BinaryOp::ExclusiveOr
            | BinaryOp::LeftShift
            | BinaryOp::RightShift => return None,
        })
    }

    pub fn is_logical(self) -> bool {
        matches!(self, OperatorKind::And | OperatorKind::Or)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            OperatorKind::Equal
                | OperatorKind::NotEqual
                | OperatorKind::LessThan
                | OperatorKind::LessThanOrEqual
                | OperatorKind::GreaterThan
                | OperatorKind::GreaterThanOrEqual
        )
    }

    /// Produces a boolean rather than a value.
    pub fn is_predicate(self) -> bool {
        self.is_logical() || self.is_comparison()
    }
}
