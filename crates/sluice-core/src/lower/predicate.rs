use super::LowerProjection;
use crate::{
    expr::{Expr, ExprBinary, ExprMember, ExprNewArray, ExprUnary, UnaryOp, Value},
    model::{Alias, Operand, Operator, OperatorKind, Projection},
    visit::{self, Context, Parent, Visit},
    Error, Result,
};

/// Lowers a boolean expression into an [`Operator`] tree.
///
/// Leaves go through [`LowerProjection`]. A leaf standing on its own as a
/// condition (at the root, as a lambda body or directly under `And`/`Or`) is
/// compared against `true`. The same leaf used as an operand of a comparison
/// stays a bare projection.
#[derive(Debug, Default)]
pub struct LowerPredicate {
    /// Table stamped on every produced field
    table: Option<Alias>,
}

impl LowerPredicate {
    pub fn new() -> LowerPredicate {
        LowerPredicate::default()
    }

    pub fn with_table(table: Option<Alias>) -> LowerPredicate {
        LowerPredicate { table }
    }

    pub fn lower(&mut self, expr: &Expr) -> Result<Operator> {
        match self.visit(expr, None)? {
            Some(Operand::Operator(operator)) => Ok(*operator),
            Some(Operand::Projection(projection)) => {
                Ok(Operator::equal(projection, Projection::constant(true)))
            }
            None => Err(Error::expression_not_supported(expr.kind_name())),
        }
    }

    fn operand<'a>(&mut self, expr: &'a Expr, parent: Parent<'a>) -> Result<Operand> {
        self.visit_expr(expr, Context::child(parent, None))?
            .ok_or_else(|| Error::expression_not_supported(expr.kind_name()))
    }

    fn leaf(&mut self, expr: &Expr, parent: Option<Parent<'_>>) -> Result<Option<Operand>> {
        let projection = LowerProjection::with_table(self.table).lower(expr)?;

        let condition = match parent {
            None => true,
            Some(parent) => parent.is_logical() || parent.is_lambda(),
        };

        Ok(Some(if condition {
            Operator::equal(projection, Projection::constant(true)).into()
        } else {
            projection.into()
        }))
    }
}

/// Nodes lowered as a single projection rather than as an operator.
fn is_leaf(expr: &Expr) -> bool {
    match expr {
        Expr::Binary(expr) => expr.op.is_coalesce(),
        Expr::Unary(expr) => matches!(expr.op, UnaryOp::Convert(_) | UnaryOp::Negate),
        Expr::Member(expr) => !(expr.member.name == "HasValue" && expr.target.is_some()),
        Expr::Call(_) | Expr::Constant(_) | Expr::Parameter(_) => true,
        Expr::Conditional(_)
        | Expr::Extension(_)
        | Expr::Lambda(_)
        | Expr::NewArray(_)
        | Expr::TypeIs(_) => false,
    }
}

impl Visit for LowerPredicate {
    type State = Option<Operand>;

    fn visit_expr<'a>(&mut self, i: &'a Expr, cx: Context<'a, Self::State>) -> Result<Self::State> {
        if i.is_evaluable() || is_leaf(i) {
            return self.leaf(i, cx.parent);
        }

        visit::visit_expr(self, i, cx)
    }

    fn visit_binary<'a>(
        &mut self,
        i: &'a ExprBinary,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        let Some(op) = OperatorKind::from_binary(i.op) else {
            return Err(Error::operator_not_supported(i.op.name()));
        };

        let parent = Parent::Binary(i);
        let lhs = self.operand(&i.lhs, parent)?;
        let rhs = self.operand(&i.rhs, parent)?;

        Ok(Some(Operator::new(op, lhs, rhs).into()))
    }

    fn visit_member<'a>(
        &mut self,
        i: &'a ExprMember,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        // `x.HasValue` becomes `x <> NULL`
        let Some(target) = i.target() else {
            return Err(Error::expression_not_supported("Member"));
        };

        let value = LowerProjection::with_table(self.table).lower(target)?;
        let null = Projection::constant(Value::Null);
        Ok(Some(
            Operator::new(OperatorKind::NotEqual, value, null).into(),
        ))
    }

    fn visit_new_array<'a>(
        &mut self,
        _i: &'a ExprNewArray,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        Err(Error::expression_not_supported("NewArray"))
    }

    fn visit_unary<'a>(
        &mut self,
        i: &'a ExprUnary,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        match &i.op {
            UnaryOp::Quote => self.visit_expr(&i.operand, cx),
            // `!x` becomes `x = false`
            UnaryOp::Not => {
                let operand = self.operand(&i.operand, Parent::Unary(i))?;
                Ok(Some(
                    Operator::equal(operand, Projection::constant(false)).into(),
                ))
            }
            op => Err(Error::operator_not_supported(op.name())),
        }
    }
}
