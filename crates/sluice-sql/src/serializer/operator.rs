use super::{Formatter, ToSql};

use sluice_core::{
    model::{Field, Operand, Operator, OperatorKind, Projection},
    Result,
};

/// An operand where a value is expected. Predicates become `CASE`
/// expressions because the dialect has no boolean scalar.
pub(super) struct Scalar<'a>(pub(super) &'a Operand);

/// An operand where a condition is expected. Plain values compare against
/// `1`.
pub(super) struct Condition<'a>(pub(super) &'a Operand);

impl ToSql for &Operator {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let Operator { op, lhs, rhs } = self;
        let op = *op;

        if op.is_logical() {
            fmt!(f, "(" Condition(lhs) " " op " " Condition(rhs) ")");
            return Ok(());
        }

        if matches!(op, OperatorKind::Equal | OperatorKind::NotEqual) {
            if let Some(operand) = null_comparison(lhs, rhs) {
                let check = match op {
                    OperatorKind::Equal => " IS NULL)",
                    _ => " IS NOT NULL)",
                };
                fmt!(f, "(" Scalar(operand) check);
                return Ok(());
            }
        }

        if op == OperatorKind::NotEqual && f.null_fallback {
            if let Some(field) = field_of(lhs).or_else(|| field_of(rhs)) {
                fmt!(f, "((" Scalar(lhs) " <> " Scalar(rhs) ") OR " field " IS NULL)");
                return Ok(());
            }
        }

        fmt!(f, "(" Scalar(lhs) " " op " " Scalar(rhs) ")");
        Ok(())
    }
}

impl ToSql for OperatorKind {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        fmt!(
            f,
            match self {
                OperatorKind::And => "AND",
                OperatorKind::Or => "OR",
                OperatorKind::Equal => "=",
                OperatorKind::NotEqual => "<>",
                OperatorKind::LessThan => "<",
                OperatorKind::LessThanOrEqual => "<=",
                OperatorKind::GreaterThan => ">",
                OperatorKind::GreaterThanOrEqual => ">=",
                OperatorKind::Add => "+",
                OperatorKind::Subtract => "-",
                OperatorKind::Multiply => "*",
                OperatorKind::Divide => "/",
                OperatorKind::Modulo => "%",
            }
        );
        Ok(())
    }
}

impl ToSql for Scalar<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self.0 {
            Operand::Operator(operator) => {
                let operator = &**operator;

                if operator.op.is_predicate() {
                    fmt!(f, "CASE WHEN " operator " THEN 1 ELSE 0 END");
                } else {
                    fmt!(f, operator);
                }
            }
            Operand::Projection(projection) => fmt!(f, projection),
        }
        Ok(())
    }
}

impl ToSql for Condition<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self.0 {
            Operand::Operator(operator) if operator.op.is_predicate() => {
                let operator = &**operator;
                fmt!(f, operator);
            }
            Operand::Projection(Projection::Function(function)) if function.is_predicate() => {
                let function = &**function;
                fmt!(f, function);
            }
            operand => fmt!(f, "(" Scalar(operand) " = 1)"),
        }
        Ok(())
    }
}

/// The side compared against a NULL constant, if any.
fn null_comparison<'a>(lhs: &'a Operand, rhs: &'a Operand) -> Option<&'a Operand> {
    let is_null = |operand: &Operand| {
        operand
            .as_projection()
            .is_some_and(Projection::is_null_constant)
    };

    if is_null(rhs) {
        Some(lhs)
    } else if is_null(lhs) {
        Some(rhs)
    } else {
        None
    }
}

fn field_of(operand: &Operand) -> Option<&Field> {
    operand.as_projection()?.as_field()
}
