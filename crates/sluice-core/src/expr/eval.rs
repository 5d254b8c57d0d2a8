use super::{BinaryOp, Expr, ExprBinary, ExprCall, ExprMember, Type, UnaryOp, Value};
use crate::{Error, Result};
use std::cmp::Ordering;

impl Expr {
    /// Returns `true` when the expression can be folded into a constant:
    /// it references no lambda parameter and only contains nodes that
    /// [`Expr::eval_const`] understands.
    pub fn is_evaluable(&self) -> bool {
        match self {
            Expr::Constant(_) => true,
            Expr::Member(expr) => expr.target().is_some_and(Expr::is_evaluable),
            Expr::Binary(expr) => {
                is_foldable_op(expr.op) && expr.lhs.is_evaluable() && expr.rhs.is_evaluable()
            }
            Expr::Unary(expr) => expr.operand.is_evaluable(),
            Expr::Call(expr) => {
                is_foldable_call(expr)
                    && expr.target().is_some_and(Expr::is_evaluable)
                    && expr.args.iter().all(Expr::is_evaluable)
            }
            Expr::NewArray(expr) => expr.items.iter().all(Expr::is_evaluable),
            Expr::Conditional(_)
            | Expr::Extension(_)
            | Expr::Lambda(_)
            | Expr::Parameter(_)
            | Expr::TypeIs(_) => false,
        }
    }

    /// Evaluates a parameter-free expression to a value.
    pub fn eval_const(&self) -> Result<Value> {
        match self {
            Expr::Constant(expr) => Ok(expr.value.clone()),
            Expr::Member(expr) => eval_member(expr),
            Expr::Binary(expr) => eval_binary(expr),
            Expr::Unary(expr) => {
                let value = expr.operand.eval_const()?;
                match &expr.op {
                    UnaryOp::Quote => Ok(value),
                    UnaryOp::Not => match value {
                        Value::Bool(v) => Ok(Value::Bool(!v)),
                        Value::Null => Ok(Value::Null),
                        value => Err(Error::expression_evaluation_failed(format!(
                            "cannot negate non-boolean value {value:?}"
                        ))),
                    },
                    UnaryOp::Negate => negate(value),
                    UnaryOp::Convert(ty) => convert(value, ty),
                }
            }
            Expr::Call(expr) => eval_call(expr),
            Expr::NewArray(expr) => Ok(Value::List(
                expr.items
                    .iter()
                    .map(Expr::eval_const)
                    .collect::<Result<_>>()?,
            )),
            _ => Err(Error::expression_not_supported(self.kind_name())),
        }
    }
}

fn is_foldable_op(op: BinaryOp) -> bool {
    op.is_logical() || op.is_comparison() || op.is_arithmetic() || op.is_coalesce()
}

fn is_foldable_call(call: &ExprCall) -> bool {
    !call.method.is_static
        && call.args.is_empty()
        && matches!(
            call.method.name.as_str(),
            "ToUpper" | "ToLower" | "Trim" | "TrimStart" | "TrimEnd" | "ToString"
        )
}

fn eval_member(expr: &ExprMember) -> Result<Value> {
    let Some(target) = expr.target() else {
        return Err(Error::expression_evaluation_failed(format!(
            "static member `{}` has no value",
            expr.member.name
        )));
    };

    let target = target.eval_const()?;
    let name = expr.member.name.as_str();

    match (target, name) {
        (Value::Record(record), _) => record.get(name).cloned().ok_or_else(|| {
            Error::expression_evaluation_failed(format!("captured variable `{name}` not found"))
        }),
        (Value::String(text), "Length") => Ok(Value::I32(text.chars().count() as i32)),
        (value, "HasValue") => Ok(Value::Bool(!value.is_null())),
        (Value::Null, "Value") => Err(Error::expression_evaluation_failed(
            "nullable value has no value",
        )),
        (value, "Value") => Ok(value),
        (value, _) => Err(Error::expression_evaluation_failed(format!(
            "value {value:?} has no member `{name}`"
        ))),
    }
}

fn eval_call(call: &ExprCall) -> Result<Value> {
    let Some(target) = call.target() else {
        return Err(Error::expression_not_supported("Call"));
    };

    let value = target.eval_const()?;

    if call.method.name == "ToString" {
        return Ok(match value {
            Value::Null => Value::Null,
            Value::String(v) => Value::String(v),
            Value::Bool(v) => Value::String(if v { "True" } else { "False" }.into()),
            Value::I16(v) => Value::String(v.to_string()),
            Value::I32(v) => Value::String(v.to_string()),
            Value::I64(v) => Value::String(v.to_string()),
            Value::F32(v) => Value::String(v.to_string()),
            Value::F64(v) => Value::String(v.to_string()),
            Value::Uuid(v) => Value::String(v.to_string()),
            Value::Enum(v) => Value::String(v.variant),
            value => {
                return Err(Error::expression_evaluation_failed(format!(
                    "cannot convert {value:?} to a string"
                )))
            }
        });
    }

    let Value::String(text) = value else {
        return Err(Error::expression_evaluation_failed(format!(
            "`{}` requires a string target",
            call.method.name
        )));
    };

    let text = match call.method.name.as_str() {
        "ToUpper" => text.to_uppercase(),
        "ToLower" => text.to_lowercase(),
        "Trim" => text.trim().to_string(),
        "TrimStart" => text.trim_start().to_string(),
        "TrimEnd" => text.trim_end().to_string(),
        _ => return Err(Error::expression_not_supported("Call")),
    };

    Ok(Value::String(text))
}

fn eval_binary(expr: &ExprBinary) -> Result<Value> {
    let lhs = expr.lhs.eval_const()?;

    // Short-circuit before evaluating the right-hand side
    match (expr.op, &lhs) {
        (BinaryOp::AndAlso, Value::Bool(false)) => return Ok(Value::Bool(false)),
        (BinaryOp::OrElse, Value::Bool(true)) => return Ok(Value::Bool(true)),
        (BinaryOp::Coalesce, value) if !value.is_null() => return Ok(lhs),
        _ => {}
    }

    let rhs = expr.rhs.eval_const()?;

    match expr.op {
        BinaryOp::Coalesce => Ok(rhs),
        op if op.is_logical() => match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
                BinaryOp::And | BinaryOp::AndAlso => a && b,
                _ => a || b,
            })),
            (lhs, rhs) => Err(Error::expression_evaluation_failed(format!(
                "`{op}` requires boolean operands, got {lhs:?} and {rhs:?}"
            ))),
        },
        op if op.is_comparison() => compare(op, &lhs, &rhs).map(Value::Bool),
        op if op.is_arithmetic() => arithmetic(op, lhs, rhs),
        op => Err(Error::operator_not_supported(op.name())),
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<bool> {
    let ordering = match (lhs, rhs) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) | (_, Value::Null) => None,
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (a, b) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => match op {
                    BinaryOp::Equal => return Ok(a == b),
                    BinaryOp::NotEqual => return Ok(a != b),
                    op => {
                        return Err(Error::expression_evaluation_failed(format!(
                            "`{op}` cannot order {a:?} and {b:?}"
                        )))
                    }
                },
            },
        },
    };

    Ok(match (op, ordering) {
        (BinaryOp::Equal, ordering) => ordering == Some(Ordering::Equal),
        (BinaryOp::NotEqual, ordering) => ordering != Some(Ordering::Equal),
        (_, None) => false,
        (BinaryOp::LessThan, Some(ordering)) => ordering.is_lt(),
        (BinaryOp::LessThanOrEqual, Some(ordering)) => ordering.is_le(),
        (BinaryOp::GreaterThan, Some(ordering)) => ordering.is_gt(),
        (BinaryOp::GreaterThanOrEqual, Some(ordering)) => ordering.is_ge(),
        (op, _) => return Err(Error::operator_not_supported(op.name())),
    })
}

/// Rank of an integer value; results take the widest rank of the operands.
fn int_rank(value: &Value) -> u8 {
    match value {
        Value::I16(_) => 0,
        Value::I32(_) => 1,
        _ => 2,
    }
}

fn arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value> {
    if lhs.is_null() || rhs.is_null() {
        return Ok(Value::Null);
    }

    if let (BinaryOp::Add, Value::String(a), Value::String(b)) = (op, &lhs, &rhs) {
        return Ok(Value::String(format!("{a}{b}")));
    }

    if let (Some(a), Some(b)) = (lhs.as_i64(), rhs.as_i64()) {
        let result = match op {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Subtract => a.checked_sub(b),
            BinaryOp::Multiply => a.checked_mul(b),
            BinaryOp::Divide => a.checked_div(b),
            BinaryOp::Modulo => a.checked_rem(b),
            op => return Err(Error::operator_not_supported(op.name())),
        }
        .ok_or_else(|| {
            Error::expression_evaluation_failed(format!("integer overflow evaluating `{a} {op} {b}`"))
        })?;

        let ty = match int_rank(&lhs).max(int_rank(&rhs)) {
            0 => Type::I16,
            1 => Type::I32,
            _ => Type::I64,
        };
        return convert(Value::I64(result), &ty);
    }

    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => {
            let result = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Subtract => a - b,
                BinaryOp::Multiply => a * b,
                BinaryOp::Divide => a / b,
                BinaryOp::Modulo => a % b,
                op => return Err(Error::operator_not_supported(op.name())),
            };

            if matches!((&lhs, &rhs), (Value::F32(_), Value::F32(_))) {
                Ok(Value::F32(result as f32))
            } else {
                Ok(Value::F64(result))
            }
        }
        _ => Err(Error::expression_evaluation_failed(format!(
            "`{op}` requires numeric operands, got {lhs:?} and {rhs:?}"
        ))),
    }
}

fn negate(value: Value) -> Result<Value> {
    let overflow = |value: &dyn core::fmt::Debug| {
        Error::expression_evaluation_failed(format!("negating {value:?} overflows"))
    };

    Ok(match value {
        Value::Null => Value::Null,
        Value::I16(v) => Value::I16(v.checked_neg().ok_or_else(|| overflow(&v))?),
        Value::I32(v) => Value::I32(v.checked_neg().ok_or_else(|| overflow(&v))?),
        Value::I64(v) => Value::I64(v.checked_neg().ok_or_else(|| overflow(&v))?),
        Value::F32(v) => Value::F32(-v),
        Value::F64(v) => Value::F64(-v),
        value => {
            return Err(Error::expression_evaluation_failed(format!(
                "cannot negate {value:?}"
            )))
        }
    })
}

/// Converts a value to the given type, following numeric conversions.
fn convert(value: Value, ty: &Type) -> Result<Value> {
    let out_of_range =
        |value: i64| Error::expression_evaluation_failed(format!("{value} is out of range for {ty:?}"));

    match (value, ty) {
        (value, Type::Object) => Ok(value),
        (Value::Null, Type::Nullable(_)) => Ok(Value::Null),
        (value, Type::Nullable(ty)) => convert(value, ty),
        (Value::F32(v), Type::F64) => Ok(Value::F64(v.into())),
        (Value::F64(v), Type::F32) => Ok(Value::F32(v as f32)),
        (value, Type::F64) if value.as_f64().is_some() && !matches!(value, Value::F32(_)) => {
            Ok(Value::F64(value.as_f64().unwrap_or_default()))
        }
        (value, Type::F32) if value.as_i64().is_some() => {
            Ok(Value::F32(value.as_i64().unwrap_or_default() as f32))
        }
        (value, Type::I16 | Type::I32 | Type::I64) if value.as_f64().is_some() => {
            let v = match value.as_i64() {
                Some(v) => v,
                None => value.as_f64().unwrap_or_default().trunc() as i64,
            };
            match ty {
                Type::I16 => i16::try_from(v).map(Value::I16).map_err(|_| out_of_range(v)),
                Type::I32 => i32::try_from(v).map(Value::I32).map_err(|_| out_of_range(v)),
                _ => Ok(Value::I64(v)),
            }
        }
        (value, ty) if value.infer_ty() == *ty => Ok(value),
        (value, ty) => Err(Error::expression_evaluation_failed(format!(
            "cannot convert {value:?} to {ty:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_variables_fold() {
        let closure = Expr::constant(Value::record([("limit", Value::I32(10))]));
        let expr = closure.field("limit", Type::I32).add(5);
        assert_eq!(expr.eval_const().unwrap(), Value::I32(15));
    }

    #[test]
    fn record_fields_read_through_value() {
        let record = Value::record([("name", Value::from("Ann"))]);
        assert_eq!(record.get("name"), Some(&Value::from("Ann")));
        assert_eq!(record.get("age"), None);
        assert_eq!(Value::I32(1).get("name"), None);
    }

    #[test]
    fn parameters_are_not_evaluable() {
        let x = Expr::parameter("x", Type::Row("T".into()));
        assert!(!x.clone().property("Age", Type::I32).add(1).is_evaluable());
        assert!(Expr::constant(1).add(2).is_evaluable());
    }

    #[test]
    fn integer_widening_and_overflow() {
        let expr = Expr::constant(Value::I16(2)).mul(Expr::constant(Value::I64(3)));
        assert_eq!(expr.eval_const().unwrap(), Value::I64(6));

        let overflow = Expr::constant(i64::MAX).add(Expr::constant(1i64));
        assert!(overflow.eval_const().unwrap_err().is_expression_evaluation_failed());
    }

    #[test]
    fn negating_the_minimum_fails() {
        let err = Expr::negate(Expr::constant(i32::MIN)).eval_const().unwrap_err();
        assert!(err.is_expression_evaluation_failed());

        let err = Expr::negate(Expr::constant(i64::MIN)).eval_const().unwrap_err();
        assert!(err.is_expression_evaluation_failed());

        let expr = Expr::negate(Expr::constant(Value::I16(-7)));
        assert_eq!(expr.eval_const().unwrap(), Value::I16(7));
    }

    #[test]
    fn coalesce_and_comparison() {
        let expr = Expr::null(Type::String).coalesce("fallback");
        assert_eq!(expr.eval_const().unwrap(), Value::from("fallback"));

        let expr = Expr::constant(3).lt(Expr::constant(4.5));
        assert_eq!(expr.eval_const().unwrap(), Value::Bool(true));
    }

    #[test]
    fn string_calls_fold() {
        let expr = Expr::constant(" Hi ").trim().to_upper();
        assert!(expr.is_evaluable());
        assert_eq!(expr.eval_const().unwrap(), Value::from("HI"));
    }

    #[test]
    fn conditional_is_not_supported() {
        let expr = Expr::conditional(true, 1, 2);
        assert!(!expr.is_evaluable());
        assert!(expr.eval_const().unwrap_err().is_expression_not_supported());
    }
}
