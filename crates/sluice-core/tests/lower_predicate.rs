use pretty_assertions::assert_eq;
use sluice_core::{
    expr::{BinaryOp, Expr, ExprParameter, Type, Value},
    lower::LowerPredicate,
    model::{Operator, OperatorKind, Projection},
    Result,
};

fn row() -> Expr {
    ExprParameter::new("x", Type::Row("Person".into())).into()
}

/// Lowers the body of `x => body`, quoted as query operators receive it.
fn lower(body: impl FnOnce(Expr) -> Expr) -> Result<Operator> {
    let param = ExprParameter::new("x", Type::Row("Person".into()));
    let lambda = Expr::quote(Expr::lambda(vec![param], body(row())));
    LowerPredicate::new().lower(&lambda)
}

fn constant(operand: &sluice_core::model::Operand) -> &Value {
    &operand.as_projection().unwrap().as_constant().unwrap().value
}

#[test]
fn comparison_of_field_and_constant() {
    let op = lower(|x| x.property("name", Type::String).eq("hello")).unwrap();

    assert_eq!(op.op, OperatorKind::Equal);
    assert_eq!(op.lhs.as_projection(), Some(&Projection::field("name")));
    assert_eq!(constant(&op.rhs), &Value::from("hello"));
}

#[test]
fn bare_boolean_is_compared_against_true() {
    let op = lower(|x| x.property("active", Type::Bool)).unwrap();

    assert_eq!(op.op, OperatorKind::Equal);
    assert_eq!(op.lhs.as_projection(), Some(&Projection::field("active")));
    assert_eq!(constant(&op.rhs), &Value::Bool(true));
}

#[test]
fn bare_boolean_under_logical_operator_is_a_condition() {
    let op = lower(|x| {
        x.clone()
            .property("active", Type::Bool)
            .and(x.property("age", Type::I32).gt(3))
    })
    .unwrap();

    assert_eq!(op.op, OperatorKind::And);

    let lhs = op.lhs.as_operator().unwrap();
    assert_eq!(lhs.op, OperatorKind::Equal);
    assert_eq!(constant(&lhs.rhs), &Value::Bool(true));

    let rhs = op.rhs.as_operator().unwrap();
    assert_eq!(rhs.op, OperatorKind::GreaterThan);
}

#[test]
fn boolean_operand_of_comparison_stays_bare() {
    let op = lower(|x| x.property("active", Type::Bool).eq(false)).unwrap();

    assert_eq!(op.lhs.as_projection(), Some(&Projection::field("active")));
    assert_eq!(constant(&op.rhs), &Value::Bool(false));
}

#[test]
fn not_compares_against_false() {
    let op = lower(|x| Expr::not(x.property("age", Type::I32).eq(33))).unwrap();

    assert_eq!(op.op, OperatorKind::Equal);
    assert_eq!(op.lhs.as_operator().unwrap().op, OperatorKind::Equal);
    assert_eq!(constant(&op.rhs), &Value::Bool(false));
}

#[test]
fn has_value_compares_against_null() {
    let op = lower(|x| {
        x.property("nickname", Type::nullable(Type::String))
            .has_value()
    })
    .unwrap();

    assert_eq!(op.op, OperatorKind::NotEqual);
    assert_eq!(op.lhs.as_projection(), Some(&Projection::field("nickname")));
    assert!(constant(&op.rhs).is_null());
}

#[test]
fn constant_subexpressions_fold() {
    let op = lower(|x| {
        x.property("age", Type::I32)
            .gt(Expr::constant(1).add(2))
    })
    .unwrap();

    assert_eq!(constant(&op.rhs).as_i64(), Some(3));
}

#[test]
fn nullable_value_reads_the_same_column() {
    let op = lower(|x| {
        x.property("score", Type::nullable(Type::I32))
            .value()
            .ge(10)
    })
    .unwrap();

    assert_eq!(op.lhs.as_projection(), Some(&Projection::field("score")));
}

#[test]
fn conditional_is_not_supported() {
    let err = lower(|x| {
        Expr::conditional(
            x.clone().property("active", Type::Bool),
            x.clone().property("age", Type::I32).gt(1),
            x.property("age", Type::I32).lt(1),
        )
    })
    .unwrap_err();

    assert!(err.is_expression_not_supported());
    assert_eq!(err.to_string(), "expression not supported: Conditional");
}

#[test]
fn operator_without_sql_mapping_is_rejected() {
    let err = lower(|x| {
        Expr::binary(
            x.clone().property("flags", Type::I32),
            BinaryOp::ExclusiveOr,
            x.property("mask", Type::I32),
        )
        .eq(0)
    })
    .unwrap_err();

    assert!(err.is_operator_not_supported());
}

#[test]
fn field_members_are_rejected() {
    let err = lower(|x| x.field("count", Type::I32).gt(1)).unwrap_err();

    assert!(err.is_member_type_not_supported());
    assert_eq!(
        err.to_string(),
        "member type not supported: `count` is a Field, only properties can be lowered"
    );
}

#[test]
fn fields_take_the_given_table() {
    let alias = sluice_core::model::Alias::next();
    let param = ExprParameter::new("x", Type::Row("Person".into()));
    let body = row().property("name", Type::String).eq("a");
    let lambda = Expr::lambda(vec![param], body);

    let op = LowerPredicate::with_table(Some(alias)).lower(&lambda).unwrap();
    assert_eq!(
        op.lhs.as_projection(),
        Some(&Projection::field("name").with_table(alias))
    );
}

#[test]
fn negated_captured_minimum_is_an_evaluation_error() {
    let captured = Expr::constant(Value::record([("floor", Value::I32(i32::MIN))]));
    let err = lower(|x| {
        x.property("age", Type::I32)
            .gt(Expr::negate(captured.field("floor", Type::I32)))
    })
    .unwrap_err();

    assert!(err.is_expression_evaluation_failed());
}

#[test]
fn negated_captured_value_folds() {
    let captured = Expr::constant(Value::record([("floor", Value::I32(5))]));
    let op = lower(|x| {
        x.property("age", Type::I32)
            .gt(Expr::negate(captured.field("floor", Type::I32)))
    })
    .unwrap();

    assert_eq!(constant(&op.rhs), &Value::I32(-5));
}
