use pretty_assertions::assert_eq;
use sluice_core::{
    expr::{Expr, ExprParameter, HashAlgorithm, Type},
    lower::LowerProjection,
    model::{Function, Projection},
};

fn row() -> Expr {
    ExprParameter::new("x", Type::Row("Person".into())).into()
}

fn name() -> Expr {
    row().property("name", Type::String)
}

fn lower(expr: Expr) -> Projection {
    LowerProjection::new().lower(&expr).unwrap()
}

fn function(projection: Projection) -> Function {
    match projection {
        Projection::Function(function) => *function,
        other => panic!("expected a function, got {other:?}"),
    }
}

#[test]
fn property_of_the_row_is_a_field() {
    assert_eq!(lower(name()), Projection::field("name"));
}

#[test]
fn dynamic_bag_index_is_a_keyed_field() {
    let expr = row().property("Bag", Type::DynamicBag).index("Color");
    assert_eq!(lower(expr), Projection::dynamic("Bag", "Color"));
}

#[test]
fn dynamic_bag_member_is_a_keyed_field() {
    let expr = row()
        .property("Bag", Type::DynamicBag)
        .property("Size", Type::I32);
    assert_eq!(lower(expr), Projection::dynamic("Bag", "Size"));
}

#[test]
fn string_methods() {
    assert_eq!(
        function(lower(name().to_upper())),
        Function::ToUpper(Projection::field("name"))
    );
    assert_eq!(
        function(lower(name().trim())),
        Function::Trim(Projection::field("name"))
    );

    let Function::SubstringLength { text, length, .. } =
        function(lower(name().substring_len(1, 3)))
    else {
        panic!("expected SubstringLength");
    };
    assert_eq!(text, Projection::field("name"));
    assert_eq!(length.as_constant().unwrap().value.as_i64(), Some(3));
}

#[test]
fn length_of_a_string() {
    assert_eq!(
        function(lower(name().length())),
        Function::Length(Projection::field("name"))
    );
}

#[test]
fn coalesce() {
    let expr = row()
        .property("nickname", Type::nullable(Type::String))
        .coalesce(name());

    let Function::Coalesce { first, second } = function(lower(expr)) else {
        panic!("expected Coalesce");
    };
    assert_eq!(first, Projection::field("nickname"));
    assert_eq!(second, Projection::field("name"));
}

#[test]
fn nullable_conversion_is_transparent() {
    let expr = Expr::convert(
        row().property("age", Type::I32),
        Type::nullable(Type::I32),
    );
    assert_eq!(lower(expr), Projection::field("age"));
}

#[test]
fn other_conversions_cast() {
    let expr = Expr::convert(row().property("age", Type::I32), Type::I64);
    assert_eq!(
        function(lower(expr)),
        Function::Convert {
            value: Projection::field("age"),
            ty: Type::I64,
        }
    );
}

#[test]
fn hash() {
    let expr = name().hash(HashAlgorithm::Sha1);
    assert_eq!(
        function(lower(expr)),
        Function::Hash {
            value: Projection::field("name"),
            algorithm: HashAlgorithm::Sha1,
        }
    );
}

#[test]
fn constant_string_methods_fold() {
    let projection = lower(Expr::constant("abc").to_upper());
    assert_eq!(projection.as_constant().unwrap().value, "ABC".into());
}

#[test]
fn unknown_method_is_rejected() {
    let method = sluice_core::expr::Method::instance(
        Type::String,
        "PadLeft",
        [sluice_core::expr::Param::new("totalWidth", Type::I32)],
        Type::String,
    );
    let expr = Expr::call(method, Some(name()), vec![Expr::constant(5)]);

    let err = LowerProjection::new().lower(&expr).unwrap_err();
    assert!(err.is_query_operator_not_supported());
    assert_eq!(
        err.to_string(),
        "query operator not supported: PadLeft(totalWidth)"
    );
}

#[test]
fn member_without_target_is_rejected() {
    let expr: Expr = sluice_core::expr::ExprMember {
        target: None,
        member: sluice_core::expr::Member {
            name: "Now".into(),
            kind: sluice_core::expr::MemberKind::Property,
            ty: Type::I64,
        },
    }
    .into();

    let err = LowerProjection::new().lower(&expr).unwrap_err();
    assert!(err.is_expression_not_supported());
}
