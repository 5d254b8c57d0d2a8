use pretty_assertions::assert_eq;
use sluice_core::{
    expr::{Queryable, Type, Value},
    lower_query,
    schema::{Column, Entity},
    Schema,
};
use sluice_sql::{Serializer, Statement};

fn compile() -> Statement {
    let schema = Schema::new().with(
        Entity::builder("T")
            .column(Column::new("id", Type::I32).primary_key())
            .column(Column::new("name", Type::String))
            .column(Column::new("age", Type::I32))
            .build(),
    );

    let expr = Queryable::table("T")
        .filter(|x| x.clone().property("name", Type::String).eq("a").or(x.property("age", Type::I32).lt(5)))
        .into_expr();

    let stmt = lower_query(&expr, &schema).unwrap().into_statement();
    Serializer::new(&schema).serialize(&stmt).unwrap()
}

#[test]
fn params_follow_text_order() {
    let stmt = compile();

    let params: Vec<_> = stmt.params.iter().collect();
    assert_eq!(
        params,
        vec![("p0", &Value::from("a")), ("p1", &Value::I32(5))]
    );
}

#[test]
fn lookup_ignores_case_and_marker() {
    let stmt = compile();

    assert_eq!(stmt.params.get("p0"), Some(&Value::from("a")));
    assert_eq!(stmt.params.get("@P0"), Some(&Value::from("a")));
    assert_eq!(stmt.params.get("@p1"), Some(&Value::I32(5)));
    assert_eq!(stmt.params.get("p2"), None);
}

#[test]
fn every_placeholder_has_a_value() {
    let stmt = compile();

    assert_eq!(stmt.params.len(), 2);
    for name in stmt.params.names() {
        assert!(stmt.text.contains(&format!("@{name}")));
    }
}
