use pretty_assertions::assert_eq;
use sluice_core::{
    expr::{Type, Value},
    schema::{Column, Entity, Mapping, ResolveTable, TableRef},
    Schema,
};

fn person() -> Entity {
    Entity::builder("Person")
        .table("people")
        .column(Column::new("person_id", Type::I32).property("Id").identity().primary_key())
        .column(Column::new("full_name", Type::String).property("Name").max_length(50))
        .column(Column::new("age", Type::I32))
        .column(Column::new("updated", Type::I64).computed())
        .column(Column::dynamic("color", "Color", Type::String))
        .build()
}

#[test]
fn resolve_property_and_dynamic_key() {
    let entity = person();

    assert_eq!(entity.resolve("Name", None).unwrap().name, "full_name");
    assert_eq!(entity.resolve("Bag", Some("COLOR")).unwrap().name, "color");

    let err = entity.resolve("Nickname", None).unwrap_err();
    assert!(err.is_mapping());
    assert_eq!(
        err.to_string(),
        "entity `Person` has no column mapped for `Nickname`"
    );
}

#[test]
fn resolve_name_prefers_exact_property() {
    let entity = person();

    assert_eq!(entity.resolve_name("Name").unwrap().name, "full_name");
    assert_eq!(entity.resolve_name("name").unwrap().name, "full_name");
    assert_eq!(entity.resolve_name("color").unwrap().name, "color");
    assert!(entity.resolve_name("missing").is_err());
}

#[test]
fn key_and_identity_columns() {
    let entity = person();

    assert_eq!(entity.identity().unwrap().name, "person_id");

    let keys: Vec<_> = entity.key_columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(keys, vec!["person_id"]);
}

#[test]
fn identity_is_the_key_without_a_primary_key() {
    let entity = Entity::builder("Log")
        .column(Column::new("seq", Type::I64).identity())
        .column(Column::new("message", Type::String))
        .build();

    let keys: Vec<_> = entity.key_columns().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(keys, vec!["seq"]);
}

#[test]
fn sync_columns_skip_keys_and_generated_columns() {
    let entity = person();
    let columns: Vec<_> = entity.sync_columns().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, vec!["full_name", "age", "color"]);
}

#[test]
fn schema_lookups() {
    let schema = Schema::new().with(person());

    assert_eq!(schema.entity("Person").unwrap().table, "people");

    let err = schema.entity("Order").unwrap_err();
    assert!(err.is_mapping());

    assert_eq!(
        schema.resolve_table(&Value::Queryable("Person".into())),
        Some(TableRef {
            entity: "Person".into(),
            table: "people".into(),
        })
    );
    assert_eq!(schema.resolve_table(&Value::from("Person")), None);
}
