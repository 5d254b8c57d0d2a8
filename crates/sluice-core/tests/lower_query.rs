use pretty_assertions::assert_eq;
use sluice_core::{
    expr::{Expr, ExprParameter, Method, Param, Queryable, SortOrder, SyncFields, Type},
    lower_query,
    model::{
        Data, Direction, Fetch, Operation, Operator, OperatorKind, OrderBy, Projection, Query,
        SetOperationKind, Statement, Top,
    },
    schema::{Column, Entity},
    Result, Schema,
};

fn schema() -> Schema {
    Schema::new()
        .with(
            Entity::builder("Person")
                .column(Column::new("id", Type::I32).identity().primary_key())
                .column(Column::new("name", Type::String))
                .column(Column::new("age", Type::I32))
                .build(),
        )
        .with(
            Entity::builder("Staging")
                .table("person_staging")
                .column(Column::new("id", Type::I32).primary_key())
                .column(Column::new("name", Type::String))
                .column(Column::new("age", Type::I32))
                .build(),
        )
}

fn people() -> Queryable {
    Queryable::table("Person")
}

fn name(x: Expr) -> Expr {
    x.property("name", Type::String)
}

fn age(x: Expr) -> Expr {
    x.property("age", Type::I32)
}

fn lower(query: impl Into<Expr>) -> Result<Query> {
    lower_query(&query.into(), &schema())
}

fn constant(projection: &Projection) -> &sluice_core::expr::Value {
    &projection.as_constant().unwrap().value
}

#[test]
fn table_becomes_data_source() {
    let query = lower(people()).unwrap();
    let table = query.select.data.as_ref().unwrap().as_table().unwrap();

    assert_eq!(table.entity, "Person");
    assert_eq!(table.name, "Person");
    assert_eq!(query.operation, Operation::Select);
    assert!(query.select.filter.is_none());
}

#[test]
fn table_name_comes_from_mapping() {
    let query = lower(Queryable::table("Staging")).unwrap();
    let table = query.select.data.as_ref().unwrap().as_table().unwrap();
    assert_eq!(table.name, "person_staging");
}

#[test]
fn where_filters_are_and_combined_in_call_order() {
    let query = lower(
        people()
            .filter(|x| name(x).eq("hello"))
            .filter(|x| age(x).gt(30)),
    )
    .unwrap();

    let filter = query.select.filter.unwrap();
    assert_eq!(filter.op, OperatorKind::And);

    let first = filter.lhs.as_operator().unwrap();
    assert_eq!(first.op, OperatorKind::Equal);
    assert_eq!(first.lhs.as_projection(), Some(&Projection::field("name")));

    let second = filter.rhs.as_operator().unwrap();
    assert_eq!(second.op, OperatorKind::GreaterThan);
    assert_eq!(second.lhs.as_projection(), Some(&Projection::field("age")));
}

#[test]
fn later_order_by_becomes_primary_sort() {
    let query = lower(
        people()
            .order_by(name)
            .order_by_descending(age),
    )
    .unwrap();

    assert_eq!(
        query.select.order_by,
        vec![
            OrderBy {
                projection: Projection::field("age"),
                direction: Direction::Desc,
            },
            OrderBy {
                projection: Projection::field("name"),
                direction: Direction::Asc,
            },
        ]
    );
}

#[test]
fn skip_then_take_pages() {
    let select = lower(people().skip(10).take(10)).unwrap().select;
    assert_eq!(select.start, 11);
    assert_eq!(select.top, Some(Top::Count(10)));
}

#[test]
fn take_then_skip_shrinks_the_take() {
    let select = lower(people().take(10).skip(4)).unwrap().select;
    assert_eq!(select.start, 5);
    assert_eq!(select.top, Some(Top::Count(6)));
}

#[test]
fn take_keeps_the_smaller_count() {
    let select = lower(people().take(10).take(3)).unwrap().select;
    assert_eq!(select.top, Some(Top::Count(3)));

    let select = lower(people().take(3).take(10)).unwrap().select;
    assert_eq!(select.top, Some(Top::Count(3)));
}

#[test]
fn skips_accumulate() {
    let select = lower(people().skip(5).skip(5)).unwrap().select;
    assert_eq!(select.start, 11);
}

#[test]
fn skip_zero_is_a_no_op() {
    let select = lower(people().skip(0)).unwrap().select;
    assert_eq!(select.start, 0);
    assert!(!select.is_paged());
}

#[test]
fn negative_counts_behave_as_zero() {
    let select = lower(people().take(-5)).unwrap().select;
    assert_eq!(select.top, Some(Top::Count(0)));

    let select = lower(people().skip(-5)).unwrap().select;
    assert_eq!(select.start, 0);
}

#[test]
fn take_percent() {
    let select = lower(people().take_percent(12.5)).unwrap().select;
    assert_eq!(select.top, Some(Top::Percent(12.5)));
}

#[test]
fn where_after_take_nests_the_limited_select() {
    let select = lower(people().take(5).filter(|x| age(x).gt(30)))
        .unwrap()
        .select;

    assert!(select.top.is_none());
    assert!(select.filter.is_some());

    let inner = &select.data.as_ref().unwrap().as_query().unwrap().selects;
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].top, Some(Top::Count(5)));
    assert!(inner[0].filter.is_none());
    assert_eq!(select.entity(), Some("Person"));
}

#[test]
fn later_distinct_partitions_first() {
    let select = lower(
        people()
            .distinct(|x| name(x).to_upper())
            .distinct(age),
    )
    .unwrap()
    .select;

    let keys: Vec<_> = select.distinct.iter().map(|d| &d.key).collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0], &Projection::field("age"));
    assert!(matches!(keys[1], Projection::Function(_)));
}

#[test]
fn ordered_distinct_carries_its_order() {
    let select = lower(people().distinct_by(name, age, SortOrder::Descending))
        .unwrap()
        .select;

    assert_eq!(
        select.distinct[0].order,
        Some(OrderBy {
            projection: Projection::field("age"),
            direction: Direction::Desc,
        })
    );
}

#[test]
fn duplicates_collects_both_orderings() {
    let select = lower(people().duplicates_by_then(
        name,
        age,
        SortOrder::Ascending,
        |x| x.property("id", Type::I32),
        SortOrder::Descending,
    ))
    .unwrap()
    .select;

    let duplicates = select.duplicates.unwrap();
    assert_eq!(duplicates.key, Projection::field("name"));
    assert_eq!(
        duplicates.order,
        vec![
            OrderBy::asc(Projection::field("age")),
            OrderBy::desc(Projection::field("id")),
        ]
    );
}

#[test]
fn fetch_operators() {
    let cases: Vec<(Expr, Fetch)> = vec![
        (people().first(), Fetch::First),
        (people().first_or_default(), Fetch::FirstOrDefault),
        (people().any(), Fetch::Any),
        (people().count(), Fetch::Count),
    ];

    for (expr, fetch) in cases {
        let select = lower(expr).unwrap().select;
        assert_eq!(select.fetch, Some(fetch));
        assert!(select.filter.is_none());
    }
}

#[test]
fn fetch_with_predicate_adds_filter() {
    let select = lower(people().count_where(|x| age(x).gt(18))).unwrap().select;
    assert_eq!(select.fetch, Some(Fetch::Count));
    assert_eq!(select.filter.unwrap().op, OperatorKind::GreaterThan);
}

#[test]
fn randomize() {
    let select = lower(people().randomize()).unwrap().select;
    assert!(select.randomize);
}

#[test]
fn select_projects_array_items() {
    let select = lower(people().select(|x| {
        Expr::new_array(Type::Object, vec![name(x.clone()), age(x)])
    }))
    .unwrap()
    .select;

    assert_eq!(
        select.projection,
        vec![Projection::field("name"), Projection::field("age")]
    );
}

#[test]
fn select_of_the_row_keeps_every_column() {
    let select = lower(people().select(|x| x)).unwrap().select;
    assert!(select.projection.is_empty());
}

#[test]
fn union_of_three_adds_branches_newest_first() {
    let a = people().filter(|x| age(x).eq(1));
    let b = people().filter(|x| age(x).eq(2));
    let c = people().filter(|x| age(x).eq(3));

    let select = lower(a.union(b).union(c)).unwrap().select;
    let branches = &select.data.as_ref().unwrap().as_query().unwrap().selects;
    assert_eq!(branches.len(), 3);

    let ages: Vec<_> = branches
        .iter()
        .map(|branch| constant(branch.filter.as_ref().unwrap().rhs.as_projection().unwrap()).clone())
        .collect();
    assert_eq!(ages, vec![3.into(), 2.into(), 1.into()]);
}

#[test]
fn operators_after_union_apply_to_the_union() {
    let select = lower(
        people()
            .union(Queryable::table("Person"))
            .take(5)
            .union(Queryable::table("Person")),
    )
    .unwrap()
    .select;

    // The limited union is a branch of a new union
    let outer = &select.data.as_ref().unwrap().as_query().unwrap().selects;
    assert_eq!(outer.len(), 2);
    assert_eq!(outer[1].top, Some(Top::Count(5)));
    assert!(matches!(
        &outer[1].data,
        Some(Data::Query(query)) if query.selects.len() == 2
    ));
}

#[test]
fn intersect_correlates_on_keys() {
    let people_query = people();
    let keys = vec![people_query.key(name), people_query.key(age)];
    let select = lower(people_query.intersect(Queryable::table("Staging"), keys))
        .unwrap()
        .select;

    let outer = select.alias().unwrap();
    assert_eq!(select.set_operations.len(), 1);

    let set_operation = &select.set_operations[0];
    assert_eq!(set_operation.kind, SetOperationKind::Intersect);

    let sub = &set_operation.select;
    assert_eq!(sub.top, Some(Top::Count(1)));
    assert_eq!(
        sub.projection,
        vec![Projection::field("name"), Projection::field("age")]
    );

    let filter = sub.filter.as_ref().unwrap();
    assert_eq!(filter.op, OperatorKind::And);
    let first = filter.lhs.as_operator().unwrap();
    assert_eq!(
        first,
        &Operator::equal(
            Projection::field("name"),
            Projection::field("name").with_table(outer)
        )
    );
}

#[test]
fn except_nests_a_limited_other_side() {
    let people_query = people();
    let keys = vec![people_query.key(name)];
    let select = lower(people_query.except(Queryable::table("Staging").take(3), keys))
        .unwrap()
        .select;

    let set_operation = &select.set_operations[0];
    assert_eq!(set_operation.kind, SetOperationKind::Compliment);

    let sub = &set_operation.select;
    let nested = &sub.data.as_ref().unwrap().as_query().unwrap().selects[0];
    assert_eq!(nested.top, Some(Top::Count(3)));
    assert_eq!(sub.top, Some(Top::Count(1)));
}

#[test]
fn copy_to_becomes_insert_select() {
    let expr = Queryable::table("Staging")
        .filter(|x| age(x).gt(30))
        .copy_to(people());

    let query = lower(expr).unwrap();
    assert_eq!(query.operation_name(), "CopyTo");

    let Statement::Insert(insert) = query.into_statement() else {
        panic!("expected an insert");
    };
    assert_eq!(insert.entity, "Person");
}

#[test]
fn sync_with_targets_the_chain() {
    let people_query = people().filter(|x| age(x).gt(30));
    let key = people_query.key(|x| x.property("id", Type::I32));
    let fields = vec![people_query.key(name)];
    let expr = people_query.sync_with(Queryable::table("Staging"), key, SyncFields::Exclude, fields);

    let Statement::Sync(sync) = lower(expr).unwrap().into_statement() else {
        panic!("expected a sync");
    };

    assert_eq!(sync.target.entity(), Some("Person"));
    assert!(sync.target.filter.is_some());
    assert_eq!(sync.source.entity(), Some("Staging"));
    assert_eq!(sync.mode, SyncFields::Exclude);
    assert_eq!(sync.target_key, Projection::field("id"));
    assert_eq!(sync.fields, vec![Projection::field("name")]);
}

#[test]
fn unknown_query_operator_names_its_parameters() {
    let method = Method::static_method(
        Type::Queryable(None),
        "GroupBy",
        [
            Param::new("source", Type::Queryable(None)),
            Param::new("keySelector", Type::lambda(Type::Object)),
        ],
        Type::Queryable(None),
    );
    let key = people().key(name);
    let expr = Expr::call(method, None, vec![people().into_expr(), key]);

    let err = lower(expr).unwrap_err();
    assert!(err.is_query_operator_not_supported());
    assert_eq!(
        err.to_string(),
        "query operator not supported: GroupBy(source, keySelector)"
    );
}

#[test]
fn query_without_a_table_is_rejected() {
    let x = ExprParameter::new("x", Type::Row("Person".into()));
    let err = lower(Expr::from(x)).unwrap_err();
    assert!(err.is_invalid_statement());
}
