use pretty_assertions::assert_eq;
use sluice_core::{
    expr::{Expr, HashAlgorithm, Queryable, SortOrder, Type, Value},
    lower_query,
    schema::{Column, Entity},
    Result, Schema,
};
use sluice_sql::{ResultShape, Serializer, Statement};

fn schema() -> Schema {
    Schema::new()
        .with(
            Entity::builder("T")
                .column(Column::new("id", Type::I32).primary_key())
                .column(Column::new("name", Type::String))
                .column(Column::new("age", Type::I32))
                .column(Column::dynamic("color", "Color", Type::String))
                .build(),
        )
        .with(
            Entity::builder("Other")
                .table("other")
                .column(Column::new("id", Type::I32).primary_key())
                .column(Column::new("name", Type::String))
                .column(Column::new("age", Type::I32))
                .build(),
        )
        .with(
            Entity::builder("Unkeyed")
                .column(Column::new("name", Type::String))
                .build(),
        )
}

fn compile(expr: impl Into<Expr>) -> Result<Statement> {
    let schema = schema();
    let stmt = lower_query(&expr.into(), &schema)?.into_statement();
    Serializer::new(&schema).serialize(&stmt)
}

fn sql(expr: impl Into<Expr>) -> String {
    compile(expr).unwrap().text
}

fn params(stmt: &Statement) -> Vec<Value> {
    stmt.params.values().cloned().collect()
}

fn t() -> Queryable {
    Queryable::table("T")
}

fn name(x: Expr) -> Expr {
    x.property("name", Type::String)
}

fn age(x: Expr) -> Expr {
    x.property("age", Type::I32)
}

#[test]
fn where_equal() {
    let stmt = compile(t().filter(|x| name(x).eq("hello"))).unwrap();

    assert_eq!(stmt.text, "SELECT * FROM [T] [t0] WHERE ([name] = @p0)");
    assert_eq!(params(&stmt), vec![Value::from("hello")]);
    assert_eq!(stmt.result, ResultShape::Multiple);
}

#[test]
fn skip_then_take_pages_by_row_number() {
    assert_eq!(
        sql(t().skip(10).take(10)),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [id]) AS [__RowNumber__] \
         FROM [T] [t0]) AS [t1] WHERE [__RowNumber__] BETWEEN 11 AND 20"
    );
}

#[test]
fn skip_without_take_is_open_ended() {
    assert_eq!(
        sql(t().order_by(name).skip(5)),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [name]) AS [__RowNumber__] \
         FROM [T] [t0]) AS [t1] WHERE [__RowNumber__] >= 6"
    );
}

#[test]
fn distinct_partitions_with_latest_key_first() {
    assert_eq!(
        sql(t().distinct(|x| name(x).to_upper()).distinct(age)),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (PARTITION BY [age], UPPER([name]) \
         ORDER BY [id]) AS [__Partition__] FROM [T] [t0]) AS [t1] WHERE [__Partition__] = 1"
    );
}

#[test]
fn ordered_distinct_orders_each_partition() {
    assert_eq!(
        sql(t().distinct_by(name, age, SortOrder::Descending)),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (PARTITION BY [name] \
         ORDER BY [age] DESC) AS [__Partition__] FROM [T] [t0]) AS [t1] WHERE [__Partition__] = 1"
    );
}

#[test]
fn duplicates_keep_all_but_the_first_row() {
    assert_eq!(
        sql(t().duplicates(name)),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (PARTITION BY [name] ORDER BY [id]) \
         AS [__Duplicates__] FROM [T] [t0]) AS [t1] WHERE [__Duplicates__] > 1"
    );
}

#[test]
fn distinct_then_paging_stacks_layers() {
    assert_eq!(
        sql(t().distinct(name).skip(2)),
        "SELECT * FROM (SELECT *, ROW_NUMBER() OVER (ORDER BY [id]) AS [__RowNumber__] \
         FROM (SELECT *, ROW_NUMBER() OVER (PARTITION BY [name] ORDER BY [id]) AS [__Partition__] \
         FROM [T] [t0]) AS [t1] WHERE [__Partition__] = 1) AS [t2] WHERE [__RowNumber__] >= 3"
    );
}

#[test]
fn intersect_renders_correlated_exists() {
    let query = t();
    let keys = vec![query.key(name), query.key(age)];

    assert_eq!(
        sql(query.intersect(Queryable::table("Other"), keys)),
        "SELECT * FROM [T] [t0] WHERE EXISTS (SELECT TOP (1) [name], [age] FROM [other] [t1] \
         WHERE (([name] = [t0].[name]) AND ([age] = [t0].[age])))"
    );
}

#[test]
fn except_renders_not_exists_after_the_filter() {
    let query = t().filter(|x| age(x).gt(18));
    let keys = vec![query.key(name)];

    assert_eq!(
        sql(query.except(Queryable::table("Other"), keys)),
        "SELECT * FROM [T] [t0] WHERE ([age] > @p0) AND NOT EXISTS (SELECT TOP (1) [name] \
         FROM [other] [t1] WHERE ([name] = [t0].[name]))"
    );
}

#[test]
fn negated_comparison_becomes_case() {
    let stmt = compile(t().filter(|x| Expr::not(age(x).eq(33)))).unwrap();

    assert_eq!(
        stmt.text,
        "SELECT * FROM [T] [t0] WHERE (CASE WHEN ([age] = @p0) THEN 1 ELSE 0 END = @p1)"
    );
    assert_eq!(params(&stmt), vec![Value::I32(33), Value::Bool(false)]);
}

#[test]
fn null_comparisons() {
    assert_eq!(
        sql(t().filter(|x| name(x).eq(Expr::null(Type::String)))),
        "SELECT * FROM [T] [t0] WHERE ([name] IS NULL)"
    );
    assert_eq!(
        sql(t().filter(|x| name(x).ne(Expr::null(Type::String)))),
        "SELECT * FROM [T] [t0] WHERE ([name] IS NOT NULL)"
    );
}

#[test]
fn logical_operators() {
    assert_eq!(
        sql(t().filter(|x| name(x.clone()).eq("a").or(age(x).le(3)))),
        "SELECT * FROM [T] [t0] WHERE (([name] = @p0) OR ([age] <= @p1))"
    );
}

#[test]
fn where_calls_are_and_combined() {
    assert_eq!(
        sql(t().filter(|x| name(x).eq("a")).filter(|x| age(x).ge(3))),
        "SELECT * FROM [T] [t0] WHERE (([name] = @p0) AND ([age] >= @p1))"
    );
}

#[test]
fn dynamic_key_reads_its_column() {
    assert_eq!(
        sql(t().filter(|x| x.property("Bag", Type::DynamicBag).index("color").eq("red"))),
        "SELECT * FROM [T] [t0] WHERE ([color] = @p0)"
    );
}

#[test]
fn order_by_and_take() {
    assert_eq!(
        sql(t().order_by(name).order_by_descending(age).take(3)),
        "SELECT TOP (3) * FROM [T] [t0] ORDER BY [age] DESC, [name]"
    );
}

#[test]
fn take_percent() {
    assert_eq!(
        sql(t().take_percent(10.0)),
        "SELECT TOP (10) PERCENT * FROM [T] [t0]"
    );
}

#[test]
fn randomize_orders_by_newid() {
    assert_eq!(
        sql(t().randomize().take(2)),
        "SELECT TOP (2) * FROM [T] [t0] ORDER BY NEWID()"
    );
}

#[test]
fn filter_after_take_nests() {
    assert_eq!(
        sql(t().order_by(name).take(5).filter(|x| age(x).gt(1))),
        "SELECT * FROM (SELECT TOP (5) * FROM [T] [t0] ORDER BY [name]) AS [t1] WHERE ([age] > @p0)"
    );
}

#[test]
fn select_list() {
    assert_eq!(
        sql(t().select(|x| Expr::new_array(Type::Object, vec![name(x.clone()), age(x)]))),
        "SELECT [name], [age] FROM [T] [t0]"
    );
}

#[test]
fn computed_select_items_are_aliased() {
    let stmt = compile(t().select(|x| {
        Expr::new_array(Type::Object, vec![name(x.clone()).to_lower(), Expr::constant(1)])
    }))
    .unwrap();

    assert_eq!(
        stmt.text,
        "SELECT LOWER([name]) AS [c0], @p0 AS [c1] FROM [T] [t0]"
    );
}

#[test]
fn first_takes_one_row() {
    let stmt = compile(t().order_by(name).first()).unwrap();
    assert_eq!(stmt.text, "SELECT TOP (1) * FROM [T] [t0] ORDER BY [name]");
    assert_eq!(stmt.result, ResultShape::Single);

    let stmt = compile(t().first_or_default_where(|x| age(x).eq(3))).unwrap();
    assert_eq!(stmt.text, "SELECT TOP (1) * FROM [T] [t0] WHERE ([age] = @p0)");
    assert_eq!(stmt.result, ResultShape::SingleOrNone);
}

#[test]
fn count() {
    let stmt = compile(t().count_where(|x| age(x).gt(3))).unwrap();
    assert_eq!(stmt.text, "SELECT COUNT(*) FROM [T] [t0] WHERE ([age] > @p0)");
    assert_eq!(stmt.result, ResultShape::Scalar);
}

#[test]
fn count_of_a_limited_select_counts_a_derived_table() {
    assert_eq!(
        sql(t().take(5).count()),
        "SELECT COUNT(*) FROM (SELECT TOP (5) * FROM [T] [t0]) AS [t1]"
    );
}

#[test]
fn any() {
    let stmt = compile(t().any_where(|x| age(x).gt(3))).unwrap();
    assert_eq!(
        stmt.text,
        "SELECT CASE WHEN EXISTS (SELECT * FROM [T] [t0] WHERE ([age] > @p0)) \
         THEN CAST(1 AS bit) ELSE CAST(0 AS bit) END"
    );
    assert_eq!(stmt.result, ResultShape::Scalar);
}

#[test]
fn union_renders_branches_in_call_order() {
    let a = t().filter(|x| age(x).eq(1));
    let b = t().filter(|x| age(x).eq(2));
    let c = t().filter(|x| age(x).eq(3));

    let stmt = compile(a.union(b).union(c).take(4)).unwrap();
    assert_eq!(
        stmt.text,
        "SELECT TOP (4) * FROM (SELECT * FROM [T] [t0] WHERE ([age] = @p0) \
         UNION SELECT * FROM [T] [t1] WHERE ([age] = @p1) \
         UNION SELECT * FROM [T] [t2] WHERE ([age] = @p2)) AS [t3]"
    );
    assert_eq!(
        params(&stmt),
        vec![Value::I32(1), Value::I32(2), Value::I32(3)]
    );
}

#[test]
fn limited_union_branch_is_wrapped() {
    assert_eq!(
        sql(t().take(2).union(t())),
        "SELECT * FROM (SELECT * FROM (SELECT TOP (2) * FROM [T] [t0]) AS [t1] \
         UNION SELECT * FROM [T] [t2]) AS [t3]"
    );
}

#[test]
fn string_functions() {
    assert_eq!(
        sql(t().filter(|x| name(x).starts_with("ab"))),
        "SELECT * FROM [T] [t0] WHERE (CASE WHEN [name] LIKE @p0 + '%' THEN 1 ELSE 0 END = @p1)"
    );
    assert_eq!(
        sql(t().filter(|x| name(x.clone()).contains("b").and(age(x).gt(1)))),
        "SELECT * FROM [T] [t0] WHERE ((CASE WHEN [name] LIKE '%' + @p0 + '%' THEN 1 ELSE 0 END = @p1) \
         AND ([age] > @p2))"
    );
    assert_eq!(
        sql(t().filter(|x| name(x).trim().eq("a"))),
        "SELECT * FROM [T] [t0] WHERE (LTRIM(RTRIM([name])) = @p0)"
    );
}

#[test]
fn zero_based_indices_shift_to_one_based() {
    assert_eq!(
        sql(t().filter(|x| name(x).index_of("b").gt(0))),
        "SELECT * FROM [T] [t0] WHERE ((CHARINDEX(@p0, [name]) - 1) > @p1)"
    );
    assert_eq!(
        sql(t().filter(|x| name(x).substring_len(1, 2).eq("bc"))),
        "SELECT * FROM [T] [t0] WHERE (SUBSTRING([name], @p0 + 1, @p1) = @p2)"
    );
    assert_eq!(
        sql(t().filter(|x| name(x).substring(2).eq("c"))),
        "SELECT * FROM [T] [t0] WHERE (RIGHT([name], LEN([name]) - @p0) = @p1)"
    );
    assert_eq!(
        sql(t().filter(|x| name(x).insert(1, "z").eq("azb"))),
        "SELECT * FROM [T] [t0] WHERE (STUFF([name], @p0 + 1, 0, @p1) = @p2)"
    );
}

#[test]
fn hash_and_hex() {
    assert_eq!(
        sql(t().select(|x| name(x).hash(HashAlgorithm::Md5).to_hex())),
        "SELECT CONVERT(nvarchar(MAX), HASHBYTES('Md5', [name]), 1) AS [c0] FROM [T] [t0]"
    );
}

#[test]
fn conversions_cast_to_sql_types() {
    assert_eq!(
        sql(t().filter(|x| Expr::convert(age(x), Type::I64).gt(1i64))),
        "SELECT * FROM [T] [t0] WHERE (CAST([age] AS bigint) > @p0)"
    );
    assert_eq!(
        sql(t().filter(|x| age(x).stringify().eq("3"))),
        "SELECT * FROM [T] [t0] WHERE (CAST([age] AS nvarchar(MAX)) = @p0)"
    );
}

#[test]
fn paging_without_any_key_is_rejected() {
    let err = compile(Queryable::table("Unkeyed").skip(1)).unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn unknown_property_is_rejected() {
    let err = compile(t().filter(|x| x.property("nickname", Type::String).eq("a"))).unwrap_err();
    assert!(err.is_mapping());
}

#[test]
fn aliases_do_not_depend_on_earlier_statements() {
    let first = sql(t().skip(1).take(1));
    let second = sql(t().skip(1).take(1));
    assert_eq!(first, second);
}
