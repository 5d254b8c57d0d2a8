use pretty_assertions::assert_eq;
use sluice::{
    async_trait,
    expr::{Queryable, Type, Value},
    model,
    schema::{Column, Entity},
    Config, Connection, Db, Response, Result, ResultShape, Schema, Statement,
};
use std::collections::VecDeque;

/// Records every statement and answers with canned responses.
#[derive(Default)]
struct MockConnection {
    executed: Vec<Statement>,
    responses: VecDeque<Response>,
}

impl MockConnection {
    fn answering(responses: impl IntoIterator<Item = Response>) -> MockConnection {
        MockConnection {
            executed: vec![],
            responses: responses.into_iter().collect(),
        }
    }

    fn texts(&self) -> Vec<&str> {
        self.executed.iter().map(|stmt| stmt.text.as_str()).collect()
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn exec(&mut self, stmt: &Statement) -> Result<Response> {
        self.executed.push(stmt.clone());
        match self.responses.pop_front() {
            Some(response) => Ok(response),
            None => Err(sluice::Error::from_args(format_args!("no response queued"))),
        }
    }
}

fn db() -> Db {
    Db::new(
        Schema::new().with(
            Entity::builder("Person")
                .column(Column::new("id", Type::I32).identity().primary_key())
                .column(Column::new("name", Type::String).max_length(10))
                .column(Column::new("age", Type::I32))
                .build(),
        ),
    )
}

fn person(id: i32, name: &str) -> Value {
    Value::record([("id", Value::I32(id)), ("name", Value::from(name))])
}

fn adults() -> Queryable {
    Queryable::table("Person").filter(|x| x.property("age", Type::I32).ge(18))
}

#[test]
fn compile_lowers_and_renders() {
    let stmt = db().compile(&adults().into_expr()).unwrap();

    assert_eq!(stmt.text, "SELECT * FROM [Person] [t0] WHERE ([age] >= @p0)");
    assert_eq!(stmt.params.get("@p0"), Some(&Value::I32(18)));
    assert_eq!(stmt.result, ResultShape::Multiple);
}

#[test]
fn lower_exposes_the_model() {
    let stmt = db().lower(&adults().into_expr()).unwrap();

    let select = stmt.as_select().unwrap();
    assert_eq!(select.entity(), Some("Person"));
    assert!(select.filter.is_some());
}

#[test]
fn config_reaches_the_serializer() {
    let db = Db::with_config(
        db().schema().clone(),
        Config {
            param_prefix: "v".to_string(),
            ..Config::default()
        },
    );

    let stmt = db.compile(&adults().into_expr()).unwrap();
    assert_eq!(stmt.text, "SELECT * FROM [Person] [t0] WHERE ([age] >= @v0)");
}

#[tokio::test]
async fn exec_returns_rows() {
    let mut conn = MockConnection::answering([Response::Rows(vec![
        person(1, "Ann"),
        person(2, "Bob"),
    ])]);

    let rows = db()
        .exec(&mut conn, &adults().into_expr())
        .await
        .unwrap()
        .into_rows()
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get("name"), Some(&Value::from("Bob")));
    assert_eq!(
        conn.texts(),
        vec!["SELECT * FROM [Person] [t0] WHERE ([age] >= @p0)"]
    );
}

#[tokio::test]
async fn count_is_a_scalar() {
    let mut conn = MockConnection::answering([Response::Scalar(Value::I32(7))]);

    let count = db()
        .exec(&mut conn, &adults().count())
        .await
        .unwrap()
        .into_scalar()
        .unwrap();

    assert_eq!(count, Value::I32(7));
    assert_eq!(conn.executed[0].result, ResultShape::Scalar);
}

#[tokio::test]
async fn first_rejects_several_rows() {
    let mut conn = MockConnection::answering([Response::Rows(vec![
        person(1, "Ann"),
        person(2, "Bob"),
    ])]);

    let err = db()
        .exec(&mut conn, &adults().first())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "connection returned 2 rows, expected exactly one row"
    );
}

#[tokio::test]
async fn first_or_default_accepts_no_rows() {
    let mut conn = MockConnection::answering([Response::Rows(vec![])]);

    let rows = db()
        .exec(&mut conn, &adults().first_or_default())
        .await
        .unwrap()
        .into_rows()
        .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn dml_answers_with_a_count() {
    let db = db();
    let mut conn = MockConnection::answering([Response::Count(3), Response::Rows(vec![])]);

    let stmt = db
        .serialize(&model::Delete::new("Person").into())
        .unwrap();

    let count = db
        .exec_statement(&mut conn, &stmt)
        .await
        .unwrap()
        .into_count()
        .unwrap();
    assert_eq!(count, 3);

    let err = db.exec_statement(&mut conn, &stmt).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "connection returned 0 rows, expected a row count"
    );
}

#[tokio::test]
async fn insert_reads_back_the_identity() {
    let db = db();
    let mut conn = MockConnection::answering([Response::Scalar(Value::I32(42))]);

    let values = [("name".to_string(), Value::from("Cy"))].into_iter().collect();
    let stmt = db
        .serialize(&model::Insert::values("Person", values).into())
        .unwrap();

    let id = db
        .exec_statement(&mut conn, &stmt)
        .await
        .unwrap()
        .into_scalar()
        .unwrap();

    assert_eq!(id, Value::I32(42));
    assert_eq!(
        conn.texts(),
        vec!["INSERT INTO [Person] ([name]) VALUES (@p0); SELECT CAST(SCOPE_IDENTITY() AS int)"]
    );
}

#[tokio::test]
async fn compile_errors_never_reach_the_connection() {
    let mut conn = MockConnection::default();
    let expr = Queryable::table("Order").into_expr();

    let err = db().exec(&mut conn, &expr).await.unwrap_err();

    assert!(err.is_invalid_statement());
    assert!(conn.executed.is_empty());
}

#[tokio::test]
async fn connection_errors_propagate() {
    let mut conn = MockConnection::default();

    let err = db()
        .exec(&mut conn, &adults().into_expr())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "no response queued");
    assert_eq!(conn.executed.len(), 1);
}
