use super::{Expr, ExprParameter, QueryOperator, SortOrder, SyncFields, Type, Value};

/// Builds query expressions over the rows of a mapped entity.
///
/// Each method wraps the expression built so far as the source argument of a
/// query operator call, producing the same call shapes lowering recognises.
///
/// ```
/// use sluice_core::expr::{Queryable, Type};
///
/// let people = Queryable::table("Person")
///     .filter(|x| x.property("Age", Type::I32).gt(30))
///     .order_by(|x| x.property("Name", Type::String))
///     .take(10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Queryable {
    entity: String,
    expr: Expr,
}

impl Queryable {
    /// All rows of `entity`.
    pub fn table(entity: impl Into<String>) -> Queryable {
        let entity = entity.into();
        let expr = Expr::typed_constant(
            Value::Queryable(entity.clone()),
            Type::queryable(entity.clone()),
        );
        Queryable { entity, expr }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// The row parameter lambdas over this query are built with.
    pub fn row(&self) -> ExprParameter {
        ExprParameter::new("x", Type::Row(self.entity.clone()))
    }

    /// Builds a quoted single-parameter lambda over a row of this query.
    pub fn key(&self, f: impl FnOnce(Expr) -> Expr) -> Expr {
        let row = self.row();
        let body = f(row.clone().into());
        Expr::quote(Expr::lambda(vec![row], body))
    }

    fn chain(self, op: QueryOperator, args: impl IntoIterator<Item = Expr>) -> Queryable {
        let expr = self.call(op, Type::queryable(self.entity.clone()), args);
        Queryable { expr, ..self }
    }

    fn call(&self, op: QueryOperator, ret: Type, args: impl IntoIterator<Item = Expr>) -> Expr {
        let args = std::iter::once(self.expr.clone()).chain(args).collect();
        Expr::call(op.method().returning(ret), None, args)
    }

    pub fn filter(self, predicate: impl FnOnce(Expr) -> Expr) -> Queryable {
        let predicate = self.key(predicate);
        self.chain(QueryOperator::Where, [predicate])
    }

    pub fn order_by(self, key: impl FnOnce(Expr) -> Expr) -> Queryable {
        let key = self.key(key);
        self.chain(QueryOperator::OrderBy, [key])
    }

    pub fn order_by_descending(self, key: impl FnOnce(Expr) -> Expr) -> Queryable {
        let key = self.key(key);
        self.chain(QueryOperator::OrderByDescending, [key])
    }

    pub fn take(self, count: i32) -> Queryable {
        self.chain(QueryOperator::Take, [Expr::constant(count)])
    }

    pub fn take_percent(self, percent: f64) -> Queryable {
        self.chain(QueryOperator::TakePercent, [Expr::constant(percent)])
    }

    pub fn skip(self, count: i32) -> Queryable {
        self.chain(QueryOperator::Skip, [Expr::constant(count)])
    }

    /// Returns the rows in random order.
    pub fn randomize(self) -> Queryable {
        self.chain(QueryOperator::Randomize, [])
    }

    /// Keeps the first row of every group of rows sharing `key`.
    pub fn distinct(self, key: impl FnOnce(Expr) -> Expr) -> Queryable {
        let key = self.key(key);
        self.chain(QueryOperator::Distinct, [key])
    }

    /// Like [`Queryable::distinct`], picking the row that sorts first by
    /// `order` within each group.
    pub fn distinct_by(
        self,
        key: impl FnOnce(Expr) -> Expr,
        order: impl FnOnce(Expr) -> Expr,
        direction: SortOrder,
    ) -> Queryable {
        let key = self.key(key);
        let order = self.key(order);
        self.chain(
            QueryOperator::DistinctOrdered,
            [key, order, Expr::constant(direction)],
        )
    }

    /// Keeps every row of a group sharing `key` except the first one.
    pub fn duplicates(self, key: impl FnOnce(Expr) -> Expr) -> Queryable {
        let key = self.key(key);
        self.chain(QueryOperator::Duplicates, [key])
    }

    pub fn duplicates_by(
        self,
        key: impl FnOnce(Expr) -> Expr,
        order: impl FnOnce(Expr) -> Expr,
        direction: SortOrder,
    ) -> Queryable {
        let key = self.key(key);
        let order = self.key(order);
        self.chain(
            QueryOperator::DuplicatesOrdered,
            [key, order, Expr::constant(direction)],
        )
    }

    pub fn duplicates_by_then(
        self,
        key: impl FnOnce(Expr) -> Expr,
        order: impl FnOnce(Expr) -> Expr,
        direction: SortOrder,
        then: impl FnOnce(Expr) -> Expr,
        then_direction: SortOrder,
    ) -> Queryable {
        let key = self.key(key);
        let order = self.key(order);
        let then = self.key(then);
        self.chain(
            QueryOperator::DuplicatesOrderedThen,
            [
                key,
                order,
                Expr::constant(direction),
                then,
                Expr::constant(then_direction),
            ],
        )
    }

    /// Projects every row. The selector returns one value, or a
    /// [`Expr::new_array`] of values for several columns.
    pub fn select(self, selector: impl FnOnce(Expr) -> Expr) -> Queryable {
        let selector = self.key(selector);
        self.chain(QueryOperator::Select, [selector])
    }

    pub fn union(self, other: Queryable) -> Queryable {
        self.chain(QueryOperator::Union, [other.expr])
    }

    /// Rows that have a match in `other` on every key. Keys are built with
    /// [`Queryable::key`].
    pub fn intersect(self, other: Queryable, keys: Vec<Expr>) -> Queryable {
        let keys = Expr::new_array(Type::lambda(Type::Object), keys);
        self.chain(QueryOperator::Intersect, [other.expr, keys])
    }

    /// Rows that have no match in `other` on the keys.
    pub fn except(self, other: Queryable, keys: Vec<Expr>) -> Queryable {
        let keys = Expr::new_array(Type::lambda(Type::Object), keys);
        self.chain(QueryOperator::Except, [other.expr, keys])
    }

    pub fn first(self) -> Expr {
        let ret = Type::Row(self.entity.clone());
        self.call(QueryOperator::First, ret, [])
    }

    pub fn first_where(self, predicate: impl FnOnce(Expr) -> Expr) -> Expr {
        let predicate = self.key(predicate);
        let ret = Type::Row(self.entity.clone());
        self.call(QueryOperator::FirstWhere, ret, [predicate])
    }

    pub fn first_or_default(self) -> Expr {
        let ret = Type::nullable(Type::Row(self.entity.clone()));
        self.call(QueryOperator::FirstOrDefault, ret, [])
    }

    pub fn first_or_default_where(self, predicate: impl FnOnce(Expr) -> Expr) -> Expr {
        let predicate = self.key(predicate);
        let ret = Type::nullable(Type::Row(self.entity.clone()));
        self.call(QueryOperator::FirstOrDefaultWhere, ret, [predicate])
    }

    pub fn any(self) -> Expr {
        self.call(QueryOperator::Any, Type::Bool, [])
    }

    pub fn any_where(self, predicate: impl FnOnce(Expr) -> Expr) -> Expr {
        let predicate = self.key(predicate);
        self.call(QueryOperator::AnyWhere, Type::Bool, [predicate])
    }

    pub fn count(self) -> Expr {
        self.call(QueryOperator::Count, Type::I32, [])
    }

    pub fn count_where(self, predicate: impl FnOnce(Expr) -> Expr) -> Expr {
        let predicate = self.key(predicate);
        self.call(QueryOperator::CountWhere, Type::I32, [predicate])
    }

    /// Inserts the rows of this query into the table backing `target`.
    pub fn copy_to(self, target: Queryable) -> Expr {
        self.call(QueryOperator::CopyTo, Type::I32, [target.expr])
    }

    /// Updates the rows of this query from the matching rows of `source`.
    ///
    /// Rows are matched on `key`. With [`SyncFields::Include`] only `fields`
    /// are copied; with [`SyncFields::Exclude`] every mapped column except
    /// `fields` is.
    pub fn sync_with(
        self,
        source: Queryable,
        key: Expr,
        mode: SyncFields,
        fields: Vec<Expr>,
    ) -> Expr {
        let fields = Expr::new_array(Type::lambda(Type::Object), fields);
        self.call(
            QueryOperator::SyncWith,
            Type::I32,
            [source.expr, key, Expr::constant(mode), fields],
        )
    }
}

impl From<Queryable> for Expr {
    fn from(value: Queryable) -> Self {
        value.expr
    }
}
