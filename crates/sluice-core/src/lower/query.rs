use super::{LowerPredicate, LowerProjection};
use crate::{
    expr::{
        Expr, ExprCall, ExprConstant, ExprUnary, QueryOperator as Op, SortOrder, SyncFields,
        UnaryOp,
    },
    model::{
        Alias, Data, DataQuery, Direction, Distinct, Duplicates, Fetch, Operation, Operator,
        OrderBy, Projection, Query, Select, SetOperation, SetOperationKind, SyncWith, Table, Top,
    },
    schema::ResolveTable,
    visit::{self, Context, Parent, Visit},
    Error, Result,
};
use tracing::trace;

/// Lowers a chain of query operator calls into a [`Query`].
///
/// Calls are visited source first, so each operator is applied to the select
/// its source already produced.
pub struct LowerQuery<'a> {
    tables: &'a dyn ResolveTable,
}

impl<'a> LowerQuery<'a> {
    pub fn new(tables: &'a dyn ResolveTable) -> LowerQuery<'a> {
        LowerQuery { tables }
    }

    pub fn lower(&mut self, expr: &Expr) -> Result<Query> {
        let query = self.visit(expr, Query::default())?;

        if query.select.data.is_none() {
            return Err(Error::invalid_statement(
                "query does not read from a mapped table",
            ));
        }

        Ok(query)
    }

    /// Lowers a nested query argument, such as the other side of a union.
    fn lower_select(&mut self, expr: &Expr) -> Result<Select> {
        let query = LowerQuery::new(self.tables).lower(expr)?;

        match query.operation {
            Operation::Select => Ok(query.select),
            _ => Err(Error::invalid_statement(
                "a nested query cannot copy or sync rows",
            )),
        }
    }

    fn apply(&mut self, op: Op, call: &ExprCall, mut query: Query) -> Result<Query> {
        let select = &mut query.select;
        let args = &call.args;

        match op {
            Op::Where => {
                nest_if_paged(select);
                select.add_filter(predicate(&args[1])?);
            }
            Op::OrderBy | Op::OrderByDescending => {
                nest_if_paged(select);
                let projection = key(&args[1], None)?;
                let direction = if op == Op::OrderBy {
                    Direction::Asc
                } else {
                    Direction::Desc
                };

                // The most recent ordering becomes the primary sort
                select.order_by.insert(0, OrderBy { projection, direction });
            }
            Op::Take => {
                let count = count(&args[1])?;
                if matches!(select.top, Some(Top::Percent(_))) {
                    nest(select);
                }
                select.top = Some(Top::Count(match select.top {
                    Some(Top::Count(existing)) => existing.min(count),
                    _ => count,
                }));
            }
            Op::TakePercent => {
                let percent = args[1].eval_const()?.as_f64().ok_or_else(|| {
                    Error::expression_evaluation_failed("TakePercent requires a number")
                })?;
                nest_if_paged(select);
                select.top = Some(Top::Percent(percent));
            }
            Op::Skip => {
                let count = count(&args[1])?;
                if count > 0 {
                    if matches!(select.top, Some(Top::Percent(_))) {
                        nest(select);
                    }
                    if let Some(Top::Count(top)) = select.top {
                        select.top = Some(Top::Count(top.saturating_sub(count)));
                    }
                    select.start = match select.start {
                        0 => count + 1,
                        start => start + count,
                    };
                }
            }
            Op::First | Op::FirstOrDefault | Op::Any | Op::Count => {
                select.fetch = Some(fetch(op));
            }
            Op::FirstWhere | Op::FirstOrDefaultWhere | Op::AnyWhere | Op::CountWhere => {
                nest_if_paged(select);
                select.add_filter(predicate(&args[1])?);
                select.fetch = Some(fetch(op));
            }
            Op::Distinct | Op::DistinctOrdered => {
                nest_if_paged(select);
                let key = key(&args[1], None)?;
                let order = match op {
                    Op::DistinctOrdered => Some(order_by(&args[2], &args[3])?),
                    _ => None,
                };

                // Later calls partition first
                select.distinct.insert(0, Distinct { key, order });
            }
            Op::Duplicates | Op::DuplicatesOrdered | Op::DuplicatesOrderedThen => {
                nest_if_paged(select);
                let key = key(&args[1], None)?;
                let mut order = vec![];
                if args.len() >= 4 {
                    order.push(order_by(&args[2], &args[3])?);
                }
                if args.len() >= 6 {
                    order.push(order_by(&args[4], &args[5])?);
                }

                select.duplicates = Some(Duplicates { key, order });
            }
            Op::Randomize => {
                nest_if_paged(select);
                select.randomize = true;
            }
            Op::Select => {
                if !select.projection.is_empty() {
                    nest(select);
                }
                select.projection = selectors(&args[1])?
                    .into_iter()
                    .filter(|projection| *projection != Projection::Wildcard)
                    .collect();
            }
            Op::Union => {
                let other = self.lower_select(&args[1])?;
                union(select, other);
            }
            Op::Intersect | Op::Except => {
                let other = self.lower_select(&args[1])?;
                let kind = match op {
                    Op::Intersect => SetOperationKind::Intersect,
                    _ => SetOperationKind::Compliment,
                };

                nest_if_paged(select);
                let set_operation = set_operation(select, kind, other, &args[2])?;
                select.set_operations.push(set_operation);
            }
            Op::CopyTo => {
                let target = self.resolve(&args[1]).ok_or_else(|| {
                    Error::invalid_statement("CopyTo target is not a mapped table")
                })?;
                query.operation = Operation::CopyTo(target);
            }
            Op::SyncWith => {
                let source = self.lower_select(&args[1])?;
                let mode = args[3].eval_const()?;
                let mode = SyncFields::from_value(&mode).ok_or_else(|| {
                    Error::expression_evaluation_failed(format!("{mode:?} is not a sync mode"))
                })?;

                query.operation = Operation::SyncWith(Box::new(SyncWith {
                    source,
                    source_key: key(&args[2], None)?,
                    target_key: key(&args[2], None)?,
                    mode,
                    fields: lambdas(&args[4])?
                        .iter()
                        .map(|field| key(field, None))
                        .collect::<Result<_>>()?,
                }));
            }
        }

        Ok(query)
    }

    fn resolve(&self, expr: &Expr) -> Option<Table> {
        let Expr::Constant(constant) = expr.unquote() else {
            return None;
        };
        let table = self.tables.resolve_table(&constant.value)?;
        Some(Table::new(table.entity, table.table))
    }
}

impl Visit for LowerQuery<'_> {
    type State = Query;

    fn visit_call<'a>(
        &mut self,
        i: &'a ExprCall,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        let Some(op) = Op::recognize(i) else {
            return Err(Error::query_operator_not_supported(
                &i.method.name,
                i.param_names(),
            ));
        };

        // Resolve the source before applying this operator
        let query = self.visit_expr(&i.args[0], Context::child(Parent::Call(i), cx.state))?;
        self.apply(op, i, query)
    }

    fn visit_constant<'a>(
        &mut self,
        i: &'a ExprConstant,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        let mut query = cx.state;

        if let Some(table) = self.tables.resolve_table(&i.value) {
            if query.select.data.is_some() {
                return Err(Error::invalid_statement("query reads from two sources"));
            }
            query.select.data = Some(Table::new(table.entity, table.table).into());
        }

        Ok(query)
    }

    fn visit_unary<'a>(
        &mut self,
        i: &'a ExprUnary,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        match i.op {
            UnaryOp::Quote => self.visit_expr(&i.operand, cx),
            _ => visit::visit_unary(self, i, cx),
        }
    }
}

fn nest(select: &mut Select) {
    *select = std::mem::take(select).nest();
}

/// Operators that filter, order or partition apply to the rows a limited
/// select returns, so the limited select becomes a derived table first.
fn nest_if_paged(select: &mut Select) {
    if select.is_paged() {
        nest(select);
    }
}

fn union(select: &mut Select, other: Select) {
    if select.is_union_container() {
        if let Some(Data::Query(query)) = &mut select.data {
            trace!(branches = query.selects.len() + 1, "extending union");
            query.selects.insert(0, other);
            return;
        }
    }

    // Operators chained after the union apply to the union as a whole, so
    // the union becomes the source of a fresh outer select.
    trace!("starting union");
    let current = std::mem::take(select);
    *select = Select::new(DataQuery {
        selects: vec![other, current],
        alias: Alias::next(),
    });
}

fn set_operation(
    select: &Select,
    kind: SetOperationKind,
    other: Select,
    keys: &Expr,
) -> Result<SetOperation> {
    let Some(outer) = select.alias() else {
        return Err(Error::invalid_statement("set operation without a source"));
    };

    let mut sub = if other.is_paged() || other.has_layers() || !other.projection.is_empty() {
        other.nest()
    } else {
        other
    };

    let mut conditions = vec![];
    for key_expr in lambdas(keys)? {
        let inner = key(key_expr, None)?;
        let correlated = key(key_expr, Some(outer))?;
        sub.projection.push(inner.clone());
        conditions.push(Operator::equal(inner, correlated));
    }

    sub.top = Some(Top::Count(1));
    if let Some(condition) = Operator::and_all(conditions) {
        sub.add_filter(condition);
    }

    trace!(?kind, keys = sub.projection.len(), "correlated set operation");
    Ok(SetOperation { kind, select: sub })
}

fn fetch(op: Op) -> Fetch {
    match op {
        Op::First | Op::FirstWhere => Fetch::First,
        Op::FirstOrDefault | Op::FirstOrDefaultWhere => Fetch::FirstOrDefault,
        Op::Any | Op::AnyWhere => Fetch::Any,
        _ => Fetch::Count,
    }
}

fn predicate(expr: &Expr) -> Result<Operator> {
    LowerPredicate::new().lower(expr)
}

fn key(expr: &Expr, table: Option<Alias>) -> Result<Projection> {
    LowerProjection::with_table(table).lower(expr)
}

fn order_by(key_expr: &Expr, order: &Expr) -> Result<OrderBy> {
    let order = order.eval_const()?;
    let Some(order) = SortOrder::from_value(&order) else {
        return Err(Error::expression_evaluation_failed(format!(
            "{order:?} is not a sort order"
        )));
    };

    Ok(OrderBy {
        projection: key(key_expr, None)?,
        direction: order.into(),
    })
}

/// Row counts below zero behave as zero.
fn count(expr: &Expr) -> Result<u64> {
    let count = expr.eval_const()?;
    let Some(count) = count.as_i64() else {
        return Err(Error::expression_evaluation_failed(format!(
            "{count:?} is not a row count"
        )));
    };
    Ok(u64::try_from(count).unwrap_or(0))
}

/// The lambdas of an array argument.
fn lambdas(expr: &Expr) -> Result<&[Expr]> {
    match expr.unquote() {
        Expr::NewArray(array) => Ok(&array.items),
        other => Err(Error::expression_not_supported(other.kind_name())),
    }
}

/// The projections a `Select` selector returns: one per array item, or one
/// for a single value.
fn selectors(selector: &Expr) -> Result<Vec<Projection>> {
    let body = match selector.unquote() {
        Expr::Lambda(lambda) => &*lambda.body,
        other => other,
    };

    match body {
        Expr::NewArray(array) => array.items.iter().map(|item| key(item, None)).collect(),
        body => Ok(vec![key(body, None)?]),
    }
}
