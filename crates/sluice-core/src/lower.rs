//! Lowering of query expressions into the relational model.
//!
//! [`LowerQuery`] walks the chain of query operators. Operator arguments are
//! handed to [`LowerPredicate`] (filters) and [`LowerProjection`] (keys,
//! selectors and orderings).

mod predicate;
pub use predicate::LowerPredicate;

mod projection;
pub use projection::LowerProjection;

mod query;
pub use query::LowerQuery;

use crate::{expr::Expr, model::Query, schema::ResolveTable, Result};
use tracing::debug;

/// Lowers a query expression, resolving tables through `tables`.
pub fn lower_query(expr: &Expr, tables: &dyn ResolveTable) -> Result<Query> {
    let query = LowerQuery::new(tables).lower(expr)?;
    debug!(
        entity = query.select.entity(),
        operation = query.operation_name(),
        "lowered query"
    );
    Ok(query)
}
