//! Query expressions and their lowering into a relational model.
//!
//! An [`expr::Expr`] tree describes a query the way a caller composes it:
//! chained operator calls over a mapped table with lambdas for filters, keys
//! and selectors. [`lower::lower_query`] turns such a tree into a
//! [`model::Query`], which a statement writer renders into SQL.

mod error;
pub use error::Error;

pub mod expr;

pub mod lower;
pub use lower::lower_query;

pub mod model;

pub mod schema;
pub use schema::Schema;

pub mod visit;

/// A Result type alias that uses sluice's [`Error`] type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
