//! The relational model lowering produces and the statement writer consumes.
//!
//! Nodes are plain values built fresh for every lowering call. Once handed to
//! the writer they are only read.

mod alias;
pub use alias::Alias;

mod data;
pub use data::{Data, DataQuery, Table};

mod delete;
pub use delete::Delete;

mod distinct;
pub use distinct::Distinct;

mod duplicates;
pub use duplicates::Duplicates;

mod fetch;
pub use fetch::Fetch;

mod filter;
pub use filter::Filter;

mod function;
pub use function::Function;

mod insert;
pub use insert::{Insert, InsertSource};

mod operand;
pub use operand::Operand;

mod operator;
pub use operator::{Operator, OperatorKind};

mod order_by;
pub use order_by::{Direction, OrderBy};

mod projection;
pub use projection::{Constant, Field, Projection};

mod query;
pub use query::{Operation, Query, SyncWith};

mod select;
pub use select::Select;

mod set_operation;
pub use set_operation::{SetOperation, SetOperationKind};

mod statement;
pub use statement::Statement;

mod sync;
pub use sync::Sync;

mod top;
pub use top::Top;

mod update;
pub use update::Update;

pub use crate::expr::{HashAlgorithm, SyncFields as SyncMode};
