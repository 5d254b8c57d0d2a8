//! SQL Server rendering of the sluice relational model.
//!
//! [`Serializer`] turns a [`sluice_core::model::Statement`] into a
//! [`Statement`]: the SQL text, its named parameters and the shape of the
//! result the text produces.

pub mod serializer;
pub use serializer::{Config, Params, Serializer};

mod statement;
pub use statement::{ResultShape, Statement};
