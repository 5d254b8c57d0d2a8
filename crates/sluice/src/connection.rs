use crate::{async_trait, Error, Result, ResultShape, Statement};

use sluice_core::expr::Value;

/// Executes rendered statements against a database.
///
/// Implementations own everything about the round trip: the network,
/// transactions, command timeouts and cancellation.
#[async_trait]
pub trait Connection: Send {
    /// Execute a statement, reading its result as `stmt.result` describes.
    async fn exec(&mut self, stmt: &Statement) -> Result<Response>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Rows read by the statement, each a record of its columns
    Rows(Vec<Value>),

    /// The single value of a scalar statement
    Scalar(Value),

    /// Number of rows impacted by the statement
    Count(u64),
}

impl Response {
    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn into_rows(self) -> Result<Vec<Value>> {
        match self {
            Self::Rows(rows) => Ok(rows),
            _ => Err(self.unexpected("rows")),
        }
    }

    pub fn into_scalar(self) -> Result<Value> {
        match self {
            Self::Scalar(value) => Ok(value),
            _ => Err(self.unexpected("a scalar")),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        match self {
            Self::Count(count) => Ok(count),
            _ => Err(self.unexpected("a row count")),
        }
    }

    /// Checks the response is one `shape` can produce.
    pub(crate) fn check(self, shape: ResultShape) -> Result<Response> {
        let rows = match (&self, shape) {
            (Self::Scalar(_), ResultShape::Scalar) => return Ok(self),
            (Self::Count(_), ResultShape::None) => return Ok(self),
            (Self::Rows(rows), ResultShape::Single) => rows.len() == 1,
            (Self::Rows(rows), ResultShape::SingleOrNone) => rows.len() <= 1,
            (Self::Rows(_), ResultShape::Multiple) => true,
            _ => false,
        };

        if rows {
            Ok(self)
        } else {
            Err(self.unexpected(shape_name(shape)))
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        let actual = match self {
            Self::Rows(rows) => format!("{} rows", rows.len()),
            Self::Scalar(_) => "a scalar".to_string(),
            Self::Count(_) => "a row count".to_string(),
        };
        sluice_core::err!("connection returned {actual}, expected {expected}")
    }
}

fn shape_name(shape: ResultShape) -> &'static str {
    match shape {
        ResultShape::None => "a row count",
        ResultShape::Scalar => "a scalar",
        ResultShape::Single => "exactly one row",
        ResultShape::SingleOrNone => "at most one row",
        ResultShape::Multiple => "rows",
    }
}
