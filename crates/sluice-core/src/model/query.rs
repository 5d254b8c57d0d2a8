use super::{Insert, Projection, Select, Statement, Sync, SyncMode, Table};

/// The result of lowering a query expression: the select assembled so far
/// and what to do with its rows.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Query {
    pub select: Select,
    pub operation: Operation,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Operation {
    /// Return the rows
    #[default]
    Select,

    /// Insert the rows into another table
    CopyTo(Table),

    /// Update the rows from another query
    SyncWith(Box<SyncWith>),
}

/// A pending `SyncWith`, completed with the target select once the whole
/// chain is lowered.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncWith {
    pub source: Select,
    pub source_key: Projection,
    pub target_key: Projection,
    pub mode: SyncMode,
    pub fields: Vec<Projection>,
}

impl Query {
    pub fn operation_name(&self) -> &'static str {
        match self.operation {
            Operation::Select => "Select",
            Operation::CopyTo(_) => "CopyTo",
            Operation::SyncWith(_) => "SyncWith",
        }
    }

    pub fn into_statement(self) -> Statement {
        match self.operation {
            Operation::Select => self.select.into(),
            Operation::CopyTo(target) => Insert::copy(self.select, &target).into(),
            Operation::SyncWith(sync) => {
                let SyncWith {
                    source,
                    source_key,
                    target_key,
                    mode,
                    fields,
                } = *sync;

                Sync {
                    source,
                    target: self.select,
                    source_key,
                    target_key,
                    mode,
                    fields,
                }
                .into()
            }
        }
    }
}
