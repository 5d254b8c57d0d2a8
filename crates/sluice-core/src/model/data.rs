use super::{Alias, Select};

/// The `FROM` source of a select.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Table(Table),
    Query(DataQuery),
}

/// A mapped table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Entity the table is mapped from, used for column lookups
    pub entity: String,

    /// Table name in the database
    pub name: String,

    pub alias: Alias,
}

/// A derived table over one select, or the union of several.
#[derive(Debug, Clone, PartialEq)]
pub struct DataQuery {
    /// Union branches, most recently added first.
    pub selects: Vec<Select>,

    pub alias: Alias,
}

impl Table {
    pub fn new(entity: impl Into<String>, name: impl Into<String>) -> Table {
        Table {
            entity: entity.into(),
            name: name.into(),
            alias: Alias::next(),
        }
    }
}

impl DataQuery {
    pub fn new(select: Select) -> DataQuery {
        DataQuery {
            selects: vec![select],
            alias: Alias::next(),
        }
    }

    pub fn is_union(&self) -> bool {
        self.selects.len() > 1
    }
}

impl Data {
    pub fn alias(&self) -> Alias {
        match self {
            Data::Table(table) => table.alias,
            Data::Query(query) => query.alias,
        }
    }

    /// The entity rows of this source belong to. A union takes the entity of
    /// its first branch.
    pub fn entity(&self) -> Option<&str> {
        match self {
            Data::Table(table) => Some(&table.entity),
            Data::Query(query) => query.selects.last()?.entity(),
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Data::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_query(&self) -> Option<&DataQuery> {
        match self {
            Data::Query(query) => Some(query),
            _ => None,
        }
    }
}

impl From<Table> for Data {
    fn from(value: Table) -> Self {
        Data::Table(value)
    }
}

impl From<DataQuery> for Data {
    fn from(value: DataQuery) -> Self {
        Data::Query(value)
    }
}
