use super::{
    Alias, Data, DataQuery, Distinct, Duplicates, Fetch, Operator, OrderBy, Projection,
    SetOperation, Top,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// Row limit
    pub top: Option<Top>,

    /// 1-based row number of the first returned row. `0` disables paging.
    pub start: u64,

    pub fetch: Option<Fetch>,

    /// Order rows randomly
    pub randomize: bool,

    /// Selected values. Empty selects every column.
    pub projection: Vec<Projection>,

    /// The `FROM` source
    pub data: Option<Data>,

    /// Query filter
    pub filter: Option<Operator>,

    /// Distinct specs, most recently applied first
    pub distinct: Vec<Distinct>,

    pub duplicates: Option<Duplicates>,

    /// Sort order, primary sort first
    pub order_by: Vec<OrderBy>,

    pub set_operations: Vec<SetOperation>,
}

impl Select {
    pub fn new(data: impl Into<Data>) -> Select {
        Select {
            data: Some(data.into()),
            ..Select::default()
        }
    }

    /// Wraps this select as the derived-table source of a new, empty select.
    pub fn nest(self) -> Select {
        Select::new(DataQuery::new(self))
    }

    pub fn alias(&self) -> Option<Alias> {
        self.data.as_ref().map(Data::alias)
    }

    /// The entity this select reads rows of.
    pub fn entity(&self) -> Option<&str> {
        self.data.as_ref()?.entity()
    }

    /// AND-combines `filter` with the existing filter. The existing filter
    /// stays on the left.
    pub fn add_filter(&mut self, filter: Operator) {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Operator::and(existing, filter),
            None => filter,
        });
    }

    /// Returns `true` if rows are limited or skipped.
    pub fn is_paged(&self) -> bool {
        self.top.is_some() || self.start > 0
    }

    /// Returns `true` if rendering needs derived tables around the base
    /// select.
    pub fn has_layers(&self) -> bool {
        !self.distinct.is_empty() || self.duplicates.is_some() || self.start > 0
    }

    /// A select that only gathers union branches, with nothing applied on
    /// top of them yet.
    pub fn is_union_container(&self) -> bool {
        matches!(&self.data, Some(Data::Query(query)) if query.is_union())
            && self.top.is_none()
            && self.start == 0
            && self.fetch.is_none()
            && !self.randomize
            && self.projection.is_empty()
            && self.filter.is_none()
            && self.distinct.is_empty()
            && self.duplicates.is_none()
            && self.order_by.is_empty()
            && self.set_operations.is_empty()
    }
}
