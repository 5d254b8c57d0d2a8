use super::Projection;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub projection: Projection,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl OrderBy {
    pub fn asc(projection: impl Into<Projection>) -> OrderBy {
        OrderBy {
            projection: projection.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(projection: impl Into<Projection>) -> OrderBy {
        OrderBy {
            projection: projection.into(),
            direction: Direction::Desc,
        }
    }
}

impl From<crate::expr::SortOrder> for Direction {
    fn from(value: crate::expr::SortOrder) -> Self {
        match value {
            crate::expr::SortOrder::Ascending => Direction::Asc,
            crate::expr::SortOrder::Descending => Direction::Desc,
        }
    }
}
