/// Row limit rendered as `TOP (n)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Top {
    Count(u64),
    Percent(f64),
}

impl Top {
    pub fn as_count(self) -> Option<u64> {
        match self {
            Top::Count(count) => Some(count),
            Top::Percent(_) => None,
        }
    }
}
