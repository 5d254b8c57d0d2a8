/// How a select's rows are reduced to its result.
///
/// A select fetches at most one of these; an unset fetch returns every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// The first row, which must exist
    First,

    /// The first row, if any
    FirstOrDefault,

    /// Whether any row exists
    Any,

    /// The number of rows
    Count,
}
