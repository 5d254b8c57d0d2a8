use super::{ExprCall, Method, Param, SortOrder, SyncFields, Type};
use std::sync::OnceLock;

/// The query operator call shapes lowering recognises.
///
/// Every operator is a static method declared on `Queryable` whose first
/// parameter is the source query. Overloads are distinct variants so a call
/// is identified by its full shape, not only its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Where,
    OrderBy,
    OrderByDescending,
    Take,
    TakePercent,
    Skip,
    First,
    FirstWhere,
    FirstOrDefault,
    FirstOrDefaultWhere,
    Any,
    AnyWhere,
    Count,
    CountWhere,
    Distinct,
    DistinctOrdered,
    Duplicates,
    DuplicatesOrdered,
    DuplicatesOrderedThen,
    Randomize,
    Select,
    Union,
    Intersect,
    Except,
    CopyTo,
    SyncWith,
}

impl QueryOperator {
    pub const ALL: [QueryOperator; 26] = [
        Self::Where,
        Self::OrderBy,
        Self::OrderByDescending,
        Self::Take,
        Self::TakePercent,
        Self::Skip,
        Self::First,
        Self::FirstWhere,
        Self::FirstOrDefault,
        Self::FirstOrDefaultWhere,
        Self::Any,
        Self::AnyWhere,
        Self::Count,
        Self::CountWhere,
        Self::Distinct,
        Self::DistinctOrdered,
        Self::Duplicates,
        Self::DuplicatesOrdered,
        Self::DuplicatesOrderedThen,
        Self::Randomize,
        Self::Select,
        Self::Union,
        Self::Intersect,
        Self::Except,
        Self::CopyTo,
        Self::SyncWith,
    ];

    /// Finds the operator whose reference shape `call` matches.
    pub fn recognize(call: &ExprCall) -> Option<QueryOperator> {
        static REFERENCES: OnceLock<Vec<(QueryOperator, Method)>> = OnceLock::new();

        REFERENCES
            .get_or_init(|| Self::ALL.iter().map(|op| (*op, op.method())).collect())
            .iter()
            .find(|(_, method)| method.matches(call))
            .map(|(op, _)| *op)
    }

    pub fn name(self) -> &'static str {
        use QueryOperator::*;

        match self {
            Where => "Where",
            OrderBy => "OrderBy",
            OrderByDescending => "OrderByDescending",
            Take => "Take",
            TakePercent => "TakePercent",
            Skip => "Skip",
            First | FirstWhere => "First",
            FirstOrDefault | FirstOrDefaultWhere => "FirstOrDefault",
            Any | AnyWhere => "Any",
            Count | CountWhere => "Count",
            Distinct | DistinctOrdered => "Distinct",
            Duplicates | DuplicatesOrdered | DuplicatesOrderedThen => "Duplicates",
            Randomize => "Randomize",
            Select => "Select",
            Union => "Union",
            Intersect => "Intersect",
            Except => "Except",
            CopyTo => "CopyTo",
            SyncWith => "SyncWith",
        }
    }

    /// The reference method describing this operator's shape.
    pub fn method(self) -> Method {
        use QueryOperator::*;

        let source = || Param::new("source", Type::Queryable(None));
        let other = |name: &str| Param::new(name, Type::Queryable(None));
        let predicate = || Param::new("predicate", Type::lambda(Type::Bool));
        let selector = |name: &str| Param::new(name, Type::lambda(Type::Object));
        let selectors = |name: &str| Param::new(name, Type::array(Type::lambda(Type::Object)));
        let order = |name: &str| Param::new(name, SortOrder::ty());

        let (params, ret) = match self {
            Where => (vec![source(), predicate()], Type::Queryable(None)),
            OrderBy | OrderByDescending => {
                (vec![source(), selector("keySelector")], Type::Queryable(None))
            }
            Take | Skip => (
                vec![source(), Param::new("count", Type::I32)],
                Type::Queryable(None),
            ),
            TakePercent => (
                vec![source(), Param::new("percent", Type::F64)],
                Type::Queryable(None),
            ),
            First | FirstOrDefault => (vec![source()], Type::Object),
            FirstWhere | FirstOrDefaultWhere => (vec![source(), predicate()], Type::Object),
            Any => (vec![source()], Type::Bool),
            AnyWhere => (vec![source(), predicate()], Type::Bool),
            Count => (vec![source()], Type::I32),
            CountWhere => (vec![source(), predicate()], Type::I32),
            Distinct | Duplicates => (vec![source(), selector("keySelector")], Type::Queryable(None)),
            DistinctOrdered | DuplicatesOrdered => (
                vec![
                    source(),
                    selector("keySelector"),
                    selector("orderSelector"),
                    order("order"),
                ],
                Type::Queryable(None),
            ),
            DuplicatesOrderedThen => (
                vec![
                    source(),
                    selector("keySelector"),
                    selector("orderSelector"),
                    order("order"),
                    selector("thenSelector"),
                    order("thenOrder"),
                ],
                Type::Queryable(None),
            ),
            Randomize => (vec![source()], Type::Queryable(None)),
            Select => (vec![source(), selector("selector")], Type::Queryable(None)),
            Union => (vec![source(), other("other")], Type::Queryable(None)),
            Intersect | Except => (
                vec![source(), other("other"), selectors("keySelectors")],
                Type::Queryable(None),
            ),
            CopyTo => (vec![source(), other("target")], Type::I32),
            SyncWith => (
                vec![
                    source(),
                    other("other"),
                    selector("keySelector"),
                    Param::new("fields", SyncFields::ty()),
                    selectors("fieldSelectors"),
                ],
                Type::I32,
            ),
        };

        Method::static_method(Type::Queryable(None), self.name(), params, ret)
    }
}
