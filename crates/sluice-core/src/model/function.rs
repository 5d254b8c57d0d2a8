use super::Projection;
use crate::expr::{HashAlgorithm, Type};

/// A scalar function over sub-projections.
///
/// Indices are 0-based, as in the query expression they were lowered from.
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    StartsWith { text: Projection, value: Projection },
    Contains { text: Projection, value: Projection },
    EndsWith { text: Projection, value: Projection },
    ToUpper(Projection),
    ToLower(Projection),
    Trim(Projection),
    TrimStart(Projection),
    TrimEnd(Projection),
    ToString(Projection),
    Substring {
        text: Projection,
        start: Projection,
    },
    SubstringLength {
        text: Projection,
        start: Projection,
        length: Projection,
    },
    Replace {
        text: Projection,
        old: Projection,
        new: Projection,
    },
    Insert {
        text: Projection,
        index: Projection,
        value: Projection,
    },
    IndexOf { text: Projection, value: Projection },
    IndexOfFrom {
        text: Projection,
        value: Projection,
        start: Projection,
    },
    Hash {
        value: Projection,
        algorithm: HashAlgorithm,
    },
    ToHex(Projection),
    Length(Projection),
    Coalesce { first: Projection, second: Projection },
    Convert { value: Projection, ty: Type },
}

impl Function {
    pub fn name(&self) -> &'static str {
        use Function::*;

        match self {
            StartsWith { .. } => "StartsWith",
            Contains { .. } => "Contains",
            EndsWith { .. } => "EndsWith",
            ToUpper(_) => "ToUpper",
            ToLower(_) => "ToLower",
            Trim(_) => "Trim",
            TrimStart(_) => "TrimStart",
            TrimEnd(_) => "TrimEnd",
            ToString(_) => "ToString",
            Substring { .. } | SubstringLength { .. } => "Substring",
            Replace { .. } => "Replace",
            Insert { .. } => "Insert",
            IndexOf { .. } | IndexOfFrom { .. } => "IndexOf",
            Hash { .. } => "Hash",
            ToHex(_) => "ToHex",
            Length(_) => "Length",
            Coalesce { .. } => "Coalesce",
            Convert { .. } => "Convert",
        }
    }

    /// Functions producing a boolean. The dialect has no boolean scalar, so
    /// these need a `CASE` wrapper wherever a value is expected.
    pub fn is_predicate(&self) -> bool {
        matches!(
            self,
            Function::StartsWith { .. } | Function::Contains { .. } | Function::EndsWith { .. }
        )
    }

    pub fn operands_mut(&mut self) -> Vec<&mut Projection> {
        use Function::*;

        match self {
            StartsWith { text, value } | Contains { text, value } | EndsWith { text, value } => {
                vec![text, value]
            }
            ToUpper(text) | ToLower(text) | Trim(text) | TrimStart(text) | TrimEnd(text)
            | ToString(text) | ToHex(text) | Length(text) => vec![text],
            Substring { text, start } => vec![text, start],
            SubstringLength {
                text,
                start,
                length,
            } => vec![text, start, length],
            Replace { text, old, new } => vec![text, old, new],
            Insert { text, index, value } => vec![text, index, value],
            IndexOf { text, value } => vec![text, value],
            IndexOfFrom { text, value, start } => vec![text, value, start],
            Hash { value, .. } => vec![value],
            Coalesce { first, second } => vec![first, second],
            Convert { value, .. } => vec![value],
        }
    }
}
