use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,

    /// Non short-circuiting logical and
    And,
    AndAlso,

    /// Non short-circuiting logical or
    Or,
    OrElse,

    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    /// `lhs ?? rhs`
    Coalesce,

    ExclusiveOr,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    /// `And`, `AndAlso`, `Or` and `OrElse`
    pub fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::AndAlso | Self::Or | Self::OrElse)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
        )
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo
        )
    }

    pub fn is_coalesce(self) -> bool {
        matches!(self, Self::Coalesce)
    }

    pub fn name(self) -> &'static str {
        use BinaryOp::*;

        match self {
            Add => "Add",
            Subtract => "Subtract",
            Multiply => "Multiply",
            Divide => "Divide",
            Modulo => "Modulo",
            And => "And",
            AndAlso => "AndAlso",
            Or => "Or",
            OrElse => "OrElse",
            Equal => "Equal",
            NotEqual => "NotEqual",
            LessThan => "LessThan",
            LessThanOrEqual => "LessThanOrEqual",
            GreaterThan => "GreaterThan",
            GreaterThanOrEqual => "GreaterThanOrEqual",
            Coalesce => "Coalesce",
            ExclusiveOr => "ExclusiveOr",
            LeftShift => "LeftShift",
            RightShift => "RightShift",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;

        match self {
            Add => "+".fmt(f),
            Subtract => "-".fmt(f),
            Multiply => "*".fmt(f),
            Divide => "/".fmt(f),
            Modulo => "%".fmt(f),
            And => "&".fmt(f),
            AndAlso => "&&".fmt(f),
            Or => "|".fmt(f),
            OrElse => "||".fmt(f),
            Equal => "==".fmt(f),
            NotEqual => "!=".fmt(f),
            LessThan => "<".fmt(f),
            LessThanOrEqual => "<=".fmt(f),
            GreaterThan => ">".fmt(f),
            GreaterThanOrEqual => ">=".fmt(f),
            Coalesce => "??".fmt(f),
            ExclusiveOr => "^".fmt(f),
            LeftShift => "<<".fmt(f),
            RightShift => ">>".fmt(f),
        }
    }
}

impl fmt::Debug for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
