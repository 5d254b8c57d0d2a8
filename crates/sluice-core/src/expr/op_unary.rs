use super::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum UnaryOp {
    Not,
    Negate,

    /// Wraps a lambda passed as a query operator argument. Transparent to
    /// lowering.
    Quote,

    /// Converts the operand to the given type
    Convert(Type),
}

impl UnaryOp {
    pub fn is_not(&self) -> bool {
        matches!(self, Self::Not)
    }

    pub fn is_quote(&self) -> bool {
        matches!(self, Self::Quote)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Not => "Not",
            Self::Negate => "Negate",
            Self::Quote => "Quote",
            Self::Convert(_) => "Convert",
        }
    }
}
