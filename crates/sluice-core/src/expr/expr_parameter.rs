use super::{Expr, Type};

/// A lambda parameter, e.g. the `x` in `x => x.Age > 30`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprParameter {
    pub name: String,
    pub ty: Type,
}

impl ExprParameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl Expr {
    pub fn parameter(name: impl Into<String>, ty: Type) -> Self {
        ExprParameter::new(name, ty).into()
    }
}

impl From<ExprParameter> for Expr {
    fn from(value: ExprParameter) -> Self {
        Self::Parameter(value)
    }
}
