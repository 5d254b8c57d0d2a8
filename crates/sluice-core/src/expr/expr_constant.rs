use super::{Expr, Type, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprConstant {
    pub value: Value,

    /// Static type. Kept separately from the value so a null constant can
    /// still carry the type it stands for.
    pub ty: Type,
}

impl Expr {
    /// A constant whose type is inferred from the value.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = value.infer_ty();
        ExprConstant { value, ty }.into()
    }

    pub fn typed_constant(value: impl Into<Value>, ty: Type) -> Self {
        ExprConstant {
            value: value.into(),
            ty,
        }
        .into()
    }

    /// A typed null constant.
    pub fn null(ty: Type) -> Self {
        Expr::typed_constant(Value::Null, Type::nullable(ty))
    }
}

impl From<ExprConstant> for Expr {
    fn from(value: ExprConstant) -> Self {
        Self::Constant(value)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::constant(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::constant(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::constant(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::constant(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::constant(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::constant(value)
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::constant(value)
    }
}
