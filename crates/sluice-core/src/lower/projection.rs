use crate::{
    expr::{
        Expr, ExprBinary, ExprCall, ExprConstant, ExprMember, ExprNewArray, ExprParameter,
        ExprUnary, HashAlgorithm, MemberKind, Method, Type, UnaryOp, Value,
    },
    model::{Alias, Field, Function, Projection},
    visit::{self, Context, Parent, Visit},
    Error, Result,
};
use std::sync::OnceLock;

/// Lowers a value expression into a [`Projection`].
///
/// The state is the output slot: visiting a node returns the projection it
/// lowered to.
#[derive(Debug, Default)]
pub struct LowerProjection {
    /// Table stamped on every produced field
    table: Option<Alias>,
}

/// Call shapes lowered into a [`Function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionShape {
    StartsWith,
    Contains,
    EndsWith,
    ToUpper,
    ToLower,
    Trim,
    TrimStart,
    TrimEnd,
    ToString,
    Substring,
    SubstringLength,
    Replace,
    Insert,
    IndexOf,
    IndexOfFrom,
    Hash,
    ToHex,
}

impl FunctionShape {
    const ALL: [FunctionShape; 17] = [
        Self::StartsWith,
        Self::Contains,
        Self::EndsWith,
        Self::ToUpper,
        Self::ToLower,
        Self::Trim,
        Self::TrimStart,
        Self::TrimEnd,
        Self::ToString,
        Self::Substring,
        Self::SubstringLength,
        Self::Replace,
        Self::Insert,
        Self::IndexOf,
        Self::IndexOfFrom,
        Self::Hash,
        Self::ToHex,
    ];

    fn method(self) -> Method {
        match self {
            Self::StartsWith => Method::starts_with(),
            Self::Contains => Method::contains(),
            Self::EndsWith => Method::ends_with(),
            Self::ToUpper => Method::to_upper(),
            Self::ToLower => Method::to_lower(),
            Self::Trim => Method::trim(),
            Self::TrimStart => Method::trim_start(),
            Self::TrimEnd => Method::trim_end(),
            Self::ToString => Method::to_string(),
            Self::Substring => Method::substring(),
            Self::SubstringLength => Method::substring_len(),
            Self::Replace => Method::replace(),
            Self::Insert => Method::insert(),
            Self::IndexOf => Method::index_of(),
            Self::IndexOfFrom => Method::index_of_from(),
            Self::Hash => Method::hash(),
            Self::ToHex => Method::to_hex(),
        }
    }

    fn recognize(call: &ExprCall) -> Option<FunctionShape> {
        static REFERENCES: OnceLock<Vec<(FunctionShape, Method)>> = OnceLock::new();

        REFERENCES
            .get_or_init(|| Self::ALL.iter().map(|s| (*s, s.method())).collect())
            .iter()
            .find(|(_, method)| method.matches(call))
            .map(|(shape, _)| *shape)
    }
}

impl LowerProjection {
    pub fn new() -> LowerProjection {
        LowerProjection::default()
    }

    /// Lowers fields as read from `table` rather than the innermost table in
    /// scope.
    pub fn with_table(table: Option<Alias>) -> LowerProjection {
        LowerProjection { table }
    }

    pub fn lower(&mut self, expr: &Expr) -> Result<Projection> {
        self.visit(expr, None)?
            .ok_or_else(|| Error::expression_not_supported(expr.kind_name()))
    }

    fn lower_child<'a>(&mut self, expr: &'a Expr, parent: Parent<'a>) -> Result<Projection> {
        self.visit_expr(expr, Context::child(parent, None))?
            .ok_or_else(|| Error::expression_not_supported(expr.kind_name()))
    }

    fn field(&self, name: &str, key: Option<&str>) -> Projection {
        Projection::Field(Field {
            name: name.to_string(),
            key: key.map(str::to_string),
            table: self.table,
        })
    }

    /// Lowers the instance a method is called on.
    fn target<'a>(&mut self, call: &'a ExprCall) -> Result<Projection> {
        match call.target() {
            Some(target) => self.lower_child(target, Parent::Call(call)),
            None => Err(Error::expression_not_supported("Call")),
        }
    }

    fn arg<'a>(&mut self, call: &'a ExprCall, i: usize) -> Result<Projection> {
        self.lower_child(&call.args[i], Parent::Call(call))
    }

    fn function(&mut self, shape: FunctionShape, call: &ExprCall) -> Result<Function> {
        use FunctionShape::*;

        Ok(match shape {
            StartsWith => Function::StartsWith {
                text: self.target(call)?,
                value: self.arg(call, 0)?,
            },
            Contains => Function::Contains {
                text: self.target(call)?,
                value: self.arg(call, 0)?,
            },
            EndsWith => Function::EndsWith {
                text: self.target(call)?,
                value: self.arg(call, 0)?,
            },
            ToUpper => Function::ToUpper(self.target(call)?),
            ToLower => Function::ToLower(self.target(call)?),
            Trim => Function::Trim(self.target(call)?),
            TrimStart => Function::TrimStart(self.target(call)?),
            TrimEnd => Function::TrimEnd(self.target(call)?),
            ToString => Function::ToString(self.target(call)?),
            Substring => Function::Substring {
                text: self.target(call)?,
                start: self.arg(call, 0)?,
            },
            SubstringLength => Function::SubstringLength {
                text: self.target(call)?,
                start: self.arg(call, 0)?,
                length: self.arg(call, 1)?,
            },
            Replace => Function::Replace {
                text: self.target(call)?,
                old: self.arg(call, 0)?,
                new: self.arg(call, 1)?,
            },
            Insert => Function::Insert {
                text: self.target(call)?,
                index: self.arg(call, 0)?,
                value: self.arg(call, 1)?,
            },
            IndexOf => Function::IndexOf {
                text: self.target(call)?,
                value: self.arg(call, 0)?,
            },
            IndexOfFrom => Function::IndexOfFrom {
                text: self.target(call)?,
                value: self.arg(call, 0)?,
                start: self.arg(call, 1)?,
            },
            Hash => {
                let algorithm = call.args[1].eval_const()?;
                let Some(algorithm) = HashAlgorithm::from_value(&algorithm) else {
                    return Err(Error::expression_evaluation_failed(format!(
                        "{algorithm:?} is not a hash algorithm"
                    )));
                };
                Function::Hash {
                    value: self.arg(call, 0)?,
                    algorithm,
                }
            }
            ToHex => Function::ToHex(self.arg(call, 0)?),
        })
    }
}

/// Returns `true` for the lambda parameter standing for a row.
fn is_row(expr: &Expr) -> bool {
    matches!(expr, Expr::Parameter(param) if matches!(param.ty, Type::Row(_)))
}

/// If `expr` is the row's dynamic bag, returns the bag property name.
fn dynamic_bag(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::Member(member)
            if member.member.ty.is_dynamic_bag() && member.target().is_some_and(is_row) =>
        {
            Some(&member.member.name)
        }
        _ => None,
    }
}

impl Visit for LowerProjection {
    type State = Option<Projection>;

    fn visit_expr<'a>(&mut self, i: &'a Expr, cx: Context<'a, Self::State>) -> Result<Self::State> {
        // Anything that does not depend on the row folds into a constant
        if i.is_evaluable() {
            return Ok(Some(Projection::constant(i.eval_const()?)));
        }

        visit::visit_expr(self, i, cx)
    }

    fn visit_binary<'a>(
        &mut self,
        i: &'a ExprBinary,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        if !i.op.is_coalesce() {
            return Err(Error::operator_not_supported(i.op.name()));
        }

        let parent = Parent::Binary(i);
        Ok(Some(Projection::function(Function::Coalesce {
            first: self.lower_child(&i.lhs, parent)?,
            second: self.lower_child(&i.rhs, parent)?,
        })))
    }

    fn visit_call<'a>(
        &mut self,
        i: &'a ExprCall,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        if Method::get_item().matches(i) {
            if let Some(bag) = i.target().and_then(dynamic_bag) {
                let key = i.args[0].eval_const()?;
                let Value::String(key) = key else {
                    return Err(Error::expression_evaluation_failed(format!(
                        "dynamic key must be a string, got {key:?}"
                    )));
                };
                return Ok(Some(self.field(bag, Some(key.as_str()))));
            }
        }

        match FunctionShape::recognize(i) {
            Some(shape) => Ok(Some(Projection::function(self.function(shape, i)?))),
            None => Err(Error::query_operator_not_supported(
                &i.method.name,
                i.param_names(),
            )),
        }
    }

    fn visit_constant<'a>(
        &mut self,
        i: &'a ExprConstant,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        Ok(Some(Projection::constant(i.value.clone())))
    }

    fn visit_member<'a>(
        &mut self,
        i: &'a ExprMember,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        let name = i.member.name.as_str();

        let Some(target) = i.target() else {
            return Err(Error::expression_not_supported(format!("Member({name})")));
        };

        if i.member.kind != MemberKind::Property {
            return Err(Error::member_type_not_supported(name, i.member.kind.name()));
        }

        if is_row(target) {
            if i.member.ty.is_dynamic_bag() {
                return Err(Error::expression_not_supported(format!("Member({name})")));
            }
            return Ok(Some(self.field(name, None)));
        }

        if let Some(bag) = dynamic_bag(target) {
            return Ok(Some(self.field(bag, Some(name))));
        }

        let parent = Parent::Member(i);
        match name {
            "Length" if target.ty().is_string() => Ok(Some(Projection::function(
                Function::Length(self.lower_child(target, parent)?),
            ))),
            // Nullable scalars lower to the same column as their value
            "Value" if target.ty().is_nullable() => self.lower_child(target, parent).map(Some),
            _ => Err(Error::expression_not_supported(format!("Member({name})"))),
        }
    }

    fn visit_new_array<'a>(
        &mut self,
        _i: &'a ExprNewArray,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        Err(Error::expression_not_supported("NewArray"))
    }

    fn visit_parameter<'a>(
        &mut self,
        i: &'a ExprParameter,
        _cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        match i.ty {
            Type::Row(_) => Ok(Some(Projection::Wildcard)),
            _ => Err(Error::expression_not_supported(format!(
                "Parameter({})",
                i.name
            ))),
        }
    }

    fn visit_unary<'a>(
        &mut self,
        i: &'a ExprUnary,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        match &i.op {
            UnaryOp::Quote => self.visit_expr(&i.operand, cx),
            // Converting between `T` and `T?` leaves the value unchanged
            UnaryOp::Convert(ty) if ty.non_nullable() == i.operand.ty().non_nullable() => {
                self.visit_expr(&i.operand, cx)
            }
            UnaryOp::Convert(ty) => Ok(Some(Projection::function(Function::Convert {
                value: self.lower_child(&i.operand, Parent::Unary(i))?,
                ty: ty.clone(),
            }))),
            op => Err(Error::operator_not_supported(op.name())),
        }
    }
}
