mod enum_values;
pub use enum_values::{HashAlgorithm, SortOrder, SyncFields};

mod eval;

mod expr_binary;
pub use expr_binary::ExprBinary;

mod expr_call;
pub use expr_call::ExprCall;

mod expr_conditional;
pub use expr_conditional::ExprConditional;

mod expr_constant;
pub use expr_constant::ExprConstant;

mod expr_extension;
pub use expr_extension::ExprExtension;

mod expr_lambda;
pub use expr_lambda::ExprLambda;

mod expr_member;
pub use expr_member::{ExprMember, Member, MemberKind};

mod expr_new_array;
pub use expr_new_array::ExprNewArray;

mod expr_parameter;
pub use expr_parameter::ExprParameter;

mod expr_type_is;
pub use expr_type_is::ExprTypeIs;

mod expr_unary;
pub use expr_unary::ExprUnary;

mod method;
pub use method::{Method, Param};

mod op_binary;
pub use op_binary::BinaryOp;

mod op_unary;
pub use op_unary::UnaryOp;

mod query_operator;
pub use query_operator::QueryOperator;

mod queryable;
pub use queryable::Queryable;

mod ty;
pub use ty::Type;

mod value;
pub use value::{Value, ValueEnum, ValueRecord};

/// A node of a query expression tree.
///
/// Trees are immutable once built; every visitor walks them by shared
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binary operation, including logical, comparison, arithmetic and
    /// null-coalescing operators
    Binary(ExprBinary),

    /// Method call, instance or static
    Call(ExprCall),

    /// `test ? if_true : if_false`
    Conditional(ExprConditional),

    /// A constant value
    Constant(ExprConstant),

    /// A node kind defined outside of this crate
    Extension(ExprExtension),

    /// A lambda with its parameters and body
    Lambda(ExprLambda),

    /// Property or field access
    Member(ExprMember),

    /// Array construction
    NewArray(ExprNewArray),

    /// Reference to a lambda parameter
    Parameter(ExprParameter),

    /// Runtime type test
    TypeIs(ExprTypeIs),

    /// Unary operation, including conversions and quoting
    Unary(ExprUnary),
}

impl Expr {
    /// The node kind, used when reporting unsupported expressions.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Binary(_) => "Binary",
            Self::Call(_) => "Call",
            Self::Conditional(_) => "Conditional",
            Self::Constant(_) => "Constant",
            Self::Extension(_) => "Extension",
            Self::Lambda(_) => "Lambda",
            Self::Member(_) => "Member",
            Self::NewArray(_) => "NewArray",
            Self::Parameter(_) => "Parameter",
            Self::TypeIs(_) => "TypeIs",
            Self::Unary(_) => "Unary",
        }
    }

    /// The static type of the value this expression produces.
    pub fn ty(&self) -> Type {
        match self {
            Self::Binary(expr) => expr.ty(),
            Self::Call(expr) => expr.method.ret.clone(),
            Self::Conditional(expr) => expr.if_true.ty(),
            Self::Constant(expr) => expr.ty.clone(),
            Self::Extension(expr) => expr.ty.clone(),
            Self::Lambda(expr) => Type::lambda(expr.body.ty()),
            Self::Member(expr) => expr.member.ty.clone(),
            Self::NewArray(expr) => Type::array(expr.ty.clone()),
            Self::Parameter(expr) => expr.ty.clone(),
            Self::TypeIs(_) => Type::Bool,
            Self::Unary(expr) => expr.ty(),
        }
    }

    /// Strips any `Quote` wrappers.
    pub fn unquote(&self) -> &Expr {
        let mut expr = self;
        while let Self::Unary(ExprUnary {
            op: UnaryOp::Quote,
            operand,
        }) = expr
        {
            expr = operand;
        }
        expr
    }
}
