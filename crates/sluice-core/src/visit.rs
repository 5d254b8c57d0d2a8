//! Tree walking over [`Expr`] nodes.
//!
//! [`Visit`] has one method per node kind. Each default method calls the
//! free function of the same name, which performs the default traversal, so
//! an implementation overrides the kinds it cares about and can still fall
//! back to the default for the rest.
//!
//! State is threaded by value: every method receives the state in its
//! [`Context`] and returns the state after the node was visited.

#![allow(unused_variables)]

use crate::{
    expr::{
        Expr, ExprBinary, ExprCall, ExprConditional, ExprConstant, ExprExtension, ExprLambda,
        ExprMember, ExprNewArray, ExprParameter, ExprTypeIs, ExprUnary,
    },
    Error, Result,
};

/// The node being visited, as seen by its children.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    Binary(&'a ExprBinary),
    Call(&'a ExprCall),
    Lambda(&'a ExprLambda),
    Member(&'a ExprMember),
    NewArray(&'a ExprNewArray),
    Unary(&'a ExprUnary),
}

pub struct Context<'a, S> {
    /// The node whose child is being visited. `None` at the root.
    pub parent: Option<Parent<'a>>,

    pub state: S,
}

impl Parent<'_> {
    /// Returns `true` for a logical `And`/`Or` node.
    pub fn is_logical(&self) -> bool {
        matches!(self, Parent::Binary(expr) if expr.op.is_logical())
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self, Parent::Lambda(_))
    }
}

impl<'a, S> Context<'a, S> {
    pub fn root(state: S) -> Context<'a, S> {
        Context {
            parent: None,
            state,
        }
    }

    /// Context for a child of `parent`, carrying `state`.
    pub fn child(parent: Parent<'a>, state: S) -> Context<'a, S> {
        Context {
            parent: Some(parent),
            state,
        }
    }

    /// Returns `true` when the parent is a logical `And`/`Or` node.
    pub fn in_logical(&self) -> bool {
        self.parent.is_some_and(|parent| parent.is_logical())
    }
}

pub trait Visit {
    type State;

    /// Visits `expr` from the root with `state`, returning the final state.
    fn visit(&mut self, expr: &Expr, state: Self::State) -> Result<Self::State>
    where
        Self: Sized,
    {
        self.visit_expr(expr, Context::root(state))
    }

    fn visit_expr<'a>(&mut self, i: &'a Expr, cx: Context<'a, Self::State>) -> Result<Self::State> {
        visit_expr(self, i, cx)
    }

    fn visit_binary<'a>(
        &mut self,
        i: &'a ExprBinary,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_binary(self, i, cx)
    }

    fn visit_call<'a>(
        &mut self,
        i: &'a ExprCall,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_call(self, i, cx)
    }

    fn visit_conditional<'a>(
        &mut self,
        i: &'a ExprConditional,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_conditional(self, i, cx)
    }

    fn visit_constant<'a>(
        &mut self,
        i: &'a ExprConstant,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_constant(self, i, cx)
    }

    fn visit_extension<'a>(
        &mut self,
        i: &'a ExprExtension,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_extension(self, i, cx)
    }

    fn visit_lambda<'a>(
        &mut self,
        i: &'a ExprLambda,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_lambda(self, i, cx)
    }

    fn visit_member<'a>(
        &mut self,
        i: &'a ExprMember,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_member(self, i, cx)
    }

    fn visit_new_array<'a>(
        &mut self,
        i: &'a ExprNewArray,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_new_array(self, i, cx)
    }

    fn visit_parameter<'a>(
        &mut self,
        i: &'a ExprParameter,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_parameter(self, i, cx)
    }

    fn visit_type_is<'a>(
        &mut self,
        i: &'a ExprTypeIs,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_type_is(self, i, cx)
    }

    fn visit_unary<'a>(
        &mut self,
        i: &'a ExprUnary,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        visit_unary(self, i, cx)
    }
}

pub fn visit_expr<'a, V>(v: &mut V, node: &'a Expr, cx: Context<'a, V::State>) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    match node {
        Expr::Binary(expr) => v.visit_binary(expr, cx),
        Expr::Call(expr) => v.visit_call(expr, cx),
        Expr::Conditional(expr) => v.visit_conditional(expr, cx),
        Expr::Constant(expr) => v.visit_constant(expr, cx),
        Expr::Extension(expr) => v.visit_extension(expr, cx),
        Expr::Lambda(expr) => v.visit_lambda(expr, cx),
        Expr::Member(expr) => v.visit_member(expr, cx),
        Expr::NewArray(expr) => v.visit_new_array(expr, cx),
        Expr::Parameter(expr) => v.visit_parameter(expr, cx),
        Expr::TypeIs(expr) => v.visit_type_is(expr, cx),
        Expr::Unary(expr) => v.visit_unary(expr, cx),
    }
}

pub fn visit_binary<'a, V>(
    v: &mut V,
    node: &'a ExprBinary,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    let parent = Parent::Binary(node);
    let state = v.visit_expr(&node.lhs, Context::child(parent, cx.state))?;
    v.visit_expr(&node.rhs, Context::child(parent, state))
}

pub fn visit_call<'a, V>(
    v: &mut V,
    node: &'a ExprCall,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    let parent = Parent::Call(node);
    let mut state = cx.state;

    if let Some(target) = &node.target {
        state = v.visit_expr(target, Context::child(parent, state))?;
    }

    for arg in &node.args {
        state = v.visit_expr(arg, Context::child(parent, state))?;
    }

    Ok(state)
}

pub fn visit_conditional<'a, V>(
    v: &mut V,
    node: &'a ExprConditional,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    Err(Error::expression_not_supported("Conditional"))
}

pub fn visit_constant<'a, V>(
    v: &mut V,
    node: &'a ExprConstant,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    Ok(cx.state)
}

pub fn visit_extension<'a, V>(
    v: &mut V,
    node: &'a ExprExtension,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    Err(Error::expression_not_supported(format!(
        "Extension({})",
        node.name
    )))
}

pub fn visit_lambda<'a, V>(
    v: &mut V,
    node: &'a ExprLambda,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.body, Context::child(Parent::Lambda(node), cx.state))
}

pub fn visit_member<'a, V>(
    v: &mut V,
    node: &'a ExprMember,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    match &node.target {
        Some(target) => v.visit_expr(target, Context::child(Parent::Member(node), cx.state)),
        None => Ok(cx.state),
    }
}

pub fn visit_new_array<'a, V>(
    v: &mut V,
    node: &'a ExprNewArray,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    let parent = Parent::NewArray(node);
    let mut state = cx.state;

    for item in &node.items {
        state = v.visit_expr(item, Context::child(parent, state))?;
    }

    Ok(state)
}

pub fn visit_parameter<'a, V>(
    v: &mut V,
    node: &'a ExprParameter,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    Ok(cx.state)
}

pub fn visit_type_is<'a, V>(
    v: &mut V,
    node: &'a ExprTypeIs,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    Err(Error::expression_not_supported("TypeIs"))
}

pub fn visit_unary<'a, V>(
    v: &mut V,
    node: &'a ExprUnary,
    cx: Context<'a, V::State>,
) -> Result<V::State>
where
    V: Visit + ?Sized,
{
    v.visit_expr(&node.operand, Context::child(Parent::Unary(node), cx.state))
}
