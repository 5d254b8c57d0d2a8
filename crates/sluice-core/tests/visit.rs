use pretty_assertions::assert_eq;
use sluice_core::{
    expr::{Expr, ExprMember, ExprParameter, Queryable, Type},
    visit::{self, Context, Visit},
    Result,
};

/// Collects the name of every member access, innermost first.
#[derive(Default)]
struct Members;

impl Visit for Members {
    type State = Vec<String>;

    fn visit_member<'a>(
        &mut self,
        i: &'a ExprMember,
        cx: Context<'a, Self::State>,
    ) -> Result<Self::State> {
        let mut names = visit::visit_member(self, i, cx)?;
        names.push(i.member.name.clone());
        Ok(names)
    }
}

/// Counts the parameters found directly under a logical operator.
struct LogicalParents(usize);

impl Visit for LogicalParents {
    type State = ();

    fn visit_member<'a>(&mut self, i: &'a ExprMember, cx: Context<'a, ()>) -> Result<()> {
        if cx.in_logical() {
            self.0 += 1;
        }
        visit::visit_member(self, i, cx)
    }
}

fn row() -> Expr {
    ExprParameter::new("x", Type::Row("Person".into())).into()
}

#[test]
fn default_traversal_reaches_every_node() {
    let expr = Queryable::table("Person")
        .filter(|x| {
            x.clone()
                .property("name", Type::String)
                .eq("a")
                .and(x.property("age", Type::I32).gt(1))
        })
        .order_by(|x| x.property("age", Type::I32))
        .into_expr();

    let names = Members.visit(&expr, vec![]).unwrap();
    assert_eq!(names, vec!["name", "age", "age"]);
}

#[test]
fn state_threads_through_nested_members() {
    let expr = row()
        .property("address", Type::Object)
        .property("city", Type::String);

    let names = Members.visit(&expr, vec![]).unwrap();
    assert_eq!(names, vec!["address", "city"]);
}

#[test]
fn parent_is_visible_to_children() {
    let expr = row()
        .property("active", Type::Bool)
        .and(row().property("admin", Type::Bool))
        .or(row().property("age", Type::I32).gt(1));

    let mut visitor = LogicalParents(0);
    visitor.visit(&expr, ()).unwrap();

    // `age` sits under `>`, not directly under `Or`
    assert_eq!(visitor.0, 2);
}

#[test]
fn unsupported_nodes_fail_by_default() {
    let expr = Expr::conditional(true, 1, 2);
    let err = Members.visit(&expr, vec![]).unwrap_err();
    assert!(err.is_expression_not_supported());
}
