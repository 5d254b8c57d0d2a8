use super::{Expr, Type};

/// Property or field access, e.g. `x.Name`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMember {
    /// The instance being accessed. `None` for static members.
    pub target: Option<Box<Expr>>,
    pub member: Member,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Field,
    Method,
}

impl MemberKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Property => "Property",
            Self::Field => "Field",
            Self::Method => "Method",
        }
    }
}

impl ExprMember {
    pub fn is_property(&self) -> bool {
        self.member.kind == MemberKind::Property
    }

    pub fn target(&self) -> Option<&Expr> {
        self.target.as_deref()
    }
}

impl Expr {
    pub fn member(self, name: impl Into<String>, kind: MemberKind, ty: Type) -> Self {
        ExprMember {
            target: Some(Box::new(self)),
            member: Member {
                name: name.into(),
                kind,
                ty,
            },
        }
        .into()
    }

    /// Property access on this expression.
    pub fn property(self, name: impl Into<String>, ty: Type) -> Self {
        self.member(name, MemberKind::Property, ty)
    }

    /// Field access on this expression.
    pub fn field(self, name: impl Into<String>, ty: Type) -> Self {
        self.member(name, MemberKind::Field, ty)
    }

    /// `text.Length`
    pub fn length(self) -> Self {
        self.property("Length", Type::I32)
    }

    /// `nullable.Value`
    pub fn value(self) -> Self {
        let ty = self.ty().non_nullable().clone();
        self.property("Value", ty)
    }

    /// `nullable.HasValue`
    pub fn has_value(self) -> Self {
        self.property("HasValue", Type::Bool)
    }
}

impl From<ExprMember> for Expr {
    fn from(value: ExprMember) -> Self {
        Self::Member(value)
    }
}
