use std::fmt;

/// Static type of an expression node.
#[derive(Clone, PartialEq)]
pub enum Type {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Bytes,
    Uuid,

    /// Accepts a value of any type
    Object,

    /// No value
    Unit,

    /// A named enumeration, such as `SortOrder`
    Enum(String),

    /// A value that may also be null
    Nullable(Box<Type>),

    Array(Box<Type>),

    /// A lambda, described by the type of its body
    Lambda(Box<Type>),

    /// A query over rows of the named entity. `None` matches any entity.
    Queryable(Option<String>),

    /// One row of the named entity
    Row(String),

    /// Per-row loosely-typed property collection
    DynamicBag,
}

impl Type {
    pub fn nullable(ty: Type) -> Type {
        match ty {
            Type::Nullable(_) => ty,
            ty => Type::Nullable(Box::new(ty)),
        }
    }

    pub fn array(item: Type) -> Type {
        Type::Array(Box::new(item))
    }

    pub fn lambda(ret: Type) -> Type {
        Type::Lambda(Box::new(ret))
    }

    pub fn queryable(entity: impl Into<String>) -> Type {
        Type::Queryable(Some(entity.into()))
    }

    pub fn enumeration(name: impl Into<String>) -> Type {
        Type::Enum(name.into())
    }

    /// The type with any nullable wrapper removed.
    pub fn non_nullable(&self) -> &Type {
        match self {
            Type::Nullable(ty) => &**ty,
            ty => ty,
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Type::Nullable(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.non_nullable(), Type::String)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.non_nullable(), Type::Bool)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.non_nullable(),
            Type::I16 | Type::I32 | Type::I64 | Type::F32 | Type::F64
        )
    }

    pub fn is_dynamic_bag(&self) -> bool {
        matches!(self, Type::DynamicBag)
    }

    pub fn is_queryable(&self) -> bool {
        matches!(self, Type::Queryable(_))
    }

    /// Returns `true` when a value of type `other` can be passed where `self`
    /// is expected.
    ///
    /// Mirrors implicit conversions: any type widens to `Object`, `T` widens to
    /// `Nullable(T)`, narrower integers widen to wider numeric types and a
    /// queryable of any entity matches `Queryable(None)`.
    pub fn is_assignable_from(&self, other: &Type) -> bool {
        use Type::*;

        match (self, other) {
            (Object, _) => true,
            (Nullable(expected), Nullable(actual)) => expected.is_assignable_from(actual),
            (Nullable(expected), actual) => expected.is_assignable_from(actual),
            (Queryable(None), Queryable(_)) => true,
            (Lambda(expected), Lambda(actual)) => expected.is_assignable_from(actual),
            (Array(expected), Array(actual)) => expected.is_assignable_from(actual),
            (I32, I16) | (I64, I16 | I32) | (F64, I16 | I32 | I64 | F32) | (F32, I16) => true,
            (expected, actual) => expected == actual,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::I16 => f.write_str("i16"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::F32 => f.write_str("f32"),
            Type::F64 => f.write_str("f64"),
            Type::String => f.write_str("string"),
            Type::Bytes => f.write_str("bytes"),
            Type::Uuid => f.write_str("uuid"),
            Type::Object => f.write_str("object"),
            Type::Unit => f.write_str("()"),
            Type::Enum(name) => f.write_str(name),
            Type::Nullable(ty) => write!(f, "{ty:?}?"),
            Type::Array(ty) => write!(f, "{ty:?}[]"),
            Type::Lambda(ty) => write!(f, "fn -> {ty:?}"),
            Type::Queryable(Some(entity)) => write!(f, "Queryable<{entity}>"),
            Type::Queryable(None) => f.write_str("Queryable<_>"),
            Type::Row(entity) => f.write_str(entity),
            Type::DynamicBag => f.write_str("dynamic"),
        }
    }
}
