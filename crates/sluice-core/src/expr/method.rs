use super::{ExprCall, HashAlgorithm, Type};

/// Describes a callable method: its name, declaring type and signature.
///
/// Calls in an expression tree carry the method they invoke. Recognising a
/// call compares it against a reference `Method` by shape, see
/// [`Method::matches`].
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,

    /// The type declaring the method
    pub declaring: Type,

    pub params: Vec<Param>,

    /// The return type
    pub ret: Type,

    /// Static methods take every operand as an argument and have no target
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl Method {
    pub fn instance(
        declaring: Type,
        name: impl Into<String>,
        params: impl IntoIterator<Item = Param>,
        ret: Type,
    ) -> Self {
        Self {
            name: name.into(),
            declaring,
            params: params.into_iter().collect(),
            ret,
            is_static: false,
        }
    }

    pub fn static_method(
        declaring: Type,
        name: impl Into<String>,
        params: impl IntoIterator<Item = Param>,
        ret: Type,
    ) -> Self {
        Self {
            is_static: true,
            ..Self::instance(declaring, name, params, ret)
        }
    }

    /// Returns a copy of the method with a different return type.
    pub fn returning(mut self, ret: Type) -> Self {
        self.ret = ret;
        self
    }

    /// Returns `true` if `call` has the same shape as this reference method.
    ///
    /// Shapes match when the name, the static flag and the arity agree, the
    /// call's declaring type is assignable to the reference's, and every
    /// argument's static type is assignable to the corresponding reference
    /// parameter type. Names alone are never enough.
    pub fn matches(&self, call: &ExprCall) -> bool {
        self.name == call.method.name
            && self.is_static == call.method.is_static
            && self.is_static == call.target.is_none()
            && self.params.len() == call.args.len()
            && self.declaring.is_assignable_from(&call.method.declaring)
            && self
                .params
                .iter()
                .zip(&call.args)
                .all(|(param, arg)| param.ty.is_assignable_from(&arg.unquote().ty()))
    }

    fn string(name: &str, params: impl IntoIterator<Item = Param>, ret: Type) -> Self {
        Self::instance(Type::String, name, params, ret)
    }

    pub fn starts_with() -> Self {
        Self::string("StartsWith", [Param::new("value", Type::String)], Type::Bool)
    }

    pub fn contains() -> Self {
        Self::string("Contains", [Param::new("value", Type::String)], Type::Bool)
    }

    pub fn ends_with() -> Self {
        Self::string("EndsWith", [Param::new("value", Type::String)], Type::Bool)
    }

    pub fn to_upper() -> Self {
        Self::string("ToUpper", [], Type::String)
    }

    pub fn to_lower() -> Self {
        Self::string("ToLower", [], Type::String)
    }

    pub fn trim() -> Self {
        Self::string("Trim", [], Type::String)
    }

    pub fn trim_start() -> Self {
        Self::string("TrimStart", [], Type::String)
    }

    pub fn trim_end() -> Self {
        Self::string("TrimEnd", [], Type::String)
    }

    /// `ToString()`, callable on any value.
    pub fn to_string() -> Self {
        Self::instance(Type::Object, "ToString", [], Type::String)
    }

    pub fn substring() -> Self {
        Self::string(
            "Substring",
            [Param::new("startIndex", Type::I32)],
            Type::String,
        )
    }

    pub fn substring_len() -> Self {
        Self::string(
            "Substring",
            [
                Param::new("startIndex", Type::I32),
                Param::new("length", Type::I32),
            ],
            Type::String,
        )
    }

    pub fn replace() -> Self {
        Self::string(
            "Replace",
            [
                Param::new("oldValue", Type::String),
                Param::new("newValue", Type::String),
            ],
            Type::String,
        )
    }

    pub fn insert() -> Self {
        Self::string(
            "Insert",
            [
                Param::new("startIndex", Type::I32),
                Param::new("value", Type::String),
            ],
            Type::String,
        )
    }

    pub fn index_of() -> Self {
        Self::string("IndexOf", [Param::new("value", Type::String)], Type::I32)
    }

    pub fn index_of_from() -> Self {
        Self::string(
            "IndexOf",
            [
                Param::new("value", Type::String),
                Param::new("startIndex", Type::I32),
            ],
            Type::I32,
        )
    }

    /// `Hash(value, algorithm)`
    pub fn hash() -> Self {
        Self::static_method(
            Type::Object,
            "Hash",
            [
                Param::new("value", Type::Object),
                Param::new("algorithm", HashAlgorithm::ty()),
            ],
            Type::Bytes,
        )
    }

    /// `ToHex(bytes)`
    pub fn to_hex() -> Self {
        Self::static_method(
            Type::Object,
            "ToHex",
            [Param::new("value", Type::Bytes)],
            Type::String,
        )
    }

    /// Indexer on a dynamic bag, `bag[key]`.
    pub fn get_item() -> Self {
        Self::instance(
            Type::DynamicBag,
            "get_Item",
            [Param::new("key", Type::String)],
            Type::Object,
        )
    }
}
