use super::{Expr, HashAlgorithm, Method};

/// A method call.
///
/// Query operators are static extension methods, so their source query is
/// the first argument and `target` is `None`. Instance methods such as
/// `string.StartsWith` carry the instance in `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    pub method: Method,
    pub target: Option<Box<Expr>>,
    pub args: Vec<Expr>,
}

impl ExprCall {
    pub fn target(&self) -> Option<&Expr> {
        self.target.as_deref()
    }

    /// Names of the method's declared parameters.
    pub fn param_names(&self) -> Vec<String> {
        self.method.params.iter().map(|p| p.name.clone()).collect()
    }
}

impl Expr {
    pub fn call(method: Method, target: Option<Expr>, args: Vec<Expr>) -> Self {
        ExprCall {
            method,
            target: target.map(Box::new),
            args,
        }
        .into()
    }

    fn call_on(self, method: Method, args: Vec<Expr>) -> Self {
        Expr::call(method, Some(self), args)
    }

    pub fn starts_with(self, value: impl Into<Self>) -> Self {
        self.call_on(Method::starts_with(), vec![value.into()])
    }

    pub fn contains(self, value: impl Into<Self>) -> Self {
        self.call_on(Method::contains(), vec![value.into()])
    }

    pub fn ends_with(self, value: impl Into<Self>) -> Self {
        self.call_on(Method::ends_with(), vec![value.into()])
    }

    pub fn to_upper(self) -> Self {
        self.call_on(Method::to_upper(), vec![])
    }

    pub fn to_lower(self) -> Self {
        self.call_on(Method::to_lower(), vec![])
    }

    pub fn trim(self) -> Self {
        self.call_on(Method::trim(), vec![])
    }

    pub fn trim_start(self) -> Self {
        self.call_on(Method::trim_start(), vec![])
    }

    pub fn trim_end(self) -> Self {
        self.call_on(Method::trim_end(), vec![])
    }

    /// `value.ToString()`
    pub fn stringify(self) -> Self {
        self.call_on(Method::to_string(), vec![])
    }

    pub fn substring(self, start: impl Into<Self>) -> Self {
        self.call_on(Method::substring(), vec![start.into()])
    }

    pub fn substring_len(self, start: impl Into<Self>, length: impl Into<Self>) -> Self {
        self.call_on(Method::substring_len(), vec![start.into(), length.into()])
    }

    pub fn replace(self, old: impl Into<Self>, new: impl Into<Self>) -> Self {
        self.call_on(Method::replace(), vec![old.into(), new.into()])
    }

    pub fn insert(self, index: impl Into<Self>, value: impl Into<Self>) -> Self {
        self.call_on(Method::insert(), vec![index.into(), value.into()])
    }

    pub fn index_of(self, value: impl Into<Self>) -> Self {
        self.call_on(Method::index_of(), vec![value.into()])
    }

    pub fn index_of_from(self, value: impl Into<Self>, start: impl Into<Self>) -> Self {
        self.call_on(Method::index_of_from(), vec![value.into(), start.into()])
    }

    /// `Hash(value, algorithm)`
    pub fn hash(self, algorithm: HashAlgorithm) -> Self {
        Expr::call(
            Method::hash(),
            None,
            vec![self, Expr::typed_constant(algorithm, HashAlgorithm::ty())],
        )
    }

    pub fn to_hex(self) -> Self {
        Expr::call(Method::to_hex(), None, vec![self])
    }

    /// Indexer access into a dynamic bag, `bag["key"]`.
    pub fn index(self, key: impl Into<Self>) -> Self {
        self.call_on(Method::get_item(), vec![key.into()])
    }
}

impl From<ExprCall> for Expr {
    fn from(value: ExprCall) -> Self {
        Self::Call(value)
    }
}
