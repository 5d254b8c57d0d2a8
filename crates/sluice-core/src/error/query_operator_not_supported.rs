use super::Error;

/// Error when a method call does not match any recognized signature.
///
/// The message names the method and its declared parameter names so the
/// rejected overload can be identified.
#[derive(Debug, Clone)]
pub(super) struct QueryOperatorNotSupportedError {
    method: Box<str>,
    params: Vec<String>,
}

impl std::error::Error for QueryOperatorNotSupportedError {}

impl core::fmt::Display for QueryOperatorNotSupportedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "query operator not supported: {}({})",
            self.method,
            self.params.join(", ")
        )
    }
}

impl Error {
    /// Creates a query-operator-not-supported error.
    pub fn query_operator_not_supported<I, S>(method: impl Into<String>, params: I) -> Error
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error::from(super::ErrorKind::QueryOperatorNotSupported(
            QueryOperatorNotSupportedError {
                method: method.into().into(),
                params: params.into_iter().map(Into::into).collect(),
            },
        ))
    }

    /// Returns `true` if this error is a query-operator-not-supported error.
    pub fn is_query_operator_not_supported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::QueryOperatorNotSupported(_))
    }
}
