use super::Error;

/// Error when an expression node kind reaches a visitor that has no handling
/// for it.
///
/// This indicates either an unsupported query shape (a conditional expression
/// inside a predicate, for example) or a visitor bug. It is never retried.
#[derive(Debug, Clone)]
pub(super) struct ExpressionNotSupportedError {
    kind: Box<str>,
}

impl std::error::Error for ExpressionNotSupportedError {}

impl core::fmt::Display for ExpressionNotSupportedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "expression not supported: {}", self.kind)
    }
}

impl Error {
    /// Creates an expression-not-supported error naming the node kind.
    pub fn expression_not_supported(kind: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ExpressionNotSupported(
            ExpressionNotSupportedError {
                kind: kind.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an expression-not-supported error.
    pub fn is_expression_not_supported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ExpressionNotSupported(_))
    }
}
