use super::Error;

/// Error when a recognized node carries an operator with no SQL mapping, such
/// as an exclusive-or or a bit shift.
#[derive(Debug, Clone)]
pub(super) struct OperatorNotSupportedError {
    operator: Box<str>,
}

impl std::error::Error for OperatorNotSupportedError {}

impl core::fmt::Display for OperatorNotSupportedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "operator not supported: {}", self.operator)
    }
}

impl Error {
    /// Creates an operator-not-supported error naming the operator.
    pub fn operator_not_supported(operator: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::OperatorNotSupported(
            OperatorNotSupportedError {
                operator: operator.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an operator-not-supported error.
    pub fn is_operator_not_supported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::OperatorNotSupported(_))
    }
}
