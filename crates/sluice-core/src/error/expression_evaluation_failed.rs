use super::Error;

/// Error when a parameter-free expression cannot be folded into a constant.
///
/// This occurs when:
/// - A captured variable is missing from its closure record
/// - Operand types do not support the operator (e.g. adding a bool)
/// - Integer arithmetic overflows or divides by zero
#[derive(Debug, Clone)]
pub(super) struct ExpressionEvaluationFailedError {
    message: Box<str>,
}

impl std::error::Error for ExpressionEvaluationFailedError {}

impl core::fmt::Display for ExpressionEvaluationFailedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "expression evaluation failed: {}", self.message)
    }
}

impl Error {
    /// Creates an expression evaluation failure error.
    pub fn expression_evaluation_failed(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ExpressionEvaluationFailed(
            ExpressionEvaluationFailedError {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an expression evaluation failure.
    pub fn is_expression_evaluation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ExpressionEvaluationFailed(_))
    }
}
