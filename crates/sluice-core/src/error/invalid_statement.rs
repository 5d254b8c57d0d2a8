use super::Error;

/// Error when a relational model node cannot be rendered as a statement.
///
/// This occurs when:
/// - A select has no data source
/// - A sync target is not a plain table
/// - A statement combines features the dialect cannot express
#[derive(Debug, Clone)]
pub(super) struct InvalidStatementError {
    message: Box<str>,
}

impl std::error::Error for InvalidStatementError {}

impl core::fmt::Display for InvalidStatementError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid statement: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid statement error.
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatementError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid statement error.
    pub fn is_invalid_statement(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidStatement(_))
    }
}
