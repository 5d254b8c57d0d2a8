use super::Error;

/// Error when a string value is longer than the column it is written to.
///
/// Raised before any statement text is produced so the database never
/// silently truncates (or rejects) the value.
#[derive(Debug, Clone)]
pub(super) struct StringTruncationError {
    column: Box<str>,
    len: usize,
    max: usize,
}

impl std::error::Error for StringTruncationError {}

impl core::fmt::Display for StringTruncationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "string would be truncated: column `{}` holds {} characters, value has {}",
            self.column, self.max, self.len
        )
    }
}

impl Error {
    /// Creates a string truncation error.
    pub fn string_truncation(column: impl Into<String>, len: usize, max: usize) -> Error {
        Error::from(super::ErrorKind::StringTruncation(StringTruncationError {
            column: column.into().into(),
            len,
            max,
        }))
    }

    /// Returns `true` if this error is a string truncation error.
    pub fn is_string_truncation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::StringTruncation(_))
    }
}
