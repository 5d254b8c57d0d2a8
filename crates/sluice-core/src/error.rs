mod adhoc;
mod expression_evaluation_failed;
mod expression_not_supported;
mod invalid_statement;
mod mapping;
mod member_type_not_supported;
mod operator_not_supported;
mod query_operator_not_supported;
mod string_truncation;

use adhoc::AdhocError;
use expression_evaluation_failed::ExpressionEvaluationFailedError;
use expression_not_supported::ExpressionNotSupportedError;
use invalid_statement::InvalidStatementError;
use mapping::MappingError;
use member_type_not_supported::MemberTypeNotSupportedError;
use operator_not_supported::OperatorNotSupportedError;
use query_operator_not_supported::QueryOperatorNotSupportedError;
use std::sync::Arc;
use string_truncation::StringTruncationError;

/// Return early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Build an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while lowering or rendering a query.
///
/// Every failure is immediate and final: the pipeline never produces a
/// partial statement. The error names the offending node, operator, method or
/// column so callers can tell exactly which part of the query was rejected.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    /// The consequent keeps its kind, shared or not. A cause it already
    /// carried is replaced by `self`.
    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => inner.kind,
                Err(shared) => shared.kind.clone(),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Creates an ad-hoc error from format arguments. Used by [`bail!`] and
    /// [`err!`].
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(args.to_string())))
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some((**err).as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug, Clone)]
enum ErrorKind {
    Anyhow(Arc<anyhow::Error>),
    Adhoc(AdhocError),
    ExpressionEvaluationFailed(ExpressionEvaluationFailedError),
    ExpressionNotSupported(ExpressionNotSupportedError),
    OperatorNotSupported(OperatorNotSupportedError),
    QueryOperatorNotSupported(QueryOperatorNotSupportedError),
    MemberTypeNotSupported(MemberTypeNotSupportedError),
    Mapping(MappingError),
    StringTruncation(StringTruncationError),
    InvalidStatement(InvalidStatementError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            ExpressionEvaluationFailed(err) => core::fmt::Display::fmt(err, f),
            ExpressionNotSupported(err) => core::fmt::Display::fmt(err, f),
            OperatorNotSupported(err) => core::fmt::Display::fmt(err, f),
            QueryOperatorNotSupported(err) => core::fmt::Display::fmt(err, f),
            MemberTypeNotSupported(err) => core::fmt::Display::fmt(err, f),
            Mapping(err) => core::fmt::Display::fmt(err, f),
            StringTruncation(err) => core::fmt::Display::fmt(err, f),
            InvalidStatement(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown sluice error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(Arc::new(err)))
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
