use super::Error;

/// Error when a member access resolves to something other than a property.
#[derive(Debug, Clone)]
pub(super) struct MemberTypeNotSupportedError {
    member: Box<str>,
    kind: Box<str>,
}

impl std::error::Error for MemberTypeNotSupportedError {}

impl core::fmt::Display for MemberTypeNotSupportedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "member type not supported: `{}` is a {}, only properties can be lowered",
            self.member, self.kind
        )
    }
}

impl Error {
    /// Creates a member-type-not-supported error.
    pub fn member_type_not_supported(member: impl Into<String>, kind: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MemberTypeNotSupported(
            MemberTypeNotSupportedError {
                member: member.into().into(),
                kind: kind.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a member-type-not-supported error.
    pub fn is_member_type_not_supported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MemberTypeNotSupported(_))
    }
}
