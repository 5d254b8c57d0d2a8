use super::Error;

/// Error raised by the entity mapping lookup.
#[derive(Debug, Clone)]
pub(super) struct MappingError {
    kind: MappingErrorKind,
}

#[derive(Debug, Clone)]
enum MappingErrorKind {
    UnknownEntity { entity: Box<str> },
    UnknownColumn { entity: Box<str>, name: Box<str> },
}

impl std::error::Error for MappingError {}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.kind {
            MappingErrorKind::UnknownEntity { entity } => {
                write!(f, "no mapping registered for entity `{entity}`")
            }
            MappingErrorKind::UnknownColumn { entity, name } => {
                write!(f, "entity `{entity}` has no column mapped for `{name}`")
            }
        }
    }
}

impl Error {
    /// Creates an error for an entity with no registered mapping.
    pub fn unknown_entity(entity: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Mapping(MappingError {
            kind: MappingErrorKind::UnknownEntity {
                entity: entity.into().into(),
            },
        }))
    }

    /// Creates an error for a property or dynamic key with no mapped column.
    pub fn unknown_column(entity: impl Into<String>, name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Mapping(MappingError {
            kind: MappingErrorKind::UnknownColumn {
                entity: entity.into().into(),
                name: name.into().into(),
            },
        }))
    }

    /// Returns `true` if this error came from the mapping lookup.
    pub fn is_mapping(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Mapping(_))
    }
}
