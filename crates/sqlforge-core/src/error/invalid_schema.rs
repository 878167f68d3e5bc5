use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - Two entities share the same fully qualified name
/// - A field combines an auto-increment with a default value
/// - An index names a field the entity does not declare
#[derive(Debug)]
pub(super) struct InvalidSchema {
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an invalid
    /// schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::InvalidSchema(_) => Some(()),
            _ => None,
        })
        .is_some()
    }
}
