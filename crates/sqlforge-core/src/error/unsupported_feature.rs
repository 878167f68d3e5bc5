use super::Error;

/// Error when a platform does not support a requested feature.
///
/// Raised for unknown platform identifiers and for schema constructs a
/// dialect has no DDL for.
#[derive(Debug)]
pub(super) struct UnsupportedFeature {
    message: Box<str>,
}

impl std::error::Error for UnsupportedFeature {}

impl core::fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported feature: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported feature error.
    pub fn unsupported_feature(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedFeature(UnsupportedFeature {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an unsupported
    /// feature error.
    pub fn is_unsupported_feature(&self) -> bool {
        self.find_kind(|kind| match kind {
            super::ErrorKind::UnsupportedFeature(_) => Some(()),
            _ => None,
        })
        .is_some()
    }
}
