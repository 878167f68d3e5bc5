use super::Error;

/// Error when a schema document cannot be turned into a model.
///
/// Carries the path of the offending node (`$.entities[2].fields[0].type`)
/// so the message points at the input rather than the model.
#[derive(Debug)]
pub(super) struct IngestionError {
    path: Box<str>,
    message: Box<str>,
}

impl std::error::Error for IngestionError {}

impl core::fmt::Display for IngestionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema document at `{}`: {}", self.path, self.message)
    }
}

impl Error {
    /// Creates an ingestion error for the node at `path`.
    pub fn ingestion(path: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Ingestion(IngestionError {
            path: path.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is an ingestion
    /// error.
    pub fn is_ingestion(&self) -> bool {
        self.ingestion_path().is_some()
    }

    /// The document path of the first ingestion error in the chain.
    pub fn ingestion_path(&self) -> Option<&str> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Ingestion(err) => Some(&*err.path),
            _ => None,
        })
    }
}
