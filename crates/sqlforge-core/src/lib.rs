mod error;
pub use error::{BuildError, BuildErrorKind, Error, IntoError};

pub mod load;

pub mod platform;
pub use platform::Platform;

pub mod schema;
pub use schema::Database;

/// A Result type alias that uses sqlforge's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
