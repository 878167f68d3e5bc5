//! Concrete RDBMS dialects.

mod mysql;
pub use mysql::Mysql;

mod postgresql;
pub use postgresql::Postgresql;

mod sqlite;
pub use sqlite::Sqlite;

use crate::Config;

use sqlforge_core::{Platform, Result};

/// Looks up a platform by its short id with the default configuration.
pub fn platform(id: &str) -> Result<Box<dyn Platform>> {
    Config::new().platform(id)
}
