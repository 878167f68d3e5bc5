use crate::platform::{Mysql, Postgresql, Sqlite};

use serde::Deserialize;
use sqlforge_core::{platform::Generic, schema::Database, Error, Platform, Result};

/// Configuration for DDL generation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Forces identifier quoting on or off. When unset, the schema decides.
    pub identifier_quoting: Option<bool>,

    /// Emit `DROP TABLE IF EXISTS` before the tables are created
    pub drop_tables: bool,

    /// Storage engine for MySQL tables without an `Engine` vendor parameter
    pub mysql_engine: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identifier_quoting: None,
            drop_tables: false,
            mysql_engine: String::from("InnoDB"),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Force identifier quoting on or off
    pub fn identifier_quoting(mut self, enabled: bool) -> Self {
        self.identifier_quoting = Some(enabled);
        self
    }

    /// Set whether tables are dropped before being created
    pub fn drop_tables(mut self, drop_tables: bool) -> Self {
        self.drop_tables = drop_tables;
        self
    }

    /// Set the default MySQL storage engine
    pub fn mysql_engine(mut self, engine: impl Into<String>) -> Self {
        self.mysql_engine = engine.into();
        self
    }

    /// Builds the platform registered under `id` with this configuration
    /// applied.
    ///
    /// Accepted ids: `mysql`, `pgsql` (also `postgres`, `postgresql`),
    /// `sqlite`, and `sql` (also `generic`).
    pub fn platform(&self, id: &str) -> Result<Box<dyn Platform>> {
        let mut platform: Box<dyn Platform> = match id.trim().to_lowercase().as_str() {
            "mysql" => Box::new(Mysql::new().engine(&self.mysql_engine)),
            "pgsql" | "postgres" | "postgresql" => Box::new(Postgresql::new()),
            "sqlite" => Box::new(Sqlite::new()),
            "sql" | "generic" => Box::new(Generic::new()),
            _ => return Err(Error::unsupported_feature(format!("platform `{id}`"))),
        };

        if let Some(enabled) = self.identifier_quoting {
            platform.set_identifier_quoting(enabled);
        }

        Ok(platform)
    }

    /// Like [`Config::platform`], falling back to the schema's
    /// `identifierQuoting` switch when quoting is not forced.
    pub fn platform_for(&self, id: &str, db: &Database) -> Result<Box<dyn Platform>> {
        let mut platform = self.platform(id)?;

        if self.identifier_quoting.is_none() {
            if let Some(enabled) = db.identifier_quoting {
                platform.set_identifier_quoting(enabled);
            }
        }

        Ok(platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.identifier_quoting, None);
        assert!(!config.drop_tables);
        assert_eq!(config.mysql_engine, "InnoDB");
    }

    #[test]
    fn deserialize_partial() {
        let config: Config =
            serde_json::from_str(r#"{ "drop_tables": true, "mysql_engine": "MyISAM" }"#).unwrap();

        assert!(config.drop_tables);
        assert_eq!(config.mysql_engine, "MyISAM");
        assert_eq!(config.identifier_quoting, None);
    }

    #[test]
    fn forced_quoting_wins_over_schema() {
        let mut db = Database::new("shop");
        db.identifier_quoting = Some(true);

        let platform = Config::new().platform_for("mysql", &db).unwrap();
        assert!(platform.is_identifier_quoting_enabled());

        let platform = Config::new()
            .identifier_quoting(false)
            .platform_for("mysql", &db)
            .unwrap();
        assert!(!platform.is_identifier_quoting_enabled());
    }

    #[test]
    fn unknown_platform() {
        let err = Config::new().platform("oracle").unwrap_err();
        assert!(err.is_unsupported_feature());
        assert_eq!(err.to_string(), "unsupported feature: platform `oracle`");
    }
}
