use sqlforge_core::{
    platform::{normalize, Domain, Platform},
    schema::{Database, Entity, EntityId, SqlType, Vendor},
    Result,
};

/// Table options read from the `mysql` vendor block, with their SQL
/// spelling.
const TABLE_OPTIONS: &[(&str, &str)] = &[
    ("charset", "CHARACTER SET"),
    ("collate", "COLLATE"),
    ("checksum", "CHECKSUM"),
    ("pack_keys", "PACK_KEYS"),
    ("delay_key_write", "DELAY_KEY_WRITE"),
    ("row_format", "ROW_FORMAT"),
];

#[derive(Debug, Clone)]
pub struct Mysql {
    identifier_quoting: bool,

    /// Storage engine used when an entity does not name one
    engine: String,
}

impl Default for Mysql {
    fn default() -> Self {
        Self {
            identifier_quoting: false,
            engine: String::from("InnoDB"),
        }
    }
}

impl Mysql {
    pub fn new() -> Mysql {
        Mysql::default()
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }
}

impl Platform for Mysql {
    fn database_type(&self) -> &'static str {
        "mysql"
    }

    fn is_identifier_quoting_enabled(&self) -> bool {
        self.identifier_quoting
    }

    fn set_identifier_quoting(&mut self, enabled: bool) {
        self.identifier_quoting = enabled;
    }

    fn domain_for_type(&self, ty: SqlType) -> Domain {
        match ty {
            SqlType::Boolean => Domain::new(ty, "TINYINT").size(1),
            SqlType::Numeric => Domain::new(ty, "DECIMAL"),
            SqlType::LongVarchar | SqlType::Array => Domain::new(ty, "TEXT"),
            SqlType::Binary => Domain::new(ty, "BLOB"),
            SqlType::Varbinary | SqlType::Object => Domain::new(ty, "MEDIUMBLOB"),
            SqlType::LongVarbinary | SqlType::Blob => Domain::new(ty, "LONGBLOB"),
            SqlType::Clob => Domain::new(ty, "LONGTEXT"),
            SqlType::Timestamp => Domain::new(ty, "DATETIME"),
            SqlType::Real => Domain::new(ty, "DOUBLE"),
            _ => Domain::ansi(ty),
        }
    }

    fn auto_increment(&self) -> &'static str {
        "AUTO_INCREMENT"
    }

    fn has_size(&self, sql_type: &str) -> bool {
        !matches!(
            sql_type.to_uppercase().as_str(),
            "TEXT"
                | "MEDIUMTEXT"
                | "LONGTEXT"
                | "BLOB"
                | "MEDIUMBLOB"
                | "LONGBLOB"
                | "DATE"
                | "DATETIME"
                | "TIME"
        )
    }

    fn do_quoting(&self, text: &str) -> String {
        format!("`{}`", text.replace('`', "``"))
    }

    fn supports_index_size(&self) -> bool {
        true
    }

    fn supports_schemas(&self) -> bool {
        true
    }

    fn begin_ddl(&self) -> String {
        String::from("SET FOREIGN_KEY_CHECKS = 0;")
    }

    fn end_ddl(&self) -> String {
        String::from("SET FOREIGN_KEY_CHECKS = 1;")
    }

    /// `ENGINE=...`, the entity description as `COMMENT`, then the options
    /// of the `mysql` vendor block.
    fn table_options(&self, entity: &Entity) -> String {
        let vendor = entity.vendor.for_type("mysql");

        let engine = option(&vendor, "engine").unwrap_or(&self.engine);
        let mut options = vec![format!("ENGINE={engine}")];

        if let Some(description) = &entity.description {
            options.push(format!("COMMENT={}", self.quote(description)));
        }

        for (key, sql) in TABLE_OPTIONS {
            if let Some(value) = option(&vendor, key) {
                options.push(format!("{sql}={}", self.quote(value)));
            }
        }

        options.join(" ")
    }

    /// Foreign keys need an index starting with their local fields.
    fn normalize_entity(&self, db: &mut Database, id: EntityId) -> Result<()> {
        normalize::normalize_entity(db, id)?;
        normalize::ensure_relation_indices(db, id)
    }
}

/// Vendor parameter names are matched case-insensitively.
fn option<'a>(vendor: &'a Vendor, key: &str) -> Option<&'a str> {
    vendor
        .parameters
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value.as_str())
}
