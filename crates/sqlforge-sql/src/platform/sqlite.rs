use sqlforge_core::{
    platform::{normalize, Domain, Platform},
    schema::{Database, Entity, EntityId, SqlType},
    Error, Result,
};

#[derive(Debug, Clone, Default)]
pub struct Sqlite {
    identifier_quoting: bool,
}

impl Sqlite {
    pub fn new() -> Sqlite {
        Sqlite::default()
    }
}

impl Platform for Sqlite {
    fn database_type(&self) -> &'static str {
        "sqlite"
    }

    fn is_identifier_quoting_enabled(&self) -> bool {
        self.identifier_quoting
    }

    fn set_identifier_quoting(&mut self, enabled: bool) {
        self.identifier_quoting = enabled;
    }

    fn domain_for_type(&self, ty: SqlType) -> Domain {
        match ty {
            SqlType::Numeric => Domain::new(ty, "DECIMAL"),
            SqlType::LongVarchar | SqlType::Object | SqlType::Array => {
                Domain::new(ty, "MEDIUMTEXT")
            }
            SqlType::Date => Domain::new(ty, "DATETIME"),
            SqlType::Binary => Domain::new(ty, "BLOB"),
            SqlType::Varbinary => Domain::new(ty, "MEDIUMBLOB"),
            SqlType::LongVarbinary | SqlType::Blob => Domain::new(ty, "LONGBLOB"),
            SqlType::Clob => Domain::new(ty, "LONGTEXT"),
            _ => Domain::ansi(ty),
        }
    }

    /// Only an `INTEGER PRIMARY KEY` column auto-increments.
    fn auto_increment_type(&self, _ty: SqlType) -> Option<&'static str> {
        Some("INTEGER")
    }

    fn auto_increment(&self) -> &'static str {
        "PRIMARY KEY AUTOINCREMENT"
    }

    fn has_size(&self, sql_type: &str) -> bool {
        !matches!(
            sql_type.to_uppercase().as_str(),
            "MEDIUMTEXT" | "LONGTEXT" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB"
        )
    }

    /// The primary key is declared on the column when it auto-increments.
    fn primary_key_ddl(&self, entity: &Entity) -> String {
        let pk = entity.primary_key_names();
        if pk.is_empty() || entity.auto_increment_primary_key().is_some() {
            return String::new();
        }

        format!("PRIMARY KEY ({})", self.field_list_ddl(&pk, ", "))
    }

    fn begin_ddl(&self) -> String {
        String::from("PRAGMA foreign_keys = OFF;")
    }

    fn end_ddl(&self) -> String {
        String::from("PRAGMA foreign_keys = ON;")
    }

    fn normalize_entity(&self, db: &mut Database, id: EntityId) -> Result<()> {
        let entity = db.entity(id);
        if entity.has_composite_primary_key() && entity.auto_increment_primary_key().is_some() {
            return Err(Error::unsupported_feature(format!(
                "auto-increment in the composite primary key of `{}` on sqlite",
                entity.name
            )));
        }

        if let Some(field) = entity
            .fields()
            .iter()
            .find(|field| field.auto_increment && !field.primary_key)
        {
            return Err(Error::unsupported_feature(format!(
                "auto-increment on non-key field `{}.{}` on sqlite",
                entity.name, field.name
            )));
        }

        normalize::normalize_entity(db, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlforge_core::schema::Field;

    #[test]
    fn auto_increment_column_carries_primary_key() {
        let mut entity = Entity::new("Book");
        entity
            .add_field(
                Field::new("id", SqlType::BigInt)
                    .primary_key(true)
                    .auto_increment(true),
            )
            .unwrap();

        let platform = Sqlite::new();
        assert_eq!(
            platform.field_ddl(&entity.fields()[0]),
            "id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT"
        );
        assert_eq!(platform.primary_key_ddl(&entity), "");
    }

    #[test]
    fn composite_auto_increment_is_rejected() {
        let mut entity = Entity::new("Line");
        entity
            .add_field(
                Field::new("id", SqlType::Integer)
                    .primary_key(true)
                    .auto_increment(true),
            )
            .unwrap();
        entity
            .add_field(Field::new("order_id", SqlType::Integer).primary_key(true))
            .unwrap();

        let mut db = Database::new("shop");
        let id = db.add_entity(entity).unwrap();

        let err = Sqlite::new().normalize_entity(&mut db, id).unwrap_err();
        assert!(err.is_unsupported_feature());
    }

    #[test]
    fn non_key_auto_increment_is_rejected() {
        let mut entity = Entity::new("Ticket");
        entity
            .add_field(
                Field::new("code", SqlType::Varchar)
                    .size(10)
                    .primary_key(true),
            )
            .unwrap();
        entity
            .add_field(Field::new("seq", SqlType::Integer).auto_increment(true))
            .unwrap();

        let mut db = Database::new("shop");
        let id = db.add_entity(entity).unwrap();

        let err = Sqlite::new().normalize_entity(&mut db, id).unwrap_err();
        assert!(err.is_unsupported_feature());
        assert_eq!(
            err.to_string(),
            "unsupported feature: auto-increment on non-key field `Ticket.seq` on sqlite"
        );
    }
}
