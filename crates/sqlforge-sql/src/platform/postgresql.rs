use sqlforge_core::{
    platform::{Domain, NativeIdMethod, Platform},
    schema::SqlType,
};

#[derive(Debug, Clone, Default)]
pub struct Postgresql {
    identifier_quoting: bool,
}

impl Postgresql {
    pub fn new() -> Postgresql {
        Postgresql::default()
    }
}

impl Platform for Postgresql {
    fn database_type(&self) -> &'static str {
        "pgsql"
    }

    fn is_identifier_quoting_enabled(&self) -> bool {
        self.identifier_quoting
    }

    fn set_identifier_quoting(&mut self, enabled: bool) {
        self.identifier_quoting = enabled;
    }

    fn native_id_method(&self) -> NativeIdMethod {
        NativeIdMethod::Serial
    }

    fn max_field_name_length(&self) -> usize {
        63
    }

    fn domain_for_type(&self, ty: SqlType) -> Domain {
        match ty {
            SqlType::TinyInt | SqlType::SmallInt | SqlType::Enum => Domain::new(ty, "INT2"),
            SqlType::BigInt => Domain::new(ty, "INT8"),
            SqlType::Float | SqlType::Double => Domain::new(ty, "DOUBLE PRECISION"),
            SqlType::LongVarchar | SqlType::Clob | SqlType::Array => Domain::new(ty, "TEXT"),
            SqlType::Binary
            | SqlType::Varbinary
            | SqlType::LongVarbinary
            | SqlType::Blob
            | SqlType::Object => Domain::new(ty, "BYTEA"),
            _ => Domain::ansi(ty),
        }
    }

    fn auto_increment(&self) -> &'static str {
        ""
    }

    fn auto_increment_type(&self, ty: SqlType) -> Option<&'static str> {
        Some(if ty == SqlType::BigInt {
            "BIGSERIAL"
        } else {
            "SERIAL"
        })
    }

    fn has_size(&self, sql_type: &str) -> bool {
        !matches!(
            sql_type.to_uppercase().as_str(),
            "BYTEA" | "TEXT" | "DOUBLE PRECISION" | "INT2" | "INT8" | "INTEGER" | "BOOLEAN"
        )
    }

    fn supports_native_delete_trigger(&self) -> bool {
        true
    }

    fn supports_insert_null_pk(&self) -> bool {
        false
    }

    fn supports_schemas(&self) -> bool {
        true
    }

    fn supports_drop_cascade(&self) -> bool {
        true
    }

    fn supports_varchar_without_size(&self) -> bool {
        true
    }

    fn boolean_string(&self, value: bool) -> String {
        String::from(if value { "'t'" } else { "'f'" })
    }

    fn inline_foreign_keys(&self) -> bool {
        false
    }

    fn begin_ddl(&self) -> String {
        String::from("BEGIN;")
    }

    fn end_ddl(&self) -> String {
        String::from("COMMIT;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlforge_core::schema::Field;

    #[test]
    fn serial_primary_key() {
        let id = Field::new("id", SqlType::Integer)
            .primary_key(true)
            .auto_increment(true);
        assert_eq!(Postgresql::new().field_ddl(&id), "id SERIAL NOT NULL");

        let big = Field::new("id", SqlType::BigInt)
            .primary_key(true)
            .auto_increment(true);
        assert_eq!(Postgresql::new().field_type_ddl(&big), "BIGSERIAL");
    }

    #[test]
    fn types_and_booleans() {
        let platform = Postgresql::new();

        let name = Field::new("name", SqlType::Varchar);
        assert_eq!(platform.field_type_ddl(&name), "VARCHAR");

        let data = Field::new("data", SqlType::Blob).size(100);
        assert_eq!(platform.field_type_ddl(&data), "BYTEA");

        let flag = Field::new("active", SqlType::Boolean).default_value("true");
        assert_eq!(platform.field_ddl(&flag), "active BOOLEAN DEFAULT 't'");
    }

    #[test]
    fn integer_booleans_default_to_digits() {
        let platform = Postgresql::new();

        let on = Field::new("active", SqlType::BooleanInt).default_value("true");
        assert_eq!(platform.field_ddl(&on), "active INTEGER DEFAULT 1");

        let off = Field::new("archived", SqlType::BooleanInt).default_value("no");
        assert_eq!(platform.field_ddl(&off), "archived INTEGER DEFAULT 0");
    }
}
