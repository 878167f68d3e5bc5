//! The per-RDBMS strategy consulted for types, identifiers, and DDL
//! fragments.
//!
//! [`Platform`] carries ANSI defaults for everything except identity and
//! quoting state; dialects override what differs. The schema model only
//! calls into a platform during [`Database::finalize_definition`].

mod domain;
pub use domain::Domain;

mod generic;
pub use generic::Generic;

pub mod normalize;

use crate::{
    load,
    schema::{Database, Entity, EntityId, Field, FieldDefault, SqlType},
    Result,
};

/// Native primary key generation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeIdMethod {
    Identity,
    Sequence,
    Serial,
}

pub trait Platform: std::fmt::Debug {
    /// Short identifier of the platform (`mysql`, `pgsql`, ...).
    fn database_type(&self) -> &'static str;

    fn is_identifier_quoting_enabled(&self) -> bool;

    fn set_identifier_quoting(&mut self, enabled: bool);

    fn native_id_method(&self) -> NativeIdMethod {
        NativeIdMethod::Identity
    }

    fn max_field_name_length(&self) -> usize {
        64
    }

    fn domain_for_type(&self, ty: SqlType) -> Domain {
        Domain::ansi(ty)
    }

    fn null_string(&self) -> &'static str {
        ""
    }

    fn not_null_string(&self) -> &'static str {
        "NOT NULL"
    }

    fn auto_increment(&self) -> &'static str {
        "IDENTITY"
    }

    /// A column type replacing the declared one on auto-incremented fields.
    fn auto_increment_type(&self, _ty: SqlType) -> Option<&'static str> {
        None
    }

    /// The column definition: quoted name, type, default, nullability, and
    /// auto-increment, separated by spaces.
    fn field_ddl(&self, field: &Field) -> String {
        let mut ddl = vec![self.quote_identifier(&field.name), self.field_type_ddl(field)];

        let default = self.field_default_value_ddl(field);
        if !default.is_empty() {
            ddl.push(default);
        }

        let null = if field.is_not_null() {
            self.not_null_string()
        } else {
            self.null_string()
        };
        if !null.is_empty() {
            ddl.push(null.to_string());
        }

        if field.auto_increment && !self.auto_increment().is_empty() {
            ddl.push(self.auto_increment().to_string());
        }

        ddl.join(" ")
    }

    /// The SQL type of a field, with its size definition when the type
    /// takes one.
    fn field_type_ddl(&self, field: &Field) -> String {
        if let Some(sql_type) = &field.sql_type {
            return sql_type.clone();
        }

        if field.auto_increment {
            if let Some(sql_type) = self.auto_increment_type(field.ty) {
                return sql_type.to_string();
            }
        }

        let domain = self.domain_for_type(field.ty);
        if !self.has_size(&domain.sql_type) {
            return domain.sql_type;
        }

        let size = field.size.or(domain.size).or_else(|| {
            (field.ty == SqlType::Varchar && !self.supports_varchar_without_size()).then_some(255)
        });
        let scale = field.scale.or(domain.scale).filter(|_| self.has_scale(&domain.sql_type));

        match (size, scale) {
            (Some(size), Some(scale)) => format!("{}({size},{scale})", domain.sql_type),
            (Some(size), None) => format!("{}({size})", domain.sql_type),
            _ => domain.sql_type,
        }
    }

    /// `DEFAULT ...` for the field, or an empty string.
    ///
    /// Expressions are written raw. Text and temporal literals are quoted.
    /// `BOOLEAN` goes through [`Platform::boolean_string`] while `BOOLEANINT`
    /// is always `1` or `0`. `ENUM` values are written as their position in
    /// the value set.
    fn field_default_value_ddl(&self, field: &Field) -> String {
        let Some(default) = &field.default else {
            return String::new();
        };

        let value = match default {
            FieldDefault::Expr(expr) => expr.clone(),
            FieldDefault::Value(value) => match field.ty {
                ty if ty.is_text() => self.quote(value),
                SqlType::Boolean => self.boolean_string(load::boolean_value(value)),
                SqlType::BooleanInt => {
                    String::from(if load::boolean_value(value) { "1" } else { "0" })
                }
                SqlType::BooleanChar => self.quote(value),
                SqlType::Enum => match field.enum_index(value) {
                    Some(index) => index.to_string(),
                    None => self.quote(value),
                },
                _ => value.clone(),
            },
        };

        format!("DEFAULT {value}")
    }

    /// A string literal.
    fn quote(&self, text: &str) -> String {
        format!("'{}'", text.replace('\'', "''"))
    }

    /// Wraps one identifier part in the platform's quote characters.
    fn do_quoting(&self, text: &str) -> String {
        format!("\"{}\"", text.replace('"', "\"\""))
    }

    /// Quotes each part of a possibly schema-qualified identifier when
    /// quoting is enabled; returns it unchanged otherwise.
    fn quote_identifier(&self, text: &str) -> String {
        if !self.is_identifier_quoting_enabled() {
            return text.to_string();
        }

        text.split(self.schema_delimiter())
            .map(|part| self.do_quoting(part))
            .collect::<Vec<_>>()
            .join(self.schema_delimiter())
    }

    fn field_list_ddl(&self, fields: &[&str], delimiter: &str) -> String {
        fields
            .iter()
            .map(|field| self.quote_identifier(field))
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    /// `PRIMARY KEY (...)`, empty for entities without a primary key.
    fn primary_key_ddl(&self, entity: &Entity) -> String {
        let pk = entity.primary_key_names();
        if pk.is_empty() {
            return String::new();
        }

        format!("PRIMARY KEY ({})", self.field_list_ddl(&pk, ", "))
    }

    fn has_size(&self, _sql_type: &str) -> bool {
        true
    }

    fn has_scale(&self, _sql_type: &str) -> bool {
        true
    }

    fn supports_index_size(&self) -> bool {
        false
    }

    fn supports_native_delete_trigger(&self) -> bool {
        false
    }

    fn supports_insert_null_pk(&self) -> bool {
        true
    }

    fn supports_schemas(&self) -> bool {
        false
    }

    /// `DROP TABLE ... CASCADE` removes dependent constraints.
    fn supports_drop_cascade(&self) -> bool {
        false
    }

    fn supports_varchar_without_size(&self) -> bool {
        false
    }

    fn boolean_string(&self, value: bool) -> String {
        String::from(if value { "1" } else { "0" })
    }

    fn schema_delimiter(&self) -> &'static str {
        "."
    }

    /// strftime-style format of timestamp literals
    fn timestamp_formatter(&self) -> &'static str {
        "%Y-%m-%d %H:%M:%S"
    }

    fn date_formatter(&self) -> &'static str {
        "%Y-%m-%d"
    }

    fn time_formatter(&self) -> &'static str {
        "%H:%M:%S"
    }

    /// When `true`, foreign keys are declared inside `CREATE TABLE`;
    /// otherwise they are added afterwards with `ALTER TABLE`.
    fn inline_foreign_keys(&self) -> bool {
        true
    }

    /// Emitted before the first statement of a DDL script.
    fn begin_ddl(&self) -> String {
        String::new()
    }

    /// Emitted after the last statement of a DDL script.
    fn end_ddl(&self) -> String {
        String::new()
    }

    /// Trailing `CREATE TABLE` options, e.g. a storage engine.
    fn table_options(&self, _entity: &Entity) -> String {
        String::new()
    }

    /// Adds what the platform needs on top of the declared entity. Must be
    /// idempotent.
    fn normalize_entity(&self, db: &mut Database, id: EntityId) -> Result<()> {
        normalize::normalize_entity(db, id)
    }

    /// Called once per [`Database::finalize_definition`], after relation
    /// targets are bound.
    fn finalize_definition(&self, db: &mut Database) -> Result<()> {
        let ids: Vec<_> = db.entity_ids().collect();
        for id in ids {
            self.normalize_entity(db, id)?;
        }
        Ok(())
    }
}
