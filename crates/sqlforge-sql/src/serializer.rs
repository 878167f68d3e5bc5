#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Period};

mod ident;
use ident::Ident;

// Fragment serializers
mod foreign_key_def;
mod name;
mod statement;

use crate::stmt::{Name, Statement};

use sqlforge_core::{
    schema::{Database, Entity, EntityId},
    Platform,
};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Schema against which the statement is to be serialized
    db: &'a Database,

    /// The platform decides types, quoting, and table options.
    platform: &'a dyn Platform,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl<'a> Serializer<'a> {
    pub fn new(db: &'a Database, platform: &'a dyn Platform) -> Self {
        Serializer { db, platform }
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    fn entity(&self, id: EntityId) -> &'a Entity {
        self.db.entity(id)
    }

    /// Qualified with the schema where the platform supports schemas.
    fn table_name(&self, id: EntityId) -> Name {
        let entity = self.entity(id);
        if self.platform.supports_schemas() {
            Name::qualified(&entity.full_table_name(), self.platform.schema_delimiter())
        } else {
            Name::from(&entity.table_name()[..])
        }
    }
}
