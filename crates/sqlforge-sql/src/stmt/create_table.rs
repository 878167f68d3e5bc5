use super::{ForeignKeyDef, Statement};

use sqlforge_core::schema::EntityId;

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// The entity whose table is created
    pub table: EntityId,

    /// Foreign keys declared inside the table definition
    pub foreign_keys: Vec<ForeignKeyDef>,
}

impl Statement {
    pub fn create_table(table: EntityId, foreign_keys: Vec<ForeignKeyDef>) -> Self {
        CreateTable {
            table,
            foreign_keys,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
