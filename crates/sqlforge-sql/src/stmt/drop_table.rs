use super::Statement;

use sqlforge_core::schema::EntityId;

/// A statement to drop a SQL table.
#[derive(Debug, Clone)]
pub struct DropTable {
    /// The entity whose table is dropped.
    pub table: EntityId,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,

    /// Whether or not to add a `CASCADE` clause.
    pub cascade: bool,
}

impl Statement {
    /// Drops a table.
    ///
    /// This function _does not_ add an `IF EXISTS` clause.
    pub fn drop_table(table: EntityId) -> Self {
        DropTable {
            table,
            if_exists: false,
            cascade: false,
        }
        .into()
    }

    /// Drops a table if it exists.
    ///
    /// This function _does_ add an `IF EXISTS` clause.
    pub fn drop_table_if_exists(table: EntityId) -> Self {
        DropTable {
            table,
            if_exists: true,
            cascade: false,
        }
        .into()
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}
