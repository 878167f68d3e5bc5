use super::{ForeignKeyDef, Statement};

/// `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY`, for dialects that do not
/// declare foreign keys inside `CREATE TABLE`.
#[derive(Debug, Clone)]
pub struct AddForeignKey {
    pub foreign_key: ForeignKeyDef,
}

impl Statement {
    pub fn add_foreign_key(foreign_key: ForeignKeyDef) -> Self {
        AddForeignKey { foreign_key }.into()
    }
}

impl From<AddForeignKey> for Statement {
    fn from(value: AddForeignKey) -> Self {
        Self::AddForeignKey(value)
    }
}
