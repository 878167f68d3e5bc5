mod add_foreign_key;
pub use add_foreign_key::AddForeignKey;

mod create_index;
pub use create_index::CreateIndex;

mod create_table;
pub use create_table::CreateTable;

mod drop_table;
pub use drop_table::DropTable;

mod foreign_key_def;
pub use foreign_key_def::ForeignKeyDef;

mod name;
pub use name::Name;

#[derive(Debug, Clone)]
pub enum Statement {
    AddForeignKey(AddForeignKey),
    CreateIndex(CreateIndex),
    CreateTable(CreateTable),
    DropTable(DropTable),
}
