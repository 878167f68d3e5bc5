use super::Statement;

use sqlforge_core::schema::EntityId;

#[derive(Debug, Clone)]
pub struct CreateIndex {
    /// Which table to index
    pub on: EntityId,

    /// Position of the index in the entity's index list
    pub index: usize,
}

impl Statement {
    pub fn create_index(on: EntityId, index: usize) -> Self {
        CreateIndex { on, index }.into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
