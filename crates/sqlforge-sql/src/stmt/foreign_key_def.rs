use sqlforge_core::{
    schema::{Database, EntityId, ReferentialAction, Relation},
    Result,
};

/// A foreign key constraint with every field name resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyDef {
    /// Constraint name
    pub name: String,

    /// The referencing table
    pub table: EntityId,

    /// Referencing columns
    pub columns: Vec<String>,

    /// The referenced table
    pub references: EntityId,

    /// Referenced columns, in the order of `columns`
    pub referenced_columns: Vec<String>,

    pub on_update: ReferentialAction,

    pub on_delete: ReferentialAction,
}

impl ForeignKeyDef {
    /// Resolves `relation` against `db`. Dotted foreign fields are replaced
    /// by the target field they map onto.
    pub fn from_relation(db: &Database, relation: &Relation) -> Result<ForeignKeyDef> {
        let target = relation.target(db)?;
        let pairs = relation.field_objects_mapping(db)?;

        Ok(ForeignKeyDef {
            name: relation.name(db).into_owned(),
            table: relation.entity(),
            columns: pairs.iter().map(|(local, _)| local.name.clone()).collect(),
            references: target.id,
            referenced_columns: pairs.iter().map(|(_, foreign)| foreign.name.clone()).collect(),
            on_update: relation.on_update.clone(),
            on_delete: relation.on_delete.clone(),
        })
    }
}
