use super::{Entity, EntityId, IdMethod, Relation, RelationId, VendorInfos};
use crate::{Error, Result};

/// The root of a schema: owns every entity and resolves names between them.
#[derive(Debug, Clone)]
pub struct Database {
    pub name: String,

    /// Default SQL schema for entities that do not set one
    pub schema: Option<String>,

    pub namespace: Option<String>,

    pub default_id_method: IdMethod,

    pub identifier_quoting: Option<bool>,

    pub heavy_indexing: bool,

    pub vendor: VendorInfos,

    entities: Vec<Entity>,

    finalized: bool,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Database {
        Database {
            name: name.into(),
            schema: None,
            namespace: None,
            default_id_method: IdMethod::Native,
            identifier_quoting: None,
            heavy_indexing: false,
            vendor: VendorInfos::default(),
            entities: vec![],
            finalized: false,
        }
    }

    /// Registers an entity and assigns ids to it and its relations.
    ///
    /// The entity inherits the database schema when it has none. Two
    /// entities may not share a fully qualified name.
    pub fn add_entity(&mut self, mut entity: Entity) -> Result<EntityId> {
        if entity.name.is_empty() {
            return Err(Error::invalid_schema(format!(
                "database `{}` contains an entity without a name",
                self.name
            )));
        }

        if entity.schema.is_none() {
            entity.schema = self.schema.clone();
        }

        let full_name = entity.full_name();
        if self.entity_by_full_name(&full_name).is_some() {
            return Err(Error::invalid_schema(format!(
                "database `{}` declares entity `{full_name}` more than once",
                self.name
            )));
        }

        let id = EntityId(self.entities.len());
        entity.id = id;
        for (index, relation) in entity.relations_mut().iter_mut().enumerate() {
            relation.id = RelationId { entity: id, index };
        }

        self.entities.push(entity);
        self.finalized = false;

        Ok(id)
    }

    /// Get an entity by ID
    pub fn entity(&self, id: impl Into<EntityId>) -> &Entity {
        self.entities.get(id.into().0).expect("invalid entity ID")
    }

    pub fn entity_mut(&mut self, id: impl Into<EntityId>) -> &mut Entity {
        self.finalized = false;
        self.entities.get_mut(id.into().0).expect("invalid entity ID")
    }

    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn entities(&self) -> impl ExactSizeIterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    pub fn entity_ids(&self) -> impl ExactSizeIterator<Item = EntityId> {
        (0..self.entities.len()).map(EntityId)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    pub fn entity_by_full_name(&self, full_name: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|entity| entity.full_name() == full_name)
    }

    /// Short name first, then the fully qualified name. Never the reverse.
    pub fn resolve_entity(&self, name: &str) -> Option<&Entity> {
        self.entity_by_name(name)
            .or_else(|| self.entity_by_full_name(name))
    }

    /// Get a relation by ID
    pub fn relation(&self, id: RelationId) -> &Relation {
        self.entity(id.entity)
            .relations()
            .get(id.index)
            .expect("invalid relation ID")
    }

    /// Every relation of every entity, in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.entities
            .iter()
            .flat_map(|entity| entity.relations().iter())
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(super) fn set_finalized(&mut self) {
        self.finalized = true;
    }

    pub(super) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }
}
