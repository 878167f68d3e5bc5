mod action;
pub use action::ReferentialAction;

mod reference;
pub use reference::Reference;

use super::{name, Database, Entity, EntityId, Field, VendorInfos};
use crate::{BuildErrorKind, Error, Result};

use indexmap::IndexMap;
use std::{borrow::Cow, fmt};

/// A foreign key from fields of the owning entity to fields of a target
/// entity.
///
/// The target is stored by name and looked up through the [`Database`] on
/// demand, so a relation may be declared before its target is registered.
/// [`Database::finalize_definition`] binds the target and fixes the
/// generated name.
#[derive(Debug, Clone)]
pub struct Relation {
    /// Uniquely identifies the relation within the database. Assigned when
    /// the relation is attached to a registered entity.
    pub id: RelationId,

    name: RelationName,

    /// Name of the generated accessor, defaults to the explicit relation name
    pub field: Option<String>,

    /// Name of the accessor generated on the target side
    pub ref_field: Option<String>,

    pub ref_name: Option<String>,

    foreign_entity_name: String,

    /// Set once the target has been resolved during finalization.
    foreign_entity: Option<EntityId>,

    pub foreign_schema: Option<String>,

    local_fields: Vec<String>,

    foreign_fields: Vec<String>,

    pub on_update: ReferentialAction,

    pub on_delete: ReferentialAction,

    /// `INNER JOIN` or `LEFT JOIN`
    pub default_join: String,

    pub skip_sql: bool,

    pub skip_code_generation: bool,

    pub vendor: VendorInfos,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RelationId {
    pub entity: EntityId,
    pub index: usize,
}

/// A relation name is either chosen by the author or derived from the
/// relation's shape. A derived name is computed on every read until
/// finalization fixes it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RelationName {
    Explicit(String),
    Auto(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    OneToOne,
    ManyToOne,
}

impl Relation {
    pub fn new(foreign_entity_name: impl Into<String>) -> Relation {
        Relation {
            id: RelationId::placeholder(),
            name: RelationName::Auto(None),
            field: None,
            ref_field: None,
            ref_name: None,
            foreign_entity_name: foreign_entity_name.into(),
            foreign_entity: None,
            foreign_schema: None,
            local_fields: vec![],
            foreign_fields: vec![],
            on_update: ReferentialAction::None,
            on_delete: ReferentialAction::None,
            default_join: "INNER JOIN".to_string(),
            skip_sql: false,
            skip_code_generation: false,
            vendor: VendorInfos::default(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn reference(mut self, reference: impl Into<Reference>) -> Self {
        self.add_reference(reference);
        self
    }

    pub fn on_update(mut self, action: impl Into<ReferentialAction>) -> Self {
        self.on_update = action.into();
        self
    }

    pub fn on_delete(mut self, action: impl Into<ReferentialAction>) -> Self {
        self.on_delete = action.into();
        self
    }

    /// The owning entity.
    pub fn entity(&self) -> EntityId {
        self.id.entity
    }

    // ===== Naming =====

    /// The constraint name: the explicit name when one was set, otherwise
    /// the derived name (see [`Relation::auto_name`]).
    ///
    /// A derived name is only fixed by [`Database::finalize_definition`].
    /// Before that it is recomputed on each read, so it changes if the
    /// target entity is registered after the first read. Finalize before
    /// reading names you intend to emit.
    pub fn name<'a>(&'a self, db: &Database) -> Cow<'a, str> {
        match &self.name {
            RelationName::Explicit(name) | RelationName::Auto(Some(name)) => Cow::Borrowed(name),
            RelationName::Auto(None) => Cow::Owned(self.auto_name(db)),
        }
    }

    /// The explicit name, or the derived name once finalization fixed it.
    pub fn stored_name(&self) -> Option<&str> {
        match &self.name {
            RelationName::Explicit(name) | RelationName::Auto(Some(name)) => Some(name),
            RelationName::Auto(None) => None,
        }
    }

    /// Sets an explicit name. An empty name re-enables derived naming.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = if name.is_empty() {
            RelationName::Auto(None)
        } else {
            RelationName::Explicit(name)
        };
    }

    /// True when the author chose the name.
    pub fn has_name(&self) -> bool {
        matches!(self.name, RelationName::Explicit(_))
    }

    pub fn is_auto_named(&self) -> bool {
        !self.has_name()
    }

    /// `{owner_table}_fk_{hash}`, where `hash` is the first six hex
    /// characters of the MD5 of `target_full_table:local,fields:foreign,fields`
    /// lower-cased. The target table is left out while the target cannot be
    /// resolved and the owner prefix while the relation is not attached.
    pub fn auto_name(&self, db: &Database) -> String {
        let mut parts = vec![];
        if let Some(target) = self.foreign_entity(db) {
            parts.push(target.full_table_name());
        }
        parts.push(self.local_fields.join(","));
        parts.push(self.foreign_fields.join(","));

        let hash = name::digest6(&parts.join(":").to_lowercase());

        match self.owner(db) {
            Some(owner) => format!("{}_fk_{hash}", owner.table_name()),
            None => format!("fk_{hash}"),
        }
    }

    pub(crate) fn fix_name(&mut self, name: String) {
        if let RelationName::Auto(fixed) = &mut self.name {
            *fixed = Some(name);
        }
    }

    fn reset_auto_name(&mut self) {
        if let RelationName::Auto(fixed) = &mut self.name {
            *fixed = None;
        }
    }

    /// The accessor name: `field` when set, otherwise the explicit name.
    pub fn field(&self) -> Option<&str> {
        match (&self.field, &self.name) {
            (Some(field), _) if !field.is_empty() => Some(field),
            (_, RelationName::Explicit(name)) => Some(name),
            _ => None,
        }
    }

    // ===== Target =====

    pub fn foreign_entity_name(&self) -> &str {
        &self.foreign_entity_name
    }

    pub fn set_foreign_entity_name(&mut self, name: impl Into<String>) {
        self.foreign_entity_name = name.into();
        self.foreign_entity = None;
        self.reset_auto_name();
    }

    /// The target entity: the bound one after finalization, otherwise a
    /// lookup by short name falling back to the fully qualified name.
    pub fn foreign_entity<'a>(&self, db: &'a Database) -> Option<&'a Entity> {
        match self.foreign_entity {
            Some(id) => db.get_entity(id),
            None => db.resolve_entity(&self.foreign_entity_name),
        }
    }

    /// Like [`Relation::foreign_entity`], but a missing target is a build
    /// error.
    pub fn target<'a>(&self, db: &'a Database) -> Result<&'a Entity> {
        self.foreign_entity(db)
            .ok_or_else(|| self.build_error(db, BuildErrorKind::MissingTarget))
    }

    pub(crate) fn bind_target(&mut self, id: EntityId) {
        self.foreign_entity = Some(id);
    }

    /// The owning entity, when the relation is attached to a registered
    /// entity.
    pub fn owner<'a>(&self, db: &'a Database) -> Option<&'a Entity> {
        db.get_entity(self.id.entity)
    }

    fn require_owner<'a>(&self, db: &'a Database) -> Result<&'a Entity> {
        self.owner(db).ok_or_else(|| {
            Error::invalid_schema(format!(
                "relation `{}` to `{}` is not attached to an entity of database `{}`",
                self.name(db),
                self.foreign_entity_name,
                db.name
            ))
        })
    }

    // ===== References =====

    /// Appends one local/foreign pair.
    pub fn add_reference(&mut self, reference: impl Into<Reference>) {
        let Reference { local, foreign } = reference.into();
        self.local_fields.push(local);
        self.foreign_fields.push(foreign);
        self.reset_auto_name();
    }

    pub fn clear_references(&mut self) {
        self.local_fields.clear();
        self.foreign_fields.clear();
        self.reset_auto_name();
    }

    pub fn local_fields(&self) -> &[String] {
        &self.local_fields
    }

    pub fn foreign_fields(&self) -> &[String] {
        &self.foreign_fields
    }

    pub fn references(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.local_fields
            .iter()
            .zip(&self.foreign_fields)
            .map(|(local, foreign)| (local.as_str(), foreign.as_str()))
    }

    pub fn has_local_field(&self, name: &str) -> bool {
        self.local_fields.iter().any(|local| local == name)
    }

    pub fn is_composite(&self) -> bool {
        self.local_fields.len() > 1
    }

    /// Local field name to foreign field name.
    ///
    /// If a local name appears twice, which of its pairs survives is not
    /// specified. Equality of the returned maps ignores order.
    pub fn local_foreign_mapping(&self) -> IndexMap<&str, &str> {
        self.references().collect()
    }

    /// Foreign field name to local field name.
    pub fn foreign_local_mapping(&self) -> IndexMap<&str, &str> {
        self.references()
            .map(|(local, foreign)| (foreign, local))
            .collect()
    }

    /// Agrees with [`Relation::local_foreign_mapping`] when `local` is
    /// referenced more than once.
    pub fn mapped_foreign_field(&self, local: &str) -> Option<&str> {
        self.local_foreign_mapping().get(local).copied()
    }

    pub fn mapped_local_field(&self, foreign: &str) -> Option<&str> {
        self.foreign_local_mapping().get(foreign).copied()
    }

    // ===== Field resolution =====

    /// Resolves every local field name against the owning entity.
    pub fn local_field_objects<'a>(&self, db: &'a Database) -> Result<Vec<&'a Field>> {
        let owner = self.require_owner(db)?;

        self.local_fields
            .iter()
            .map(|name| {
                owner.field(name).ok_or_else(|| {
                    self.build_error(db, BuildErrorKind::LocalField { field: name.clone() })
                })
            })
            .collect()
    }

    /// Resolves every foreign field name against the target entity.
    ///
    /// A dotted name `relation.field` goes through `relation`, declared on
    /// the target: it resolves to the target field that `relation` maps
    /// onto `field`.
    pub fn foreign_field_objects<'a>(&self, db: &'a Database) -> Result<Vec<&'a Field>> {
        let target = self.target(db)?;

        self.foreign_fields
            .iter()
            .map(|path| self.resolve_foreign_field(db, target, path))
            .collect()
    }

    fn resolve_foreign_field<'a>(
        &self,
        db: &Database,
        target: &'a Entity,
        path: &str,
    ) -> Result<&'a Field> {
        let field_error = || {
            self.build_error(
                db,
                BuildErrorKind::ForeignField {
                    field: path.to_string(),
                },
            )
        };

        let Some((relation, field)) = path.split_once('.') else {
            return target.field(path).ok_or_else(field_error);
        };

        let chained = target.relation(relation).ok_or_else(|| {
            self.build_error(
                db,
                BuildErrorKind::ForeignRelation {
                    relation: relation.to_string(),
                    path: path.to_string(),
                },
            )
        })?;

        chained
            .mapped_local_field(field)
            .and_then(|local| target.field(local))
            .ok_or_else(field_error)
    }

    /// Local and foreign fields, pairwise.
    pub fn field_objects_mapping<'a>(
        &self,
        db: &'a Database,
    ) -> Result<Vec<(&'a Field, &'a Field)>> {
        let local = self.local_field_objects(db)?;
        let foreign = self.foreign_field_objects(db)?;
        Ok(local.into_iter().zip(foreign).collect())
    }

    /// Checks that the relation can be resolved and returns its target.
    pub(crate) fn verify(&self, db: &Database) -> Result<EntityId> {
        if self.local_fields.is_empty() {
            return Err(self.build_error(db, BuildErrorKind::NoReferences));
        }

        let target = self.target(db)?;
        self.local_field_objects(db)?;
        self.foreign_field_objects(db)?;

        Ok(target.id)
    }

    // ===== Key predicates =====

    pub fn is_local_fields_required(&self, db: &Database) -> Result<bool> {
        Ok(self
            .local_field_objects(db)?
            .iter()
            .all(|field| field.is_not_null()))
    }

    pub fn is_at_least_one_local_field_required(&self, db: &Database) -> Result<bool> {
        Ok(self
            .local_field_objects(db)?
            .iter()
            .any(|field| field.is_not_null()))
    }

    /// Local fields that are part of the owning entity's primary key.
    pub fn local_primary_keys<'a>(&self, db: &'a Database) -> Result<Vec<&'a Field>> {
        let mut fields = self.local_field_objects(db)?;
        fields.retain(|field| field.primary_key);
        Ok(fields)
    }

    pub fn is_at_least_one_local_primary_key(&self, db: &Database) -> Result<bool> {
        Ok(!self.local_primary_keys(db)?.is_empty())
    }

    /// True when a local primary key field is `NOT NULL` and has no default,
    /// so a row cannot be written without a value for it.
    pub fn is_at_least_one_local_primary_key_required(&self, db: &Database) -> Result<bool> {
        Ok(self
            .local_primary_keys(db)?
            .iter()
            .any(|field| field.is_not_null() && !field.has_default_value()))
    }

    /// Foreign fields that are part of the target's primary key.
    pub fn foreign_primary_keys<'a>(&self, db: &'a Database) -> Result<Vec<&'a Field>> {
        let mut fields = self.foreign_field_objects(db)?;
        fields.retain(|field| field.primary_key);
        Ok(fields)
    }

    pub fn is_at_least_one_foreign_primary_key(&self, db: &Database) -> Result<bool> {
        Ok(!self.foreign_primary_keys(db)?.is_empty())
    }

    /// True when the local fields are exactly the owning entity's primary
    /// key. Covering part of a composite key does not count.
    pub fn is_local_primary_key(&self, db: &Database) -> bool {
        let Some(owner) = self.owner(db) else {
            return false;
        };

        let pk = owner.primary_key_names();
        pk.len() == self.local_fields.len()
            && pk.iter().all(|name| self.has_local_field(name))
    }

    /// True when the mapped foreign fields are exactly the target's primary
    /// key.
    pub fn is_foreign_primary_key(&self, db: &Database) -> bool {
        let (Some(target), Ok(foreign)) = (self.foreign_entity(db), self.foreign_field_objects(db))
        else {
            return false;
        };

        let pk = target.primary_key_names();
        pk.len() == foreign.len()
            && pk
                .iter()
                .all(|name| foreign.iter().any(|field| field.name == *name))
    }

    // ===== Graph queries =====

    /// The relation declared on the target that points back at the owning
    /// entity with the mirrored field mapping.
    pub fn inverse_fk<'a>(&self, db: &'a Database) -> Option<&'a Relation> {
        let target = self.foreign_entity(db)?;
        let mapping = self.foreign_local_mapping();

        target.relations().iter().find(|candidate| {
            candidate.id != self.id
                && candidate.foreign_entity(db).map(|entity| entity.id) == Some(self.id.entity)
                && candidate.local_foreign_mapping() == mapping
        })
    }

    pub fn is_matched_by_inverse_fk(&self, db: &Database) -> bool {
        self.inverse_fk(db).is_some()
    }

    /// The other relations declared on the owning entity.
    pub fn other_fks<'a>(&self, db: &'a Database) -> Vec<&'a Relation> {
        self.owner(db)
            .map(|owner| {
                owner
                    .relations()
                    .iter()
                    .filter(|relation| relation.id != self.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn multiplicity(&self, db: &Database) -> Multiplicity {
        let local: Vec<&str> = self.local_fields.iter().map(String::as_str).collect();
        let unique = self
            .owner(db)
            .is_some_and(|owner| owner.has_unique_over(&local));

        if self.is_local_primary_key(db) || unique || self.is_matched_by_inverse_fk(db) {
            Multiplicity::OneToOne
        } else {
            Multiplicity::ManyToOne
        }
    }

    pub fn has_on_update(&self) -> bool {
        !self.on_update.is_none()
    }

    pub fn has_on_delete(&self) -> bool {
        !self.on_delete.is_none()
    }

    fn build_error(&self, db: &Database, kind: BuildErrorKind) -> Error {
        let entity = self
            .owner(db)
            .map(|owner| owner.name.as_str())
            .unwrap_or("(unattached)");
        let target = self
            .foreign_entity(db)
            .map(|target| target.name.as_str())
            .unwrap_or(&self.foreign_entity_name);

        Error::build(kind, self.name(db), entity, target)
    }
}

impl RelationId {
    pub(crate) fn placeholder() -> Self {
        Self {
            entity: EntityId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl fmt::Debug for RelationId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "RelationId({}/{})", self.entity.0, self.index)
    }
}
