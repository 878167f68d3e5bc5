use super::{name, Database, Field, Index, Relation, RelationId, VendorInfos};
use crate::{Error, Result};

use std::{borrow::Cow, fmt};

/// A table-level schema unit: fields, outgoing relations, and indices.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Uniquely identifies the entity within the database
    pub id: EntityId,

    /// StudlyCase entity name
    pub name: String,

    /// Explicit table name. Defaults to the snake_case entity name.
    pub table_name: Option<String>,

    /// SQL schema the table lives in. Inherited from the database when unset
    /// at registration.
    pub schema: Option<String>,

    pub namespace: Option<String>,

    /// Falls back to the database default when unset.
    pub id_method: Option<IdMethod>,

    pub skip_sql: bool,

    pub read_only: bool,

    pub is_abstract: bool,

    /// Marks a many-to-many junction entity.
    pub is_cross_ref: bool,

    pub description: Option<String>,

    pub identifier_quoting: Option<bool>,

    pub heavy_indexing: Option<bool>,

    fields: Vec<Field>,

    relations: Vec<Relation>,

    indices: Vec<Index>,

    pub vendor: VendorInfos,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// How primary key values are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdMethod {
    /// Use the platform's native mechanism.
    Native,
    AutoIncrement,
    Sequence,
    None,
}

/// A many-to-many association discovered through a junction entity.
#[derive(Debug, Clone)]
pub struct CrossRelation<'a> {
    /// The junction's relation pointing at the entity the query started from
    pub incoming: &'a Relation,

    /// The junction's remaining relations
    pub outgoing: Vec<&'a Relation>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Entity {
        Entity {
            id: EntityId::placeholder(),
            name: name.into(),
            table_name: None,
            schema: None,
            namespace: None,
            id_method: None,
            skip_sql: false,
            read_only: false,
            is_abstract: false,
            is_cross_ref: false,
            description: None,
            identifier_quoting: None,
            heavy_indexing: None,
            fields: vec![],
            relations: vec![],
            indices: vec![],
            vendor: VendorInfos::default(),
        }
    }

    pub fn table_name(&self) -> Cow<'_, str> {
        match &self.table_name {
            Some(table_name) => Cow::Borrowed(table_name),
            None => Cow::Owned(name::snake_case(&self.name)),
        }
    }

    /// `schema.Name`, or just the name when no schema is set.
    pub fn full_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// `schema.table`, or just the table name when no schema is set.
    pub fn full_table_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.table_name()),
            None => self.table_name().into_owned(),
        }
    }

    // ===== Fields =====

    pub fn add_field(&mut self, field: Field) -> Result<()> {
        field.verify(&self.name)?;

        if self.has_field(&field.name) {
            return Err(Error::invalid_schema(format!(
                "entity `{}` declares field `{}` more than once",
                self.name, field.name
            )));
        }

        self.fields.push(field);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> + '_ {
        self.fields.iter_mut()
    }

    /// Primary key fields in declaration order. May be empty.
    pub fn primary_key(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|field| field.primary_key)
    }

    pub fn primary_key_names(&self) -> Vec<&str> {
        self.primary_key().map(|field| field.name.as_str()).collect()
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_key().next().is_some()
    }

    pub fn has_composite_primary_key(&self) -> bool {
        self.primary_key().count() > 1
    }

    /// The auto-incremented primary key field, if any.
    pub fn auto_increment_primary_key(&self) -> Option<&Field> {
        self.primary_key().find(|field| field.auto_increment)
    }

    // ===== Relations =====

    /// Attaches a relation and returns its id. The id is only meaningful
    /// once the entity is registered with a [`Database`].
    pub fn add_relation(&mut self, mut relation: Relation) -> RelationId {
        let id = RelationId {
            entity: self.id,
            index: self.relations.len(),
        };
        relation.id = id;
        self.relations.push(relation);
        id
    }

    /// Looks up a relation by its explicit or fixed name, falling back to its
    /// accessor name.
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|relation| relation.stored_name() == Some(name))
            .or_else(|| {
                self.relations
                    .iter()
                    .find(|relation| relation.field() == Some(name))
            })
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub(crate) fn relations_mut(&mut self) -> &mut [Relation] {
        &mut self.relations
    }

    /// Relations of other entities (or this one) that target this entity.
    pub fn referrers<'a>(&self, db: &'a Database) -> Vec<&'a Relation> {
        db.relations()
            .filter(|relation| relation.foreign_entity(db).map(|e| e.id) == Some(self.id))
            .collect()
    }

    /// Many-to-many associations reached through junction entities that
    /// point at this entity.
    pub fn cross_relations<'a>(&self, db: &'a Database) -> Vec<CrossRelation<'a>> {
        self.referrers(db)
            .into_iter()
            .filter(|relation| {
                relation
                    .owner(db)
                    .is_some_and(|junction| junction.is_cross_ref)
            })
            .map(|incoming| CrossRelation {
                incoming,
                outgoing: incoming.other_fks(db),
            })
            .collect()
    }

    // ===== Indices =====

    pub fn add_index(&mut self, index: Index) -> Result<()> {
        if index.fields.is_empty() {
            return Err(Error::invalid_schema(format!(
                "index on entity `{}` has no fields",
                self.name
            )));
        }

        if let Some(missing) = index.field_names().find(|name| !self.has_field(name)) {
            return Err(Error::invalid_schema(format!(
                "index on entity `{}` references unknown field `{missing}`",
                self.name
            )));
        }

        self.indices.push(index);
        Ok(())
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    pub(crate) fn indices_mut(&mut self) -> &mut [Index] {
        &mut self.indices
    }

    pub fn unique_indices(&self) -> impl Iterator<Item = &Index> + '_ {
        self.indices.iter().filter(|index| index.unique)
    }

    /// True when a unique index, or the primary key, covers exactly `names`.
    pub fn has_unique_over(&self, names: &[&str]) -> bool {
        let pk = self.primary_key_names();
        let pk_covers = !pk.is_empty()
            && pk.len() == names.len()
            && pk.iter().all(|name| names.contains(name));

        pk_covers || self.unique_indices().any(|index| index.covers(names))
    }

    /// True when some index, or the primary key, starts with `names`.
    pub fn is_indexed_by_prefix(&self, names: &[&str]) -> bool {
        let pk = self.primary_key_names();
        let pk_prefix = !names.is_empty()
            && pk.len() >= names.len()
            && pk[..names.len()].iter().all(|name| names.contains(name));

        pk_prefix || self.indices.iter().any(|index| index.has_prefix(names))
    }

    // ===== Settings =====

    pub fn effective_id_method(&self, db: &Database) -> IdMethod {
        self.id_method.unwrap_or(db.default_id_method)
    }

    pub fn is_identifier_quoting_enabled(&self, db: &Database) -> Option<bool> {
        self.identifier_quoting.or(db.identifier_quoting)
    }

    pub fn is_heavy_indexing(&self, db: &Database) -> bool {
        self.heavy_indexing.unwrap_or(db.heavy_indexing)
    }
}

impl EntityId {
    pub(crate) fn placeholder() -> Self {
        Self(usize::MAX)
    }

    pub fn is_placeholder(self) -> bool {
        self.0 == usize::MAX
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityId({})", self.0)
    }
}

impl IdMethod {
    pub fn from_name(name: &str) -> Option<IdMethod> {
        match name.to_lowercase().as_str() {
            "native" => Some(IdMethod::Native),
            "autoincrement" => Some(IdMethod::AutoIncrement),
            "sequence" => Some(IdMethod::Sequence),
            "none" => Some(IdMethod::None),
            _ => None,
        }
    }

    /// True unless keys are supplied by the application.
    pub fn is_generated(self) -> bool {
        !matches!(self, IdMethod::None)
    }
}
