//! Structural fixes platforms apply to entities during finalization.
//!
//! Every function here is idempotent: it plans against the current entity
//! and only adds what is missing.

use crate::{
    schema::{Database, EntityId, IdMethod, Index},
    Result,
};

use tracing::debug;

/// The default normalization shared by every platform.
pub fn normalize_entity(db: &mut Database, id: EntityId) -> Result<()> {
    fix_id_method(db, id);
    ensure_inverse_unique_indices(db, id)?;
    ensure_heavy_indices(db, id)?;
    Ok(())
}

/// A native id method without an auto-incremented primary key falls back to
/// application-supplied keys.
pub fn fix_id_method(db: &mut Database, id: EntityId) {
    let entity = db.entity(id);
    if entity.effective_id_method(db) == IdMethod::Native
        && entity.auto_increment_primary_key().is_none()
    {
        db.entity_mut(id).id_method = Some(IdMethod::None);
    }
}

/// A relation paired with an inverse relation is one-to-one, so its local
/// fields must be unique. The primary key already is.
pub fn ensure_inverse_unique_indices(db: &mut Database, id: EntityId) -> Result<()> {
    let entity = db.entity(id);
    let mut planned: Vec<Vec<String>> = vec![];

    for relation in entity.relations() {
        if relation.is_local_primary_key(db) || !relation.is_matched_by_inverse_fk(db) {
            continue;
        }

        plan(&mut planned, relation.local_fields(), |names| {
            entity.has_unique_over(names)
        });
    }

    add_indices(db, id, planned, Index::unique)
}

/// Every relation's local fields lead some index.
pub fn ensure_relation_indices(db: &mut Database, id: EntityId) -> Result<()> {
    let entity = db.entity(id);
    let mut planned: Vec<Vec<String>> = vec![];

    for relation in entity.relations() {
        if relation.skip_sql {
            continue;
        }

        plan(&mut planned, relation.local_fields(), |names| {
            entity.is_indexed_by_prefix(names)
        });
    }

    add_indices(db, id, planned, Index::new)
}

/// With heavy indexing, every primary key field after the first gets its
/// own index.
pub fn ensure_heavy_indices(db: &mut Database, id: EntityId) -> Result<()> {
    let entity = db.entity(id);
    if !entity.is_heavy_indexing(db) {
        return Ok(());
    }

    let mut planned: Vec<Vec<String>> = vec![];
    for field in entity.primary_key().skip(1) {
        plan(&mut planned, std::slice::from_ref(&field.name), |names| {
            entity.is_indexed_by_prefix(names)
        });
    }

    add_indices(db, id, planned, Index::new)
}

fn plan(planned: &mut Vec<Vec<String>>, fields: &[String], satisfied: impl Fn(&[&str]) -> bool) {
    let names: Vec<&str> = fields.iter().map(String::as_str).collect();
    if names.is_empty() || satisfied(&names) {
        return;
    }

    let duplicate = planned.iter().any(|other| {
        other.len() == names.len() && other.iter().all(|name| names.contains(&name.as_str()))
    });
    if !duplicate {
        planned.push(fields.to_vec());
    }
}

fn add_indices(
    db: &mut Database,
    id: EntityId,
    planned: Vec<Vec<String>>,
    make: fn(Vec<String>) -> Index,
) -> Result<()> {
    for fields in planned {
        let index = make(fields);
        debug!(
            entity = %db.entity(id).name,
            fields = ?index.fields.iter().map(|field| &field.name).collect::<Vec<_>>(),
            unique = index.unique,
            "adding index required by platform"
        );
        db.entity_mut(id).add_index(index)?;
    }
    Ok(())
}
