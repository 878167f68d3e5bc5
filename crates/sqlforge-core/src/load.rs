//! Builds a [`Database`] from an already-parsed schema tree.
//!
//! The tree is the generic shape produced by the XML/array schema readers:
//! nested objects with case-insensitive keys, singular or plural child
//! collections, and loosely typed scalars. Closed vocabularies (field
//! types, referential actions, join kinds, id methods) are checked here so
//! the model only ever holds valid values.

mod attributes;
pub use attributes::Attributes;

use crate::{
    schema::{
        name, Database, Entity, Field, FieldDefault, IdMethod, Index, IndexField, Reference,
        ReferentialAction, Relation, SqlType, Vendor, VendorInfos,
    },
    Error, Result,
};

use serde_json::Value;
use tracing::debug;

const REFERENTIAL_ACTIONS: &[&str] = &["CASCADE", "SETNULL", "RESTRICT", "NONE"];
const JOINS: &[&str] = &["INNER JOIN", "LEFT JOIN"];

/// Parses a JSON document and loads it.
pub fn from_str(src: &str) -> Result<Database> {
    let value: Value = serde_json::from_str(src)?;
    from_value(&value)
}

/// Loads a database from a schema tree. The root is either the database
/// object itself or an object with a single `database` key.
pub fn from_value(value: &Value) -> Result<Database> {
    let root = Attributes::new("$", value)?;
    let attrs = match root.get("database") {
        Some(inner) => Attributes::new("$.database", inner)?,
        None => root,
    };

    let db = database(&attrs)?;
    debug!(
        database = %db.name,
        entities = db.entities().len(),
        "loaded schema tree"
    );
    Ok(db)
}

/// `true`, `t`, `y`, `yes` (any case) or a non-zero number.
pub fn boolean_value(value: &str) -> bool {
    let value = value.trim();
    if let Ok(number) = value.parse::<f64>() {
        if number.is_finite() {
            return number != 0.0;
        }
    }
    matches!(
        value.to_lowercase().as_str(),
        "true" | "t" | "y" | "yes"
    )
}

/// Splits on commas and trims each item.
pub fn delimited_list(value: &str) -> Vec<String> {
    let value = value.trim();
    if value.is_empty() {
        return vec![];
    }
    value.split(',').map(|item| item.trim().to_string()).collect()
}

fn database(attrs: &Attributes<'_>) -> Result<Database> {
    let mut db = Database::new(attrs.required_str("name")?);
    db.schema = attrs.string_value("schema")?;
    db.namespace = attrs.string_value("namespace")?;
    db.identifier_quoting = attrs.bool("identifierQuoting")?;
    db.heavy_indexing = attrs.bool_or("heavyIndexing", false)?;
    db.vendor = vendor_infos(attrs)?;

    if let Some(method) = attrs.one_of("defaultIdMethod", &["NATIVE", "NONE"])? {
        db.default_id_method = id_method(attrs, "defaultIdMethod", &method)?;
    }

    let entities = attrs.children("entities", "entity")?;
    if entities.is_empty() {
        return Err(Error::ingestion(
            format!("{}.entities", attrs.path()),
            "at least one entity is required",
        ));
    }

    for child in &entities {
        let entity = entity(child)?;
        db.add_entity(entity)
            .map_err(|err| err.context(Error::ingestion(child.path(), "cannot register entity")))?;
    }

    Ok(db)
}

fn entity(attrs: &Attributes<'_>) -> Result<Entity> {
    let mut entity = Entity::new(name::studly_case(attrs.required_str("name")?));
    entity.table_name = attrs.string_value("tableName")?;
    entity.schema = attrs.string_value("schema")?;
    entity.namespace = attrs.string_value("namespace")?;
    entity.skip_sql = attrs.bool_or("skipSql", false)?;
    entity.read_only = attrs.bool_or("readOnly", false)?;
    entity.is_abstract = attrs.bool_or("abstract", false)?;
    entity.is_cross_ref = attrs.bool_or("isCrossRef", false)?;
    entity.description = attrs.string_value("description")?;
    entity.identifier_quoting = attrs.bool("identifierQuoting")?;
    entity.heavy_indexing = attrs.bool("heavyIndexing")?;
    entity.vendor = vendor_infos(attrs)?;

    if let Some(method) =
        attrs.one_of("idMethod", &["NATIVE", "AUTOINCREMENT", "SEQUENCE", "NONE"])?
    {
        entity.id_method = Some(id_method(attrs, "idMethod", &method)?);
    }

    let fields = attrs.children("fields", "field")?;
    if fields.is_empty() {
        return Err(Error::ingestion(
            format!("{}.fields", attrs.path()),
            "at least one field is required",
        ));
    }

    for child in &fields {
        entity
            .add_field(field(child)?)
            .map_err(|err| err.context(Error::ingestion(child.path(), "invalid field")))?;
    }

    for (child, unique) in attrs
        .children("indices", "index")?
        .into_iter()
        .map(|child| (child, false))
        .chain(
            attrs
                .children("uniques", "unique")?
                .into_iter()
                .map(|child| (child, true)),
        )
    {
        let index = index(&child, unique)?;
        entity
            .add_index(index)
            .map_err(|err| err.context(Error::ingestion(child.path(), "invalid index")))?;
    }

    for child in attrs.children("relations", "relation")? {
        entity.add_relation(relation(&child)?);
    }

    Ok(entity)
}

fn field(attrs: &Attributes<'_>) -> Result<Field> {
    let ty = match attrs.string_value("type")? {
        Some(ty) => SqlType::from_name(ty.trim()).ok_or_else(|| {
            Error::ingestion(
                format!("{}.type", attrs.path()),
                format!("unsupported field type `{}`", ty.to_uppercase()),
            )
        })?,
        None => SqlType::Varchar,
    };

    let mut field = Field::new(attrs.required_str("name")?, ty);
    field.primary_key = attrs.bool_or("primaryKey", false)?;
    field.required = attrs.bool_or("required", false)?;
    field.auto_increment = attrs.bool_or("autoIncrement", false)?;
    field.size = attrs.u32("size")?;
    field.scale = attrs.u32("scale")?;
    field.sql_type = attrs.string_value("sqlType")?;
    field.description = attrs.string_value("description")?;
    field.lazy_load = attrs.bool_or("lazyLoad", false)?;
    field.primary_string = attrs.bool_or("primaryString", false)?;
    field.value_set = attrs.list("valueSet")?;
    field.vendor = vendor_infos(attrs)?;

    let value = match attrs.string_value("default")? {
        Some(value) => Some(value),
        None => attrs.string_value("defaultValue")?,
    };
    field.default = match (value, attrs.string_value("defaultExpr")?) {
        (Some(_), Some(_)) => {
            return Err(Error::ingestion(
                attrs.path(),
                "`default` and `defaultExpr` are mutually exclusive",
            ))
        }
        (Some(value), None) => Some(FieldDefault::Value(value)),
        (None, Some(expr)) => Some(FieldDefault::Expr(expr)),
        (None, None) => None,
    };

    Ok(field)
}

fn relation(attrs: &Attributes<'_>) -> Result<Relation> {
    let mut relation = Relation::new(name::studly_case(attrs.required_str("target")?));

    if let Some(name) = attrs.string_value("name")? {
        relation.set_name(name);
    }
    relation.field = attrs.string_value("field")?;
    relation.ref_field = attrs.string_value("refField")?;
    relation.ref_name = attrs.string_value("refName")?;
    relation.foreign_schema = attrs.string_value("foreignSchema")?;
    relation.skip_sql = attrs.bool_or("skipSql", false)?;
    relation.vendor = vendor_infos(attrs)?;

    let on_update = attrs.one_of("onUpdate", REFERENTIAL_ACTIONS)?;
    relation.on_update = ReferentialAction::normalize(on_update.as_deref());
    let on_delete = attrs.one_of("onDelete", REFERENTIAL_ACTIONS)?;
    relation.on_delete = ReferentialAction::normalize(on_delete.as_deref());

    if let Some(join) = attrs.one_of("defaultJoin", JOINS)? {
        relation.default_join = join;
    }

    for child in attrs.children("references", "reference")? {
        relation.add_reference(Reference::new(
            child.required_str("local")?,
            child.required_str("foreign")?,
        ));
    }

    Ok(relation)
}

fn index(attrs: &Attributes<'_>, unique: bool) -> Result<Index> {
    let (plural, singular) = if unique {
        ("unique-fields", "unique-field")
    } else {
        ("index-fields", "index-field")
    };

    let mut fields = vec![];
    for child in attrs.children(plural, singular)? {
        fields.push(IndexField {
            name: child.required_str("name")?.to_string(),
            size: child.u32("size")?,
        });
    }

    Ok(Index {
        name: attrs.string_value("name")?,
        fields,
        unique,
        vendor: vendor_infos(attrs)?,
    })
}

fn vendor_infos(attrs: &Attributes<'_>) -> Result<VendorInfos> {
    let mut infos = VendorInfos::default();

    for child in attrs.children("vendors", "vendor")? {
        let mut vendor = Vendor::new(child.required_str("type")?);
        for parameter in child.children("parameters", "parameter")? {
            vendor.set_parameter(
                parameter.required_str("name")?,
                parameter.string_value("value")?.unwrap_or_default(),
            );
        }
        infos.add(vendor);
    }

    Ok(infos)
}

fn id_method(attrs: &Attributes<'_>, key: &str, method: &str) -> Result<IdMethod> {
    IdMethod::from_name(method).ok_or_else(|| {
        Error::ingestion(
            format!("{}.{key}", attrs.path()),
            format!("unknown id method `{method}`"),
        )
    })
}
