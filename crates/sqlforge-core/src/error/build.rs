use super::Error;

/// Error raised while resolving a relation against the schema graph.
///
/// Every build error names the relation, the entity owning it, and the
/// target entity it points at, so the message is actionable without a
/// backtrace.
#[derive(Debug)]
pub struct BuildError {
    kind: BuildErrorKind,
    relation: Box<str>,
    entity: Box<str>,
    target: Box<str>,
}

/// The specific resolution step that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildErrorKind {
    /// A local reference names a field the owning entity does not have.
    LocalField { field: String },

    /// A foreign reference names a field the target entity does not have.
    ForeignField { field: String },

    /// A dotted foreign reference (`relation.field`) names a relation the
    /// target does not declare, or the relation does not map `field`.
    ForeignRelation { relation: String, path: String },

    /// The target entity is not part of the database.
    MissingTarget,

    /// The relation has no references to resolve.
    NoReferences,
}

impl BuildError {
    /// Name of the relation being resolved.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    /// Name of the entity owning the relation.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Name of the entity the relation points at.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> &BuildErrorKind {
        &self.kind
    }

    /// The unresolved field name, when the failure concerns a single field.
    pub fn field(&self) -> Option<&str> {
        match &self.kind {
            BuildErrorKind::LocalField { field } | BuildErrorKind::ForeignField { field } => {
                Some(field)
            }
            BuildErrorKind::ForeignRelation { path, .. } => Some(path),
            BuildErrorKind::MissingTarget | BuildErrorKind::NoReferences => None,
        }
    }
}

impl std::error::Error for BuildError {}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let (relation, entity, target) = (&self.relation, &self.entity, &self.target);

        match &self.kind {
            BuildErrorKind::LocalField { field } => write!(
                f,
                "field `{field}` in local reference of relation `{relation}` from `{entity}` to `{target}` not found"
            ),
            BuildErrorKind::ForeignField { field } => write!(
                f,
                "field `{field}` in foreign reference of relation `{relation}` from `{entity}` to `{target}` not found"
            ),
            BuildErrorKind::ForeignRelation { relation: chained, path } => write!(
                f,
                "relation `{chained}` for foreign reference `{path}` of relation `{relation}` from `{entity}` to `{target}` not found"
            ),
            BuildErrorKind::MissingTarget => write!(
                f,
                "target entity `{target}` of relation `{relation}` from `{entity}` not found"
            ),
            BuildErrorKind::NoReferences => write!(
                f,
                "relation `{relation}` from `{entity}` to `{target}` has no references"
            ),
        }
    }
}

impl Error {
    /// Creates a relation build error.
    pub fn build(
        kind: BuildErrorKind,
        relation: impl Into<String>,
        entity: impl Into<String>,
        target: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::Build(BuildError {
            kind,
            relation: relation.into().into(),
            entity: entity.into().into(),
            target: target.into().into(),
        }))
    }

    /// Returns `true` if this error, or any error it wraps, is a build error.
    pub fn is_build(&self) -> bool {
        self.as_build().is_some()
    }

    /// The first build error in the context chain.
    pub fn as_build(&self) -> Option<&BuildError> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::Build(err) => Some(err),
            _ => None,
        })
    }
}
