use super::{name, VendorInfos};
use std::borrow::Cow;

/// A (possibly unique) index over fields of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    /// Explicit name. Unnamed indices are named during finalization.
    pub name: Option<String>,

    /// Indexed fields, in index order
    pub fields: Vec<IndexField>,

    /// When `true`, indexed entries are unique
    pub unique: bool,

    pub vendor: VendorInfos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexField {
    pub name: String,

    /// Prefix length, for platforms that support sized index entries.
    pub size: Option<u32>,
}

impl Index {
    pub fn new<I, S>(fields: I) -> Index
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Index {
            name: None,
            fields: fields
                .into_iter()
                .map(|name| IndexField {
                    name: name.into(),
                    size: None,
                })
                .collect(),
            unique: false,
            vendor: VendorInfos::default(),
        }
    }

    pub fn unique<I, S>(fields: I) -> Index
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Index {
            unique: true,
            ..Index::new(fields)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// The explicit name, or `{table}_i_{hash}` (`_u_` for unique indices).
    pub fn name(&self, table: &str) -> Cow<'_, str> {
        match &self.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(self.auto_name(table)),
        }
    }

    pub(crate) fn auto_name(&self, table: &str) -> String {
        let joined = self.field_names().collect::<Vec<_>>().join(",");
        let kind = if self.unique { "u" } else { "i" };
        format!("{table}_{kind}_{}", name::digest6(&joined.to_lowercase()))
    }

    /// True when the index covers exactly `names`, in any order.
    pub fn covers(&self, names: &[&str]) -> bool {
        self.fields.len() == names.len() && self.field_names().all(|name| names.contains(&name))
    }

    /// True when the leading fields of the index are exactly `names`, in any
    /// order.
    pub fn has_prefix(&self, names: &[&str]) -> bool {
        !names.is_empty()
            && self.fields.len() >= names.len()
            && self.fields[..names.len()]
                .iter()
                .all(|field| names.contains(&field.name.as_str()))
    }
}
