use indexmap::IndexMap;
use std::borrow::Cow;

/// Opaque, platform-specific parameters attached to a schema object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vendor {
    /// Platform type the parameters apply to (`mysql`, `pgsql`, ...).
    pub ty: String,

    /// Parameters in declaration order.
    pub parameters: IndexMap<String, String>,
}

impl Vendor {
    pub fn new(ty: impl Into<String>) -> Vendor {
        Vendor {
            ty: ty.into().to_lowercase(),
            parameters: IndexMap::new(),
        }
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_parameter(name, value);
        self
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Vendor blocks keyed by platform type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorInfos {
    infos: IndexMap<String, Vendor>,
}

impl VendorInfos {
    /// Adds a vendor block. Parameters of an existing block for the same
    /// type are merged, later values winning.
    pub fn add(&mut self, vendor: Vendor) {
        match self.infos.get_mut(&vendor.ty) {
            Some(existing) => existing.parameters.extend(vendor.parameters),
            None => {
                self.infos.insert(vendor.ty.clone(), vendor);
            }
        }
    }

    /// Returns the block for `ty`, or an empty placeholder when none was
    /// declared.
    pub fn for_type(&self, ty: &str) -> Cow<'_, Vendor> {
        match self.infos.get(&ty.to_lowercase()) {
            Some(vendor) => Cow::Borrowed(vendor),
            None => Cow::Owned(Vendor::new(ty)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vendor> {
        self.infos.values()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}
