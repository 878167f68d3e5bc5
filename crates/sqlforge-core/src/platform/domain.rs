use crate::schema::SqlType;

/// The concrete SQL type a platform uses for an abstract [`SqlType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub ty: SqlType,

    pub sql_type: String,

    /// Size used when the field declares none
    pub size: Option<u32>,

    pub scale: Option<u32>,
}

impl Domain {
    pub fn new(ty: SqlType, sql_type: impl Into<String>) -> Domain {
        Domain {
            ty,
            sql_type: sql_type.into(),
            size: None,
            scale: None,
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// The ANSI mapping: every type maps onto itself, except the emulated
    /// ones.
    pub fn ansi(ty: SqlType) -> Domain {
        match ty {
            SqlType::BooleanInt => Domain::new(ty, "INTEGER"),
            SqlType::BooleanChar => Domain::new(ty, "CHAR").size(1),
            SqlType::Enum => Domain::new(ty, "TINYINT"),
            SqlType::Object => Domain::new(ty, "LONGVARBINARY"),
            SqlType::Array => Domain::new(ty, "LONGVARCHAR"),
            _ => Domain::new(ty, ty.as_str()),
        }
    }
}
