use super::{SqlType, VendorInfos};
use crate::{Error, Result};

/// A column of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Unique within the owning entity
    pub name: String,

    pub ty: SqlType,

    /// Explicit SQL type, overriding the platform domain for `ty`.
    pub sql_type: Option<String>,

    pub size: Option<u32>,

    pub scale: Option<u32>,

    pub primary_key: bool,

    /// When `true`, the column is `NOT NULL`.
    pub required: bool,

    pub auto_increment: bool,

    pub default: Option<FieldDefault>,

    pub description: Option<String>,

    /// Allowed values of an `ENUM` field, in declaration order.
    pub value_set: Vec<String>,

    pub lazy_load: bool,

    pub primary_string: bool,

    pub vendor: VendorInfos,
}

/// A field default is either a literal value or a raw SQL expression, never
/// both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDefault {
    Value(String),
    Expr(String),
}

impl FieldDefault {
    pub fn value(&self) -> &str {
        match self {
            FieldDefault::Value(value) | FieldDefault::Expr(value) => value,
        }
    }

    pub fn is_expr(&self) -> bool {
        matches!(self, FieldDefault::Expr(_))
    }
}

impl Field {
    pub fn new(name: impl Into<String>, ty: SqlType) -> Field {
        Field {
            name: name.into(),
            ty,
            sql_type: None,
            size: None,
            scale: None,
            primary_key: false,
            required: false,
            auto_increment: false,
            default: None,
            description: None,
            value_set: vec![],
            lazy_load: false,
            primary_string: false,
            vendor: VendorInfos::default(),
        }
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn auto_increment(mut self, auto_increment: bool) -> Self {
        self.auto_increment = auto_increment;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(FieldDefault::Expr(expr.into()));
        self
    }

    pub fn value_set<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_set = values.into_iter().map(Into::into).collect();
        self
    }

    /// Primary key columns are always `NOT NULL`.
    pub fn is_not_null(&self) -> bool {
        self.required || self.primary_key
    }

    pub fn has_default_value(&self) -> bool {
        self.default.is_some()
    }

    /// `(size)` or `(size,scale)`, empty when no size is set.
    pub fn size_definition(&self) -> String {
        match (self.size, self.scale) {
            (Some(size), Some(scale)) => format!("({size},{scale})"),
            (Some(size), None) => format!("({size})"),
            _ => String::new(),
        }
    }

    /// Position of `value` within the `ENUM` value set.
    pub fn enum_index(&self, value: &str) -> Option<usize> {
        self.value_set.iter().position(|v| v == value)
    }

    /// Checks the field's own invariants. `entity` is only used in messages.
    pub fn verify(&self, entity: &str) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_schema(format!(
                "entity `{entity}` declares a field without a name"
            )));
        }

        if self.auto_increment && self.default.is_some() {
            return Err(Error::invalid_schema(format!(
                "field `{entity}.{}` is auto-incremented and cannot have a default",
                self.name
            )));
        }

        if self.ty == SqlType::Enum {
            if let Some(FieldDefault::Value(value)) = &self.default {
                if self.enum_index(value).is_none() {
                    return Err(Error::invalid_schema(format!(
                        "default `{value}` of field `{entity}.{}` is not in its value set",
                        self.name
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_key_implies_not_null() {
        let field = Field::new("id", SqlType::Integer).primary_key(true);
        assert!(field.is_not_null());
        assert!(!Field::new("name", SqlType::Varchar).is_not_null());
    }

    #[test]
    fn auto_increment_rejects_default() {
        let field = Field::new("id", SqlType::Integer)
            .auto_increment(true)
            .default_value("1");

        let err = field.verify("Book").unwrap_err();
        assert!(err.is_invalid_schema());
        assert!(err.to_string().contains("Book.id"));
    }

    #[test]
    fn enum_default_must_be_declared() {
        let field = Field::new("status", SqlType::Enum)
            .value_set(["draft", "published"])
            .default_value("archived");
        assert!(field.verify("Post").is_err());

        let field = field.default_value("published");
        assert!(field.verify("Post").is_ok());
        assert_eq!(field.enum_index("published"), Some(1));
    }

    #[test]
    fn size_definition() {
        let field = Field::new("price", SqlType::Decimal).size(10).scale(2);
        assert_eq!(field.size_definition(), "(10,2)");
        assert_eq!(Field::new("n", SqlType::Integer).size_definition(), "");
    }
}
