use crate::{Error, Result};

use indexmap::IndexMap;
use serde_json::Value;

/// Case-insensitive view over one object of the schema tree.
///
/// Keys are lower-cased on construction; `null` values count as absent.
/// Every accessor reports failures as ingestion errors carrying the path of
/// the offending node.
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    path: String,
    values: IndexMap<String, &'a Value>,
}

impl<'a> Attributes<'a> {
    pub fn new(path: impl Into<String>, value: &'a Value) -> Result<Attributes<'a>> {
        let path = path.into();
        let Value::Object(map) = value else {
            return Err(Error::ingestion(path, "expected an object"));
        };

        let values = map
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();

        Ok(Attributes { path, values })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.values.get(&key.to_lowercase()).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn error(&self, key: &str, message: impl std::fmt::Display) -> Error {
        Error::ingestion(format!("{}.{key}", self.path), message.to_string())
    }

    /// A string value. Other scalar shapes are rejected.
    pub fn str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(self.error(key, format!("expected a string, found `{other}`"))),
        }
    }

    /// A non-empty string that must be present.
    pub fn required_str(&self, key: &str) -> Result<&'a str> {
        match self.str(key)? {
            Some(value) if !value.trim().is_empty() => Ok(value),
            Some(_) => Err(self.error(key, "cannot be empty")),
            None => Err(self.error(key, "is required")),
        }
    }

    /// Any scalar, rendered as a string.
    pub fn string_value(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(Value::Bool(value)) => Ok(Some(value.to_string())),
            Some(Value::Number(value)) => Ok(Some(value.to_string())),
            Some(other) => Err(self.error(key, format!("expected a scalar, found `{other}`"))),
        }
    }

    /// A boolean: `true`/`false`, a number (non-zero is true), or a string
    /// accepted by [`boolean_value`](super::boolean_value).
    pub fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(Value::Number(value)) => Ok(Some(value.as_f64().is_some_and(|n| n != 0.0))),
            Some(Value::String(value)) => Ok(Some(super::boolean_value(value))),
            Some(other) => Err(self.error(key, format!("expected a boolean, found `{other}`"))),
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self.bool(key)?.unwrap_or(default))
    }

    /// A non-negative integer, given as a number or a numeric string.
    pub fn u32(&self, key: &str) -> Result<Option<u32>> {
        let parsed = match self.get(key) {
            None => return Ok(None),
            Some(Value::Number(value)) => value.as_u64().and_then(|n| u32::try_from(n).ok()),
            Some(Value::String(value)) => value.trim().parse().ok(),
            Some(_) => None,
        };

        match parsed {
            Some(value) => Ok(Some(value)),
            None => Err(self.error(key, "expected a non-negative integer")),
        }
    }

    /// A comma-delimited list, each item trimmed. Arrays of strings are
    /// accepted as-is.
    pub fn list(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key) {
            None => Ok(vec![]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(item) => Ok(item.trim().to_string()),
                    other => Err(self.error(key, format!("expected a string, found `{other}`"))),
                })
                .collect(),
            Some(_) => Ok(super::delimited_list(&self.string_value(key)?.unwrap_or_default())),
        }
    }

    /// Child objects stored under `plural` or `singular`.
    ///
    /// Either key may hold an array or a single object, the way XML
    /// documents fold repeated elements.
    pub fn children(&self, plural: &str, singular: &str) -> Result<Vec<Attributes<'a>>> {
        let (key, value) = match (self.get(plural), self.get(singular)) {
            (Some(value), _) => (plural, value),
            (None, Some(value)) => (singular, value),
            (None, None) => return Ok(vec![]),
        };

        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Attributes::new(format!("{}.{key}[{i}]", self.path), item))
                .collect(),
            Value::Object(_) => Ok(vec![Attributes::new(
                format!("{}.{key}", self.path),
                value,
            )?]),
            other => Err(self.error(key, format!("expected a list of objects, found `{other}`"))),
        }
    }

    /// An upper-cased string that must be one of `allowed`.
    pub fn one_of(&self, key: &str, allowed: &[&str]) -> Result<Option<String>> {
        let Some(value) = self.string_value(key)? else {
            return Ok(None);
        };

        let normalized = value.trim().to_uppercase();
        if allowed.contains(&normalized.as_str()) {
            Ok(Some(normalized))
        } else {
            Err(self.error(
                key,
                format!("`{value}` is not one of {}", allowed.join(", ")),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_are_case_insensitive() {
        let value = json!({ "primaryKey": true, "Name": "id" });
        let attrs = Attributes::new("$", &value).unwrap();

        assert_eq!(attrs.bool("PRIMARYKEY").unwrap(), Some(true));
        assert_eq!(attrs.str("name").unwrap(), Some("id"));
    }

    #[test]
    fn boolean_coercions() {
        let value = json!({ "a": "yes", "b": "T", "c": 0, "d": "off", "e": "1" });
        let attrs = Attributes::new("$", &value).unwrap();

        assert_eq!(attrs.bool("a").unwrap(), Some(true));
        assert_eq!(attrs.bool("b").unwrap(), Some(true));
        assert_eq!(attrs.bool("c").unwrap(), Some(false));
        assert_eq!(attrs.bool("d").unwrap(), Some(false));
        assert_eq!(attrs.bool("e").unwrap(), Some(true));
        assert_eq!(attrs.bool("missing").unwrap(), None);
    }

    #[test]
    fn delimited_list_is_trimmed() {
        let value = json!({ "valueSet": " draft, published ,archived" });
        let attrs = Attributes::new("$", &value).unwrap();

        assert_eq!(
            attrs.list("valueset").unwrap(),
            vec!["draft", "published", "archived"]
        );
    }

    #[test]
    fn children_accept_single_object() {
        let value = json!({ "field": { "name": "id" } });
        let attrs = Attributes::new("$", &value).unwrap();

        let children = attrs.children("fields", "field").unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path(), "$.field");
    }

    #[test]
    fn errors_carry_path() {
        let value = json!({ "size": "large" });
        let attrs = Attributes::new("$.entities[0].fields[1]", &value).unwrap();

        let err = attrs.u32("size").unwrap_err();
        assert!(err.is_ingestion());
        assert_eq!(err.ingestion_path(), Some("$.entities[0].fields[1].size"));
    }
}
