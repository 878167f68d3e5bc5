use crate::schema::Field;

/// One local/foreign field pair of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub local: String,
    pub foreign: String,
}

impl Reference {
    pub fn new(local: impl Into<String>, foreign: impl Into<String>) -> Reference {
        Reference {
            local: local.into(),
            foreign: foreign.into(),
        }
    }
}

impl From<(&str, &str)> for Reference {
    fn from((local, foreign): (&str, &str)) -> Self {
        Reference::new(local, foreign)
    }
}

impl From<(String, String)> for Reference {
    fn from((local, foreign): (String, String)) -> Self {
        Reference { local, foreign }
    }
}

impl From<(&Field, &Field)> for Reference {
    fn from((local, foreign): (&Field, &Field)) -> Self {
        Reference::new(&local.name, &foreign.name)
    }
}
