use std::fmt;

/// `ON UPDATE` / `ON DELETE` behavior of a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ReferentialAction {
    #[default]
    None,
    Cascade,
    SetNull,
    Restrict,

    /// Any other input, upper-cased and passed through unvalidated.
    Other(String),
}

impl ReferentialAction {
    /// Normalizes user input. Missing input and `NONE` map to
    /// [`ReferentialAction::None`]; `SETNULL` and `SET NULL` map to
    /// [`ReferentialAction::SetNull`].
    pub fn normalize(input: Option<&str>) -> ReferentialAction {
        let Some(input) = input else {
            return ReferentialAction::None;
        };

        match input.trim().to_uppercase().as_str() {
            "" | "NONE" => ReferentialAction::None,
            "CASCADE" => ReferentialAction::Cascade,
            "SETNULL" | "SET NULL" => ReferentialAction::SetNull,
            "RESTRICT" => ReferentialAction::Restrict,
            other => ReferentialAction::Other(other.to_string()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ReferentialAction::None)
    }

    /// SQL spelling; empty for [`ReferentialAction::None`].
    pub fn as_sql(&self) -> &str {
        match self {
            ReferentialAction::None => "",
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::Restrict => "RESTRICT",
            ReferentialAction::Other(other) => other,
        }
    }
}

impl From<&str> for ReferentialAction {
    fn from(value: &str) -> Self {
        ReferentialAction::normalize(Some(value))
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
