use super::Platform;

/// ANSI SQL with no dialect-specific behavior.
#[derive(Debug, Clone, Default)]
pub struct Generic {
    identifier_quoting: bool,
}

impl Generic {
    pub fn new() -> Generic {
        Generic::default()
    }
}

impl Platform for Generic {
    fn database_type(&self) -> &'static str {
        "sql"
    }

    fn is_identifier_quoting_enabled(&self) -> bool {
        self.identifier_quoting
    }

    fn set_identifier_quoting(&mut self, enabled: bool) {
        self.identifier_quoting = enabled;
    }
}
