use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FROM_DATE_FIELD: &str = "from_date";
pub const TO_DATE_FIELD: &str = "to_date";

/// Current field values of the record a UI action is triggered on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    fields: Map<String, Value>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// String value of `name`; `null`, missing and non-string values read as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.as_str()
    }
}
