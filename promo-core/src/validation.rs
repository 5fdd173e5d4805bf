use serde::Serialize;
use std::fmt;

/// A rejected request field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
    pub rejected: serde_json::Value,
}

/// Every rule violation found for one request, field-scoped plus global.
///
/// Collected rather than short-circuited so a caller sees all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
    pub global: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject<V: Serialize>(&mut self, field: &str, reason: impl Into<String>, rejected: &V) {
        self.fields.push(FieldError {
            field: field.to_string(),
            reason: reason.into(),
            rejected: serde_json::to_value(rejected).unwrap_or(serde_json::Value::Null),
        });
    }

    pub fn reject_global(&mut self, reason: impl Into<String>) {
        self.global.push(reason.into());
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.fields.extend(other.fields);
        self.global.extend(other.global);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.global.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was rejected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasons: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.reason))
            .chain(self.global.iter().cloned())
            .collect();
        f.write_str(&reasons.join("; "))
    }
}
