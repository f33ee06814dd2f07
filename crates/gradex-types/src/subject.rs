//! The Subject record as served by the grading-system backend.

use serde::{Deserialize, Serialize};

/// A subject/course record.
///
/// All fields are optional to match the wire shape: `id` is absent until the
/// backend assigns one on creation (and is immutable afterwards), and
/// `name`/`code` are nullable. No validation happens client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub code: Option<String>,
}

impl Subject {
    /// Creates an unsaved subject (no id yet).
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            code: Some(code.into()),
        }
    }

    /// Returns true once the backend has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Display label: the name, falling back to the code, then the id.
    pub fn label(&self) -> String {
        if let Some(name) = self.name.as_deref()
            && !name.is_empty()
        {
            return name.to_string();
        }
        if let Some(code) = self.code.as_deref()
            && !code.is_empty()
        {
            return code.to_string();
        }
        self.id
            .map_or_else(|| "(unsaved)".to_string(), |id| format!("#{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_nullable_fields() {
        let subject: Subject =
            serde_json::from_str(r#"{"id": 1, "name": null, "code": "MAT"}"#).unwrap();
        assert_eq!(subject.id, Some(1));
        assert_eq!(subject.name, None);
        assert_eq!(subject.code.as_deref(), Some("MAT"));
    }

    #[test]
    fn test_missing_id_is_unsaved() {
        let subject: Subject = serde_json::from_str(r#"{"name": "Math"}"#).unwrap();
        assert!(!subject.is_persisted());
    }

    #[test]
    fn test_label_fallbacks() {
        assert_eq!(Subject::new("Math", "MAT").label(), "Math");

        let code_only = Subject {
            id: Some(3),
            name: None,
            code: Some("MAT".to_string()),
        };
        assert_eq!(code_only.label(), "MAT");

        let id_only = Subject {
            id: Some(3),
            name: None,
            code: None,
        };
        assert_eq!(id_only.label(), "#3");

        assert_eq!(Subject::default().label(), "(unsaved)");
    }
}
