//! Navigation routes within the subject browser.

/// A navigation target.
///
/// `path()` renders the same route patterns the web frontend exposes for the
/// subject entity; the browser shows them in its status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    /// The subject list (root screen).
    #[default]
    SubjectList,
    /// Create form for a new subject.
    SubjectNew,
    /// Read-only detail view of one subject.
    SubjectView(i64),
    /// Edit form for one subject.
    SubjectEdit(i64),
    /// Delete confirmation for one subject.
    SubjectDelete(i64),
}

impl Route {
    /// The route path, keyed by the subject identifier where applicable.
    pub fn path(&self) -> String {
        match self {
            Route::SubjectList => "/subject".to_string(),
            Route::SubjectNew => "/subject/new".to_string(),
            Route::SubjectView(id) => format!("/subject/{id}"),
            Route::SubjectEdit(id) => format!("/subject/{id}/edit"),
            Route::SubjectDelete(id) => format!("/subject/{id}/delete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::SubjectList.path(), "/subject");
        assert_eq!(Route::SubjectNew.path(), "/subject/new");
        assert_eq!(Route::SubjectView(1).path(), "/subject/1");
        assert_eq!(Route::SubjectEdit(1).path(), "/subject/1/edit");
        assert_eq!(Route::SubjectDelete(1).path(), "/subject/1/delete");
    }
}
