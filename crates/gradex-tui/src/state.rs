//! Application state for the subject browser.
//!
//! State hierarchy:
//!
//! ```text
//! AppState
//! ├── route: Route            (active screen)
//! ├── list: ListState         (collection, loading flag, cursor)
//! ├── detail: DetailState     (single-subject view)
//! ├── form: FormState         (create/edit form)
//! ├── confirm: ConfirmState   (delete confirmation)
//! └── status: Option<String>  (transient status-line message)
//! ```
//!
//! All mutations happen in the reducer (`update`); the runtime and render
//! functions never modify state directly.

use gradex_types::{Route, Subject};

/// Combined application state for the browser.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// The active screen.
    pub route: Route,
    /// Subject list screen state.
    pub list: ListState,
    /// Detail screen state.
    pub detail: DetailState,
    /// Create/edit form state.
    pub form: FormState,
    /// Delete confirmation state.
    pub confirm: ConfirmState,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Transient status message (last action outcome).
    pub status: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            route: Route::SubjectList,
            list: ListState::default(),
            detail: DetailState::default(),
            form: FormState::default(),
            confirm: ConfirmState::default(),
            spinner_frame: 0,
            status: None,
        }
    }

    /// True while any backend request is in flight (drives fast polling).
    pub fn request_in_flight(&self) -> bool {
        self.list.loading || self.detail.loading || self.form.saving || self.confirm.deleting
    }
}

/// Collection state for the list screen.
///
/// `entities` is the client-held cache of the last-fetched collection;
/// `loading` is true while a fetch for it is in flight.
#[derive(Debug, Default)]
pub struct ListState {
    /// Last-fetched subject collection, in backend order.
    pub entities: Vec<Subject>,
    /// True while a collection fetch is in flight.
    pub loading: bool,
    /// Cursor position within `entities`.
    pub cursor: usize,
    /// Last fetch failure, surfaced in the status line only.
    pub last_error: Option<String>,
}

impl ListState {
    /// Marks a collection fetch as in flight.
    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Replaces the collection with a fresh fetch result.
    pub fn set_entities(&mut self, subjects: Vec<Subject>) {
        self.entities = subjects;
        self.loading = false;
        self.last_error = None;
        if self.cursor >= self.entities.len() {
            self.cursor = self.entities.len().saturating_sub(1);
        }
    }

    /// Records a fetch failure. The collection keeps its previous contents.
    pub fn set_error(&mut self, error: String) {
        self.loading = false;
        self.last_error = Some(error);
    }

    pub fn selected(&self) -> Option<&Subject> {
        self.entities.get(self.cursor)
    }

    /// The backend id of the cursor row, if it has one.
    pub fn selected_id(&self) -> Option<i64> {
        self.selected().and_then(|subject| subject.id)
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.entities.len() {
            self.cursor += 1;
        }
    }
}

/// Detail screen state.
#[derive(Debug, Default)]
pub struct DetailState {
    /// The subject being shown, once fetched.
    pub subject: Option<Subject>,
    /// True while the fetch is in flight.
    pub loading: bool,
}

impl DetailState {
    /// Fresh state with a fetch in flight.
    pub fn loading() -> Self {
        Self {
            subject: None,
            loading: true,
        }
    }
}

/// Which form field has focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Code,
}

/// Create/edit form state.
#[derive(Debug, Default)]
pub struct FormState {
    /// Present when editing an existing subject; absent when creating.
    pub id: Option<i64>,
    pub name: String,
    pub code: String,
    /// Field with input focus.
    pub field: FormField,
    /// True while the save request is in flight.
    pub saving: bool,
}

impl FormState {
    /// An empty form for a new subject.
    pub fn new_subject() -> Self {
        Self::default()
    }

    /// A form pre-filled from an existing subject.
    pub fn edit(subject: &Subject) -> Self {
        Self {
            id: subject.id,
            name: subject.name.clone().unwrap_or_default(),
            code: subject.code.clone().unwrap_or_default(),
            field: FormField::Name,
            saving: false,
        }
    }

    /// Builds the record to submit. Blank fields become nulls on the wire.
    pub fn to_subject(&self) -> Subject {
        let normalize = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Subject {
            id: self.id,
            name: normalize(&self.name),
            code: normalize(&self.code),
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Name => FormField::Code,
            FormField::Code => FormField::Name,
        };
    }

    pub fn push_char(&mut self, c: char) {
        self.active_field_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_field_mut().pop();
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.name,
            FormField::Code => &mut self.code,
        }
    }
}

/// Delete confirmation state.
#[derive(Debug, Default)]
pub struct ConfirmState {
    /// The subject queued for deletion.
    pub subject: Option<Subject>,
    /// True while the delete request is in flight.
    pub deleting: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(n: usize) -> Vec<Subject> {
        (1..=n)
            .map(|i| Subject {
                id: Some(i as i64),
                name: Some(format!("S{i}")),
                code: None,
            })
            .collect()
    }

    #[test]
    fn test_set_entities_clamps_cursor() {
        let mut list = ListState::default();
        list.set_entities(subjects(5));
        list.cursor = 4;

        list.set_entities(subjects(2));
        assert_eq!(list.cursor, 1);

        list.set_entities(Vec::new());
        assert_eq!(list.cursor, 0);
        assert_eq!(list.selected_id(), None);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut list = ListState::default();
        list.set_entities(subjects(2));

        list.move_cursor_up();
        assert_eq!(list.cursor, 0);

        list.move_cursor_down();
        list.move_cursor_down();
        assert_eq!(list.cursor, 1);
        assert_eq!(list.selected_id(), Some(2));
    }

    #[test]
    fn test_set_error_clears_loading_keeps_entities() {
        let mut list = ListState::default();
        list.set_entities(subjects(1));
        list.begin_fetch();

        list.set_error("backend returned 500".to_string());
        assert!(!list.loading);
        assert_eq!(list.entities.len(), 1);
        assert_eq!(list.last_error.as_deref(), Some("backend returned 500"));
    }

    #[test]
    fn test_form_to_subject_blank_fields_become_none() {
        let form = FormState {
            id: None,
            name: "  Math ".to_string(),
            code: "   ".to_string(),
            field: FormField::Name,
            saving: false,
        };
        let subject = form.to_subject();
        assert_eq!(subject.id, None);
        assert_eq!(subject.name.as_deref(), Some("Math"));
        assert_eq!(subject.code, None);
    }

    #[test]
    fn test_form_editing_routes_input_to_focused_field() {
        let mut form = FormState::new_subject();
        form.push_char('M');
        form.toggle_field();
        form.push_char('X');
        form.backspace();
        form.push_char('T');

        assert_eq!(form.name, "M");
        assert_eq!(form.code, "T");
    }
}
