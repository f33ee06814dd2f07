//! Browser reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use gradex_types::Route;

use crate::effects::UiEffect;
use crate::events::{SubjectUiEvent, UiEvent};
use crate::state::{AppState, ConfirmState, DetailState, FormState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Mounted => {
            // One-shot collection fetch when the browser opens.
            app.list.begin_fetch();
            vec![UiEffect::FetchSubjects]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Subject(subject_event) => handle_subject_event(app, subject_event),
    }
}

// ============================================================================
// Backend Result Handlers
// ============================================================================

fn handle_subject_event(app: &mut AppState, event: SubjectUiEvent) -> Vec<UiEffect> {
    match event {
        // List results apply regardless of the active screen: the list is
        // the root screen and its cache stays relevant everywhere.
        SubjectUiEvent::ListLoaded { subjects } => {
            tracing::debug!(count = subjects.len(), "subject list loaded");
            app.list.set_entities(subjects);
            vec![]
        }
        SubjectUiEvent::ListFailed { error } => {
            app.list.set_error(error);
            vec![]
        }

        // Results for the other screens are dropped when the user has
        // already left them. The detail guard matches on the subject id,
        // not just the screen: a late result for subject 1 must not land
        // on subject 2's detail view.
        SubjectUiEvent::Loaded { subject } => {
            if !matches!(app.route, Route::SubjectView(id) if subject.id == Some(id)) {
                return vec![];
            }
            app.detail.subject = Some(subject);
            app.detail.loading = false;
            vec![]
        }
        SubjectUiEvent::LoadFailed { id, error } => {
            if !matches!(app.route, Route::SubjectView(active) if active == id) {
                return vec![];
            }
            app.detail.loading = false;
            app.status = Some(error);
            vec![]
        }

        SubjectUiEvent::Saved { subject } => {
            if !matches!(app.route, Route::SubjectNew | Route::SubjectEdit(_)) {
                return vec![];
            }
            app.status = Some(format!("Saved {}", subject.label()));
            app.form = FormState::default();
            back_to_list_and_refetch(app)
        }
        SubjectUiEvent::SaveFailed { error } => {
            if !matches!(app.route, Route::SubjectNew | Route::SubjectEdit(_)) {
                return vec![];
            }
            app.form.saving = false;
            app.status = Some(error);
            vec![]
        }

        SubjectUiEvent::Deleted { id } => {
            if !matches!(app.route, Route::SubjectDelete(_)) {
                return vec![];
            }
            app.status = Some(format!("Deleted subject {id}"));
            app.confirm = ConfirmState::default();
            // The row disappears only once the refetched collection
            // confirms the deletion.
            back_to_list_and_refetch(app)
        }
        SubjectUiEvent::DeleteFailed { error } => {
            if !matches!(app.route, Route::SubjectDelete(_)) {
                return vec![];
            }
            app.confirm.deleting = false;
            app.status = Some(error);
            vec![]
        }
    }
}

fn back_to_list_and_refetch(app: &mut AppState) -> Vec<UiEffect> {
    app.route = Route::SubjectList;
    app.list.begin_fetch();
    vec![UiEffect::FetchSubjects]
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C quits from any screen
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    match app.route {
        Route::SubjectList => handle_list_key(app, key),
        Route::SubjectView(_) => handle_detail_key(app, key),
        Route::SubjectNew | Route::SubjectEdit(_) => handle_form_key(app, key),
        Route::SubjectDelete(_) => handle_confirm_key(app, key),
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('r') => {
            // Advisory guard: ignore refresh while a fetch is in flight.
            if app.list.loading {
                return vec![];
            }
            app.status = None;
            app.list.begin_fetch();
            vec![UiEffect::FetchSubjects]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list.move_cursor_up();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list.move_cursor_down();
            vec![]
        }
        KeyCode::Char('n') => {
            app.status = None;
            app.form = FormState::new_subject();
            app.route = Route::SubjectNew;
            vec![]
        }
        KeyCode::Enter | KeyCode::Char('v') => {
            let Some(id) = app.list.selected_id() else {
                return vec![];
            };
            app.status = None;
            app.detail = DetailState::loading();
            app.route = Route::SubjectView(id);
            vec![UiEffect::FetchSubject { id }]
        }
        KeyCode::Char('e') => {
            let Some(subject) = app.list.selected().cloned() else {
                return vec![];
            };
            let Some(id) = subject.id else {
                return vec![];
            };
            app.status = None;
            app.form = FormState::edit(&subject);
            app.route = Route::SubjectEdit(id);
            vec![]
        }
        KeyCode::Char('d') => {
            let Some(subject) = app.list.selected().cloned() else {
                return vec![];
            };
            let Some(id) = subject.id else {
                return vec![];
            };
            app.status = None;
            app.confirm = ConfirmState {
                subject: Some(subject),
                deleting: false,
            };
            app.route = Route::SubjectDelete(id);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_detail_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            // The cached collection is still current; no refetch on back.
            app.route = Route::SubjectList;
            vec![]
        }
        KeyCode::Char('e') => {
            let Some(subject) = app.detail.subject.clone() else {
                return vec![];
            };
            let Some(id) = subject.id else {
                return vec![];
            };
            app.form = FormState::edit(&subject);
            app.route = Route::SubjectEdit(id);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            if app.form.saving {
                return vec![];
            }
            app.form = FormState::default();
            app.route = Route::SubjectList;
            vec![]
        }
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            app.form.toggle_field();
            vec![]
        }
        KeyCode::Enter => {
            // One save at a time, same guard as the list refresh.
            if app.form.saving {
                return vec![];
            }
            app.form.saving = true;
            vec![UiEffect::SaveSubject {
                subject: app.form.to_subject(),
            }]
        }
        KeyCode::Backspace => {
            app.form.backspace();
            vec![]
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.push_char(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_confirm_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('n') => {
            if app.confirm.deleting {
                return vec![];
            }
            app.confirm = ConfirmState::default();
            app.route = Route::SubjectList;
            vec![]
        }
        KeyCode::Enter | KeyCode::Char('y') => {
            if app.confirm.deleting {
                return vec![];
            }
            let Some(id) = app.confirm.subject.as_ref().and_then(|s| s.id) else {
                return vec![];
            };
            app.confirm.deleting = true;
            vec![UiEffect::DeleteSubject { id }]
        }
        _ => vec![],
    }
}
