//! Pure view/render functions for the browser.
//!
//! This module contains all rendering logic. Functions here:
//! - Take `&AppState` by immutable reference
//! - Draw to a ratatui Frame
//! - Never mutate state or return effects
//!
//! The list screen's body decision lives in [`list_content`], kept as a
//! pure function so the branch can be tested without a terminal.

use gradex_types::{Route, Subject};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::state::{AppState, FormField, FormState, ListState};

/// Height of the header pane.
const HEADER_HEIGHT: u16 = 2;

/// Height of the status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for status line animation.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Placeholder shown for a null field.
const NULL_FIELD: &str = "—";

/// What the list screen's body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContent {
    /// A fetch is in flight: neither the table nor the empty notice.
    Loading,
    /// Idle with no rows: the "No Subjects found" notice.
    Empty,
    /// Idle with rows: the table.
    Table,
}

/// Decides the list body. The loading branch wins over everything else,
/// so a refresh blanks the table until the result lands.
pub fn list_content(list: &ListState) -> ListContent {
    if list.loading {
        ListContent::Loading
    } else if list.entities.is_empty() {
        ListContent::Empty
    } else {
        ListContent::Table
    }
}

/// The three display columns of a subject row, nulls rendered as a dash.
pub fn subject_row(subject: &Subject) -> [String; 3] {
    let field = |value: &Option<String>| {
        value
            .as_deref()
            .unwrap_or(NULL_FIELD)
            .to_string()
    };
    [
        subject.id.map_or_else(|| NULL_FIELD.to_string(), |id| id.to_string()),
        field(&subject.name),
        field(&subject.code),
    ]
}

/// The per-row actions and the screen path each one targets.
pub fn row_actions(id: i64) -> [(&'static str, String); 3] {
    [
        ("view", format!("/subject/{id}")),
        ("edit", format!("/subject/{id}/edit")),
        ("delete", format!("/subject/{id}/delete")),
    ]
}

/// Renders the entire browser to the frame.
///
/// This is a pure render function - it only reads state and draws to frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    match app.route {
        Route::SubjectList => render_list(app, frame, chunks[1]),
        Route::SubjectView(_) => render_detail(app, frame, chunks[1]),
        Route::SubjectNew | Route::SubjectEdit(_) => render_form(app, frame, chunks[1]),
        Route::SubjectDelete(_) => render_confirm(app, frame, chunks[1]),
    }
    render_status_line(app, frame, chunks[2]);
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let title = match app.route {
        Route::SubjectList => "Subjects".to_string(),
        Route::SubjectNew => "New Subject".to_string(),
        Route::SubjectView(id) => format!("Subject {id}"),
        Route::SubjectEdit(id) => format!("Edit Subject {id}"),
        Route::SubjectDelete(id) => format!("Delete Subject {id}"),
    };
    let line = Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(app.route.path(), Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(line).block(
        Block::default().borders(Borders::BOTTOM),
    );
    frame.render_widget(header, area);
}

fn render_list(app: &AppState, frame: &mut Frame, area: Rect) {
    match list_content(&app.list) {
        // Loading leaves the body blank; the status line shows the spinner.
        ListContent::Loading => {}
        ListContent::Empty => {
            let notice = Paragraph::new("No Subjects found")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(notice, area);
        }
        ListContent::Table => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);

            let rows = app.list.entities.iter().map(|subject| {
                Row::new(subject_row(subject).map(Cell::from))
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Length(8),
                    Constraint::Min(20),
                    Constraint::Length(12),
                ],
            )
            .header(
                Row::new(["ID", "Name", "Code"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

            let mut table_state = TableState::default().with_selected(Some(app.list.cursor));
            frame.render_stateful_widget(table, chunks[0], &mut table_state);

            if let Some(id) = app.list.selected_id() {
                frame.render_widget(actions_footer(id), chunks[1]);
            }
        }
    }
}

/// Footer showing the cursor row's action targets.
fn actions_footer(id: i64) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, (action, target)) in row_actions(id).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{action} "),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::raw(target));
    }
    Paragraph::new(Line::from(spans))
}

fn render_detail(app: &AppState, frame: &mut Frame, area: Rect) {
    let lines = if app.detail.loading {
        vec![Line::from("Loading…")]
    } else if let Some(subject) = &app.detail.subject {
        let [id, name, code] = subject_row(subject);
        vec![
            field_line("ID", &id),
            field_line("Name", &name),
            field_line("Code", &code),
        ]
    } else {
        vec![Line::from("Not available")]
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_form(app: &AppState, frame: &mut Frame, area: Rect) {
    let form = &app.form;
    let lines = vec![
        form_field_line("Name", &form.name, form, FormField::Name),
        form_field_line("Code", &form.code, form, FormField::Code),
        Line::from(""),
        Line::from(Span::styled(
            if form.saving { "Saving…" } else { "Enter to save, Tab to switch field, Esc to cancel" },
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_confirm(app: &AppState, frame: &mut Frame, area: Rect) {
    let label = app
        .confirm
        .subject
        .as_ref()
        .map_or_else(|| "this subject".to_string(), Subject::label);
    let lines = vec![
        Line::from(format!("Delete {label}?")),
        Line::from(""),
        Line::from(Span::styled(
            if app.confirm.deleting {
                "Deleting…"
            } else {
                "Enter/y to confirm, Esc/n to cancel"
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();

    if app.request_in_flight() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{spinner} "),
            Style::default().fg(Color::Cyan),
        ));
    }

    if let Some(error) = &app.list.last_error {
        spans.push(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(status) = &app.status {
        spans.push(Span::raw(status.clone()));
    } else {
        let hints = match app.route {
            Route::SubjectList => "r refresh · n new · v view · e edit · d delete · q quit",
            Route::SubjectView(_) => "e edit · Esc back",
            Route::SubjectNew | Route::SubjectEdit(_) => "Enter save · Esc cancel",
            Route::SubjectDelete(_) => "Enter confirm · Esc cancel",
        };
        spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn field_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:>6}  "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value.to_string()),
    ])
}

fn form_field_line(
    label: &str,
    value: &str,
    form: &FormState,
    field: FormField,
) -> Line<'static> {
    let focused = form.field == field;
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marker.to_string()),
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), style),
    ])
}
