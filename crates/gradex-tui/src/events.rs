//! UI event types.
//!
//! Everything the reducer consumes arrives as a `UiEvent`: terminal input,
//! the tick timer, the one-shot mount notification, and the results of
//! backend requests sent into the runtime inbox by spawned tasks.

use crossterm::event::Event;
use gradex_types::Subject;

/// Events consumed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (drives the spinner animation).
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    /// Emitted exactly once by the runtime before the first frame.
    Mounted,
    /// Result of a backend request.
    Subject(SubjectUiEvent),
}

/// Backend request results.
///
/// Failures carry a rendered error string; the reducer never inspects the
/// failure beyond displaying it.
#[derive(Debug)]
pub enum SubjectUiEvent {
    /// The collection fetch finished.
    ListLoaded { subjects: Vec<Subject> },
    ListFailed { error: String },
    /// A single-subject fetch finished.
    Loaded { subject: Subject },
    LoadFailed { id: i64, error: String },
    /// A create or update finished.
    Saved { subject: Subject },
    SaveFailed { error: String },
    /// A delete finished.
    Deleted { id: i64 },
    DeleteFailed { error: String },
}
