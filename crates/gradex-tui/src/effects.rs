//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only (backend requests, quitting); the reducer never
//! performs a request itself. This keeps the reducer pure: it mutates state
//! and returns effects, and every request result re-enters it as an event.

use gradex_types::Subject;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fetch the complete subject collection. No filter parameters.
    FetchSubjects,

    /// Fetch a single subject by id.
    FetchSubject { id: i64 },

    /// Create or update a subject (create when `id` is absent).
    SaveSubject { subject: Subject },

    /// Delete a subject by id.
    DeleteSubject { id: i64 },
}
