//! Shared data contract for gradex.

pub mod route;
pub mod subject;

pub use route::Route;
pub use subject::Subject;
