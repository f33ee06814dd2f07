//! Core services for gradex: configuration, REST client, logging.

pub mod api;
pub mod config;
pub mod logging;
