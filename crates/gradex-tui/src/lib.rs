//! Full-screen TUI for browsing Subject records.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use gradex_core::api::ApiClient;
use gradex_core::config::Config;
pub use runtime::BrowserRuntime;

/// Runs the interactive subject browser.
pub async fn run_browser(config: &Config) -> Result<()> {
    // The browser requires a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The browser requires a terminal.\n\
             Use `gradex subjects list` for non-interactive output."
        );
    }

    let client = ApiClient::new(&config.base_url)?;
    tracing::info!(base_url = %config.base_url, "opening subject browser");

    let mut runtime = BrowserRuntime::new(client)?;
    runtime.run()
}
