//! Browser runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Backend requests run as spawned tasks that send their single result
//! event to `inbox_tx`. The runtime drains `inbox_rx` each frame, so all
//! async results flow through one channel into the reducer.

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use gradex_core::api::ApiClient;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::{SubjectUiEvent, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while requests are in flight (spinner animation).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(33);

/// Poll duration when idle (no request in flight).
/// Longer timeout reduces CPU usage when nothing is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(250);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen browser runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop or panic.
pub struct BrowserRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: AppState,
    /// Backend client, cloned into spawned request tasks.
    client: ApiClient,
    /// Inbox sender - request tasks send result events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
}

impl BrowserRuntime {
    /// Creates a new browser runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(client: ApiClient) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        // Create inbox channel for async event collection
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state: AppState::new(),
            client,
            inbox_tx,
            inbox_rx,
            last_tick: std::time::Instant::now(),
        })
    }

    /// Runs the main event loop.
    ///
    /// Must be called within a tokio runtime; request effects spawn tasks.
    pub fn run(&mut self) -> Result<()> {
        // The one-shot mount dispatch: fires before the first frame,
        // exactly once for the lifetime of the browser.
        let effects = update::update(&mut self.state, UiEvent::Mounted);
        self.execute_effects(effects);

        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Only Tick triggers render - this caps frame rate at tick cadence
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from the inbox and the terminal, emitting Tick on cadence.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while a request is in flight keeps the spinner moving;
        // slow polling otherwise saves CPU.
        let tick_interval = if self.state.request_in_flight() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all request results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Poll terminal events:
        // - If we already have events to process, do non-blocking poll
        // - Otherwise, block until the next tick is due
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns a backend request, sending its single result event to the inbox.
    ///
    /// Fire and forget: the task is never awaited or cancelled. If the
    /// receiver is gone the send result is discarded.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce(ApiClient) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let _ = tx.send(f(client).await);
        });
    }

    /// Executes a single effect.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::FetchSubjects => {
                self.spawn_effect(|client| async move {
                    let event = match client.list_subjects().await {
                        Ok(subjects) => SubjectUiEvent::ListLoaded { subjects },
                        Err(error) => {
                            tracing::warn!(error = %error, "subject list fetch failed");
                            SubjectUiEvent::ListFailed {
                                error: format!("{error:#}"),
                            }
                        }
                    };
                    UiEvent::Subject(event)
                });
            }

            UiEffect::FetchSubject { id } => {
                self.spawn_effect(move |client| async move {
                    let event = match client.get_subject(id).await {
                        Ok(subject) => SubjectUiEvent::Loaded { subject },
                        Err(error) => {
                            tracing::warn!(id, error = %error, "subject fetch failed");
                            SubjectUiEvent::LoadFailed {
                                id,
                                error: format!("{error:#}"),
                            }
                        }
                    };
                    UiEvent::Subject(event)
                });
            }

            UiEffect::SaveSubject { subject } => {
                self.spawn_effect(move |client| async move {
                    let event = match client.save_subject(&subject).await {
                        Ok(saved) => SubjectUiEvent::Saved { subject: saved },
                        Err(error) => {
                            tracing::warn!(error = %error, "subject save failed");
                            SubjectUiEvent::SaveFailed {
                                error: format!("{error:#}"),
                            }
                        }
                    };
                    UiEvent::Subject(event)
                });
            }

            UiEffect::DeleteSubject { id } => {
                self.spawn_effect(move |client| async move {
                    let event = match client.delete_subject(id).await {
                        Ok(()) => SubjectUiEvent::Deleted { id },
                        Err(error) => {
                            tracing::warn!(id, error = %error, "subject delete failed");
                            SubjectUiEvent::DeleteFailed {
                                error: format!("{error:#}"),
                            }
                        }
                    };
                    UiEvent::Subject(event)
                });
            }
        }
    }
}

impl Drop for BrowserRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
