//! # Actions
//!
//! Everything that can happen in the assistant becomes an `Action`.
//! User presses Enter in the URL bar? That's `Action::LoadUrl(url)`.
//! The scraper answers? That's `Action::ContextLoaded { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns an `Effect` describing any I/O the caller must perform. No side
//! effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Completions carry the generation that was current when their request
//! was issued. Clearing bumps the generation, so a late completion finds
//! a mismatch and is dropped without touching state.

use std::fmt;

use log::{debug, info, warn};

use crate::core::notification::Notification;
use crate::core::state::{App, ChatTurn};

/// The scrape call errored or returned no recognizable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure(pub String);

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load failed: {}", self.0)
    }
}

impl std::error::Error for LoadFailure {}

/// The question-answering call errored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFailure(pub String);

impl fmt::Display for AnswerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "answer failed: {}", self.0)
    }
}

impl std::error::Error for AnswerFailure {}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Submit a regulations URL to the scraper.
    LoadUrl(String),
    /// Scrape finished (successfully or not).
    ContextLoaded {
        generation: u64,
        result: Result<String, LoadFailure>,
    },
    /// Ask a question about the loaded context.
    Send(String),
    /// Answer request finished.
    AnswerReceived {
        generation: u64,
        result: Result<String, AnswerFailure>,
    },
    /// Empty the transcript, keep the context.
    ClearMessages,
    /// Empty the transcript and forget the context.
    ClearAll,
    DismissNotification,
    Quit,
}

/// I/O requested by `update()`. The caller executes it and feeds the
/// completion back in as an `Action`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Scrape {
        generation: u64,
        url: String,
    },
    Ask {
        generation: u64,
        /// Turns before the new user message.
        history: Vec<ChatTurn>,
        message: String,
        context: String,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::LoadUrl(url) => load_url(app, url),
        Action::ContextLoaded { generation, result } => {
            context_loaded(app, generation, result);
            Effect::None
        }
        Action::Send(message) => send(app, message),
        Action::AnswerReceived { generation, result } => {
            answer_received(app, generation, result);
            Effect::None
        }
        Action::ClearMessages => {
            clear_messages(app);
            Effect::None
        }
        Action::ClearAll => {
            clear_messages(app);
            app.context.reset();
            app.load_generation += 1;
            info!("Cleared conversation and context");
            Effect::None
        }
        Action::DismissNotification => {
            app.notification = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn load_url(app: &mut App, url: String) -> Effect {
    let url = url.trim();
    if url.is_empty() {
        return Effect::None;
    }
    if app.context.loading {
        debug!("Ignoring load of {url}: another load is pending");
        return Effect::None;
    }

    app.context.begin_loading();
    app.load_generation += 1;
    info!("Loading context from {url} (generation {})", app.load_generation);

    Effect::Scrape {
        generation: app.load_generation,
        url: url.to_string(),
    }
}

fn context_loaded(app: &mut App, generation: u64, result: Result<String, LoadFailure>) {
    if generation != app.load_generation || !app.context.loading {
        debug!(
            "Discarding stale scrape result (generation {generation}, current {})",
            app.load_generation
        );
        return;
    }

    match result {
        Ok(text) => {
            let len = text.len();
            if app.context.finish_loaded(text) {
                info!("Context loaded: {len} bytes");
                app.notify(Notification::context_loaded());
            } else {
                warn!("Scrape returned blank text");
                app.notify(Notification::load_failed());
            }
        }
        Err(e) => {
            warn!("{e}");
            app.context.finish_failed();
            app.notify(Notification::load_failed());
        }
    }
}

fn send(app: &mut App, message: String) -> Effect {
    let message = message.trim();
    if message.is_empty() || app.conversation.busy {
        return Effect::None;
    }
    let Some(context) = app.context.loaded_text() else {
        debug!("Ignoring send: no context loaded");
        return Effect::None;
    };
    let context = context.to_string();

    let history = app.conversation.turns.clone();
    app.conversation.push(ChatTurn::user(message));
    app.conversation.busy = true;
    app.answer_generation += 1;
    info!(
        "Asking question (history={}, generation {})",
        history.len(),
        app.answer_generation
    );

    Effect::Ask {
        generation: app.answer_generation,
        history,
        message: message.to_string(),
        context,
    }
}

fn answer_received(app: &mut App, generation: u64, result: Result<String, AnswerFailure>) {
    if generation != app.answer_generation || !app.conversation.busy {
        debug!(
            "Discarding stale answer (generation {generation}, current {})",
            app.answer_generation
        );
        return;
    }

    match result {
        Ok(reply) => {
            info!("Answer received: {} bytes", reply.len());
            app.conversation.push(ChatTurn::assistant(reply));
        }
        Err(e) => {
            warn!("{e}");
            app.notify(Notification::answer_failed());
        }
    }
    app.conversation.busy = false;
}

fn clear_messages(app: &mut App) {
    app.conversation.clear();
    app.answer_generation += 1;
}
