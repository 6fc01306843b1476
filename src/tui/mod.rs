//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. Effects
//! returned by `update()` are run on tokio tasks through
//! `backend::execute`; their completion actions come back over an mpsc
//! channel and are drained once per loop iteration.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (scrape or answer in flight): draws every ~80ms so the
//!   spinner and the pending-reply dots move.
//! - **Idle**: sleeps up to 500ms and only redraws on events, resizes,
//!   completions or notification expiry.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::backend::{Answerer, FunctionsClient, Scraper};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{FieldEvent, MessageListState, TextField};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const URL_PLACEHOLDER: &str = "https://university.edu/internship-regulations";

/// Which input receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Url,
    Composer,
}

impl Focus {
    fn toggled(self) -> Self {
        match self {
            Focus::Url => Focus::Composer,
            Focus::Composer => Focus::Url,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub url_field: TextField,
    pub composer: TextField,
    pub focus: Focus,
    pub message_list: MessageListState,
    /// `notification_seq` of the toast on screen and when it first appeared
    shown_notification: Option<(u64, Instant)>,
    /// `context.loaded` as of the previous sync, to detect the transition
    was_loaded: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        let mut url_field = TextField::single_line("Regulations URL");
        url_field.placeholder = URL_PLACEHOLDER.to_string();
        Self {
            url_field,
            composer: TextField::multi_line("Question"),
            focus: Focus::Url,
            message_list: MessageListState::new(),
            shown_notification: None,
            was_loaded: false,
        }
    }

    /// Refresh component props from `App`. Called before every draw and
    /// after every state change.
    pub fn sync_props(&mut self, app: &App) {
        // Jump to the composer as soon as a context becomes available
        if app.context.loaded && !self.was_loaded {
            self.focus = Focus::Composer;
        }
        self.was_loaded = app.context.loaded;

        self.url_field.disabled = !app.can_submit_url();
        self.composer.disabled = !app.can_compose();
        self.composer.placeholder = app.composer_placeholder().to_string();
        self.url_field.focused = self.focus == Focus::Url;
        self.composer.focused = self.focus == Focus::Composer;
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            Focus::Url => &mut self.url_field,
            Focus::Composer => &mut self.composer,
        }
    }

    /// True once the notification on screen has been visible for `ttl`.
    /// Every raise restarts the clock, even one identical to the last.
    fn notification_expired(&mut self, app: &App, ttl: Duration) -> bool {
        if app.notification.is_none() {
            self.shown_notification = None;
            return false;
        }
        match self.shown_notification {
            Some((seq, since)) if seq == app.notification_seq => since.elapsed() >= ttl,
            _ => {
                self.shown_notification = Some((app.notification_seq, Instant::now()));
                false
            }
        }
    }

    /// Reset presentation state after a full clear.
    fn reset_after_clear(&mut self) {
        self.message_list.reset();
        self.composer.clear();
        self.focus = Focus::Url;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter.
        // Terminals without it ignore the sequence.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// The two collaborators plus the channel completions come back on.
struct Runner {
    scraper: Arc<dyn Scraper>,
    answerer: Arc<dyn Answerer>,
    tx: mpsc::Sender<Action>,
}

impl Runner {
    /// Apply an action and start whatever I/O it asks for.
    /// Returns true when the app should quit.
    fn dispatch(&self, app: &mut App, action: Action) -> bool {
        match update(app, action) {
            Effect::Quit => true,
            Effect::None => false,
            effect => {
                self.spawn_effect(effect);
                false
            }
        }
    }

    fn spawn_effect(&self, effect: Effect) {
        debug!("Spawning {} effect", effect_name(&effect));
        let scraper = self.scraper.clone();
        let answerer = self.answerer.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Some(action) =
                crate::backend::execute(effect, scraper.as_ref(), answerer.as_ref()).await
                && tx.send(action).is_err()
            {
                warn!("Failed to deliver completion: receiver dropped");
            }
        });
    }
}

fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::None => "none",
        Effect::Quit => "quit",
        Effect::Scrape { .. } => "scrape",
        Effect::Ask { .. } => "ask",
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = Arc::new(FunctionsClient::from_config(&config));
    info!(
        "Using functions at {} (scrape={}, chat={})",
        config.base_url, config.scrape_function, config.chat_function
    );

    let (tx, rx) = mpsc::channel();
    let runner = Runner {
        scraper: client.clone(),
        answerer: client,
        tx,
    };

    let mut app = App::new();
    let mut tui = TuiState::new();
    let notification_ttl = Duration::from_secs(config.notification_secs);

    if let Some(url) = &config.initial_url {
        tui.url_field.set_text(url);
        runner.dispatch(&mut app, Action::LoadUrl(url.clone()));
    }

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    // Restore the terminal on every exit path, including a failed draw
    let result = event_loop(&mut terminal, &mut app, &mut tui, &runner, &rx, notification_ttl);

    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Terminal restored");
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    runner: &Runner,
    rx: &mpsc::Receiver<Action>,
    notification_ttl: Duration,
) -> std::io::Result<()> {
    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        tui.sync_props(app);

        if tui.notification_expired(app, notification_ttl) {
            runner.dispatch(app, Action::DismissNotification);
            tui.sync_props(app);
            needs_redraw = true;
        }

        let animating = app.context.loading || app.conversation.busy;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let frame_index = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, frame_index))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(app, tui, runner, event) {
                return Ok(());
            }
            tui.sync_props(app);
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if runner.dispatch(app, action) {
                return Ok(());
            }
        }
    }
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_event(app: &mut App, tui: &mut TuiState, runner: &Runner, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit => runner.dispatch(app, Action::Quit),
        TuiEvent::Escape => {
            if app.notification.is_some() {
                runner.dispatch(app, Action::DismissNotification);
            }
            false
        }
        TuiEvent::ClearAll => {
            if app.can_clear() {
                runner.dispatch(app, Action::ClearAll);
                tui.reset_after_clear();
            }
            false
        }
        TuiEvent::SwitchFocus => {
            tui.focus = tui.focus.toggled();
            false
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            false
        }
        _ => {
            let focus = tui.focus;
            match tui.focused_field().handle_event(&event) {
                Some(FieldEvent::Submit(text)) => {
                    let action = match focus {
                        Focus::Url => Action::LoadUrl(text),
                        Focus::Composer => Action::Send(text),
                    };
                    runner.dispatch(app, action)
                }
                Some(FieldEvent::Edited) => false,
                None => {
                    // Arrows the field had no use for scroll the transcript
                    match event {
                        TuiEvent::CursorUp => {
                            tui.message_list.handle_event(&TuiEvent::ScrollUp);
                        }
                        TuiEvent::CursorDown => {
                            tui.message_list.handle_event(&TuiEvent::ScrollDown);
                        }
                        _ => {}
                    }
                    false
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::AnswerFailure;
    use crate::core::notification::Notification;
    use crate::test_support::{ScriptedBackend, loaded_app};

    fn runner(backend: Arc<ScriptedBackend>) -> (Runner, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        (
            Runner {
                scraper: backend.clone(),
                answerer: backend,
                tx,
            },
            rx,
        )
    }

    fn type_text(app: &mut App, tui: &mut TuiState, runner: &Runner, text: &str) {
        for c in text.chars() {
            handle_event(app, tui, runner, TuiEvent::InputChar(c));
        }
    }

    #[tokio::test]
    async fn url_submit_starts_load_and_completion_arrives() {
        let backend = Arc::new(ScriptedBackend::new("# Rules", "ok"));
        let (runner, rx) = runner(backend);
        let mut app = App::new();
        let mut tui = TuiState::new();
        tui.sync_props(&app);

        type_text(&mut app, &mut tui, &runner, "https://univ.edu/rules");
        handle_event(&mut app, &mut tui, &runner, TuiEvent::Submit);
        assert!(app.context.loading);
        // URL text stays in the field
        assert_eq!(tui.url_field.buffer, "https://univ.edu/rules");

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        runner.dispatch(&mut app, action);
        assert!(app.context.loaded);

        tui.sync_props(&app);
        assert_eq!(tui.focus, Focus::Composer);
        assert!(!tui.composer.disabled);
    }

    #[test]
    fn composer_is_disabled_without_context() {
        let app = App::new();
        let mut tui = TuiState::new();
        tui.sync_props(&app);
        assert!(tui.composer.disabled);
        assert_eq!(tui.composer.placeholder, "Load regulations first...");
    }

    #[tokio::test]
    async fn composer_submit_sends_and_clears() {
        let backend = Arc::new(ScriptedBackend::new("# Rules", "Eight weeks."));
        let (runner, _rx) = runner(backend);
        let mut app = loaded_app("Rules");
        let mut tui = TuiState::new();
        tui.sync_props(&app);
        assert_eq!(tui.focus, Focus::Composer);

        type_text(&mut app, &mut tui, &runner, "How long?");
        handle_event(&mut app, &mut tui, &runner, TuiEvent::Submit);

        assert!(app.conversation.busy);
        assert_eq!(app.conversation.turns.len(), 1);
        assert!(tui.composer.buffer.is_empty());
    }

    #[tokio::test]
    async fn clear_all_resets_presentation_state() {
        let backend = Arc::new(ScriptedBackend::new("# Rules", "ok"));
        let (runner, _rx) = runner(backend);
        let mut app = loaded_app("Rules");
        let mut tui = TuiState::new();
        tui.sync_props(&app);
        type_text(&mut app, &mut tui, &runner, "draft");

        handle_event(&mut app, &mut tui, &runner, TuiEvent::ClearAll);

        assert!(!app.context.loaded);
        assert!(tui.composer.buffer.is_empty());
        assert_eq!(tui.focus, Focus::Url);
    }

    #[tokio::test]
    async fn escape_dismisses_notification() {
        let backend = Arc::new(ScriptedBackend::new("# Rules", "ok"));
        let (runner, _rx) = runner(backend);
        let mut app = App::new();
        app.notify(Notification::load_failed());
        let mut tui = TuiState::new();

        handle_event(&mut app, &mut tui, &runner, TuiEvent::Escape);
        assert!(app.notification.is_none());
    }

    #[tokio::test]
    async fn force_quit_returns_true() {
        let backend = Arc::new(ScriptedBackend::new("# Rules", "ok"));
        let (runner, _rx) = runner(backend);
        let mut app = App::new();
        let mut tui = TuiState::new();
        assert!(handle_event(&mut app, &mut tui, &runner, TuiEvent::ForceQuit));
    }

    #[test]
    fn tab_toggles_focus() {
        assert_eq!(Focus::Url.toggled(), Focus::Composer);
        assert_eq!(Focus::Composer.toggled(), Focus::Url);
    }

    #[test]
    fn notification_expiry_restarts_for_new_notification() {
        let mut app = App::new();
        let mut tui = TuiState::new();
        app.notify(Notification::context_loaded());

        // First sighting starts the clock
        assert!(!tui.notification_expired(&app, Duration::ZERO));
        assert!(tui.notification_expired(&app, Duration::ZERO));

        app.notify(Notification::answer_failed());
        assert!(!tui.notification_expired(&app, Duration::ZERO));

        app.notification = None;
        assert!(!tui.notification_expired(&app, Duration::ZERO));
    }

    #[test]
    fn identical_failure_toast_gets_a_fresh_lifetime() {
        let ttl = Duration::from_millis(300);
        let mut app = loaded_app("Rules");
        let mut tui = TuiState::new();
        let fail = |app: &mut App| {
            let generation = match update(app, Action::Send("question".into())) {
                Effect::Ask { generation, .. } => generation,
                other => panic!("expected Ask, got {other:?}"),
            };
            update(
                app,
                Action::AnswerReceived {
                    generation,
                    result: Err(AnswerFailure("HTTP 502".into())),
                },
            );
        };

        fail(&mut app);
        assert!(!tui.notification_expired(&app, ttl));
        std::thread::sleep(Duration::from_millis(250));

        fail(&mut app);
        assert!(!tui.notification_expired(&app, ttl));
        std::thread::sleep(Duration::from_millis(100));

        // 350ms after the first toast, but only 100ms after the second
        assert!(!tui.notification_expired(&app, ttl));
    }
}
