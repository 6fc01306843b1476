//! # Application State
//!
//! Core business state for the assistant. Domain logic only, no TUI types.
//! Presentation state (input buffers, focus, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── conversation: Conversation      // message store + busy flag
//! │   ├── turns: Vec<ChatTurn>
//! │   └── busy: bool
//! ├── context: ContextState           // loaded regulations text
//! │   ├── text: Option<String>
//! │   ├── loading: bool
//! │   └── loaded: bool
//! ├── notification: Option<Notification>
//! ├── notification_seq: u64          // bumped on every raise
//! ├── load_generation: u64            // stale scrape results are dropped
//! └── answer_generation: u64          // stale answers are dropped
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use serde::{Deserialize, Serialize};

use crate::core::notification::Notification;

/// Who wrote a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation. Never mutated after creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered chat history plus the in-flight flag.
///
/// `busy` is true only while exactly one answer request is outstanding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    pub turns: Vec<ChatTurn>,
    pub busy: bool,
}

impl Conversation {
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.busy = false;
    }
}

/// The regulations text used as background for answers.
///
/// Invariants: `loaded` implies `text` is non-empty, and `loading`/`loaded`
/// are never both set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextState {
    pub text: Option<String>,
    pub loading: bool,
    pub loaded: bool,
}

impl ContextState {
    /// Enter the loading state. Any previous text is dropped.
    pub fn begin_loading(&mut self) {
        self.text = None;
        self.loaded = false;
        self.loading = true;
    }

    /// Store freshly scraped text. Empty text counts as a failure.
    pub fn finish_loaded(&mut self, text: String) -> bool {
        self.loading = false;
        if text.trim().is_empty() {
            self.text = None;
            self.loaded = false;
            return false;
        }
        self.text = Some(text);
        self.loaded = true;
        true
    }

    pub fn finish_failed(&mut self) {
        self.loading = false;
        self.loaded = false;
        self.text = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Context text, only when fully loaded.
    pub fn loaded_text(&self) -> Option<&str> {
        if self.loaded { self.text.as_deref() } else { None }
    }
}

#[derive(Debug, Default)]
pub struct App {
    pub conversation: Conversation,
    pub context: ContextState,
    pub notification: Option<Notification>,
    /// Bumped every time a notification is raised, so an identical toast
    /// raised twice still counts as new.
    pub notification_seq: u64,
    pub load_generation: u64,
    pub answer_generation: u64,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `notification`, replacing any current one.
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.notification_seq += 1;
    }

    // ------------------------------------------------------------------
    // Presentation derivations
    // ------------------------------------------------------------------

    pub fn shows_empty_state(&self) -> bool {
        self.conversation.is_empty()
    }

    /// A reply is pending and nothing has been appended for it yet.
    pub fn shows_pending_reply(&self) -> bool {
        self.conversation.busy
            && self
                .conversation
                .last()
                .is_some_and(|turn| turn.role == Role::User)
    }

    pub fn can_compose(&self) -> bool {
        !self.conversation.busy && self.context.loaded
    }

    pub fn can_submit_url(&self) -> bool {
        !self.context.loading
    }

    pub fn can_clear(&self) -> bool {
        !self.conversation.is_empty() || self.context.loaded
    }

    /// Heading and sub-text for the empty transcript.
    pub fn empty_state_text(&self) -> (&'static str, &'static str) {
        if self.context.loaded {
            (
                "Ready to help!",
                "Ask any question about internship requirements, procedures, or documentation.",
            )
        } else {
            (
                "Load your regulations",
                "Paste the URL to your university's internship regulations above to get started.",
            )
        }
    }

    pub fn composer_placeholder(&self) -> &'static str {
        if self.context.loaded {
            "Ask about internship requirements..."
        } else {
            "Load regulations first..."
        }
    }

    pub fn url_status_label(&self) -> &'static str {
        if self.context.loading {
            "Loading…"
        } else if self.context.loaded {
            "Loaded"
        } else {
            "Load"
        }
    }
}
