//! Transient user-visible notifications (the "toast").
//!
//! Only one is shown at a time; raising a new one replaces the old.
//! Expiry is a presentation concern and handled by the TUI.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn context_loaded() -> Self {
        Self::success(
            "Regulations loaded",
            "You can now ask questions about the internship requirements.",
        )
    }

    pub fn load_failed() -> Self {
        Self::error(
            "Failed to load",
            "Could not fetch the regulations. Please check the URL.",
        )
    }

    pub fn answer_failed() -> Self {
        Self::error(
            "Something went wrong",
            "Could not get an answer. Please try again.",
        )
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}
