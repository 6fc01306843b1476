//! # TitleBar Component
//!
//! Top line of the screen: application name and tagline on the left,
//! contextual hints on the right.
//!
//! TitleBar is purely presentational. It receives all data as props and
//! holds no state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.can_clear(), tui.message_list.has_unseen_content());
//! title_bar.render(frame, area);
//! ```
//!
//! The right side shows, in order, `"↓ New"` when the transcript has content
//! below the viewport and `"Ctrl+L Clear"` when there is anything to clear.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const APP_TITLE: &str = "Internship Assistant";
pub const APP_TAGLINE: &str = "University regulations chatbot";

pub struct TitleBar {
    /// Whether the clear action is currently available
    pub can_clear: bool,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(can_clear: bool, has_unseen_content: bool) -> Self {
        Self {
            can_clear,
            has_unseen_content,
        }
    }

    fn hints(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if self.has_unseen_content {
            spans.push(Span::styled(
                "↓ New",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        if self.can_clear {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                "Ctrl+L Clear",
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(APP_TAGLINE, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(title), area);
        frame.render_widget(
            Paragraph::new(self.hints()).alignment(Alignment::Right),
            area,
        );
    }
}
