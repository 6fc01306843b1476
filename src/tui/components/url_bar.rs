//! # UrlBar Component
//!
//! The regulations URL field with a status box beside it. The box doubles as
//! the submit affordance: it reads "Enter ⏎ Load" while idle, spins while a
//! scrape is in flight and shows a check mark once a context is loaded.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;
use crate::tui::components::text_field::TextField;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const STATUS_WIDTH: u16 = 16;

/// Transient wrapper around the persistent URL field.
pub struct UrlBar<'a> {
    pub field: &'a mut TextField,
    pub loading: bool,
    pub loaded: bool,
    /// Label from `App::url_status_label`
    pub status: &'static str,
    pub frame_index: usize,
}

impl<'a> UrlBar<'a> {
    pub fn new(
        field: &'a mut TextField,
        loading: bool,
        loaded: bool,
        status: &'static str,
        frame_index: usize,
    ) -> Self {
        Self {
            field,
            loading,
            loaded,
            status,
            frame_index,
        }
    }

    fn status_text(&self) -> String {
        if self.loading {
            format!("{} {}", SPINNER[self.frame_index % SPINNER.len()], self.status)
        } else if self.loaded {
            format!("✓ {}", self.status)
        } else {
            format!("⏎ {}", self.status)
        }
    }

    fn status_style(&self) -> Style {
        if self.loading {
            Style::default().fg(Color::Yellow)
        } else if self.loaded {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        }
    }
}

impl Component for UrlBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [field_area, status_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(STATUS_WIDTH)]).areas(area);

        self.field.render(frame, field_area);

        let style = self.status_style();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);
        frame.render_widget(
            Paragraph::new(self.status_text())
                .style(style)
                .alignment(Alignment::Center)
                .block(block),
            status_area,
        );
    }
}
