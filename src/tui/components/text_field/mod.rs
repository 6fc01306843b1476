//! # TextField Component
//!
//! Editable text inside a rounded, titled block. Used twice: the single-line
//! URL bar and the multi-line question composer.
//!
//! ## Responsibilities
//!
//! - Capture typed and pasted text
//! - Editing (backspace, delete, cursor movement)
//! - Submission on plain Enter; line breaks only in multi-line mode
//! - Placeholder text while empty, dimmed rendering while disabled
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `disabled`, `focused` and
//! `placeholder` are props refreshed by the event loop from `App` each frame.

mod cursor;
mod wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::Cursor;
use wrap::{MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, line_count, next_boundary, prev_boundary, segments};

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Enter pressed with non-blank content. Carries the trimmed text.
    Submit(String),
    /// Buffer or cursor changed
    Edited,
}

pub struct TextField {
    pub buffer: String,
    pub title: String,
    pub placeholder: String,
    pub multiline: bool,
    /// Empty the buffer after a submit (composer) or keep it (URL bar)
    pub clear_on_submit: bool,
    pub disabled: bool,
    pub focused: bool,
    cursor: Cursor,
}

impl TextField {
    pub fn single_line(title: impl Into<String>) -> Self {
        Self::new(title, false, false)
    }

    pub fn multi_line(title: impl Into<String>) -> Self {
        Self::new(title, true, true)
    }

    fn new(title: impl Into<String>, multiline: bool, clear_on_submit: bool) -> Self {
        Self {
            buffer: String::new(),
            title: title.into(),
            placeholder: String::new(),
            multiline,
            clear_on_submit,
            disabled: false,
            focused: false,
            cursor: Cursor::new(),
        }
    }

    /// Replace the buffer and park the cursor at its end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = if self.multiline {
            text.to_string()
        } else {
            text.replace(['\n', '\r'], "")
        };
        self.cursor.reset();
        self.cursor.pos = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Rendered height for the given width, borders included.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        if !self.multiline {
            return 1 + VERTICAL_OVERHEAD;
        }
        let lines = line_count(&self.buffer, inner_width(area_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn insert(&mut self, text: &str) {
        let text = if self.multiline {
            text.replace('\r', "")
        } else {
            text.replace(['\n', '\r'], "")
        };
        if text.is_empty() {
            return;
        }
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
    }

    /// Visible slice of a single-line buffer, scrolled so the cursor fits.
    fn single_line_view(&self, width: u16) -> (String, u16) {
        let width = width.max(1) as usize;
        let cursor_chars = self.buffer[..self.cursor.pos].chars().count();
        let skip = (cursor_chars + 1).saturating_sub(width);
        let visible: String = self.buffer.chars().skip(skip).take(width).collect();
        (visible, (cursor_chars - skip) as u16)
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect, total_lines: u16) {
        if total_lines <= MAX_VISIBLE_LINES {
            return;
        }
        let max_scroll = total_lines.saturating_sub(MAX_VISIBLE_LINES);
        let mut state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);
        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut state,
        );
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_width = area.width;
        let width = inner_width(area.width);

        let border_style = match (self.disabled, self.focused) {
            (true, _) => Style::default().fg(Color::DarkGray),
            (false, true) => Style::default().fg(Color::Cyan),
            (false, false) => Style::default().add_modifier(Modifier::DIM),
        };
        let text_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str())
            .padding(Padding::horizontal(1));

        if self.buffer.is_empty() {
            let placeholder = Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .block(block);
            frame.render_widget(placeholder, area);
            if self.focused && !self.disabled {
                let (x, y) = self.cursor.screen_pos("", area);
                frame.set_cursor_position((x, y));
            }
            return;
        }

        if !self.multiline {
            let (visible, col) = self.single_line_view(width);
            frame.render_widget(Paragraph::new(visible).style(text_style).block(block), area);
            if self.focused && !self.disabled {
                frame.set_cursor_position((area.x + 2 + col, area.y + 1));
            }
            return;
        }

        let visible_lines = area.height.saturating_sub(VERTICAL_OVERHEAD);
        self.cursor.keep_visible(&self.buffer, area.width, visible_lines);

        let segs = segments(&self.buffer, width);
        let lines: Vec<Line> = segs
            .iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(visible_lines as usize)
            .map(|&(start, end)| Line::raw(&self.buffer[start..end]))
            .collect();

        frame.render_widget(Paragraph::new(lines).style(text_style).block(block), area);
        self.render_scrollbar(frame, area, segs.len() as u16);

        if self.focused && !self.disabled {
            let (x, y) = self.cursor.screen_pos(&self.buffer, area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut utf8 = [0u8; 4];
                self.insert(c.encode_utf8(&mut utf8));
                Some(FieldEvent::Edited)
            }
            TuiEvent::Paste(text) => {
                self.insert(text);
                Some(FieldEvent::Edited)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                FieldEvent::Edited
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                FieldEvent::Edited
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_boundary(&self.buffer, self.cursor.pos);
                FieldEvent::Edited
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_boundary(&self.buffer, self.cursor.pos);
                FieldEvent::Edited
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    FieldEvent::Edited
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    FieldEvent::Edited
                })
            }
            TuiEvent::CursorUp if self.multiline => self
                .cursor
                .move_vertically(&self.buffer, -1)
                .then_some(FieldEvent::Edited),
            TuiEvent::CursorDown if self.multiline => self
                .cursor
                .move_vertically(&self.buffer, 1)
                .then_some(FieldEvent::Edited),
            TuiEvent::Submit => {
                let text = self.buffer.trim().to_string();
                if text.is_empty() {
                    return None;
                }
                if self.clear_on_submit {
                    self.clear();
                }
                Some(FieldEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(field: &mut TextField, text: &str) {
        for c in text.chars() {
            field.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_and_backspace() {
        let mut field = TextField::multi_line("Ask");
        type_str(&mut field, "ab");
        assert_eq!(field.buffer, "ab");
        assert_eq!(field.handle_event(&TuiEvent::Backspace), Some(FieldEvent::Edited));
        assert_eq!(field.buffer, "a");
    }

    #[test]
    fn composer_submit_trims_and_clears() {
        let mut field = TextField::multi_line("Ask");
        type_str(&mut field, "  What is the minimum duration?  ");
        assert_eq!(
            field.handle_event(&TuiEvent::Submit),
            Some(FieldEvent::Submit("What is the minimum duration?".into()))
        );
        assert!(field.buffer.is_empty());
    }

    #[test]
    fn url_submit_keeps_text() {
        let mut field = TextField::single_line("URL");
        field.set_text("https://univ.edu/regs");
        assert_eq!(
            field.handle_event(&TuiEvent::Submit),
            Some(FieldEvent::Submit("https://univ.edu/regs".into()))
        );
        assert_eq!(field.buffer, "https://univ.edu/regs");
    }

    #[test]
    fn blank_submit_emits_nothing() {
        let mut field = TextField::multi_line("Ask");
        type_str(&mut field, "   ");
        assert_eq!(field.handle_event(&TuiEvent::Submit), None);
        assert_eq!(field.buffer, "   ");
    }

    #[test]
    fn newline_only_in_multiline() {
        let mut composer = TextField::multi_line("Ask");
        type_str(&mut composer, "a\nb");
        assert_eq!(composer.buffer, "a\nb");

        let mut url = TextField::single_line("URL");
        type_str(&mut url, "a\nb");
        url.handle_event(&TuiEvent::Paste("c\nd".into()));
        assert_eq!(url.buffer, "abcd");
    }

    #[test]
    fn disabled_field_ignores_input() {
        let mut field = TextField::multi_line("Ask");
        field.disabled = true;
        assert_eq!(field.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(field.handle_event(&TuiEvent::Submit), None);
        assert!(field.buffer.is_empty());
    }

    #[test]
    fn height_grows_then_caps() {
        let mut field = TextField::multi_line("Ask");
        assert_eq!(field.calculate_height(40), 1 + VERTICAL_OVERHEAD);
        field.set_text("1\n2\n3");
        assert_eq!(field.calculate_height(40), 3 + VERTICAL_OVERHEAD);
        field.set_text("1\n2\n3\n4\n5\n6\n7\n8");
        assert_eq!(field.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
        assert_eq!(TextField::single_line("URL").calculate_height(40), 3);
    }

    #[test]
    fn home_end_move_within_line() {
        let mut field = TextField::multi_line("Ask");
        field.set_text("one\ntwo");
        assert_eq!(field.handle_event(&TuiEvent::CursorHome), Some(FieldEvent::Edited));
        type_str(&mut field, ">");
        assert_eq!(field.buffer, "one\n>two");
        field.handle_event(&TuiEvent::CursorEnd);
        type_str(&mut field, "!");
        assert_eq!(field.buffer, "one\n>two!");
    }

    #[test]
    fn single_line_view_scrolls_to_cursor() {
        let mut field = TextField::single_line("URL");
        field.set_text("https://univ.edu/very/long/path");
        let (visible, col) = field.single_line_view(10);
        assert_eq!(visible, "long/path");
        assert_eq!(col, 9);
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let backend = TestBackend::new(50, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut field = TextField::multi_line("Ask");
        field.placeholder = "Load regulations first...".into();
        terminal.draw(|f| field.render(f, f.area())).unwrap();
        assert!(screen_text(&terminal).contains("Load regulations first..."));
    }
}
