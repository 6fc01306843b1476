//! # Toast Component
//!
//! Overlay in the top-right corner that shows the current notification.
//! Green border for success, red for errors. The area beneath is cleared
//! first so the toast reads cleanly over the transcript.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::notification::Notification;
use crate::tui::component::Component;

const MAX_WIDTH: u16 = 48;

pub struct Toast<'a> {
    pub notification: &'a Notification,
}

impl<'a> Toast<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    fn paragraph(&self) -> Paragraph<'a> {
        let color = if self.notification.is_error() {
            Color::Red
        } else {
            Color::Green
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                self.notification.title.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::styled("Esc", Style::default().fg(Color::DarkGray)).right_aligned());
        Paragraph::new(self.notification.description.as_str())
            .wrap(Wrap { trim: true })
            .block(block)
    }

    /// Where the toast goes inside `area`: pinned to the top-right corner,
    /// tall enough for the wrapped description.
    pub fn placement(&self, area: Rect) -> Rect {
        let width = MAX_WIDTH.min(area.width);
        let height = (self.paragraph().line_count(width) as u16).min(area.height);
        Rect::new(area.x + area.width - width, area.y, width, height)
    }
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let rect = self.placement(area);
        frame.render_widget(Clear, rect);
        frame.render_widget(self.paragraph(), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn placement_hugs_top_right() {
        let notification = Notification::context_loaded();
        let toast = Toast::new(&notification);
        let rect = toast.placement(Rect::new(0, 2, 100, 30));
        assert_eq!(rect.x + rect.width, 100);
        assert_eq!(rect.y, 2);
        assert_eq!(rect.width, MAX_WIDTH);
        assert!(rect.height >= 3);
    }

    #[test]
    fn error_toast_uses_red_border() {
        let notification = Notification::answer_failed();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|f| {
                Toast::new(&notification).render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let corner = &buffer[(60 - MAX_WIDTH, 0)];
        assert_eq!(corner.symbol(), "╭");
        assert_eq!(corner.fg, Color::Red);

        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Something went wrong"));
    }
}
