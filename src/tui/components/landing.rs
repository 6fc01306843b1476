//! # Landing Component
//!
//! Centered placeholder shown while the transcript is empty. The heading and
//! hint come from the core so the prompt tracks whether regulations are loaded.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;

pub struct LandingPage {
    pub heading: &'static str,
    pub hint: &'static str,
}

impl LandingPage {
    pub fn new((heading, hint): (&'static str, &'static str)) -> Self {
        Self { heading, hint }
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.heading,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(self.hint, Style::default().fg(Color::DarkGray))),
        ];
        let height = lines.len() as u16;

        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            centered,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::App;
    use crate::test_support::loaded_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 9)).unwrap();
        terminal
            .draw(|f| {
                LandingPage::new(app.empty_state_text()).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_core_empty_state_text() {
        let app = App::new();
        let (heading, _) = app.empty_state_text();
        assert!(render_text(&app).contains(heading));
    }

    #[test]
    fn text_changes_once_loaded() {
        let before = App::new().empty_state_text();
        let after = loaded_app("Rules").empty_state_text();
        assert_ne!(before, after);
        assert!(render_text(&loaded_app("Rules")).contains(after.0));
    }
}
