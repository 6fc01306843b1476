//! Frame layout: wires `App` (read-only) and `TuiState` (component state)
//! into the components.
//!
//! ```text
//! ┌ title bar ─────────────────────────────── hints ┐  1 row
//! │ URL field                          │ status    │  3 rows
//! │ transcript / landing               [toast] │  rest
//! │ composer                                        │  3..7 rows
//! └ key hints ──────────────────────────────────────┘  1 row
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{LandingPage, MessageList, TitleBar, Toast, UrlBar};
use crate::tui::{Focus, TuiState};

/// Areas for one frame, as computed by `layout`.
pub struct FrameLayout {
    pub title: Rect,
    pub url_bar: Rect,
    pub main: Rect,
    pub composer: Rect,
    pub footer: Rect,
}

pub fn layout(area: Rect, composer_height: u16) -> FrameLayout {
    use Constraint::{Length, Min};
    let [title, url_bar, main, composer, footer] = Layout::vertical([
        Length(1),
        Length(3),
        Min(0),
        Length(composer_height),
        Length(1),
    ])
    .areas(area);
    FrameLayout {
        title,
        url_bar,
        main,
        composer,
        footer,
    }
}

fn footer_hints(focus: Focus) -> Line<'static> {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    let mut spans = match focus {
        Focus::Url => vec![Span::styled("Enter", key), Span::styled(" load  ", text)],
        Focus::Composer => vec![
            Span::styled("Enter", key),
            Span::styled(" send  ", text),
            Span::styled("Shift+Enter", key),
            Span::styled(" newline  ", text),
        ],
    };
    spans.extend([
        Span::styled("Tab", key),
        Span::styled(" switch  ", text),
        Span::styled("Ctrl+C", key),
        Span::styled(" quit", text),
    ]);
    Line::from(spans)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, frame_index: usize) {
    let area = frame.area();
    let composer_height = tui.composer.calculate_height(area.width);
    let areas = layout(area, composer_height);

    TitleBar::new(app.can_clear(), tui.message_list.has_unseen_content())
        .render(frame, areas.title);

    UrlBar::new(
        &mut tui.url_field,
        app.context.loading,
        app.context.loaded,
        app.url_status_label(),
        frame_index,
    )
    .render(frame, areas.url_bar);

    if app.shows_empty_state() {
        LandingPage::new(app.empty_state_text()).render(frame, areas.main);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.conversation.turns,
            app.shows_pending_reply(),
            frame_index,
        )
        .render(frame, areas.main);
    }

    tui.composer.render(frame, areas.composer);

    frame.render_widget(Paragraph::new(footer_hints(tui.focus)), areas.footer);

    if let Some(notification) = &app.notification {
        Toast::new(notification).render(frame, areas.main);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::notification::Notification;
    use crate::core::state::ChatTurn;
    use crate::test_support::loaded_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        tui.sync_props(app);
        terminal
            .draw(|f| draw_ui(f, app, tui, 0))
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
    fn layout_reserves_fixed_rows() {
        let areas = layout(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(areas.title.height, 1);
        assert_eq!(areas.url_bar.height, 3);
        assert_eq!(areas.composer.height, 3);
        assert_eq!(areas.footer.height, 1);
        assert_eq!(areas.main.height, 24 - 1 - 3 - 3 - 1);
    }

    #[test]
    fn fresh_app_shows_load_prompt() {
        let app = App::new();
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Internship Assistant"));
        assert!(text.contains("Load your regulations"));
        assert!(text.contains("Load regulations first..."));
        assert!(!text.contains("Ctrl+L Clear"));
    }

    #[test]
    fn conversation_replaces_landing() {
        let mut app = loaded_app("Rules");
        app.conversation.push(ChatTurn::user("How long?"));
        app.conversation.push(ChatTurn::assistant("Eight weeks."));
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(!text.contains("Ready to help!"));
        assert!(text.contains("How long?"));
        assert!(text.contains("Eight weeks."));
        assert!(text.contains("Ctrl+L Clear"));
    }

    #[test]
    fn notification_is_drawn_as_toast() {
        let mut app = App::new();
        app.notify(Notification::load_failed());
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Failed to load"));
    }

    #[test]
    fn loading_shows_url_status() {
        let mut app = App::new();
        let _ = update(&mut app, Action::LoadUrl("https://univ.edu/rules".into()));
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Loading…"));
    }
}
