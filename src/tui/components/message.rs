use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::state::{ChatTurn, Role};
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Bubbles never get narrower than this, terminal permitting.
const MIN_BUBBLE_WIDTH: u16 = 24;

/// A stateless component that renders one chat turn as a bordered bubble.
///
/// User turns hug the right edge, assistant turns the left, each taking at
/// most 80% of the row. Assistant content is rendered as markdown; user
/// content is shown verbatim.
///
/// Heights come from `Paragraph::line_count`, so the list can lay out its
/// scroll canvas before anything is drawn and the measured and painted
/// heights always agree.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a ChatTurn,
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a ChatTurn) -> Self {
        Self { turn }
    }

    /// Width of the bubble inside a row of `row_width` cells.
    pub fn bubble_width(row_width: u16) -> u16 {
        (row_width.saturating_mul(4) / 5)
            .max(MIN_BUBBLE_WIDTH)
            .min(row_width)
    }

    /// Rows needed to draw this turn in a row of `row_width` cells.
    pub fn calculate_height(turn: &ChatTurn, row_width: u16) -> u16 {
        let width = Self::bubble_width(row_width);
        if width <= 2 + CONTENT_PAD_H * 2 {
            return 1;
        }
        paragraph(turn).line_count(width) as u16
    }
}

fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Cyan),
        Role::Assistant => Style::default().fg(Color::Green),
    }
}

fn paragraph(turn: &ChatTurn) -> Paragraph<'static> {
    let style = role_style(turn.role);
    let (title, body) = match turn.role {
        Role::User => ("you", Text::raw(turn.content.trim().to_string())),
        Role::Assistant => ("assistant", markdown::render(turn.content.trim(), Color::Reset)),
    };

    let mut block = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .border_style(style.add_modifier(Modifier::DIM))
        .title_style(style)
        .padding(Padding::horizontal(CONTENT_PAD_H));
    if turn.role == Role::User {
        block = block.title_alignment(ratatui::layout::Alignment::Right);
    }

    Paragraph::new(body).block(block).wrap(Wrap { trim: false })
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = Self::bubble_width(area.width);
        let x = match self.turn.role {
            Role::User => area.x + area.width.saturating_sub(width),
            Role::Assistant => area.x,
        };
        let bubble = Rect::new(x, area.y, width, area.height);
        paragraph(self.turn).render(bubble, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubble_width_is_four_fifths_with_floor() {
        assert_eq!(Message::bubble_width(100), 80);
        assert_eq!(Message::bubble_width(25), MIN_BUBBLE_WIDTH);
        assert_eq!(Message::bubble_width(10), 10);
    }

    #[test]
    fn single_line_turn_is_three_rows() {
        let turn = ChatTurn::user("Hello");
        // 1 line of content + 2 for borders
        assert_eq!(Message::calculate_height(&turn, 80), 3);
    }

    #[test]
    fn content_is_trimmed_before_measuring() {
        let turn = ChatTurn::assistant("\n\n   Trim me   \n\n");
        assert_eq!(Message::calculate_height(&turn, 80), 3);
    }

    #[test]
    fn long_text_wraps() {
        let turn = ChatTurn::user("word ".repeat(40));
        assert!(Message::calculate_height(&turn, 40) > 3);
    }

    #[test]
    fn degenerate_width_returns_minimum() {
        let turn = ChatTurn::user("Hello");
        assert_eq!(Message::calculate_height(&turn, 3), 1);
    }

    #[test]
    fn user_bubble_hugs_right_edge() {
        let turn = ChatTurn::user("hi");
        let area = Rect::new(0, 0, 50, 3);
        let mut buf = Buffer::empty(area);
        Message::new(&turn).render(area, &mut buf);
        // Bubble is 40 wide, so the leftmost 10 columns stay blank
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(10, 0)].symbol(), "╭");
    }
}
