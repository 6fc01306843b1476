//! Cursor tracking for `TextField`.
//!
//! The cursor is a byte offset into the field's buffer. Screen placement and
//! vertical movement are computed from the same wrapped segments used for
//! rendering, so what you see is where you type.

use ratatui::layout::Rect;

use super::wrap::{CONTENT_OFFSET_X, MAX_VISIBLE_LINES, inner_width, segments};

pub(super) struct Cursor {
    /// Byte offset in the buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line when the content overflows
    pub scroll_offset: u16,
    /// Area width seen by the last render
    pub last_width: u16,
}

impl Cursor {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Index of the wrapped line holding the cursor and the char column in it.
    pub fn line_and_column(&self, buffer: &str, area_width: u16) -> (usize, usize) {
        let segs = segments(buffer, inner_width(area_width));
        let line = segs
            .iter()
            .rposition(|&(start, _)| start <= self.pos)
            .unwrap_or(0);
        let (start, _) = segs[line];
        let column = buffer[start..self.pos].chars().count();
        (line, column)
    }

    /// Move up (`-1`) or down (`1`) one wrapped line, keeping the column.
    /// Returns false at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16) -> bool {
        let segs = segments(buffer, inner_width(self.last_width));
        let (line, column) = self.line_and_column(buffer, self.last_width);

        let target = if direction < 0 {
            match line.checked_sub(1) {
                Some(t) => t,
                None => return false,
            }
        } else if line + 1 < segs.len() {
            line + 1
        } else {
            return false;
        };

        let (start, end) = segs[target];
        self.pos = buffer[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end);
        true
    }

    /// Scroll so the cursor line stays within the visible window.
    pub fn keep_visible(&mut self, buffer: &str, area_width: u16, visible_lines: u16) {
        let visible_lines = visible_lines.clamp(1, MAX_VISIBLE_LINES);
        let (line, _) = self.line_and_column(buffer, area_width);
        let line = line as u16;
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + visible_lines {
            self.scroll_offset = line + 1 - visible_lines;
        }
    }

    /// Terminal cell for the cursor inside `area` (a bordered block).
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let (line, column) = self.line_and_column(buffer, area.width);
        let max_col = inner_width(area.width);
        let col = (column as u16).min(max_col);
        let row = (line as u16).saturating_sub(self.scroll_offset);
        (area.x + CONTENT_OFFSET_X + col, area.y + 1 + row)
    }
}
