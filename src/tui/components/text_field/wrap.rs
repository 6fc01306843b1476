//! Wrapping helpers and dimensions shared by the field and its cursor.

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the field scrolls internally
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Left border + left padding
pub(super) const CONTENT_OFFSET_X: u16 = 2;

/// Options matching how the field lays text out: hard breaks inside long
/// words, spaces as the only separators.
pub(super) fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Byte ranges of every visual line of `text` wrapped at `width`.
///
/// Always returns at least one range. An empty logical line (including the
/// one after a trailing newline) yields an empty range.
pub(super) fn segments(text: &str, width: u16) -> Vec<(usize, usize)> {
    if width == 0 {
        return vec![(0, text.len())];
    }
    let options = wrap_options(width);
    let mut out = Vec::new();
    let mut line_start = 0;
    for line in text.split('\n') {
        if line.is_empty() {
            out.push((line_start, line_start));
        } else {
            let mut search = 0;
            for piece in textwrap::wrap(line, &options) {
                let offset = line[search..]
                    .find(piece.as_ref())
                    .map(|i| search + i)
                    .unwrap_or(search);
                let end = offset + piece.len();
                out.push((line_start + offset, line_start + end));
                search = end;
            }
        }
        line_start += line.len() + 1;
    }
    out
}

/// Number of visual lines.
pub(super) fn line_count(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    (segments(text, width).len() as u16).max(1)
}

pub(super) fn prev_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
