//! Markdown → ratatui `Text` renderer for assistant replies.
//!
//! Covers what the answering function actually produces: paragraphs,
//! headings, emphasis, inline and fenced code, bullet/numbered lists,
//! blockquotes and links. Anything else degrades to plain text.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.text
}

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Composed inline styles; the top applies to new spans.
    styles: Vec<Style>,
    /// None = bullet list, Some(n) = ordered list at item n.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    link_url: Option<String>,
    /// A blank line is owed before the next block.
    pending_gap: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            lists: vec![],
            quote_depth: 0,
            in_code_block: false,
            link_url: None,
            pending_gap: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn new_line(&mut self) {
        let mut line = Line::default();
        if self.quote_depth > 0 {
            line.push_span(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(Color::DarkGray),
            ));
        }
        self.text.lines.push(line);
    }

    fn gap_if_pending(&mut self) {
        if self.pending_gap && !self.text.lines.is_empty() {
            self.text.lines.push(Line::default());
        }
        self.pending_gap = false;
    }

    fn start_block(&mut self) {
        self.gap_if_pending();
        self.new_line();
    }

    fn push_span(&mut self, span: Span<'static>) {
        if self.text.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text_run(&text),
            Event::Code(code) => {
                let style = self.style().fg(Color::Yellow);
                self.push_span(Span::styled(code.into_string(), style));
            }
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.start_block();
                self.push_span(Span::styled("─".repeat(20), Style::default().fg(Color::DarkGray)));
                self.pending_gap = true;
            }
            _ => {}
        }
    }

    fn text_run(&mut self, text: &str) {
        if self.in_code_block {
            let style = Style::default().fg(Color::Yellow);
            let mut lines = text.split('\n').peekable();
            while let Some(line) = lines.next() {
                // The final piece after a trailing newline is empty
                if line.is_empty() && lines.peek().is_none() {
                    break;
                }
                self.new_line();
                self.push_span(Span::styled(format!("  {line}"), style));
            }
            return;
        }
        let style = self.style();
        self.push_span(Span::styled(text.to_string(), style));
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // List item text continues the bullet line
                if self.lists.is_empty() || self.pending_gap {
                    self.start_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                let mut style = Style::default().add_modifier(Modifier::BOLD);
                if level == HeadingLevel::H1 {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.gap_if_pending();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.pending_gap = !self.text.lines.is_empty();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.start_block();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::TableHead | Tag::TableRow => self.start_block(),
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.into_string());
                self.push_style(Style::default().add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.pending_gap = true,
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.pending_gap = true;
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.pending_gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.pending_gap = true;
                }
            }
            TagEnd::Item => self.pending_gap = false,
            TagEnd::TableCell => self.push_span(Span::styled(" │ ", Style::default().fg(Color::DarkGray))),
            TagEnd::Table => self.pending_gap = true,
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }
}
