//! Markdown → ratatui `Text` renderer for step content.
//!
//! Course content is authored as markdown; this walks the `pulldown_cmark`
//! event stream and emits styled `Line`s. Supported: headings, paragraphs,
//! bold/italic, inline code, fenced code blocks (syntect-highlighted when the
//! language is known), bullet/numbered lists, and blockquotes. Anything
//! fancier (tables, footnotes, raw HTML) is dropped — course files don't use
//! it.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_PREFIX: &str = "  ";
const QUOTE_PREFIX: &str = "> ";

/// Render markdown into owned styled text with `base_fg` as the body color.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let parser = Parser::new_ext(content, Options::ENABLE_STRIKETHROUGH);
    let mut renderer = Renderer::new(base_fg);
    for event in parser {
        renderer.handle(event);
    }
    renderer.text
}

/// Active fenced code block: either a syntect highlighter or plain.
enum CodeState {
    Highlighted(Box<HighlightLines<'static>>),
    Plain,
}

struct Renderer {
    text: Text<'static>,
    base_fg: Color,
    /// Composable inline styles (bold inside italic works by patching).
    inline: Vec<Style>,
    /// Some while inside a fenced code block.
    code: Option<CodeState>,
    /// Depth of blockquote nesting.
    quote_depth: usize,
    /// List stack: None = bullets, Some(n) = next ordered index.
    lists: Vec<Option<u64>>,
    /// Insert a blank line before the next block element.
    pending_gap: bool,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            inline: Vec::new(),
            code: None,
            quote_depth: 0,
            lists: Vec::new(),
            pending_gap: false,
        }
    }

    fn current_style(&self) -> Style {
        self.inline
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_inline(&mut self, overlay: Style) {
        self.inline.push(self.current_style().patch(overlay));
    }

    /// Start a new output line, with the blockquote prefix if applicable.
    fn new_line(&mut self) {
        let mut line = Line::default();
        for _ in 0..self.quote_depth {
            line.push_span(Span::styled(
                QUOTE_PREFIX,
                Style::default().fg(Color::DarkGray),
            ));
        }
        self.text.lines.push(line);
    }

    fn append(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => {
                self.new_line();
                self.append(span);
            }
        }
    }

    fn gap(&mut self) {
        if self.pending_gap {
            self.text.lines.push(Line::default());
            self.pending_gap = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(t) => self.emit_text(&t),
            Event::Code(c) => self.append(Span::styled(
                c.to_string(),
                Style::default().fg(Color::Yellow),
            )),
            Event::SoftBreak => self.append(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.gap();
                self.text.lines.push(Line::from(Span::styled(
                    "─".repeat(32),
                    Style::default().fg(Color::DarkGray),
                )));
                self.pending_gap = true;
            }
            _ => {} // HTML, footnotes, math
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.gap();
                self.new_line();
            }
            Tag::Heading { level, .. } => {
                self.gap();
                self.new_line();
                self.push_inline(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.gap();
                self.quote_depth += 1;
                self.push_inline(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.gap();
                let token = match &kind {
                    CodeBlockKind::Fenced(lang) => lang.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                let state = SYNTAX_SET
                    .find_syntax_by_token(token)
                    .filter(|_| !token.is_empty())
                    .map(|syntax| {
                        let theme = &THEME_SET.themes["base16-ocean.dark"];
                        CodeState::Highlighted(Box::new(HighlightLines::new(syntax, theme)))
                    })
                    .unwrap_or(CodeState::Plain);
                self.code = Some(state);
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.gap();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.new_line();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let s = format!("{}{}. ", "  ".repeat(depth), n);
                        *n += 1;
                        s
                    }
                    _ => format!("{}• ", "  ".repeat(depth)),
                };
                self.append(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.push_inline(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_inline(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_inline(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { .. } => {
                self.push_inline(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.pending_gap = true,
            TagEnd::Heading(_) => {
                self.inline.pop();
                self.pending_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.inline.pop();
                self.pending_gap = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.pending_gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.pending_gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.inline.pop();
            }
            _ => {}
        }
    }

    fn emit_text(&mut self, raw: &str) {
        let text = raw.replace('\t', "    "); // ratatui renders \t zero-width

        match self.code.take() {
            Some(CodeState::Highlighted(mut hl)) => {
                for line in LinesWithEndings::from(&text) {
                    let mut spans = vec![Span::styled(
                        CODE_PREFIX,
                        Style::default().fg(Color::DarkGray),
                    )];
                    if let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) {
                        for (style, fragment) in ranges {
                            let fragment = fragment.trim_end_matches('\n');
                            if fragment.is_empty() {
                                continue;
                            }
                            let fg = Color::Rgb(
                                style.foreground.r,
                                style.foreground.g,
                                style.foreground.b,
                            );
                            spans.push(Span::styled(
                                fragment.replace('\t', "    "),
                                Style::default().fg(fg),
                            ));
                        }
                    }
                    self.text.lines.push(Line::from(spans));
                }
                self.code = Some(CodeState::Highlighted(hl));
            }
            Some(CodeState::Plain) => {
                for line in text.lines() {
                    self.text.lines.push(Line::from(vec![
                        Span::styled(CODE_PREFIX, Style::default().fg(Color::DarkGray)),
                        Span::styled(line.to_owned(), Style::default().fg(Color::Green)),
                    ]));
                }
                self.code = Some(CodeState::Plain);
            }
            None => {
                let style = self.current_style();
                self.append(Span::styled(text, style));
            }
        }
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_plain_paragraph_uses_base_color() {
        let text = render("hello world", Color::Gray);
        let span = &text.lines[0].spans[0];
        assert_eq!(span.content, "hello world");
        assert_eq!(span.style.fg, Some(Color::Gray));
    }

    #[test]
    fn test_bold_span_is_bold() {
        let text = render("a **strong** claim", Color::Gray);
        let bold = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "strong")
            .unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_inline_code_is_highlighted() {
        let text = render("use `y = mx + b` here", Color::Gray);
        let code = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "y = mx + b")
            .unwrap();
        assert_eq!(code.style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let text = render("first\n\nsecond", Color::Gray);
        let lines = flat(&text);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_bullet_list_markers() {
        let text = render("- one\n- two", Color::Gray);
        let lines = flat(&text);
        assert!(lines.iter().any(|l| l.starts_with("• ") && l.contains("one")));
        assert!(lines.iter().any(|l| l.starts_with("• ") && l.contains("two")));
    }

    #[test]
    fn test_ordered_list_numbers_increment() {
        let text = render("1. first\n2. second", Color::Gray);
        let lines = flat(&text);
        assert!(lines.iter().any(|l| l.starts_with("1. ")));
        assert!(lines.iter().any(|l| l.starts_with("2. ")));
    }

    #[test]
    fn test_code_block_lines_are_indented() {
        let text = render("```\nMSE = total / n\n```", Color::Gray);
        let lines = flat(&text);
        assert!(lines.iter().any(|l| l.starts_with(CODE_PREFIX) && l.contains("MSE")));
    }

    #[test]
    fn test_blockquote_prefixed() {
        let text = render("> wisdom", Color::Gray);
        let lines = flat(&text);
        assert!(lines.iter().any(|l| l.starts_with(QUOTE_PREFIX)));
    }

    #[test]
    fn test_heading_text_is_bold() {
        let text = render("## Residuals", Color::Gray);
        let heading = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "Residuals")
            .unwrap();
        assert!(heading.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_tabs_never_survive() {
        let text = render("```\n\tindented\n```", Color::Gray);
        assert!(
            text.lines
                .iter()
                .all(|l| l.spans.iter().all(|s| !s.content.contains('\t')))
        );
    }
}
