//! Minimal rich-text model for node details and annotations.
//!
//! Detail texts are authored with a small subset of HTML-like markup:
//! `<b>`/`</b>` toggle bold, `<br>` (also `<br/>` and `<br />`) and `\n`
//! break lines. Unknown tags are dropped and the entities `&amp;`, `&lt;`,
//! `&gt;` and `&nbsp;` are decoded. The parsed form is a list of lines, each
//! a list of [`Span`]s, which the SVG renderer maps onto `<tspan>` runs.
//!
//! ```
//! # use meshview_core::draw::RichText;
//! let text = RichText::parse("<b>Memory:</b><br>• Capacity: 16GB DDR4");
//! assert_eq!(text.line_count(), 2);
//! assert_eq!(text.to_plain_text(), "Memory:\n• Capacity: 16GB DDR4");
//! assert!(text.lines()[0][0].is_bold());
//! ```

use winnow::{
    Parser as _,
    combinator::{alt, delimited, repeat},
    error::{ContextError, ErrMode},
    token::{any, literal, take_till},
};

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
}

impl Span {
    pub fn new(text: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }
}

/// Parsed rich text: an ordered list of lines made of styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    lines: Vec<Vec<Span>>,
}

impl RichText {
    /// Builds rich text from plain text, one regular span per `\n`-separated line.
    pub fn plain(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![Span::new(line, false)]
                }
            })
            .collect();
        Self { lines }
    }

    /// Builds rich text from plain text rendered entirely in bold.
    pub fn bold(text: &str) -> Self {
        let mut rich = Self::plain(text);
        for span in rich.lines.iter_mut().flatten() {
            span.bold = true;
        }
        rich
    }

    /// Parses the supported markup subset.
    pub fn parse(markup: &str) -> Self {
        let mut input = markup;
        repeat(0.., piece)
            .fold(LineBuilder::default, |mut builder, piece| {
                builder.push(piece);
                builder
            })
            .parse_next(&mut input)
            .map(LineBuilder::finish)
            .unwrap_or_else(|_| Self::plain(markup))
    }

    /// Returns the parsed lines.
    pub fn lines(&self) -> &[Vec<Span>] {
        &self.lines
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Returns the text of a single line without markup.
    pub fn line_text(line: &[Span]) -> String {
        line.iter().map(Span::text).collect()
    }

    /// Returns the content without markup, lines joined with `\n`.
    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| Self::line_text(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

type PResult<O> = Result<O, ErrMode<ContextError>>;

/// One markup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Char(char),
    Bold(bool),
    Break,
    Ignored,
}

fn piece<'a>(input: &mut &'a str) -> PResult<Piece<'a>> {
    alt((tag, entity, '\n'.value(Piece::Break), text, any.map(Piece::Char))).parse_next(input)
}

/// `<name>`, `</name>` or `<name/>`. An unterminated `<` is left to the
/// literal fallback.
fn tag<'a>(input: &mut &'a str) -> PResult<Piece<'a>> {
    delimited('<', take_till(0.., '>'), '>')
        .map(|raw: &str| {
            let name = raw.trim().trim_end_matches('/').trim().to_ascii_lowercase();
            match name.as_str() {
                "b" | "strong" => Piece::Bold(true),
                "/b" | "/strong" => Piece::Bold(false),
                "br" => Piece::Break,
                _ => Piece::Ignored,
            }
        })
        .parse_next(input)
}

/// Known entities. Anything else starting with `&` is literal text.
fn entity<'a>(input: &mut &'a str) -> PResult<Piece<'a>> {
    alt((
        literal("&amp;").value('&'),
        literal("&lt;").value('<'),
        literal("&gt;").value('>'),
        literal("&nbsp;").value('\u{a0}'),
    ))
    .map(Piece::Char)
    .parse_next(input)
}

fn text<'a>(input: &mut &'a str) -> PResult<Piece<'a>> {
    take_till(1.., ['<', '&', '\n'])
        .map(Piece::Text)
        .parse_next(input)
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Vec<Span>>,
    line: Vec<Span>,
    buffer: String,
    bold: bool,
}

impl LineBuilder {
    fn push(&mut self, piece: Piece<'_>) {
        match piece {
            Piece::Text(text) => self.buffer.push_str(text),
            Piece::Char(ch) => self.buffer.push(ch),
            Piece::Bold(bold) => {
                self.flush_span();
                self.bold = bold;
            }
            Piece::Break => {
                self.flush_span();
                self.lines.push(std::mem::take(&mut self.line));
            }
            Piece::Ignored => {}
        }
    }

    fn flush_span(&mut self) {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            self.line.push(Span::new(text, self.bold));
        }
    }

    fn finish(mut self) -> RichText {
        self.flush_span();
        if !self.line.is_empty() {
            self.lines.push(self.line);
        }
        RichText { lines: self.lines }
    }
}
