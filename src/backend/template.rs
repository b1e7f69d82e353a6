//! Record format templates
//!
//! Templates use loguru-style placeholders: `{time}`, `{time:PATTERN}`,
//! `{level}`, `{level: <10}`, and `{message}`. Time patterns are written
//! with `YYYY`/`MM`/`DD`/`HH`/`mm`/`ss`/`SSS` tokens and translated to
//! chrono format specifiers once, at parse time. `{{` and `}}` escape
//! literal braces.

use crate::core::record::LogRecord;

const DEFAULT_TIME_PATTERN: &str = "YYYY-MM-DD HH:mm:ss";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// chrono format string, already translated
    Time(String),
    Level(Padding),
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Padding {
    fill: char,
    left_align: bool,
    width: usize,
}

impl Padding {
    const NONE: Padding = Padding {
        fill: ' ',
        left_align: true,
        width: 0,
    };

    fn apply(&self, value: &str) -> String {
        let len = value.chars().count();
        if len >= self.width {
            return value.to_string();
        }
        let pad: String = std::iter::repeat(self.fill).take(self.width - len).collect();
        if self.left_align {
            format!("{value}{pad}")
        } else {
            format!("{pad}{value}")
        }
    }
}

/// A parsed format template, ready to render records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    segments: Vec<Segment>,
}

impl FormatTemplate {
    /// Parse a template string. Unknown placeholders are kept as literal
    /// text rather than rejected, so a template never fails to parse.
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut body = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        body.push(inner);
                    }
                    match Self::parse_placeholder(&body, closed) {
                        Some(segment) => {
                            if !literal.is_empty() {
                                segments.push(Segment::Literal(std::mem::take(&mut literal)));
                            }
                            segments.push(segment);
                        }
                        None => {
                            literal.push('{');
                            literal.push_str(&body);
                            if closed {
                                literal.push('}');
                            }
                        }
                    }
                }
                _ => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    fn parse_placeholder(body: &str, closed: bool) -> Option<Segment> {
        if !closed {
            return None;
        }
        let (name, spec) = match body.split_once(':') {
            Some((name, spec)) => (name, Some(spec)),
            None => (body, None),
        };
        match name {
            "time" => {
                let pattern = spec.unwrap_or(DEFAULT_TIME_PATTERN);
                Some(Segment::Time(translate_time_pattern(pattern)))
            }
            "level" => Some(Segment::Level(
                spec.map(parse_padding).unwrap_or(Padding::NONE),
            )),
            "message" => Some(Segment::Message),
            _ => None,
        }
    }

    /// Render a record through this template. No trailing newline.
    pub fn render(&self, record: &LogRecord) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Time(fmt) => {
                    out.push_str(&record.timestamp.format(fmt).to_string());
                }
                Segment::Level(padding) => out.push_str(&padding.apply(&record.level)),
                Segment::Message => out.push_str(&record.message),
            }
        }
        out
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::parse(crate::core::sink::DEFAULT_FORMAT_TEMPLATE)
    }
}

/// Translate a loguru-style time pattern into a chrono format string.
///
/// Longest token first; characters outside the token set pass through as
/// literals, with `%` escaped so chrono never sees a stray specifier.
fn translate_time_pattern(pattern: &str) -> String {
    const TOKENS: &[(&str, &str)] = &[
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("SSS", "%3f"),
        ("ss", "%S"),
    ];

    let mut out = String::new();
    let mut rest = pattern;
    'outer: while !rest.is_empty() {
        for &(token, chrono_fmt) in TOKENS {
            if let Some(stripped) = rest.strip_prefix(token) {
                out.push_str(chrono_fmt);
                rest = stripped;
                continue 'outer;
            }
        }
        let ch = rest.chars().next().unwrap_or_default();
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

fn parse_padding(spec: &str) -> Padding {
    let chars: Vec<char> = spec.chars().collect();
    let (fill, left_align, width_start) = match chars.as_slice() {
        [fill, align, ..] if matches!(align, '<' | '>') => (*fill, *align == '<', 2),
        [align, ..] if matches!(align, '<' | '>') => (' ', *align == '<', 1),
        _ => (' ', false, 0),
    };
    let width = chars[width_start..]
        .iter()
        .collect::<String>()
        .parse()
        .unwrap_or(0);
    Padding {
        fill,
        left_align,
        width,
    }
}
