//! Console sink: template-formatted records on stdout

use super::template::FormatTemplate;
use crate::core::error::{RegistryError, Result};
use crate::core::record::LogRecord;
use colored::{Color, Colorize};
use std::io::Write;

pub struct ConsoleSink {
    template: FormatTemplate,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new(template: FormatTemplate) -> Self {
        Self {
            template,
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn write(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.template.render(record);
        match self.styled_color(record) {
            Some(color) => println!("{}", line.color(color)),
            None => println!("{line}"),
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        std::io::stdout()
            .flush()
            .map_err(|e| RegistryError::backend("flushing stdout", e))?;
        Ok(())
    }

    fn styled_color(&self, record: &LogRecord) -> Option<Color> {
        if !self.use_colors {
            return None;
        }
        record.style.as_deref().and_then(parse_style_tag)
    }
}

/// Map a loguru-style markup tag like `"<cyan>"` onto a terminal color.
/// Unknown tags disable coloring rather than erroring; styles are opaque
/// hints, not a contract.
fn parse_style_tag(tag: &str) -> Option<Color> {
    let name = tag.trim().trim_start_matches('<').trim_end_matches('>');
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "bright-black" | "dim" => Color::BrightBlack,
        "bright-red" => Color::BrightRed,
        "bright-green" => Color::BrightGreen,
        "bright-yellow" => Color::BrightYellow,
        "bright-blue" => Color::BrightBlue,
        "bright-magenta" => Color::BrightMagenta,
        "bright-cyan" => Color::BrightCyan,
        "bright-white" => Color::BrightWhite,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_tag_parsing() {
        assert_eq!(parse_style_tag("<cyan>"), Some(Color::Cyan));
        assert_eq!(parse_style_tag("<BRIGHT-RED>"), Some(Color::BrightRed));
        assert_eq!(parse_style_tag("red"), Some(Color::Red));
        assert_eq!(parse_style_tag("<sparkles>"), None);
    }

    #[test]
    fn test_write_does_not_fail() {
        let mut sink = ConsoleSink::new(FormatTemplate::default()).with_colors(false);
        let record = LogRecord::new("INFO", 20, "console smoke test");
        assert!(sink.write(&record).is_ok());
        assert!(sink.flush().is_ok());
    }
}
