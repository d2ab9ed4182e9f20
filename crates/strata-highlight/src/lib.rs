//! Syntax highlighting and terminal colors for strata.
//!
//! Highlights TOML and JSON output, and provides styled helpers for headers, status
//! messages, and per-level badges.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML and JSON.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme in use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON content.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content with the named syntax, falling back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, self.theme_set.get(self.theme));
        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success, and level 4 badges).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings, and level 3 badges).
    pub const YELLOW: &str = "\x1b[33m";
    /// Orange text (for level 2 badges).
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red text (for errors, and level 1 badges).
    pub const RED: &str = "\x1b[31m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reverse video (for the active node).
    pub const REVERSE: &str = "\x1b[7m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `style` and a reset.
fn paint(style: &str, text: &str) -> String {
    format!("{style}{text}{}", colors::RESET)
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    paint(&format!("{}{}", colors::BOLD, colors::CYAN), text)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Formats text as dimmed.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Formats text in reverse video.
pub fn reverse(text: &str) -> String {
    paint(colors::REVERSE, text)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Formats text as an error (red).
pub fn error(text: &str) -> String {
    paint(colors::RED, text)
}

/// Color used for a level badge: red, orange, yellow, green for levels 1 to 4.
pub fn level_color(level: u8) -> &'static str {
    match level {
        1 => colors::RED,
        2 => colors::ORANGE,
        3 => colors::YELLOW,
        4 => colors::GREEN,
        _ => colors::DIM,
    }
}

/// Formats a bold `L<n>` badge in the level's color.
pub fn level_badge(level: u8) -> String {
    paint(&format!("{}{}", colors::BOLD, level_color(level)), &format!("L{level}"))
}

/// Returns a dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlighter_toml() {
        let hl = Highlighter::new();
        let output = hl.highlight_toml("[picker]\ndepth = 4\n");
        assert!(output.contains("\x1b["));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn test_highlighter_json() {
        let hl = Highlighter::new();
        let output = hl.highlight_json("{\"id\": 1, \"name\": \"A\"}\n");
        assert!(output.contains("\x1b["));
        assert!(output.contains("name"));
    }

    #[test]
    fn test_unknown_syntax_falls_back() {
        let hl = Highlighter::new();
        let output = hl.highlight("plain words\n", "no-such-syntax");
        assert!(output.contains("plain words"));
    }

    #[test]
    fn test_header_formatting() {
        let h = header("Test");
        assert!(h.contains(colors::BOLD));
        assert!(h.contains(colors::CYAN));
        assert!(h.ends_with(colors::RESET));
        assert!(h.contains("Test"));
    }

    #[test]
    fn test_level_badges() {
        assert_eq!(level_color(1), colors::RED);
        assert_eq!(level_color(2), colors::ORANGE);
        assert_eq!(level_color(3), colors::YELLOW);
        assert_eq!(level_color(4), colors::GREEN);
        assert_eq!(level_color(7), colors::DIM);
        let badge = level_badge(2);
        assert!(badge.contains("L2"));
        assert!(badge.contains(colors::ORANGE));
    }

    #[test]
    fn test_syntaxes_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("toml").is_some());
        assert!(ss.find_syntax_by_extension("json").is_some());
    }
}
