use colored::Color;

use crate::domain::schema_diff::ARROW;

/// Colours used by [`colorize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub created: Color,
    pub updated: Color,
    pub deleted: Color,
    pub arrow: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            created: Color::Green,
            updated: Color::Yellow,
            deleted: Color::Red,
            arrow: Color::Cyan,
        }
    }
}

impl Palette {
    fn for_sigil(&self, line: &str) -> Option<Color> {
        match line.get(..2)? {
            "+ " => Some(self.created),
            "- " => Some(self.deleted),
            "~ " => Some(self.updated),
            _ => None,
        }
    }
}

/// Wrap `text` in the ANSI foreground sequence of `color`.
///
/// Escape codes are written unconditionally: whether to colour at all is the
/// caller's decision, not the terminal's.
pub fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
}

/// Colour a text report line by line.
///
/// * `+ `, `- `, `~ ` at column 0: the whole line.
/// * the same sigils behind a single-space indent: everything after it.
/// * any other line containing the arrow: only the arrow.
pub fn colorize(text: &str, palette: &Palette) -> String {
    text.split('\n')
        .map(|line| colorize_line(line, palette))
        .collect::<Vec<_>>()
        .join("\n")
}

fn colorize_line(line: &str, palette: &Palette) -> String {
    if let Some(color) = palette.for_sigil(line) {
        return paint(line, color);
    }

    if let Some(content) = line.strip_prefix(' ') {
        if let Some(color) = palette.for_sigil(content) {
            return format!(" {}", paint(content, color));
        }
    }

    if line.contains(ARROW) {
        return line.replace(ARROW, &paint(ARROW, palette.arrow));
    }

    line.to_string()
}
