//! Terminal capabilities and the colours used for session messages

use owo_colors::{colors::css, OwoColorize};
use supports_color::Stream;

/// Below this many columns the vacation table drops its Type column.
const NARROW_COLUMNS: u16 = 60;

/// Whether stdout accepts colour
pub fn color_enabled() -> bool {
    supports_color::on_cached(Stream::Stdout).is_some()
}

/// Whether stdout is a terminal too narrow for the full table
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < NARROW_COLUMNS)
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if color_enabled() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Extension trait for styling session output
pub trait Styled {
    /// A vacation or employee was recorded (green)
    fn recorded(&self) -> String;
    /// A submission was rejected (amber)
    fn rejected(&self) -> String;
    /// Table headers and prompts (bold)
    fn heading(&self) -> String;
    /// Hints and empty states (dim)
    fn muted(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Styled for T {
    fn recorded(&self) -> String {
        paint(self.as_ref(), |text| text.fg::<css::Green>().to_string())
    }

    fn rejected(&self) -> String {
        paint(self.as_ref(), |text| text.fg::<css::Orange>().to_string())
    }

    fn heading(&self) -> String {
        paint(self.as_ref(), |text| text.bold().to_string())
    }

    fn muted(&self) -> String {
        paint(self.as_ref(), |text| text.dimmed().to_string())
    }
}
