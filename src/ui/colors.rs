use crate::error::SpinnerError;
use owo_colors::{AnsiColors, OwoColorize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Foreground color applied to an icon, message or prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    NoColor,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    HiBlack,
    HiRed,
    HiGreen,
    HiYellow,
    HiBlue,
    HiMagenta,
    HiCyan,
    HiWhite,
}

impl Color {
    pub const ALL: [Color; 17] = [
        Color::NoColor,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::HiBlack,
        Color::HiRed,
        Color::HiGreen,
        Color::HiYellow,
        Color::HiBlue,
        Color::HiMagenta,
        Color::HiCyan,
        Color::HiWhite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::NoColor => "no_color",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::HiBlack => "hi_black",
            Color::HiRed => "hi_red",
            Color::HiGreen => "hi_green",
            Color::HiYellow => "hi_yellow",
            Color::HiBlue => "hi_blue",
            Color::HiMagenta => "hi_magenta",
            Color::HiCyan => "hi_cyan",
            Color::HiWhite => "hi_white",
        }
    }

    fn ansi(self) -> Option<AnsiColors> {
        let ansi = match self {
            Color::NoColor => return None,
            Color::Black => AnsiColors::Black,
            Color::Red => AnsiColors::Red,
            Color::Green => AnsiColors::Green,
            Color::Yellow => AnsiColors::Yellow,
            Color::Blue => AnsiColors::Blue,
            Color::Magenta => AnsiColors::Magenta,
            Color::Cyan => AnsiColors::Cyan,
            Color::White => AnsiColors::White,
            Color::HiBlack => AnsiColors::BrightBlack,
            Color::HiRed => AnsiColors::BrightRed,
            Color::HiGreen => AnsiColors::BrightGreen,
            Color::HiYellow => AnsiColors::BrightYellow,
            Color::HiBlue => AnsiColors::BrightBlue,
            Color::HiMagenta => AnsiColors::BrightMagenta,
            Color::HiCyan => AnsiColors::BrightCyan,
            Color::HiWhite => AnsiColors::BrightWhite,
        };
        Some(ansi)
    }

    /// Wrap `text` in this color's escape sequence. `NoColor` returns it as-is.
    pub fn paint(self, text: &str) -> String {
        match self.ansi() {
            Some(ansi) => text.color(ansi).to_string(),
            None => text.to_string(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = SpinnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Color::ALL
            .into_iter()
            .find(|c| c.name() == normalized || (normalized == "none" && *c == Color::NoColor))
            .ok_or_else(|| SpinnerError::UnknownColor(s.to_string()))
    }
}
