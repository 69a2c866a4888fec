//! Named glyph tables for the shared animation.
//!
//! Each animation carries the frame interval it was designed for. The
//! manager only picks that interval up through `with_animation`; a plain
//! character map keeps whatever frame duration is configured.

use crate::error::SpinnerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Animation {
    #[default]
    Dots,
    Dots2,
    Line,
    Pipe,
    SimpleDots,
    Star,
    Arc,
    CircleHalves,
    Arrow,
    Point,
    BouncingBall,
}

impl Animation {
    pub const ALL: [Animation; 11] = [
        Animation::Dots,
        Animation::Dots2,
        Animation::Line,
        Animation::Pipe,
        Animation::SimpleDots,
        Animation::Star,
        Animation::Arc,
        Animation::CircleHalves,
        Animation::Arrow,
        Animation::Point,
        Animation::BouncingBall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Animation::Dots => "dots",
            Animation::Dots2 => "dots2",
            Animation::Line => "line",
            Animation::Pipe => "pipe",
            Animation::SimpleDots => "simple_dots",
            Animation::Star => "star",
            Animation::Arc => "arc",
            Animation::CircleHalves => "circle_halves",
            Animation::Arrow => "arrow",
            Animation::Point => "point",
            Animation::BouncingBall => "bouncing_ball",
        }
    }

    pub fn frames(self) -> &'static [&'static str] {
        match self {
            Animation::Dots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            Animation::Dots2 => &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
            Animation::Line => &["-", "\\", "|", "/"],
            Animation::Pipe => &["┤", "┘", "┴", "└", "├", "┌", "┬", "┐"],
            Animation::SimpleDots => &[".  ", ".. ", "...", "   "],
            Animation::Star => &["✶", "✸", "✹", "✺", "✹", "✷"],
            Animation::Arc => &["◜", "◠", "◝", "◞", "◡", "◟"],
            Animation::CircleHalves => &["◐", "◓", "◑", "◒"],
            Animation::Arrow => &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
            Animation::Point => &["∙∙∙", "●∙∙", "∙●∙", "∙∙●", "∙∙∙"],
            Animation::BouncingBall => &[
                "( ●    )",
                "(  ●   )",
                "(   ●  )",
                "(    ● )",
                "(     ●)",
                "(    ● )",
                "(   ●  )",
                "(  ●   )",
                "( ●    )",
                "(●     )",
            ],
        }
    }

    /// Interval the frames were drawn for.
    pub fn interval(self) -> Duration {
        let millis = match self {
            Animation::Dots | Animation::Dots2 => 80,
            Animation::Line => 130,
            Animation::Pipe | Animation::Arc | Animation::Arrow => 100,
            Animation::SimpleDots => 400,
            Animation::Star => 70,
            Animation::CircleHalves => 50,
            Animation::Point => 125,
            Animation::BouncingBall => 80,
        };
        Duration::from_millis(millis)
    }

    pub fn char_map(self) -> Vec<String> {
        self.frames().iter().map(|f| f.to_string()).collect()
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Animation {
    type Err = SpinnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Animation::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| SpinnerError::UnknownAnimation(s.to_string()))
    }
}
