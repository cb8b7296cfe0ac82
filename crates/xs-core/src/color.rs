//! Wheel colors and palettes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default palette, in assignment order
pub const DEFAULT_PALETTE: [&str; 12] = [
    "red", "orange", "yellow", "lime", "cyan", "blue", "purple", "magenta", "white", "pink",
    "green", "gold",
];

/// A wheel/player color, identified by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_ascii_lowercase())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Three-letter wheel label ("RED", "ORA", ...)
    pub fn short_label(&self) -> String {
        self.0.chars().take(3).collect::<String>().to_ascii_uppercase()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Ordered set of distinct colors available to a room or group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Color>);

impl Palette {
    /// Build a palette, dropping duplicate names (first occurrence wins)
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        let mut out: Vec<Color> = Vec::new();
        for color in colors {
            if !out.contains(&color) {
                out.push(color);
            }
        }
        Self(out)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Color> {
        self.0.get(index)
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// First `n` colors (fewer if the palette is shorter)
    pub fn take(&self, n: usize) -> Vec<Color> {
        self.0.iter().take(n).cloned().collect()
    }

    pub fn contains(&self, color: &Color) -> bool {
        self.0.contains(color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.iter().map(|&c| Color::new(c)))
    }
}
