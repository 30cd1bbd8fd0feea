use ratatui::style::Color;

use crate::step::SemanticColor;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub compare: Color,   // Yellow for elements under comparison
    pub swap: Color,      // Red/pink for elements being moved
    pub sorted: Color,    // Green for settled elements
    pub pivot: Color,     // Mauve for pivots and keys
    pub candidate: Color, // Teal for running best candidates
    pub range: Color,     // Dim surface tint for active sub-ranges
    pub muted: Color,     // Grey for de-emphasized elements
    pub accent: Color,    // Blue for index markers and titles
}

impl Theme {
    /// Resolve a semantic highlight role to a concrete color.
    pub fn semantic(&self, color: SemanticColor) -> Color {
        match color {
            SemanticColor::Compare => self.compare,
            SemanticColor::Swap => self.swap,
            SemanticColor::Sorted => self.sorted,
            SemanticColor::Pivot => self.pivot,
            SemanticColor::Candidate => self.candidate,
            SemanticColor::Range => self.range,
            SemanticColor::Muted => self.muted,
            SemanticColor::Accent => self.accent,
        }
    }
}

/// Catppuccin Mocha.
pub const DARK_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    compare: Color::Rgb(249, 226, 175),
    swap: Color::Rgb(243, 139, 168),
    sorted: Color::Rgb(166, 227, 161),
    pivot: Color::Rgb(203, 166, 247),
    candidate: Color::Rgb(148, 226, 213),
    range: Color::Rgb(88, 91, 112),
    muted: Color::Rgb(108, 112, 134),
    accent: Color::Rgb(137, 180, 250),
};

/// Catppuccin Latte.
pub const LIGHT_THEME: Theme = Theme {
    bg: Color::Rgb(239, 241, 245),
    fg: Color::Rgb(76, 79, 105),
    primary: Color::Rgb(30, 102, 245),   // Blue
    secondary: Color::Rgb(254, 100, 11), // Orange
    comment: Color::Rgb(156, 160, 176),
    border_focused: Color::Rgb(223, 142, 29), // Yellow border for focus
    border_normal: Color::Rgb(156, 160, 176), // Grey border for normal
    current_line_bg: Color::Rgb(220, 224, 232),
    compare: Color::Rgb(223, 142, 29),
    swap: Color::Rgb(210, 15, 57),
    sorted: Color::Rgb(64, 160, 43),
    pivot: Color::Rgb(136, 57, 239),
    candidate: Color::Rgb(23, 146, 153),
    range: Color::Rgb(188, 192, 204),
    muted: Color::Rgb(156, 160, 176),
    accent: Color::Rgb(30, 102, 245),
};
