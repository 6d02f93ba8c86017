use crate::snapshot::{Mark, PointerColor};
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub accent: Color,    // Yellow
    pub pivot: Color,     // Pink
    pub active: Color,    // Cyan
    pub bar: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    accent: Color::Rgb(249, 226, 175),
    pivot: Color::Rgb(245, 194, 231),
    active: Color::Rgb(148, 226, 213),
    bar: Color::Rgb(88, 91, 112),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
};

impl Theme {
    /// Bar color for an index carrying `mark`, or the plain bar color
    pub fn mark_color(&self, mark: Option<Mark>) -> Color {
        match mark {
            None => self.bar,
            Some(Mark::Comparing) => self.accent,
            Some(Mark::Swapping) => self.error,
            Some(Mark::Sorted) | Some(Mark::Found) | Some(Mark::Match) => self.success,
            Some(Mark::Pivot) => self.pivot,
            Some(Mark::Current) | Some(Mark::Pattern) => self.primary,
            Some(Mark::Minimum) => self.secondary,
            Some(Mark::Mismatch) => self.error,
            Some(Mark::Eliminated) => self.current_line_bg,
            Some(Mark::Active) => self.active,
        }
    }

    pub fn pointer_color(&self, color: PointerColor) -> Color {
        match color {
            PointerColor::Primary => self.primary,
            PointerColor::Secondary => self.secondary,
            PointerColor::Accent => self.accent,
            PointerColor::Success => self.success,
            PointerColor::Danger => self.error,
        }
    }
}
