use super::palette::Palette;
use ratatui::style::Color;

// Gruvbox dark (hard contrast background for the footer).
pub const GRUVBOX: Palette = Palette {
    bg: Color::Rgb(40, 40, 40),
    bg_deep: Color::Rgb(29, 32, 33),
    panel: Color::Rgb(60, 56, 54),
    panel_raised: Color::Rgb(80, 73, 69),
    border: Color::Rgb(102, 92, 84),
    fg: Color::Rgb(235, 219, 178),
    fg_muted: Color::Rgb(213, 196, 161),
    fg_faint: Color::Rgb(189, 174, 147),
    fg_ghost: Color::Rgb(146, 131, 116),
    accent: Color::Rgb(131, 165, 152),
    accent_soft: Color::Rgb(142, 192, 124),
    heading: Color::Rgb(254, 128, 25),
    user: Color::Rgb(184, 187, 38),
    assistant: Color::Rgb(211, 134, 155),
    warn: Color::Rgb(250, 189, 47),
    error: Color::Rgb(251, 73, 52),
};
