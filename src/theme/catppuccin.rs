use super::palette::Palette;
use ratatui::style::Color;

// Catppuccin Mocha, mapped onto this app's color roles.
pub const CATPPUCCIN_MOCHA: Palette = Palette {
    bg: Color::Rgb(30, 30, 46),
    bg_deep: Color::Rgb(17, 17, 27),
    panel: Color::Rgb(49, 50, 68),
    panel_raised: Color::Rgb(69, 71, 90),
    border: Color::Rgb(88, 91, 112),
    fg: Color::Rgb(205, 214, 244),
    fg_muted: Color::Rgb(186, 194, 222),
    fg_faint: Color::Rgb(166, 173, 200),
    fg_ghost: Color::Rgb(108, 112, 134),
    accent: Color::Rgb(137, 180, 250),
    accent_soft: Color::Rgb(116, 199, 236),
    heading: Color::Rgb(180, 190, 254),
    user: Color::Rgb(166, 227, 161),
    assistant: Color::Rgb(203, 166, 247),
    warn: Color::Rgb(249, 226, 175),
    error: Color::Rgb(243, 139, 168),
};
