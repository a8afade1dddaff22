use super::palette::Palette;
use ratatui::style::Color;

// Nord: polar night for surfaces, snow storm for text, frost for accents.
pub const NORD: Palette = Palette {
    bg: Color::Rgb(46, 52, 64),
    bg_deep: Color::Rgb(36, 41, 51),
    panel: Color::Rgb(59, 66, 82),
    panel_raised: Color::Rgb(67, 76, 94),
    border: Color::Rgb(76, 86, 106),
    fg: Color::Rgb(236, 239, 244),
    fg_muted: Color::Rgb(229, 233, 240),
    fg_faint: Color::Rgb(216, 222, 233),
    fg_ghost: Color::Rgb(97, 110, 136),
    accent: Color::Rgb(129, 161, 193),
    accent_soft: Color::Rgb(136, 192, 208),
    heading: Color::Rgb(143, 188, 187),
    user: Color::Rgb(163, 190, 140),
    assistant: Color::Rgb(180, 142, 173),
    warn: Color::Rgb(235, 203, 139),
    error: Color::Rgb(191, 97, 106),
};
