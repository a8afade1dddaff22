use ratatui::style::Color;

/// Colors a theme needs, named by role rather than by the upstream
/// palette's own tier names. Every field is consumed by `Theme::from_palette`.
pub struct Palette {
    /// Main background behind the transcript and composer.
    pub bg: Color,
    /// Darkest shade: footer bar background and the foreground of filled
    /// segments (pill, status, selected rows).
    pub bg_deep: Color,
    /// Raised surface for header items and footer key caps.
    pub panel: Color,
    /// One step above `panel` (session segment).
    pub panel_raised: Color,
    /// Unfocused pane borders.
    pub border: Color,
    /// Body text.
    pub fg: Color,
    /// Secondary text (header stats).
    pub fg_muted: Color,
    /// Tertiary text (dropdown previews, footer hints).
    pub fg_faint: Color,
    /// Barely-there text (disabled hints).
    pub fg_ghost: Color,
    /// Focus borders, the pill, selected dropdown rows, slash triggers.
    pub accent: Color,
    /// Hover variant of `accent`.
    pub accent_soft: Color,
    /// Transcript title.
    pub heading: Color,
    /// The user speaker mark; doubles as the ready/active status color.
    pub user: Color,
    /// The assistant speaker mark.
    pub assistant: Color,
    pub warn: Color,
    pub error: Color,
}

/// Scale an RGB color toward black (`0.0` = black, `1.0` = unchanged).
/// Non-RGB variants pass through; these palettes only use RGB.
pub fn shade(c: Color, factor: f32) -> Color {
    if let Color::Rgb(r, g, b) = c {
        Color::Rgb(
            (f32::from(r) * factor) as u8,
            (f32::from(g) * factor) as u8,
            (f32::from(b) * factor) as u8,
        )
    } else {
        c
    }
}
