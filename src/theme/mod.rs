use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod glyphs;
pub mod gruvbox;
pub mod nord;
pub mod palette;

pub use palette::{shade, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub transcript_title: Style,
    pub speaker_user: Style,
    pub speaker_assistant: Style,
    pub message_body: Style,
    pub selection: Style,

    pub pill: Style,
    pub pill_hover: Style,
    pub dropdown_trigger: Style,
    pub dropdown_preview: Style,

    pub status_ready: Style,
    pub status_info: Style,
    pub status_warn: Style,
    pub status_error: Style,

    pub header_logo: Style,
    pub header_session: Style,
    pub header_stats: Style,
    pub header_active: Style,
    pub header_item: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer_group_name: Style,
    pub footer: Style,

    pub list_selected: Style,
    pub list_item: Style,
    pub dimmed: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    CatppuccinMocha,
    Nord,
    Gruvbox,
}

impl PaletteType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteType::CatppuccinMocha => "Catppuccin (Mocha)",
            PaletteType::Nord => "Nord",
            PaletteType::Gruvbox => "Gruvbox",
        }
    }

    #[must_use]
    pub fn all() -> &'static [PaletteType] {
        &[
            PaletteType::CatppuccinMocha,
            PaletteType::Nord,
            PaletteType::Gruvbox,
        ]
    }
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&catppuccin::CATPPUCCIN_MOCHA),
            PaletteType::Nord => Self::from_palette(&nord::NORD),
            PaletteType::Gruvbox => Self::from_palette(&gruvbox::GRUVBOX),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.border),
            border_focus: Style::default().fg(p.accent),

            transcript_title: Style::default().fg(p.heading).add_modifier(Modifier::BOLD),
            speaker_user: Style::default().fg(p.user).add_modifier(Modifier::BOLD),
            speaker_assistant: Style::default().fg(p.assistant).add_modifier(Modifier::BOLD),
            message_body: Style::default().fg(p.fg),
            selection: Style::default().fg(p.fg).bg(shade(p.accent, 0.35)),

            pill: Style::default()
                .bg(p.accent)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),
            pill_hover: Style::default()
                .bg(p.accent_soft)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),
            dropdown_trigger: Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            dropdown_preview: Style::default().fg(p.fg_faint),

            status_ready: Style::default()
                .bg(p.user)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),
            status_info: Style::default()
                .bg(p.accent)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),
            status_warn: Style::default()
                .bg(p.warn)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),
            status_error: Style::default()
                .bg(p.error)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),

            header_logo: Style::default()
                .bg(p.accent)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),
            header_session: Style::default()
                .bg(p.panel_raised)
                .fg(p.fg)
                .add_modifier(Modifier::BOLD),
            header_stats: Style::default().bg(p.panel).fg(p.fg_muted),
            header_active: Style::default()
                .bg(p.user)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().bg(p.panel).fg(p.fg),
            header: Style::default().bg(p.bg).fg(p.fg),

            footer_segment_key: Style::default()
                .bg(p.panel)
                .fg(p.accent)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().bg(p.bg).fg(p.fg),
            footer_group_name: Style::default().fg(p.fg_faint).add_modifier(Modifier::DIM),
            footer: Style::default().bg(p.bg_deep).fg(p.fg_faint),

            list_selected: Style::default()
                .bg(p.accent)
                .fg(p.bg_deep)
                .add_modifier(Modifier::BOLD),
            list_item: Style::default().fg(p.fg),
            dimmed: Style::default().fg(p.fg_ghost).add_modifier(Modifier::DIM),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::CatppuccinMocha)
    }
}
