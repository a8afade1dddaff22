use super::keymap::{KeyConfig, KeyMap};
use crate::domain::commands::CommandTable;
use crate::domain::coordinator::OverlayArbiter;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

pub mod composer;
pub mod error;
pub mod follow_up;
pub mod header;
pub mod slash_menu;
pub mod theme;
pub mod timers;
pub mod transcript;

// Re-exports
pub use composer::{AppTextArea, ComposerState};
pub use error::{NoticeSeverity, NoticeState};
pub use follow_up::{FollowUpPhase, FollowUpState, OverlayBox, PILL_LABEL};
pub use header::HeaderState;
pub use slash_menu::SlashMenuState;
pub use theme::ThemeSelectionState;
pub use timers::{TimerKind, TimerSlots};
pub use transcript::TranscriptState;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal,         // Browsing the transcript / composing
    Loading,        // Session load in flight
    Help,           // Keybinding overlay
    NoSession,      // Launched without a transcript file
    ThemeSelection, // Choosing a UI theme
}

/// Which pane receives plain key input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Panel {
    Transcript,
    Composer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<NoticeState>,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,
    pub active_tasks: Vec<String>,

    // --- Session ---
    pub session_path: Option<PathBuf>,

    // --- Panes ---
    pub transcript: TranscriptState,
    pub composer: ComposerState<'a>,
    pub focused_panel: Panel,

    // --- Overlays ---
    pub follow_up: FollowUpState,
    pub slash_menu: Option<SlashMenuState>,
    pub arbiter: OverlayArbiter,

    // --- Command templates ---
    pub commands: CommandTable,

    // --- Timers ---
    pub timers: TimerSlots,

    // --- Click Tracking ---
    pub last_click_time: Option<Instant>,
    pub last_click_pos: Option<(u16, u16)>,

    // --- Layout ---
    /// Last known terminal frame; geometry decisions in the reducer use
    /// this rather than querying the terminal.
    pub frame: Rect,

    // --- Derived/Cached ---
    pub header_state: HeaderState,
    pub spinner: String,
    pub frame_count: u64,

    // --- Theme Selection ---
    pub theme_selection: Option<ThemeSelectionState>,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub palette_type: crate::theme::PaletteType,
    pub theme: crate::theme::Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: KeyConfig) -> Self {
        Self {
            keymap: Arc::new(KeyMap::from_config(&config)),
            ..Default::default()
        }
    }

    /// True while any overlay owns screen space.
    #[must_use]
    pub fn any_overlay_shown(&self) -> bool {
        self.follow_up.is_shown() || self.slash_menu.is_some()
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            active_tasks: Vec::new(),
            session_path: None,
            transcript: TranscriptState::default(),
            composer: ComposerState::default(),
            focused_panel: Panel::Transcript,
            follow_up: FollowUpState::default(),
            slash_menu: None,
            arbiter: OverlayArbiter::default(),
            commands: CommandTable::default(),
            timers: TimerSlots::default(),
            last_click_time: None,
            last_click_pos: None,
            frame: Rect::new(0, 0, 80, 24),
            header_state: HeaderState::default(),
            spinner: "⠋".to_string(),
            frame_count: 0,
            theme_selection: None,
            keymap: Arc::new(KeyMap::from_config(&KeyConfig::default())),
            palette_type: crate::theme::PaletteType::CatppuccinMocha,
            theme: crate::theme::Theme::default(),
        }
    }
}
