use crate::app::command::Command;
use crate::app::state::TimerKind;
use crate::domain::commands::CommandTable;
use crate::domain::models::Conversation;
use crate::domain::transcript_layout::PointStep;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

/// What a pointer-down landed on, resolved by hit-testing in the input
/// mapper so the reducer can route clicks without re-querying layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    FollowUpPill,
    SlashRow(usize),
    Transcript,
    Composer,
    Chrome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,
    TimerElapsed(TimerKind), // A tracked deadline fired

    // --- Session Data ---
    SubmitDraft, // Send the composed prompt to the transcript

    // --- Pointer ---
    PointerDown {
        x: u16,
        y: u16,
        target: PointerTarget,
    },
    PointerDrag { x: u16, y: u16 },  // Left button held, selection follows
    PointerUp { x: u16, y: u16 },    // Gesture end, snapshot point
    PointerMoved { x: u16, y: u16 }, // No-button motion, drives hover

    // --- Transcript & Selection ---
    ScrollTranscript(isize),
    SelectWord { x: u16, y: u16 }, // Double-click word selection
    ExtendSelection(PointStep),    // Shift+arrow keyboard selection
    ClearSelection,

    // --- Follow-Up Overlay ---
    ActivateFollowUp, // Pill clicked: deliver citation to the composer

    // --- Composer ---
    FocusComposer,
    FocusTranscript,
    ComposerInput(crossterm::event::KeyEvent), // Raw key for the textarea

    // --- Slash Menu ---
    SlashSelectNext,
    SlashSelectPrev,
    SlashHover(usize),       // Hover moves the highlight
    SlashCommit,             // Enter/Tab commits the highlighted entry
    SlashCommitEntry(usize), // Click commits a specific row
    SlashClose,

    // --- UI Mode Transitions ---
    CancelMode, // ESC key (close modal / clear selection)
    ToggleHelp,
    EnterThemeSelection,
    SelectThemeNext,
    SelectThemePrev,
    SwitchTheme(crate::theme::PaletteType),

    // --- Async Results (The "Callback") ---
    SessionLoaded(Box<Conversation>), // Fresh transcript data arrived
    SessionLoadFailed(String),
    SessionFileChanged, // External change to the transcript file
    DraftSubmitted,
    CommandsLoaded(CommandTable),
    CommandsLoadFailed(String),
    CommandFileChanged, // External change to the command store
    OperationStarted(String),
    OperationCompleted(Result<String, String>), // Success/Failure message
}
