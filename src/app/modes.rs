//! Input mode state machine.
//!
//! The mode decides which keybindings are live and where typed characters
//! go. Overlays (popover, sheet, delete dialog) each own a mode so the key
//! map never has to inspect screen state.
//!
//! ```text
//!            '/'                 'f'                Enter on facet
//! Search ◄─────── Normal ──────────────► Toolbar ─────────────► Popover
//!   │  Enter/Esc    ▲  │ 'n' 'e'   │ 'd'                           │
//!   └───────────────┘  ▼           ▼                               │ Esc
//!                    Sheet    ConfirmDelete           back to origin mode
//! ```
//!
//! # Example
//!
//! ```rust
//! use zentask::app::modes::InputMode;
//!
//! let mode = InputMode::Sheet;
//! assert!(mode.captures_text());
//! assert!(!InputMode::Normal.captures_text());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and single-key commands.
    ///
    /// Available keybindings: j/k (rows), h/l (pages), / (search), f (filters),
    /// c (columns), o (sort), r (reset), n (new), e (edit), d (delete),
    /// Tab or 1-8 (screens), t (theme), q (quit).
    #[default]
    Normal,

    /// Typing into the global search box of a table screen.
    Search,

    /// Moving between filter chips of the toolbar.
    Toolbar,

    /// A faceted, column or sort popover is open.
    Popover,

    /// A create or edit sheet holds the keyboard.
    Sheet,

    /// Editing one of the inline forms on Account or Settings.
    Form,

    /// The delete confirmation dialog is open.
    ConfirmDelete,
}

impl InputMode {
    /// Modes in which printable characters are text, not commands.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Search | Self::Popover | Self::Sheet | Self::Form)
    }
}
