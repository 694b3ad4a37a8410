//! Action enum: every user intent and internal event that flows through the app.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    ChipBar,
    MediaList,
    Pager,
    NewsPanel,
    LogPanel,
    HelpOverlay,
}

/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Selection ────────────────────────────────────────────────────────────
    SelectFilter(String),
    Search(String),
    CycleSort,
    CycleSortReverse,
    GotoPage(usize),
    PrevPage,
    NextPage,
    /// Broadcast after the media view was recomputed.
    ViewChanged,

    // ── Entries ──────────────────────────────────────────────────────────────
    /// The highlighted entry in the media list changed (store index).
    HoverEntry(Option<usize>),
    ToggleEmbed(usize),
    Activate(usize),
    OpenUrl(String),
    CopyToClipboard(String),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),
    OpenFilter,
    CloseFilter,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    ToggleLogs,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Noop,
}
