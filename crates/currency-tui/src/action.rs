//! Action enum — all user-initiated intents and internal events.

use currency_proto::Currency;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Picker that lists the whole catalog while the query is empty.
    BrowseAll,
    /// Picker that stays empty until the user types.
    TypeToSearch,
    SelectedList,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Selection ────────────────────────────────────────────────────────────
    /// Add the currency to the shared selection, or remove it if present.
    ToggleCurrency(Currency),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    /// Focus follows a click; unlike Tab it does not open a picker by itself.
    FocusPane(ComponentId),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
