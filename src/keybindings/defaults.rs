//! Default keybindings for bookmarktree
//!
//! Used when no user configuration is provided. Uses keybinds-rs key
//! string syntax.

use super::{Action, KeybindingMode, Keybindings};

/// Create the default keybindings configuration
pub fn default_keybindings() -> Keybindings {
    let mut kb = Keybindings::new();

    add_normal_mode(&mut kb);
    add_search_mode(&mut kb);
    add_confirm_delete_mode(&mut kb);
    add_alert_mode(&mut kb);
    add_help_mode(&mut kb);

    kb
}

/// Bind a key, panicking on invalid key syntax (only used for built-in defaults)
fn bind(kb: &mut Keybindings, mode: KeybindingMode, key: &str, action: Action) {
    kb.bind(mode, key, action)
        .unwrap_or_else(|e| panic!("Invalid default keybinding '{}': {}", key, e));
}

fn add_normal_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Normal;

    // Navigation
    bind(kb, Normal, "j", Next);
    bind(kb, Normal, "Down", Next);
    bind(kb, Normal, "k", Previous);
    bind(kb, Normal, "Up", Previous);
    bind(kb, Normal, "g", First);
    bind(kb, Normal, "Home", First);
    bind(kb, Normal, "G", Last);
    bind(kb, Normal, "End", Last);
    bind(kb, Normal, "Ctrl+d", PageDown);
    bind(kb, Normal, "PageDown", PageDown);
    bind(kb, Normal, "Ctrl+u", PageUp);
    bind(kb, Normal, "PageUp", PageUp);
    bind(kb, Normal, "p", JumpToParent);

    // Tree
    bind(kb, Normal, "Space", ToggleExpand);
    bind(kb, Normal, "h", Collapse);
    bind(kb, Normal, "Left", Collapse);
    bind(kb, Normal, "l", Expand);
    bind(kb, Normal, "Right", Expand);

    // Bookmarks
    bind(kb, Normal, "Enter", OpenBookmark);
    bind(kb, Normal, "o", OpenBookmark);
    bind(kb, Normal, "y", CopyUrl);
    bind(kb, Normal, "d", DeleteBookmark);
    bind(kb, Normal, "Delete", DeleteBookmark);
    bind(kb, Normal, "r", Refresh);
    bind(kb, Normal, "F5", Refresh);

    // Search
    bind(kb, Normal, "/", EnterSearchMode);
    bind(kb, Normal, "s", EnterSearchMode);
    bind(kb, Normal, "Ctrl+l", ClearSearch);

    // View
    bind(kb, Normal, "?", ToggleHelp);
    bind(kb, Normal, "t", CycleTheme);
    bind(kb, Normal, "u", ToggleUrls);

    // Application
    bind(kb, Normal, "q", Quit);
    bind(kb, Normal, "Ctrl+c", Quit);
}

fn add_search_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Search;

    // Leave the search bar, keep the query
    bind(kb, Search, "Escape", ExitMode);
    bind(kb, Search, "Enter", ExitMode);

    // Editing
    bind(kb, Search, "Backspace", SearchBackspace);
    bind(kb, Search, "Ctrl+u", ClearSearch);

    // Move through results while typing
    bind(kb, Search, "Down", Next);
    bind(kb, Search, "Up", Previous);

    bind(kb, Search, "Ctrl+c", Quit);
}

fn add_confirm_delete_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::ConfirmDelete;

    bind(kb, ConfirmDelete, "y", ConfirmAction);
    bind(kb, ConfirmDelete, "Y", ConfirmAction);
    bind(kb, ConfirmDelete, "Enter", ConfirmAction);
    bind(kb, ConfirmDelete, "n", CancelAction);
    bind(kb, ConfirmDelete, "N", CancelAction);
    bind(kb, ConfirmDelete, "Escape", CancelAction);
}

fn add_alert_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Alert;

    bind(kb, Alert, "Enter", ConfirmAction);
    bind(kb, Alert, "Escape", ConfirmAction);
    bind(kb, Alert, "Space", ConfirmAction);
}

fn add_help_mode(kb: &mut Keybindings) {
    use Action::*;
    use KeybindingMode::Help;

    bind(kb, Help, "j", HelpScrollDown);
    bind(kb, Help, "Down", HelpScrollDown);
    bind(kb, Help, "k", HelpScrollUp);
    bind(kb, Help, "Up", HelpScrollUp);

    // Close help
    bind(kb, Help, "?", ToggleHelp);
    bind(kb, Help, "Escape", ToggleHelp);

    bind(kb, Help, "q", Quit);
}
