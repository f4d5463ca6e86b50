//! Action definitions for keybindings
//!
//! This module defines all bindable actions in bookmarktree.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// All bindable actions in bookmarktree
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "PascalCase")]
#[strum(serialize_all = "PascalCase")]
pub enum Action {
    // === Navigation ===
    /// Move to next visible row
    Next,
    /// Move to previous visible row
    Previous,
    /// Jump to first row
    First,
    /// Jump to last row
    Last,
    /// Move down by page
    PageDown,
    /// Move up by page
    PageUp,
    /// Jump to enclosing folder
    JumpToParent,

    // === Tree ===
    /// Expand selected folder
    Expand,
    /// Collapse selected folder (or its parent)
    Collapse,
    /// Toggle expand/collapse state
    ToggleExpand,

    // === Bookmark ===
    /// Open the selected bookmark in the browser
    OpenBookmark,
    /// Copy the selected bookmark URL
    CopyUrl,
    /// Delete the selected bookmark (asks first)
    DeleteBookmark,
    /// Re-fetch the tree from the store
    Refresh,

    // === Search ===
    /// Focus the search bar
    EnterSearchMode,
    /// Leave the current mode
    ExitMode,
    /// Delete last character in search
    SearchBackspace,
    /// Clear the whole query
    ClearSearch,

    // === View ===
    /// Toggle help popup
    ToggleHelp,
    /// Scroll help popup down
    HelpScrollDown,
    /// Scroll help popup up
    HelpScrollUp,
    /// Switch to the next theme
    CycleTheme,
    /// Show or hide bookmark URLs
    ToggleUrls,

    // === Dialog Actions ===
    /// Confirm action in dialog
    ConfirmAction,
    /// Cancel action in dialog
    CancelAction,

    // === Application ===
    /// Quit the application
    Quit,
}

impl Action {
    /// Get a human-readable description of the action
    pub fn description(&self) -> &'static str {
        match self {
            Action::Next => "Move to next item",
            Action::Previous => "Move to previous item",
            Action::First => "Jump to first item",
            Action::Last => "Jump to last item",
            Action::PageDown => "Page down",
            Action::PageUp => "Page up",
            Action::JumpToParent => "Jump to parent folder",

            Action::Expand => "Expand folder",
            Action::Collapse => "Collapse folder",
            Action::ToggleExpand => "Toggle expand/collapse",

            Action::OpenBookmark => "Open bookmark in browser",
            Action::CopyUrl => "Copy bookmark URL",
            Action::DeleteBookmark => "Delete bookmark",
            Action::Refresh => "Reload bookmarks",

            Action::EnterSearchMode => "Search bookmarks",
            Action::ExitMode => "Exit current mode",
            Action::SearchBackspace => "Delete character",
            Action::ClearSearch => "Clear search",

            Action::ToggleHelp => "Toggle help",
            Action::HelpScrollDown => "Scroll help down",
            Action::HelpScrollUp => "Scroll help up",
            Action::CycleTheme => "Next theme",
            Action::ToggleUrls => "Show/hide URLs",

            Action::ConfirmAction => "Confirm",
            Action::CancelAction => "Cancel",

            Action::Quit => "Quit",
        }
    }

    /// Get the category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::Next
            | Action::Previous
            | Action::First
            | Action::Last
            | Action::PageDown
            | Action::PageUp
            | Action::JumpToParent => "Navigation",

            Action::Expand | Action::Collapse | Action::ToggleExpand => "Tree",

            Action::OpenBookmark | Action::CopyUrl | Action::DeleteBookmark | Action::Refresh => {
                "Bookmarks"
            }

            Action::EnterSearchMode
            | Action::ExitMode
            | Action::SearchBackspace
            | Action::ClearSearch => "Search",

            Action::ToggleHelp
            | Action::HelpScrollDown
            | Action::HelpScrollUp
            | Action::CycleTheme
            | Action::ToggleUrls => "View",

            Action::ConfirmAction | Action::CancelAction => "Dialog",

            Action::Quit => "Application",
        }
    }
}
