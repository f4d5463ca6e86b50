//! # bookmarktree
//!
//! A searchable, collapsible bookmark tree for the terminal.
//!
//! The library fetches a bookmark hierarchy from a [`BookmarkStore`], filters
//! it by a plain case-insensitive substring, highlights the matches, and
//! turns the result into display rows with expand/collapse state. The
//! interactive front end is built on ratatui.
//!
//! ## Features
//!
//! - Read and prune Chromium-format `Bookmarks` files
//! - Filter by title, URL or any enclosing folder name
//! - Highlight matches without disturbing the original casing
//! - Folder rows that expand and collapse, with collapse cascading downwards
//! - Interactive TUI with delete confirmation and live reload
//!
//! ## Example
//!
//! ```rust
//! use bookmarktree::bookmarks::{BookmarkNode, filter_tree, normalize_query};
//!
//! let nodes = vec![
//!     BookmarkNode::folder("1", "Work", vec![
//!         BookmarkNode::bookmark("2", "Email", "https://mail.example.com"),
//!     ]),
//!     BookmarkNode::bookmark("3", "News", "https://news.example.com"),
//! ];
//!
//! let query = normalize_query("  WO ");
//! let filtered = filter_tree(&nodes, &query, &[]);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].title(), Some("Work"));
//! ```

/// Bookmark tree model, search, highlighting and the host store boundary.
pub mod bookmarks;

/// Configuration module for persisting user preferences.
///
/// Provides configuration management for theme choices, UI settings, and the
/// bookmarks file location.
pub mod config;

/// Keybindings module for customizable keyboard shortcuts.
///
/// Provides a flexible keybinding system that allows users to customize
/// keyboard shortcuts via configuration files.
pub mod keybindings;

/// TUI module for the interactive terminal interface.
pub mod tui;

// Re-export commonly used types for convenience
pub use bookmarks::{BookmarkNode, BookmarkStore, BookmarkTree, JsonFileStore, StoreError};
pub use config::Config;
pub use tui::App;
