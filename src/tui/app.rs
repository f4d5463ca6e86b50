use crate::bookmarks::{
    BookmarkStore, BookmarkTree, StoreClient, StoreEvent, filter_tree, normalize_query,
};
use crate::config::Config;
use crate::keybindings::{Action, KeybindingMode, Keybindings};
use crate::tui::help_text;
use crate::tui::terminal_compat::ColorMode;
use crate::tui::theme::{Theme, ThemeName};
use crate::tui::tree::{TreeRow, TreeView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const LOAD_FAILED: &str = "Failed to load bookmarks.";
pub const DELETE_FAILED: &str = "Failed to delete bookmark.";
pub const NO_RESULTS: &str = "No results found. Try a different keyword.";
pub const CONFIRM_DELETE: &str = "Delete this bookmark?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Search,
    ConfirmDelete,
    Alert,
    Help,
}

impl AppMode {
    pub(crate) fn keybinding_mode(self) -> KeybindingMode {
        match self {
            AppMode::Normal => KeybindingMode::Normal,
            AppMode::Search => KeybindingMode::Search,
            AppMode::ConfirmDelete => KeybindingMode::ConfirmDelete,
            AppMode::Alert => KeybindingMode::Alert,
            AppMode::Help => KeybindingMode::Help,
        }
    }
}

/// What the tree pane currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeContent {
    /// Nothing loaded yet
    Nothing,
    Rows(TreeView),
    /// A search matched nothing
    NoResults,
}

/// A bookmark waiting for the user to confirm its removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub label: String,
}

pub struct App {
    client: StoreClient,
    /// Last tree fetched from the store; replaced wholesale on every load
    tree_cache: Option<BookmarkTree>,
    content: TreeContent,
    /// Indices into the view's rows that are currently on screen
    visible: Vec<usize>,
    pub list_state: ListState,
    pub mode: AppMode,
    pub search_query: String,
    pub status_message: Option<String>,
    pub alert: Option<String>,
    pub pending_delete: Option<PendingDelete>,
    pub help_scroll: u16,
    /// Rows that fit in the tree pane, updated on every draw
    pub viewport_height: usize,
    pub show_urls: bool,
    pub search_enabled: bool,
    pub current_theme: ThemeName,
    pub theme: Theme,
    pub keybindings: Keybindings,
    /// Set after our own write so the file watcher skips the echo
    pub suppress_file_watch: bool,
    pub should_quit: bool,

    // Created on first copy; on Linux the instance must stay alive to serve paste requests
    clipboard: Option<arboard::Clipboard>,

    config: Config,
    color_mode: ColorMode,
}

impl App {
    pub fn new(store: Arc<dyn BookmarkStore>, config: Config, color_mode: ColorMode) -> Self {
        // Load theme from config, apply color mode, then apply custom colors
        let current_theme = config.theme_name();
        let theme = Theme::from_name(current_theme)
            .with_color_mode(color_mode)
            .with_custom_colors(&config.theme, color_mode);

        Self {
            client: StoreClient::new(store),
            tree_cache: None,
            content: TreeContent::Nothing,
            visible: Vec::new(),
            list_state: ListState::default(),
            mode: AppMode::Normal,
            search_query: String::new(),
            status_message: None,
            alert: None,
            pending_delete: None,
            help_scroll: 0,
            viewport_height: 20,
            show_urls: config.ui.show_urls,
            search_enabled: config.ui.search_enabled,
            current_theme,
            theme,
            keybindings: config.keybindings(),
            suppress_file_watch: false,
            should_quit: false,
            clipboard: None,
            config,
            color_mode,
        }
    }

    /// Human-readable name of the bookmark source
    pub fn source(&self) -> String {
        self.client.store().describe()
    }

    pub fn store(&self) -> &Arc<dyn BookmarkStore> {
        self.client.store()
    }

    pub fn content(&self) -> &TreeContent {
        &self.content
    }

    pub fn tree_view(&self) -> Option<&TreeView> {
        match &self.content {
            TreeContent::Rows(view) => Some(view),
            _ => None,
        }
    }

    /// Rows in display order
    pub fn visible_rows(&self) -> Vec<&TreeRow> {
        let Some(view) = self.tree_view() else {
            return Vec::new();
        };
        self.visible.iter().filter_map(|&i| view.row(i)).collect()
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        let view = self.tree_view()?;
        let index = *self.visible.get(self.list_state.selected()?)?;
        view.row(index)
    }

    /// Whether external changes to the bookmarks file should trigger a reload
    pub fn live_reload(&self) -> bool {
        self.config.store.watch
    }

    pub fn is_loading(&self) -> bool {
        self.client.in_flight() > 0
    }

    pub fn bookmark_count(&self) -> usize {
        self.tree_cache.as_ref().map_or(0, BookmarkTree::bookmark_count)
    }

    // ---- Loading -------------------------------------------------------

    /// Ask the store for the full tree. The result arrives as a store event.
    pub fn load_and_render(&mut self) {
        tracing::debug!("requesting bookmark tree");
        self.client.fetch_tree();
    }

    /// Apply every store completion that is ready. Returns true if any was handled.
    pub fn pump_store_events(&mut self) -> bool {
        let mut handled = false;
        while let Some(event) = self.client.try_next() {
            self.handle_store_event(event);
            handled = true;
        }
        handled
    }

    /// Block until all outstanding store requests (including reloads they
    /// trigger) completed or `timeout` passed.
    pub fn wait_for_store(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while self.client.in_flight() > 0 {
            match self.client.next_before(deadline) {
                Some(event) => self.handle_store_event(event),
                None => break,
            }
        }
    }

    pub fn handle_store_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::TreeLoaded(Ok(tree)) => {
                tracing::debug!(bookmarks = tree.bookmark_count(), "bookmark tree loaded");
                self.tree_cache = Some(tree);
                self.render_for_query();
            }
            StoreEvent::TreeLoaded(Err(e)) => {
                tracing::error!(error = %e, "failed to load bookmarks");
                self.status_message = Some(LOAD_FAILED.to_string());
            }
            StoreEvent::Removed { id, result: Ok(()) } => {
                tracing::info!(%id, "bookmark removed");
                self.suppress_file_watch = true;
                self.load_and_render();
            }
            StoreEvent::Removed { id, result: Err(e) } => {
                tracing::error!(%id, error = %e, "failed to delete bookmark");
                self.status_message = Some(DELETE_FAILED.to_string());
                self.alert = Some(DELETE_FAILED.to_string());
                self.mode = AppMode::Alert;
                self.keybindings.reset_sequences();
            }
        }
    }

    /// Rebuild the tree pane from the cached tree and the current query.
    ///
    /// An empty query shows everything with only top-level folders open; a
    /// non-empty one shows the filtered tree fully expanded. Does nothing
    /// until a tree has loaded, so a load failure stays reported.
    pub fn render_for_query(&mut self) {
        let Some(tree) = &self.tree_cache else {
            return;
        };
        self.status_message = None;

        let selected_id = self.selected_row().map(|row| row.id.clone());
        let query = if self.search_enabled {
            normalize_query(&self.search_query)
        } else {
            String::new()
        };

        self.content = if query.is_empty() {
            TreeContent::Rows(TreeView::render(tree.top_level(), false, ""))
        } else {
            let filtered = filter_tree(tree.top_level(), &query, &[]);
            if filtered.is_empty() {
                TreeContent::NoResults
            } else {
                TreeContent::Rows(TreeView::render(&filtered, true, &query))
            }
        };

        self.refresh_visible(selected_id.as_deref());
    }

    /// Recompute visible rows and put the selection back on `keep_id`, or the
    /// nearest visible ancestor of it, or the first row.
    fn refresh_visible(&mut self, keep_id: Option<&str>) {
        let previous = self.list_state.selected();
        let Some(view) = self.tree_view() else {
            self.visible.clear();
            self.list_state.select(None);
            return;
        };
        let visible = view.visible_rows();

        let mut target = keep_id.and_then(|id| view.position(id));
        while let Some(index) = target {
            if visible.contains(&index) {
                break;
            }
            target = view.row(index).and_then(|row| row.parent);
        }

        let selection = match target.and_then(|index| visible.iter().position(|&v| v == index)) {
            Some(position) => Some(position),
            None if visible.is_empty() => None,
            None => Some(previous.unwrap_or(0).min(visible.len() - 1)),
        };

        self.visible = visible;
        self.list_state.select(selection);
    }

    // ---- Navigation ----------------------------------------------------

    fn select_position(&mut self, position: usize) {
        if self.visible.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state
                .select(Some(position.min(self.visible.len() - 1)));
        }
    }

    pub fn next(&mut self) {
        let position = self.list_state.selected().map_or(0, |i| i + 1);
        self.select_position(position);
    }

    pub fn previous(&mut self) {
        let position = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.select_position(position);
    }

    pub fn first(&mut self) {
        self.select_position(0);
    }

    pub fn last(&mut self) {
        self.select_position(self.visible.len().saturating_sub(1));
    }

    pub fn page_down(&mut self) {
        let step = self.viewport_height.max(1);
        let position = self.list_state.selected().map_or(0, |i| i + step);
        self.select_position(position);
    }

    pub fn page_up(&mut self) {
        let step = self.viewport_height.max(1);
        let position = self.list_state.selected().map_or(0, |i| i.saturating_sub(step));
        self.select_position(position);
    }

    /// Select a visible row by node id
    pub fn select_by_id(&mut self, id: &str) -> bool {
        let Some(index) = self.tree_view().and_then(|view| view.position(id)) else {
            return false;
        };
        match self.visible.iter().position(|&v| v == index) {
            Some(position) => {
                self.list_state.select(Some(position));
                true
            }
            None => false,
        }
    }

    pub fn jump_to_parent(&mut self) {
        let Some(parent) = self.selected_row().and_then(|row| row.parent) else {
            return;
        };
        if let Some(position) = self.visible.iter().position(|&v| v == parent) {
            self.list_state.select(Some(position));
        }
    }

    // ---- Expand / collapse ---------------------------------------------

    fn with_selected_folder(&mut self, f: impl FnOnce(&mut TreeView, &str) -> bool) {
        let Some(id) = self
            .selected_row()
            .filter(|row| row.is_folder())
            .map(|row| row.id.clone())
        else {
            return;
        };
        let TreeContent::Rows(view) = &mut self.content else {
            return;
        };
        if f(view, &id) {
            self.refresh_visible(Some(&id));
        }
    }

    pub fn toggle_expand(&mut self) {
        self.with_selected_folder(|view, id| view.toggle(id));
    }

    pub fn expand(&mut self) {
        self.with_selected_folder(|view, id| view.expand(id));
    }

    /// Collapse the selected folder, or move to the parent when there is
    /// nothing to collapse.
    pub fn collapse(&mut self) {
        let collapsible = self.selected_row().is_some_and(|row| {
            row.is_folder() && self.tree_view().is_some_and(|view| view.is_expanded(&row.id))
        });
        if collapsible {
            self.with_selected_folder(|view, id| view.collapse(id));
        } else {
            self.jump_to_parent();
        }
    }

    // ---- Search --------------------------------------------------------

    pub fn enter_search_mode(&mut self) {
        if self.search_enabled {
            self.set_mode(AppMode::Search);
        }
    }

    pub fn search_input(&mut self, c: char) {
        self.search_query.push(c);
        self.render_for_query();
    }

    pub fn search_backspace(&mut self) {
        if self.search_query.pop().is_some() {
            self.render_for_query();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.search_query.is_empty() {
            self.search_query.clear();
            self.render_for_query();
        }
    }

    // ---- Delete --------------------------------------------------------

    /// Ask to delete the selected bookmark. Folders cannot be deleted here.
    pub fn request_delete(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if row.is_folder() {
            self.status_message = Some("Only bookmarks can be deleted".to_string());
            return;
        }

        self.pending_delete = Some(PendingDelete {
            id: row.id.clone(),
            label: row.label_text(),
        });
        if self.config.ui.confirm_delete {
            self.set_mode(AppMode::ConfirmDelete);
        } else {
            self.confirm_delete();
        }
    }

    pub fn confirm_delete(&mut self) {
        self.set_mode(AppMode::Normal);
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        tracing::info!(id = %pending.id, label = %pending.label, "deleting bookmark");
        self.client.remove(pending.id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.set_mode(AppMode::Normal);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.set_mode(AppMode::Normal);
    }

    // ---- Bookmark actions ----------------------------------------------

    /// Open the selected bookmark in the system browser; folders toggle instead.
    pub fn open_selected(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let Some(url) = row.url().map(str::to_string) else {
            self.toggle_expand();
            return;
        };

        match open::that_detached(&url) {
            Ok(()) => self.status_message = Some(format!("✓ Opened {}", url)),
            Err(e) => {
                tracing::warn!(%url, error = %e, "failed to open bookmark");
                self.status_message = Some(format!("✗ Failed to open: {}", e));
            }
        }
    }

    pub fn copy_url(&mut self) {
        let Some(url) = self.selected_row().and_then(|row| row.url()).map(str::to_string) else {
            return;
        };

        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    self.status_message = Some(format!("✗ Clipboard error: {}", e));
                    return;
                }
            }
        }
        if let Some(clipboard) = &mut self.clipboard {
            self.status_message = Some(match clipboard.set_text(url) {
                Ok(()) => "✓ URL copied to clipboard".to_string(),
                Err(e) => format!("✗ Clipboard error: {}", e),
            });
        }
    }

    // ---- View ----------------------------------------------------------

    pub fn toggle_help(&mut self) {
        self.help_scroll = 0;
        if self.mode == AppMode::Help {
            self.set_mode(AppMode::Normal);
        } else {
            self.set_mode(AppMode::Help);
        }
    }

    /// Scroll one line, stopping with the last help line at the top.
    pub fn scroll_help_down(&mut self) {
        let last = help_text::help_lines(&self.keybindings).len().saturating_sub(1);
        let last = u16::try_from(last).unwrap_or(u16::MAX);
        self.help_scroll = self.help_scroll.saturating_add(1).min(last);
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn toggle_urls(&mut self) {
        self.show_urls = !self.show_urls;
    }

    pub fn cycle_theme(&mut self) {
        let new_theme = self.current_theme.next();
        self.current_theme = new_theme;
        self.theme = Theme::from_name(new_theme)
            .with_color_mode(self.color_mode)
            .with_custom_colors(&self.config.theme, self.color_mode);
        self.status_message = Some(format!("Theme: {}", new_theme));

        // Save to config (silently ignore errors)
        let _ = self.config.set_theme(new_theme);
    }

    fn set_mode(&mut self, mode: AppMode) {
        if self.mode != mode {
            self.mode = mode;
            self.keybindings.reset_sequences();
        }
    }

    // ---- Input ---------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        let mode = self.mode.keybinding_mode();
        if let Some(action) = self.keybindings.dispatch(mode, key) {
            self.handle_action(action);
            return;
        }

        // Unbound printable keys type into the search bar
        if self.mode == AppMode::Search
            && let KeyCode::Char(c) = key.code
            && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            self.search_input(c);
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Next => self.next(),
            Action::Previous => self.previous(),
            Action::First => self.first(),
            Action::Last => self.last(),
            Action::PageDown => self.page_down(),
            Action::PageUp => self.page_up(),
            Action::JumpToParent => self.jump_to_parent(),
            Action::Expand => self.expand(),
            Action::Collapse => self.collapse(),
            Action::ToggleExpand => self.toggle_expand(),
            Action::OpenBookmark => self.open_selected(),
            Action::CopyUrl => self.copy_url(),
            Action::DeleteBookmark => self.request_delete(),
            Action::Refresh => self.load_and_render(),
            Action::EnterSearchMode => self.enter_search_mode(),
            Action::ExitMode => self.set_mode(AppMode::Normal),
            Action::SearchBackspace => self.search_backspace(),
            Action::ClearSearch => self.clear_search(),
            Action::ToggleHelp => self.toggle_help(),
            Action::HelpScrollDown => self.scroll_help_down(),
            Action::HelpScrollUp => self.scroll_help_up(),
            Action::CycleTheme => self.cycle_theme(),
            Action::ToggleUrls => self.toggle_urls(),
            Action::ConfirmAction => match self.mode {
                AppMode::ConfirmDelete => self.confirm_delete(),
                AppMode::Alert => self.dismiss_alert(),
                _ => {}
            },
            Action::CancelAction => match self.mode {
                AppMode::ConfirmDelete => self.cancel_delete(),
                AppMode::Alert => self.dismiss_alert(),
                _ => {}
            },
            Action::Quit => self.should_quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmarks::{BookmarkNode, MemoryStore};
    use crossterm::event::{KeyEventKind, KeyEventState};
    use tracing_test::traced_test;

    const WAIT: Duration = Duration::from_secs(5);

    /// Bar > [Work > [Email], News], Other > []
    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new(BookmarkTree::from_top_level(vec![
            BookmarkNode::folder(
                "1",
                "Bar",
                vec![
                    BookmarkNode::folder(
                        "2",
                        "Work",
                        vec![BookmarkNode::bookmark("3", "Email", "https://mail.example.com")],
                    ),
                    BookmarkNode::bookmark("4", "News", "https://news.example.com"),
                ],
            ),
            BookmarkNode::folder("5", "Other", vec![]),
        ])))
    }

    fn loaded_app(store: &Arc<MemoryStore>) -> App {
        let mut app = App::new(store.clone(), Config::default(), ColorMode::Rgb);
        app.load_and_render();
        app.wait_for_store(WAIT);
        app
    }

    fn visible_ids(app: &App) -> Vec<String> {
        app.visible_rows().iter().map(|row| row.id.clone()).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_query(app: &mut App, text: &str) {
        app.enter_search_mode();
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_initial_load_expands_top_level_only() {
        let store = store();
        let app = loaded_app(&store);

        assert_eq!(visible_ids(&app), vec!["1", "2", "4", "5"]);
        assert_eq!(app.selected_row().map(|r| r.id.as_str()), Some("1"));
        assert_eq!(app.bookmark_count(), 2);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_search_keeps_ancestors_and_expands() {
        let store = store();
        let mut app = loaded_app(&store);

        type_query(&mut app, "wo");
        // Work matches by folder name, so its bookmark comes along; News does not
        assert_eq!(visible_ids(&app), vec!["1", "2", "3"]);

        let work = &app.visible_rows()[1];
        assert!(work.label.iter().any(|s| s.is_match() && s.text == "Wo"));
    }

    #[test]
    fn test_search_by_title() {
        let store = store();
        let mut app = loaded_app(&store);

        type_query(&mut app, "mail");
        assert_eq!(visible_ids(&app), vec!["1", "2", "3"]);
        assert_eq!(app.mode, AppMode::Search);
    }

    #[test]
    fn test_search_without_matches_shows_placeholder() {
        let store = store();
        let mut app = loaded_app(&store);

        type_query(&mut app, "zzz");
        assert_eq!(app.content(), &TreeContent::NoResults);
        assert!(app.visible_rows().is_empty());
        assert!(app.selected_row().is_none());
    }

    #[test]
    fn test_clearing_query_restores_default_expansion() {
        let store = store();
        let mut app = loaded_app(&store);

        type_query(&mut app, "mail");
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_row().map(|r| r.id.as_str()), Some("3"));

        for _ in 0..4 {
            app.handle_key(key(KeyCode::Backspace));
        }
        assert!(app.search_query.is_empty());
        assert_eq!(visible_ids(&app), vec!["1", "2", "4", "5"]);
        // Email is hidden again, selection falls back to its folder
        assert_eq!(app.selected_row().map(|r| r.id.as_str()), Some("2"));
    }

    #[test]
    fn test_whitespace_query_is_unfiltered() {
        let store = store();
        let mut app = loaded_app(&store);

        type_query(&mut app, "   ");
        assert_eq!(visible_ids(&app), vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn test_search_disabled_ignores_query() {
        let store = store();
        let mut config = Config::default();
        config.ui.search_enabled = false;
        let mut app = App::new(store.clone(), config, ColorMode::Rgb);
        app.load_and_render();
        app.wait_for_store(WAIT);

        app.enter_search_mode();
        assert_eq!(app.mode, AppMode::Normal);
        app.search_query = "mail".to_string();
        app.render_for_query();
        assert_eq!(visible_ids(&app), vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn test_collapse_cascades_through_app() {
        let store = store();
        let mut app = loaded_app(&store);

        assert!(app.select_by_id("2"));
        app.toggle_expand();
        assert_eq!(visible_ids(&app), vec!["1", "2", "3", "4", "5"]);

        assert!(app.select_by_id("1"));
        app.collapse();
        assert_eq!(visible_ids(&app), vec!["1", "5"]);

        app.expand();
        // Work was collapsed along with Bar
        assert_eq!(visible_ids(&app), vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn test_collapse_on_bookmark_jumps_to_parent() {
        let store = store();
        let mut app = loaded_app(&store);

        assert!(app.select_by_id("4"));
        app.collapse();
        assert_eq!(app.selected_row().map(|r| r.id.as_str()), Some("1"));
    }

    #[test]
    fn test_navigation_clamps() {
        let store = store();
        let mut app = loaded_app(&store);

        app.previous();
        assert_eq!(app.list_state.selected(), Some(0));
        app.last();
        assert_eq!(app.list_state.selected(), Some(3));
        app.next();
        assert_eq!(app.list_state.selected(), Some(3));
        app.page_up();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_delete_success_reloads() {
        let store = store();
        let mut app = loaded_app(&store);
        assert_eq!(store.loads(), 1);

        assert!(app.select_by_id("4"));
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.mode, AppMode::ConfirmDelete);
        assert_eq!(app.pending_delete.as_ref().map(|p| p.label.as_str()), Some("News"));

        app.handle_key(key(KeyCode::Char('y')));
        app.wait_for_store(WAIT);

        assert_eq!(store.loads(), 2);
        assert_eq!(visible_ids(&app), vec!["1", "2", "5"]);
        assert!(app.status_message.is_none());
        assert!(app.suppress_file_watch);
    }

    #[test]
    fn test_delete_failure_keeps_render() {
        let store = store();
        let mut app = loaded_app(&store);
        store.set_fail_removes(true);

        assert!(app.select_by_id("4"));
        app.request_delete();
        app.confirm_delete();
        app.wait_for_store(WAIT);

        assert_eq!(app.status_message.as_deref(), Some(DELETE_FAILED));
        assert_eq!(app.alert.as_deref(), Some(DELETE_FAILED));
        assert_eq!(app.mode, AppMode::Alert);
        assert_eq!(store.loads(), 1);
        assert!(visible_ids(&app).contains(&"4".to_string()));
        // Nothing was written, so external changes must still trigger reloads
        assert!(!app.suppress_file_watch);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_cancel_delete() {
        let store = store();
        let mut app = loaded_app(&store);

        assert!(app.select_by_id("4"));
        app.request_delete();
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.pending_delete.is_none());
        assert_eq!(app.client.in_flight(), 0);
    }

    #[test]
    fn test_folders_are_not_deletable() {
        let store = store();
        let mut app = loaded_app(&store);

        assert!(app.select_by_id("2"));
        app.request_delete();
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.pending_delete.is_none());
    }

    #[test]
    fn test_two_deletes_each_reload() {
        let store = store();
        let mut app = loaded_app(&store);

        assert!(app.select_by_id("4"));
        app.request_delete();
        app.confirm_delete();
        assert!(app.select_by_id("2"));
        app.toggle_expand();
        assert!(app.select_by_id("3"));
        app.request_delete();
        app.confirm_delete();
        app.wait_for_store(WAIT);
        assert_eq!(store.loads(), 3);

        // Reload completions may arrive in any order; settle on a fresh one
        app.load_and_render();
        app.wait_for_store(WAIT);
        assert_eq!(visible_ids(&app), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_load_failure_keeps_previous_render() {
        let store = store();
        let mut app = loaded_app(&store);
        let before = visible_ids(&app);

        store.set_fail_loads(true);
        app.handle_action(Action::Refresh);
        app.wait_for_store(WAIT);

        assert_eq!(app.status_message.as_deref(), Some(LOAD_FAILED));
        assert_eq!(visible_ids(&app), before);
    }

    #[test]
    fn test_search_after_load_failure_keeps_status() {
        let store = store();
        store.set_fail_loads(true);
        let mut app = App::new(store.clone(), Config::default(), ColorMode::Rgb);
        app.load_and_render();
        app.wait_for_store(WAIT);

        app.enter_search_mode();
        app.search_input('n');

        assert_eq!(app.search_query, "n");
        assert_eq!(app.status_message.as_deref(), Some(LOAD_FAILED));
        assert_eq!(app.content(), &TreeContent::Nothing);
        assert!(app.visible_rows().is_empty());
    }

    #[test]
    #[traced_test]
    fn test_initial_load_failure_is_logged() {
        let store = store();
        store.set_fail_loads(true);
        let mut app = App::new(store.clone(), Config::default(), ColorMode::Rgb);
        app.load_and_render();
        app.wait_for_store(WAIT);

        assert_eq!(app.content(), &TreeContent::Nothing);
        assert_eq!(app.status_message.as_deref(), Some(LOAD_FAILED));
        assert!(logs_contain("failed to load bookmarks"));
    }

    #[test]
    fn test_help_mode_round_trip() {
        let store = store();
        let mut app = loaded_app(&store);

        app.handle_key(key(KeyCode::Char('?')));
        assert_eq!(app.mode, AppMode::Help);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.help_scroll, 1);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn test_help_scroll_stops_at_last_line() {
        let store = store();
        let mut app = loaded_app(&store);
        let last = help_text::help_lines(&app.keybindings).len() as u16 - 1;

        app.toggle_help();
        for _ in 0..last + 20 {
            app.scroll_help_down();
        }
        assert_eq!(app.help_scroll, last);

        app.scroll_help_up();
        assert_eq!(app.help_scroll, last - 1);
    }

    #[test]
    fn test_quit_key() {
        let store = store();
        let mut app = loaded_app(&store);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
