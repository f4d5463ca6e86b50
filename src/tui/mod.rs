mod app;
mod help_text;
pub mod terminal_compat;
pub mod theme;
pub mod tree;
mod ui;
mod watcher;

pub use app::{App, AppMode, PendingDelete, TreeContent};
pub use terminal_compat::ColorMode;
pub use theme::ThemeName;
pub use tree::{RowKind, TreeRow, TreeView};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

/// Run the TUI application.
///
/// Draws, then waits briefly for a key. Between keys it applies finished
/// store requests and reloads when the bookmarks file changed on disk.
/// Returns when the user quits.
pub fn run(terminal: &mut DefaultTerminal, app: App) -> Result<()> {
    let mut app = app;

    let mut file_watcher = app
        .store()
        .watch_path()
        .filter(|_| app.live_reload())
        .map(|path| path.to_path_buf())
        .and_then(|path| {
            let mut watcher = watcher::FileWatcher::new().ok()?;
            match watcher.watch(&path) {
                Ok(()) => Some(watcher),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "live reload disabled");
                    None
                }
            }
        });

    app.load_and_render();

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll keeps store completions and file changes responsive
        if !event::poll(Duration::from_millis(100))? {
            app.pump_store_events();

            if let Some(ref mut watcher) = file_watcher {
                if app.suppress_file_watch {
                    // Our own write; drop the echo once the store is idle
                    if !app.is_loading() {
                        app.suppress_file_watch = false;
                        watcher.mark_reloaded();
                    }
                } else if watcher.check_for_changes() {
                    tracing::info!("bookmarks file changed on disk, reloading");
                    app.load_and_render();
                }
            }
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            // Resize just needs the redraw at the top of the loop
            _ => {}
        }
        app.pump_store_events();
    }
}
