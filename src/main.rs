//! # bookmarktree
//!
//! A terminal bookmark manager for Chromium-family browsers.
//!
//! ## Usage
//!
//! Launch the interactive TUI on the detected browser profile:
//! ```sh
//! bookmarktree
//! ```
//!
//! Print matching bookmarks with their folder path:
//! ```sh
//! bookmarktree -l --filter rust
//! ```
//!
//! Show the whole tree:
//! ```sh
//! bookmarktree --tree
//! ```

mod cli;

use bookmarktree::bookmarks::{
    BookmarkNode, BookmarkStore, JsonFileStore, filter_tree, locate, normalize_query, output,
};
use bookmarktree::tui::ColorMode;
use bookmarktree::{App, Config};
use clap::{CommandFactory, Parser};
use cli::{Cli, ColorModeArg, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BOOKMARKTREE_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    if let Some(shell) = args.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "bookmarktree", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.log_file.as_deref())?;

    let mut config = Config::load();
    let path = resolve_bookmarks_path(&args, &config)?;
    tracing::info!(path = %path.display(), "using bookmarks file");
    let store = Arc::new(JsonFileStore::new(path));

    if args.is_print_mode() {
        return print_bookmarks(&args, store.as_ref());
    }

    // Apply theme override from CLI if provided
    if let Some(ref theme_name) = args.theme {
        config.ui.theme = theme_name.clone();
    }

    // Priority: CLI args > config file > auto-detection
    let color_mode = match args.color_mode {
        Some(ColorModeArg::Auto) => ColorMode::from_setting("auto"),
        Some(ColorModeArg::Rgb) => ColorMode::Rgb,
        Some(ColorModeArg::Color256) => ColorMode::Indexed256,
        None => ColorMode::from_setting(&config.terminal.color_mode),
    };

    let app = App::new(store, config, color_mode);

    let mut terminal = ratatui::try_init().wrap_err("failed to initialize the terminal")?;
    let result = bookmarktree::tui::run(&mut terminal, app);
    ratatui::restore();

    result
}

/// Install a file logger when asked for one.
///
/// The TUI owns stdout, so logs never go to the terminal. `--log-file` turns
/// logging on at `info`; otherwise `BOOKMARKTREE_LOG` both enables it and
/// sets the filter, writing to the cache directory.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let env_filter = std::env::var(LOG_ENV).ok();
    let path = match (log_file, &env_filter) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(_)) => {
            let dir = dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("bookmarktree");
            std::fs::create_dir_all(&dir)?;
            dir.join("bookmarktree.log")
        }
        (None, None) => return Ok(()),
    };

    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Bookmarks file from the command line, then config, then browser profiles
fn resolve_bookmarks_path(args: &Cli, config: &Config) -> Result<PathBuf> {
    if let Some(ref file) = args.file {
        return Ok(file.clone());
    }
    if let Some(ref path) = config.store.path {
        return Ok(path.clone());
    }
    locate::default_bookmarks_path().ok_or_else(|| {
        let searched: Vec<String> = locate::candidate_paths()
            .iter()
            .map(|p| format!("  {}", p.display()))
            .collect();
        eyre!(
            "no bookmarks file found; pass one as an argument or set store.path in the config\n\
             searched:\n{}",
            searched.join("\n")
        )
    })
}

fn print_bookmarks(args: &Cli, store: &dyn BookmarkStore) -> Result<()> {
    let tree = store
        .get_tree()
        .wrap_err_with(|| format!("failed to load {}", store.describe()))?;

    let query = args.filter.as_deref().map(normalize_query).unwrap_or_default();
    let nodes: Vec<BookmarkNode> = if query.is_empty() {
        tree.top_level().to_vec()
    } else {
        filter_tree(tree.top_level(), &query, &[])
    };

    if args.count {
        let count: usize = nodes.iter().map(BookmarkNode::bookmark_count).sum();
        println!("{}", count);
        return Ok(());
    }

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&nodes)?),
        OutputFormat::Plain if args.tree => print!("{}", output::render_box_tree(&nodes)),
        OutputFormat::Plain => {
            for line in output::list_lines(&nodes) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
