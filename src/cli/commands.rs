use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookmarktree")]
#[command(version)]
#[command(about = "Browse, search and prune browser bookmarks as a tree")]
#[command(
    long_about = "bookmarktree - A terminal bookmark manager for Chromium-family browsers.\n\n\
    Launch without flags for the interactive tree: folders expand and collapse,\n\
    search filters by title, URL or folder name, and bookmarks can be opened,\n\
    copied or deleted. Use flags to print the tree for scripts.\n\n\
    Examples:\n  \
    bookmarktree                          # Interactive TUI on the detected profile\n  \
    bookmarktree ~/Bookmarks              # Interactive TUI on a specific file\n  \
    bookmarktree --tree                   # Print the bookmark tree\n  \
    bookmarktree -l --filter rust         # List matching bookmarks with their folders\n  \
    bookmarktree --completions zsh        # Print a zsh completion script"
)]
pub struct Cli {
    /// Chromium-format Bookmarks file
    ///
    /// Defaults to `store.path` from the config file, then to the first
    /// existing profile of Chrome, Chromium, Brave, Edge or Vivaldi.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// List bookmarks one per line with their folder path (non-interactive)
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Show the bookmark tree with box-drawing characters (non-interactive)
    #[arg(long = "tree")]
    pub tree: bool,

    /// Print the number of bookmarks (non-interactive)
    #[arg(long = "count")]
    pub count: bool,

    /// Keep only bookmarks whose title, URL or folder path contains TEXT
    /// (case-insensitive). Works with --list, --tree and --count.
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Output format for --list and --tree
    ///
    ///   plain - Human-readable text (default)
    ///   json  - Nested JSON nodes for scripting
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Color theme for the TUI (overrides config)
    ///
    /// OceanDark, Nord, Dracula, Gruvbox, TokyoNight
    #[arg(long = "theme", value_name = "THEME")]
    pub theme: Option<String>,

    /// Color mode for the TUI (overrides config)
    #[arg(long = "color-mode", value_name = "MODE")]
    pub color_mode: Option<ColorModeArg>,

    /// Write diagnostics to this file
    ///
    /// Without it, logging is enabled only when BOOKMARKTREE_LOG is set,
    /// and goes to bookmarktree.log in the cache directory.
    #[arg(long = "log-file", value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Print a shell completion script and exit
    #[arg(long = "completions", value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// True when any flag asks for printed output instead of the TUI
    pub fn is_print_mode(&self) -> bool {
        self.list || self.tree || self.count
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorModeArg {
    Auto,
    Rgb,
    #[value(name = "256")]
    Color256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_print_flags() {
        let cli = Cli::parse_from(["bookmarktree", "--tree", "--filter", "wo", "-o", "json"]);
        assert!(cli.is_print_mode());
        assert_eq!(cli.filter.as_deref(), Some("wo"));
        assert_eq!(cli.output, OutputFormat::Json);

        let cli = Cli::parse_from(["bookmarktree", "Bookmarks"]);
        assert!(!cli.is_print_mode());
        assert_eq!(cli.file, Some(PathBuf::from("Bookmarks")));
    }
}
