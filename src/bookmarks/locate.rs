//! Find the bookmarks file of an installed Chromium-family browser.

use std::path::PathBuf;

/// Browser profile directories relative to the platform config/data dir.
#[cfg(target_os = "linux")]
const PROFILE_DIRS: &[&str] = &[
    "google-chrome/Default",
    "chromium/Default",
    "BraveSoftware/Brave-Browser/Default",
    "microsoft-edge/Default",
    "vivaldi/Default",
];

#[cfg(target_os = "macos")]
const PROFILE_DIRS: &[&str] = &[
    "Google/Chrome/Default",
    "Chromium/Default",
    "BraveSoftware/Brave-Browser/Default",
    "Microsoft Edge/Default",
    "Vivaldi/Default",
];

#[cfg(target_os = "windows")]
const PROFILE_DIRS: &[&str] = &[
    "Google/Chrome/User Data/Default",
    "Chromium/User Data/Default",
    "BraveSoftware/Brave-Browser/User Data/Default",
    "Microsoft/Edge/User Data/Default",
    "Vivaldi/User Data/Default",
];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const PROFILE_DIRS: &[&str] = &[];

/// Base directory that holds browser profiles on this platform.
/// - Linux: ~/.config
/// - macOS: ~/Library/Application Support
/// - Windows: %LOCALAPPDATA%
fn profile_base() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        dirs::data_local_dir()
    }
    #[cfg(not(target_os = "windows"))]
    {
        dirs::config_dir()
    }
}

/// All candidate bookmarks files, in preference order, whether or not they exist.
pub fn candidate_paths() -> Vec<PathBuf> {
    let Some(base) = profile_base() else {
        return Vec::new();
    };
    PROFILE_DIRS
        .iter()
        .map(|dir| base.join(dir).join("Bookmarks"))
        .collect()
}

/// The first candidate bookmarks file that exists.
pub fn default_bookmarks_path() -> Option<PathBuf> {
    candidate_paths().into_iter().find(|path| path.is_file())
}
