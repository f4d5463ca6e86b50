use supports_color::{Stream, on};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,        // True color (16M colors)
    Indexed256, // 256-color palette
}

impl ColorMode {
    /// Resolve the `terminal.color_mode` setting; "auto" asks the terminal.
    pub fn from_setting(setting: &str) -> Self {
        match setting.to_ascii_lowercase().as_str() {
            "rgb" | "truecolor" => ColorMode::Rgb,
            "256" | "indexed" => ColorMode::Indexed256,
            _ => detect(),
        }
    }
}

/// Pick a color mode from what stdout reports.
///
/// Apple Terminal.app before macOS 26 advertises truecolor but renders it
/// badly, so it always gets the 256-color palette.
pub fn detect() -> ColorMode {
    let is_terminal_app = std::env::var("TERM_PROGRAM")
        .map(|v| v == "Apple_Terminal")
        .unwrap_or(false);

    if is_terminal_app {
        return match macos_version() {
            Some(version) if version >= 26 => ColorMode::Rgb,
            _ => ColorMode::Indexed256,
        };
    }

    let supports_rgb = on(Stream::Stdout)
        .map(|level| level.has_16m)
        .unwrap_or(false);
    if supports_rgb {
        ColorMode::Rgb
    } else {
        ColorMode::Indexed256
    }
}

/// Darwin major version (24 for Sequoia, 26 for Tahoe)
fn macos_version() -> Option<u32> {
    #[cfg(target_os = "macos")]
    {
        use std::process::Command;

        let output = Command::new("uname").arg("-r").output().ok()?;
        let version = String::from_utf8(output.stdout).ok()?;
        version.split('.').next()?.trim().parse::<u32>().ok()
    }

    #[cfg(not(target_os = "macos"))]
    None
}
