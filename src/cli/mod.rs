mod commands;

pub use commands::{Cli, ColorModeArg, OutputFormat};
