use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "xrectsel",
    version,
    about = "Interactively select a rectangular screen region and print its geometry",
    after_help = "FORMAT directives: %x %y %X %Y %w %h %b %d %%, with optional rounding as %[N]w"
)]
pub struct Cli {
    /// Output template (default: "%wx%h+%x+%y\n")
    #[arg(allow_hyphen_values = true)]
    pub format: Option<String>,

    /// X display to connect to (defaults to $DISPLAY)
    #[arg(long)]
    pub display: Option<String>,

    /// Read settings from this file instead of the user config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
