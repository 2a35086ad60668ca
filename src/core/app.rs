use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::XRectSelConfig;
use crate::error::ConnectError;
use crate::selector::{self, PointerDisplay};
use crate::template::Template;
use crate::x11;

/// Settings resolved from the command line, the config file and built-in defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: String,
    pub display: Option<String>,
}

impl Settings {
    /// Command-line values win over the config file
    pub fn resolve(cli: Cli, config: XRectSelConfig) -> Self {
        Self {
            format: cli.format.unwrap_or(config.format),
            display: cli.display.or(config.display),
        }
    }
}

/// Select a region and print it using the resolved template
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => XRectSelConfig::load_from(path),
        None => XRectSelConfig::load(),
    };
    let settings = Settings::resolve(cli, config);

    let mut stdout = std::io::stdout().lock();
    select_and_print(
        &settings.format,
        || x11::connect(settings.display.as_deref()),
        &mut stdout,
    )
}

/// Parse `format`, open the display, let the user select a region and write
/// the rendered region to `out`.
///
/// The template is parsed before `connect` is called, so a malformed format
/// never touches the display. Nothing is written unless every step succeeds.
pub fn select_and_print<D, C, W>(format: &str, connect: C, out: &mut W) -> Result<()>
where
    D: PointerDisplay,
    C: FnOnce() -> Result<D, ConnectError>,
    W: Write,
{
    let template = Template::parse(format).context("invalid format string")?;

    let mut display = connect()?;
    let region = selector::select(&mut display)
        .context("failed to select a rectangular region")?;
    drop(display);
    log::debug!("Region selected on root window {:#x}", region.root());

    let output = template.render(&region);
    out.write_all(output.as_bytes())
        .and_then(|()| out.flush())
        .context("failed to write region to standard output")?;
    Ok(())
}
