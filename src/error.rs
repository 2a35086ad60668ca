use thiserror::Error;

/// Failures raised while selecting a region on the display
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("failed to grab pointer: {0}")]
    GrabFailed(String),

    #[error("failed to get root window geometry: {0}")]
    GeometryQueryFailed(String),

    #[error("display connection error: {0}")]
    Connection(#[from] x11rb::errors::ConnectionError),

    #[error("display request failed: {0}")]
    Request(#[from] x11rb::errors::ReplyError),

    #[error("failed to allocate display resource: {0}")]
    Resource(#[from] x11rb::errors::ReplyOrIdError),
}

/// Syntax errors in an output format template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no matching ] found for rounding clause at position {position}")]
    MalformedRounding { position: usize },

    #[error("unexpected character '{found}' at position {position}")]
    InvalidDigit { found: char, position: usize },

    #[error("rounding value at position {position} is too large")]
    RoundingOverflow { position: usize },
}

/// The display could not be opened
#[derive(Error, Debug)]
#[error("failed to open display {name}")]
pub struct ConnectError {
    pub name: String,
    #[source]
    pub source: x11rb::errors::ConnectError,
}
