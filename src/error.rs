use thiserror::Error;

/// Errors surfaced by the library.
///
/// Pattern edits, bad tempo values and unknown track ids never produce an
/// error; they are logged and ignored. Only environment problems reach the
/// caller.
#[derive(Error, Debug)]
pub enum Error {
    /// The audio output could not be opened. Retry once the host allows it.
    #[error("audio output unavailable: {0}")]
    AudioUnavailable(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
