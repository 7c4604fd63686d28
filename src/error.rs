use std::io;
use std::path::PathBuf;

/// Errors from the layers around the renderer. Rendering itself can't fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read or write a file
    #[error("Failed to access {}: {source}", path.display())]
    Io { source: io::Error, path: PathBuf },

    /// The config file exists but is not valid
    #[error("Failed to parse config at {}: {source}", path.display())]
    Config {
        source: toml::de::Error,
        path: PathBuf,
    },

    /// Note exceeds the configured length cap
    #[error("Note is {len} characters, the limit is {max}")]
    NoteTooLong { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
