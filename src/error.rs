use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid maze dimensions {rows}x{cols}: both must be odd and at least 5")]
    InvalidDimensions { rows: usize, cols: usize },

    /// The goal could not be reached from the start after every regeneration.
    #[error("generated maze left the goal unreachable after {attempts} attempts")]
    Disconnected { attempts: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn invalid_dimensions(rows: usize, cols: usize) -> Self {
        Self::InvalidDimensions { rows, cols }
    }
}
