use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Raster dimensions do not match ({}x{}) <-> ({}x{})", .size1.0, .size1.1, .size2.0, .size2.1)]
    SizeMismatch {
        size1: (usize, usize),
        size2: (usize, usize),
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Returns true for the error kinds caused by invalid input from the caller
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::SizeMismatch { .. } | Error::InvalidArgument(_))
    }
}
