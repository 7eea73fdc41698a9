pub use error::Error;
pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod cast;
mod error;
