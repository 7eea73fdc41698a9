//! Raster containers with nodata awareness and raster algebra.
//!
//! The functionality lives in the `gdx` crate, common error handling in the `inf` crate.

#[doc(inline)]
pub use gdx::*;
pub use inf;
