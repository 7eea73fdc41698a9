#![warn(clippy::unwrap_used)]

//! Raster containers with nodata aware iteration and elementwise algebra.
//!
//! Three storage backends implement the [`Raster`] trait:
//! * [`DenseRaster`]: nodata is stored in the buffer (NaN for floating point types, the nodata value for integral types)
//! * [`MaskedRaster`]: nodata is tracked in a separate mask
//! * [`SparseRaster`]: only the data cells are stored

pub use inf::{Error, Result};

pub mod algebra;
pub mod algo;
mod cell;
mod datatype;
mod denseraster;
mod maskedraster;
pub mod nodata;
pub mod raster;
pub mod rasterarea;
pub mod rasteriterator;
mod rastermetadata;
mod rasternum;
mod rasterops;
mod rastersize;
mod rasterutil;
mod sparseraster;
pub mod widest;

#[cfg(test)]
mod rastertests;

#[doc(inline)]
pub use algebra::RasterAlgebra;
#[doc(inline)]
pub use cell::{Cell, CellIterator};
#[doc(inline)]
pub use datatype::RasterDataType;
#[doc(inline)]
pub use denseraster::DenseRaster;
#[doc(inline)]
pub use maskedraster::MaskedRaster;
#[doc(inline)]
pub use raster::Raster;
#[doc(inline)]
pub use rasterarea::RasterArea;
#[doc(inline)]
pub use rasteriterator::IterableRaster;
#[doc(inline)]
pub use rastermetadata::RasterMetadata;
#[doc(inline)]
pub use rasternum::RasterNum;
#[doc(inline)]
pub use rastersize::RasterSize;
#[doc(inline)]
pub use sparseraster::{SparseCells, SparseRaster};
#[doc(inline)]
pub use widest::{Widest, WidestType};
