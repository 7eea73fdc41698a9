//! Generic raster algorithms expressed in terms of the [`Raster`] trait, usable with every raster backend.

mod cast;
mod compare;
mod limits;
mod statistics;
mod transform;

use inf::{Error, Result};

use crate::Raster;

pub use {
    cast::cast,
    compare::{RasterDiff, diff_rasters, tolerant_equal},
    limits::{maximum, maximum_of, minimum, minimum_of, minmax, minmax_cell},
    statistics::{sum, sum_mask, sum_mask_values},
    transform::{for_each_data_value, for_each_data_value_pair, for_each_optional_value, transform, transform_binary},
};

/// Fails with a size mismatch error when the rasters do not have the same number of rows and columns
pub fn check_dimensions(r1: &impl Raster, r2: &impl Raster) -> Result<()> {
    if r1.size() != r2.size() {
        return Err(Error::SizeMismatch {
            size1: (r1.rows() as usize, r1.cols() as usize),
            size2: (r2.rows() as usize, r2.cols() as usize),
        });
    }

    Ok(())
}

fn check_sizes_match(r1: &impl Raster, r2: &impl Raster) -> Result<()> {
    if r1.size() != r2.size() {
        return Err(Error::Runtime(format!("Raster sizes have to match {} vs {}", r1.size(), r2.size())));
    }

    Ok(())
}
