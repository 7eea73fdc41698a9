use inf::Result;
use num::{ToPrimitive, Zero};

use crate::{Raster, RasterNum};

use super::check_sizes_match;

/// Cell counts of the differences between two rasters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RasterDiff {
    pub zero_to_non_zero: usize,
    pub non_zero_to_zero: usize,
    pub nodata_to_zero: usize,
    pub nodata_to_non_zero: usize,
    pub zero_to_nodata: usize,
    pub non_zero_to_nodata: usize,
    pub data_difference: usize,
    pub equal: usize,
}

impl RasterDiff {
    /// Number of cells that are not equal, cells that are nodata in both rasters are not counted
    pub fn different_cells(&self) -> usize {
        self.zero_to_non_zero
            + self.non_zero_to_zero
            + self.nodata_to_zero
            + self.nodata_to_non_zero
            + self.zero_to_nodata
            + self.non_zero_to_nodata
            + self.data_difference
    }

    fn add_values<T1: RasterNum, T2: RasterNum>(&mut self, v1: T1, v2: T2, tolerance: f64) {
        let equal = match (v1.to_f64(), v2.to_f64()) {
            (Some(f1), Some(f2)) if T1::HAS_NAN || T2::HAS_NAN => approx::abs_diff_eq!(f1, f2, epsilon = tolerance),
            (Some(f1), Some(f2)) => f1 == f2,
            _ => false,
        };

        if equal {
            self.equal += 1;
        } else if v1.is_zero() {
            self.zero_to_non_zero += 1;
        } else if v2.is_zero() {
            self.non_zero_to_zero += 1;
        } else {
            self.data_difference += 1;
        }
    }
}

/// Count the cell differences going from the first to the second raster.
/// The tolerance applies to floating point rasters, integral values have to match exactly.
pub fn diff_rasters<R1: Raster, R2: Raster>(r1: &R1, r2: &R2, tolerance: f64) -> Result<RasterDiff> {
    check_sizes_match(r1, r2)?;

    let mut diff = RasterDiff::default();
    for (v1, v2) in r1.iter_opt().zip(r2.iter_opt()) {
        match (v1, v2) {
            (Some(v1), Some(v2)) => diff.add_values(v1, v2, tolerance),
            (None, Some(v2)) if v2.is_zero() => diff.nodata_to_zero += 1,
            (None, Some(_)) => diff.nodata_to_non_zero += 1,
            (Some(v1), None) if v1.is_zero() => diff.zero_to_nodata += 1,
            (Some(_), None) => diff.non_zero_to_nodata += 1,
            (None, None) => {}
        }
    }

    Ok(diff)
}

/// Check if two rasters contain the same nodata cells and data values that differ at most by the tolerance.
/// The rasters can have a different pixel type and a different nodata value.
pub fn tolerant_equal<R1: Raster, R2: Raster>(r1: &R1, r2: &R2, tolerance: f64) -> bool {
    if r1.size() != r2.size() {
        return false;
    }

    r1.iter_opt().zip(r2.iter_opt()).all(|(v1, v2)| match (v1, v2) {
        (Some(v1), Some(v2)) => match (v1.to_f64(), v2.to_f64()) {
            (Some(v1), Some(v2)) => approx::abs_diff_eq!(v1, v2, epsilon = tolerance),
            _ => false,
        },
        (None, None) => true,
        _ => false,
    })
}
