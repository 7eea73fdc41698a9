use num::ToPrimitive;
use std::collections::HashMap;
use std::hash::Hash;

use inf::Result;

use crate::{Raster, rasterutil};

use super::{check_dimensions, for_each_data_value_pair};

/// Sum of all the data cells of the raster
pub fn sum<R: Raster>(raster: &R) -> f64 {
    rasterutil::sum_cells(raster.len(), |index| raster.value(index).and_then(|v| v.to_f64()))
}

/// Sum of the raster values per value of the mask raster.
/// Only the cells where both the raster and the mask contain data are taken into account.
pub fn sum_mask<R, M>(raster: &R, mask: &M) -> Result<HashMap<M::Pixel, f64>>
where
    R: Raster,
    M: Raster,
    M::Pixel: Eq + Hash,
{
    check_dimensions(raster, mask)?;

    let mut result = HashMap::new();
    for_each_data_value_pair(raster, mask, |value, mask_value| {
        *result.entry(mask_value).or_insert(0.0) += value.to_f64().unwrap_or_default();
    })?;

    Ok(result)
}

/// Sum of the raster values for the requested mask values, other mask values are ignored.
/// The result contains an entry for every requested mask value, even when the mask value does not occur.
pub fn sum_mask_values<R, M>(raster: &R, mask: &M, mask_values: &[M::Pixel]) -> Result<HashMap<M::Pixel, f64>>
where
    R: Raster,
    M: Raster,
    M::Pixel: Eq + Hash,
{
    check_dimensions(raster, mask)?;

    let mut result: HashMap<M::Pixel, f64> = mask_values.iter().map(|&v| (v, 0.0)).collect();
    for_each_data_value_pair(raster, mask, |value, mask_value| {
        if let Some(sum) = result.get_mut(&mask_value) {
            *sum += value.to_f64().unwrap_or_default();
        }
    })?;

    Ok(result)
}
