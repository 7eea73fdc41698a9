use inf::{Error, Result};
use itertools::Itertools;
use itertools::MinMaxResult::{MinMax, NoElements, OneElement};

use crate::{Cell, Raster, RasterNum};

fn no_data_error() -> Error {
    Error::InvalidArgument("No data in raster".into())
}

/// The smallest data value of the raster, fails when the raster contains no data
pub fn minimum<R: Raster>(raster: &R) -> Result<R::Pixel> {
    raster
        .value_iter()
        .reduce(|min, v| if v < min { v } else { min })
        .ok_or_else(no_data_error)
}

/// The largest data value of the raster, fails when the raster contains no data
pub fn maximum<R: Raster>(raster: &R) -> Result<R::Pixel> {
    raster
        .value_iter()
        .reduce(|max, v| if v > max { v } else { max })
        .ok_or_else(no_data_error)
}

pub fn minmax<R: Raster>(raster: &R) -> Result<(R::Pixel, R::Pixel)> {
    match raster.value_iter().minmax() {
        NoElements => Err(no_data_error()),
        OneElement(x) => Ok((x, x)),
        MinMax(x, y) => Ok((x, y)),
    }
}

/// The locations of the minimum and maximum value.
/// The first location is reported for the minimum, the last one for the maximum when the value occurs multiple times.
pub fn minmax_cell<R: Raster>(raster: &R) -> Result<(Cell, Cell)> {
    let cell_values = raster.cells().zip(raster.iter_opt()).filter_map(|(cell, v)| v.map(|v| (cell, v)));

    match cell_values.minmax_by(|(_, v1), (_, v2)| v1.partial_cmp(v2).unwrap_or(std::cmp::Ordering::Equal)) {
        NoElements => Err(no_data_error()),
        OneElement((cell, _)) => Ok((cell, cell)),
        MinMax((min_cell, _), (max_cell, _)) => Ok((min_cell, max_cell)),
    }
}

fn cellwise_select<R, F>(rasters: &[&R], select: F) -> Result<R::WithPixelType<R::Pixel>>
where
    R: Raster,
    F: Fn(R::Pixel, R::Pixel) -> R::Pixel + Sync + Send,
{
    let first = match rasters {
        [] => return Err(Error::InvalidArgument("No rasters provided".into())),
        [_] => return Err(Error::InvalidArgument("At least two rasters need to be provided".into())),
        [first, ..] => *first,
    };

    if rasters.iter().any(|ras| ras.size() != first.size()) {
        return Err(Error::InvalidArgument("Not all provided rasters have the same size".into()));
    }

    R::WithPixelType::<R::Pixel>::from_cells(first.metadata().clone(), |index| {
        rasters.iter().try_fold(None, |acc: Option<R::Pixel>, ras| {
            let v = ras.value(index)?;
            Some(Some(match acc {
                Some(acc) => select(acc, v),
                None => v,
            }))
        })?
    })
}

/// Cell-wise minimum of the rasters, the result cell is nodata when one of the rasters contains nodata
pub fn minimum_of<R: Raster>(rasters: &[&R]) -> Result<R::WithPixelType<R::Pixel>> {
    cellwise_select(rasters, |a, b| if b < a { b } else { a })
}

/// Cell-wise maximum of the rasters, the result cell is nodata when one of the rasters contains nodata
pub fn maximum_of<R: Raster>(rasters: &[&R]) -> Result<R::WithPixelType<R::Pixel>> {
    cellwise_select(rasters, |a, b| if b > a { b } else { a })
}
