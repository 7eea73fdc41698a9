use inf::Result;
use num::NumCast;

use crate::{Raster, RasterNum};

/// Convert the raster to another pixel type, values that cannot be represented in the new type become nodata
pub fn cast<U: RasterNum, R: Raster>(raster: &R) -> Result<R::WithPixelType<U>> {
    raster.map_values(raster.metadata().nodata, |v| NumCast::from(v))
}
