use inf::{Error, Result};

use crate::{
    Cell, Raster, RasterMetadata, RasterNum,
    nodata::{self, NodataPolicy},
    rasteriterator::{IterableRaster, NodataValueFilter, ValueProxy},
    rasterutil,
};

/// Raster implementation using a dense data structure.
/// Nodata cells are represented structurally: NaN for floating point types, the nodata value of the metadata for integral types.
#[derive(Debug)]
pub struct DenseRaster<T: RasterNum> {
    meta: RasterMetadata,
    data: Vec<T>,
    policy: T::Policy,
}

impl<T: RasterNum> DenseRaster<T> {
    fn with_data(meta: RasterMetadata, data: Vec<T>) -> Result<Self> {
        nodata::validate_nodata::<T>(meta.nodata)?;
        rasterutil::check_data_size(&meta, data.len())?;
        let policy = T::policy(meta.nodata);
        Ok(DenseRaster { meta, data, policy })
    }

    /// Explicit copy of the raster, unlike `clone` this is not reported as a diagnostic
    pub fn copy(&self) -> Self {
        DenseRaster {
            meta: self.meta.clone(),
            data: self.data.clone(),
            policy: self.policy,
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the raw buffer, writing the structural nodata value marks the cell as nodata
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn policy(&self) -> T::Policy {
        self.policy
    }

    /// Assigns the value to all the cells of the raster, including the nodata cells
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Assigns the value to all the data cells of the raster, leaving the nodata cells intact
    pub fn fill_values(&mut self, value: T) {
        self.values_mut().for_each(|v| *v = value);
    }

    /// Turns all the cells of the raster into nodata, no-op for integral rasters without nodata value
    pub fn fill_with_nodata(&mut self) {
        if let Some(nodata) = self.policy.missing_value() {
            self.fill(nodata);
        }
    }

    /// Converts the cells that contain the nodata value of the metadata into NaN.
    /// No-op for integral types where the nodata value is the structural representation.
    pub fn init_nodata_values(&mut self) {
        if !T::HAS_NAN {
            return;
        }

        if let (Some(sentinel), Some(nan)) = (self.nodata(), self.policy.missing_value()) {
            if !sentinel.is_nan() {
                rasterutil::for_each_mut(&mut self.data, |v| {
                    if *v == sentinel {
                        *v = nan;
                    }
                });
            }
        }
    }

    /// Replaces the NaN nodata representation by the nodata value of the metadata.
    /// Needed before handing the buffer to a consumer that does not interpret NaN as nodata.
    pub fn collapse_data(&mut self) {
        if !T::HAS_NAN {
            return;
        }

        if let Some(sentinel) = self.nodata() {
            let policy = self.policy;
            rasterutil::for_each_mut(&mut self.data, |v| {
                if policy.is_missing(*v) {
                    *v = sentinel;
                }
            });
        }
    }

    /// Turns every cell that contains the value into nodata
    pub fn turn_value_into_nodata(&mut self, value: T) -> Result<()> {
        let nodata = self.missing_value()?;
        rasterutil::for_each_mut(&mut self.data, |v| {
            if *v == value {
                *v = nodata;
            }
        });

        Ok(())
    }

    /// Assigns the value to all the nodata cells, the raster has no nodata value afterwards
    pub fn replace_nodata(&mut self, value: T) {
        let policy = self.policy;
        rasterutil::for_each_mut(&mut self.data, |v| {
            if policy.is_missing(*v) {
                *v = value;
            }
        });

        self.meta.nodata = None;
        self.policy = T::policy(None);
    }

    /// Replace the metadata, the number of cells has to remain the same
    pub fn set_metadata(&mut self, meta: RasterMetadata) -> Result<()> {
        if meta.rows < 0 || meta.cols < 0 || meta.cell_count() != self.data.len() {
            return Err(Error::InvalidArgument("Cannot change metadata: invalid size".into()));
        }

        nodata::validate_nodata::<T>(meta.nodata)?;
        self.policy = T::policy(meta.nodata);
        self.meta = meta;
        Ok(())
    }

    /// Change the dimensions of the raster, the content of the raster is unspecified afterwards
    pub fn resize(&mut self, rows: i32, cols: i32) {
        self.meta.rows = rows.max(0);
        self.meta.cols = cols.max(0);
        self.data.resize(self.meta.cell_count(), T::zero());
    }

    pub fn resize_with_nodata(&mut self, rows: i32, cols: i32, nodata: Option<f64>) -> Result<()> {
        nodata::validate_nodata::<T>(nodata)?;
        self.resize(rows, cols);
        self.meta.nodata = nodata;
        self.policy = T::policy(nodata);
        Ok(())
    }

    pub fn resize_and_fill(&mut self, rows: i32, cols: i32, value: T) {
        self.resize(rows, cols);
        self.fill(value);
    }

    /// Iterate over every cell as an optional-like proxy that can be queried, assigned and reset
    pub fn optional_values_mut(&mut self) -> impl Iterator<Item = ValueProxy<'_, T>> {
        let policy = self.policy;
        self.data.iter_mut().map(move |v| ValueProxy::new(v, policy))
    }

    fn missing_value(&self) -> Result<T> {
        self.policy
            .missing_value()
            .ok_or_else(|| Error::InvalidConfiguration("Raster has no nodata value".into()))
    }
}

impl<T: RasterNum> Raster for DenseRaster<T> {
    type Pixel = T;
    type WithPixelType<U: RasterNum> = DenseRaster<U>;

    fn new(meta: RasterMetadata) -> Result<Self> {
        let data = vec![T::zero(); meta.cell_count()];
        Self::with_data(meta, data)
    }

    fn filled_with(meta: RasterMetadata, value: T) -> Result<Self> {
        let data = vec![value; meta.cell_count()];
        let mut raster = Self::with_data(meta, data)?;
        raster.init_nodata_values();
        Ok(raster)
    }

    fn filled_with_nodata(meta: RasterMetadata) -> Result<Self> {
        let mut raster = Self::new(meta)?;
        let nodata = raster.missing_value()?;
        raster.fill(nodata);
        Ok(raster)
    }

    fn from_vec(meta: RasterMetadata, data: Vec<T>) -> Result<Self> {
        let mut raster = Self::with_data(meta, data)?;
        raster.init_nodata_values();
        Ok(raster)
    }

    fn from_cells<F>(meta: RasterMetadata, cell_value: F) -> Result<Self>
    where
        F: Fn(usize) -> Option<T> + Sync + Send,
    {
        nodata::validate_nodata::<T>(meta.nodata)?;
        let policy = T::policy(meta.nodata);
        let data = rasterutil::map_cells(meta.cell_count(), |index| policy.write(cell_value(index)))
            .ok_or_else(|| Error::Runtime("Raster without nodata value cannot represent nodata cells".into()))?;

        Self::with_data(meta, data)
    }

    fn metadata(&self) -> &RasterMetadata {
        &self.meta
    }

    fn set_nodata(&mut self, nodata: Option<f64>) -> Result<()> {
        nodata::validate_nodata::<T>(nodata)?;
        log::debug!("Change raster nodata from {:?} to {:?}", self.meta.nodata, nodata);
        self.meta.nodata = nodata;
        self.policy = T::policy(nodata);
        Ok(())
    }

    fn can_represent_nodata(&self) -> bool {
        self.policy.missing_value().is_some()
    }

    #[inline]
    fn is_nodata(&self, index: usize) -> bool {
        self.policy.is_missing(self.data[index])
    }

    #[inline]
    fn value(&self, index: usize) -> Option<T> {
        self.policy.read(self.data[index])
    }

    /// # Panics
    /// When marking a cell as nodata in an integral raster without nodata value
    fn set_value(&mut self, index: usize, value: Option<T>) {
        self.data[index] = match value {
            Some(v) => v,
            None => match self.policy.missing_value() {
                Some(nodata) => nodata,
                None => panic!("Cannot mark a cell as nodata in a raster without nodata value"),
            },
        };
    }

    fn nodata_count(&self) -> usize {
        self.data.iter().filter(|&&v| self.policy.is_missing(v)).count()
    }

    fn has_nodata(&self) -> bool {
        self.data.iter().any(|&v| self.policy.is_missing(v))
    }

    fn iter_opt(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.data.iter().map(|&v| self.policy.read(v))
    }

    fn value_iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values()
    }
}

impl<T: RasterNum> IterableRaster for DenseRaster<T> {
    type Filter<'a> = NodataValueFilter<T::Policy>;

    fn filtered_data(&self) -> (&[T], Self::Filter<'_>) {
        (&self.data, NodataValueFilter::new(self.policy))
    }

    fn filtered_data_mut(&mut self) -> (&mut [T], Self::Filter<'_>) {
        (&mut self.data, NodataValueFilter::new(self.policy))
    }
}

impl<T: RasterNum> Clone for DenseRaster<T> {
    fn clone(&self) -> Self {
        log::warn!("Raster copy: should not happen");
        self.copy()
    }
}

impl<T: RasterNum> PartialEq for DenseRaster<T> {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta && self.iter_opt().eq(other.iter_opt())
    }
}

impl<T: RasterNum> std::ops::Index<usize> for DenseRaster<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: RasterNum> std::ops::IndexMut<usize> for DenseRaster<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: RasterNum> std::ops::Index<Cell> for DenseRaster<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.data[cell.index_in_raster(self.meta.cols)]
    }
}

impl<T: RasterNum> std::ops::IndexMut<Cell> for DenseRaster<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut Self::Output {
        let index = cell.index_in_raster(self.meta.cols);
        &mut self.data[index]
    }
}
