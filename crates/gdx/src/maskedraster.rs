use inf::{Error, Result};

use crate::{
    Cell, Raster, RasterMetadata, RasterNum,
    nodata::{self, NodataPolicy},
    rasteriterator::{IterableRaster, MaskValueFilter, MaskValueProxy},
    rasterutil,
};

/// Raster implementation that keeps track of the nodata cells in a separate mask.
/// The mask is the only authority on the nodata status of a cell, regardless of the value stored in the data buffer.
/// An empty mask means that none of the cells are nodata, it is only allocated once a cell gets marked as nodata.
#[derive(Debug)]
pub struct MaskedRaster<T: RasterNum> {
    meta: RasterMetadata,
    data: Vec<T>,
    mask: Vec<bool>,
}

impl<T: RasterNum> MaskedRaster<T> {
    fn with_data(meta: RasterMetadata, data: Vec<T>, mask: Vec<bool>) -> Result<Self> {
        nodata::validate_nodata::<T>(meta.nodata)?;
        rasterutil::check_data_size(&meta, data.len())?;
        if !mask.is_empty() && mask.len() != data.len() {
            return Err(Error::InvalidArgument(format!(
                "Raster mask size does not match provided dimensions {} vs {}x{}",
                mask.len(),
                meta.rows,
                meta.cols
            )));
        }

        Ok(MaskedRaster { meta, data, mask })
    }

    /// Create a raster from a data buffer and a nodata mask, an empty mask indicates that there is no nodata
    pub fn from_vec_with_mask(meta: RasterMetadata, data: Vec<T>, mask: Vec<bool>) -> Result<Self> {
        Self::with_data(meta, data, mask)
    }

    /// Explicit copy of the raster, unlike `clone` this is not reported as a diagnostic
    pub fn copy(&self) -> Self {
        MaskedRaster {
            meta: self.meta.clone(),
            data: self.data.clone(),
            mask: self.mask.clone(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the values, the nodata status of the cells is not affected
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The nodata mask, empty when the raster contains no nodata
    pub fn mask_data(&self) -> &[bool] {
        &self.mask
    }

    pub fn into_parts(self) -> (RasterMetadata, Vec<T>, Vec<bool>) {
        (self.meta, self.data, self.mask)
    }

    pub fn mark_as_data(&mut self, index: usize) {
        if !self.mask.is_empty() {
            self.mask[index] = false;
        }
    }

    pub fn mark_cell_as_data(&mut self, cell: Cell) {
        self.mark_as_data(cell.index_in_raster(self.meta.cols));
    }

    fn ensure_mask(&mut self) {
        if self.mask.is_empty() && !self.data.is_empty() {
            log::debug!("Allocate nodata mask for raster {}x{}", self.meta.rows, self.meta.cols);
            self.mask = vec![false; self.data.len()];
        }
    }

    fn is_nodata_value(&self, value: T) -> bool {
        (T::HAS_NAN && value.is_nan()) || self.nodata() == Some(value)
    }

    /// Assigns the value to all the cells of the raster.
    /// When the value matches the nodata value all cells become nodata, otherwise all cells become data.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);

        if self.meta.nodata.is_some() {
            if self.is_nodata_value(value) {
                self.mask = vec![true; self.data.len()];
            } else {
                self.mask.clear();
            }
        }
    }

    /// Assigns the value to all the cells, the nodata status of the cells is not modified
    pub fn fill_values(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn fill_with_nodata(&mut self) {
        self.mask = vec![true; self.data.len()];
    }

    /// Build the mask from the cells that contain the nodata value of the metadata (or NaN for floating point types)
    pub fn init_nodata_values(&mut self) {
        if self.meta.nodata.is_none() {
            return;
        }

        let mask: Vec<bool> = self.data.iter().map(|&v| self.is_nodata_value(v)).collect();
        self.mask = if mask.iter().any(|&m| m) { mask } else { Vec::new() };
    }

    /// Write the nodata value of the metadata in the cells that are marked as nodata.
    /// Needed before handing the buffer to a consumer that is not aware of the mask.
    pub fn collapse_data(&mut self) {
        if self.mask.is_empty() {
            return;
        }

        let nodata = self.nodata().or_else(|| T::policy(None).missing_value());
        if let Some(nodata) = nodata {
            self.data
                .iter_mut()
                .zip(&self.mask)
                .filter(|(_, nodata)| **nodata)
                .for_each(|(v, _)| *v = nodata);
        }
    }

    /// Turns every cell that contains the value into nodata, regardless of the current mask state
    pub fn turn_value_into_nodata(&mut self, value: T) {
        let indexes: Vec<usize> = self
            .data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == value)
            .map(|(i, _)| i)
            .collect();

        if indexes.is_empty() {
            return;
        }

        self.ensure_mask();
        for i in indexes {
            self.mask[i] = true;
        }
    }

    /// Assigns the value to all the nodata cells, the raster has no nodata afterwards
    pub fn replace_nodata(&mut self, value: T) {
        for (v, _) in self.data.iter_mut().zip(&self.mask).filter(|(_, nodata)| **nodata) {
            *v = value;
        }

        self.mask.clear();
        self.meta.nodata = None;
    }

    pub fn set_metadata(&mut self, meta: RasterMetadata) -> Result<()> {
        if meta.rows < 0 || meta.cols < 0 || meta.cell_count() != self.data.len() {
            return Err(Error::InvalidArgument("Cannot change metadata: invalid size".into()));
        }

        nodata::validate_nodata::<T>(meta.nodata)?;
        self.meta = meta;
        Ok(())
    }

    /// Change the dimensions of the raster, the content of the raster is unspecified afterwards
    pub fn resize(&mut self, rows: i32, cols: i32) {
        self.meta.rows = rows.max(0);
        self.meta.cols = cols.max(0);
        self.data.resize(self.meta.cell_count(), T::zero());
        if !self.mask.is_empty() {
            self.mask.resize(self.data.len(), false);
        }
    }

    /// Change the dimensions and the nodata value, the mask is removed when there is no nodata value
    pub fn resize_with_nodata(&mut self, rows: i32, cols: i32, nodata: Option<f64>) -> Result<()> {
        nodata::validate_nodata::<T>(nodata)?;
        self.resize(rows, cols);
        self.meta.nodata = nodata;
        if nodata.is_none() {
            self.mask.clear();
        }

        Ok(())
    }

    pub fn resize_and_fill(&mut self, rows: i32, cols: i32, value: T) {
        self.resize(rows, cols);
        self.fill(value);
    }

    /// Iterate over every cell as an optional-like proxy that can be queried, assigned and reset
    pub fn optional_values_mut(&mut self) -> impl Iterator<Item = MaskValueProxy<'_, T>> {
        self.ensure_mask();
        self.data
            .iter_mut()
            .zip(self.mask.iter_mut())
            .map(|(value, nodata)| MaskValueProxy::new(value, nodata))
    }
}

impl<T: RasterNum> Raster for MaskedRaster<T> {
    type Pixel = T;
    type WithPixelType<U: RasterNum> = MaskedRaster<U>;

    fn new(meta: RasterMetadata) -> Result<Self> {
        let data = vec![T::zero(); meta.cell_count()];
        Self::with_data(meta, data, Vec::new())
    }

    fn filled_with(meta: RasterMetadata, value: T) -> Result<Self> {
        let mut raster = Self::new(meta)?;
        raster.fill(value);
        Ok(raster)
    }

    fn filled_with_nodata(meta: RasterMetadata) -> Result<Self> {
        let mut raster = Self::new(meta)?;
        raster.fill_with_nodata();
        Ok(raster)
    }

    fn from_vec(meta: RasterMetadata, data: Vec<T>) -> Result<Self> {
        let mut raster = Self::with_data(meta, data, Vec::new())?;
        raster.init_nodata_values();
        Ok(raster)
    }

    fn from_cells<F>(meta: RasterMetadata, cell_value: F) -> Result<Self>
    where
        F: Fn(usize) -> Option<T> + Sync + Send,
    {
        nodata::validate_nodata::<T>(meta.nodata)?;
        let fill = inf::cast::option_or(meta.nodata, T::zero());
        let (data, mut mask) = rasterutil::map_cells_with_mask(meta.cell_count(), fill, cell_value);
        if !mask.iter().any(|&m| m) {
            mask.clear();
        }

        Self::with_data(meta, data, mask)
    }

    fn metadata(&self) -> &RasterMetadata {
        &self.meta
    }

    fn set_nodata(&mut self, nodata: Option<f64>) -> Result<()> {
        nodata::validate_nodata::<T>(nodata)?;
        log::debug!("Change raster nodata from {:?} to {:?}", self.meta.nodata, nodata);
        self.meta.nodata = nodata;
        Ok(())
    }

    #[inline]
    fn is_nodata(&self, index: usize) -> bool {
        !self.mask.is_empty() && self.mask[index]
    }

    #[inline]
    fn value(&self, index: usize) -> Option<T> {
        if self.is_nodata(index) { None } else { Some(self.data[index]) }
    }

    fn set_value(&mut self, index: usize, value: Option<T>) {
        match value {
            Some(v) => {
                self.data[index] = v;
                self.mark_as_data(index);
            }
            None => {
                self.ensure_mask();
                self.mask[index] = true;
            }
        }
    }

    fn nodata_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    fn has_nodata(&self) -> bool {
        self.mask.iter().any(|&m| m)
    }

    fn iter_opt(&self) -> impl Iterator<Item = Option<T>> + '_ {
        (0..self.data.len()).map(|index| self.value(index))
    }

    fn value_iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values()
    }
}

impl<T: RasterNum> IterableRaster for MaskedRaster<T> {
    type Filter<'a> = MaskValueFilter<'a>;

    fn filtered_data(&self) -> (&[T], Self::Filter<'_>) {
        (&self.data, MaskValueFilter::new(&self.mask))
    }

    fn filtered_data_mut(&mut self) -> (&mut [T], Self::Filter<'_>) {
        (&mut self.data, MaskValueFilter::new(&self.mask))
    }
}

impl<T: RasterNum> Clone for MaskedRaster<T> {
    fn clone(&self) -> Self {
        log::warn!("Raster copy: should not happen");
        self.copy()
    }
}

impl<T: RasterNum> PartialEq for MaskedRaster<T> {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta && self.iter_opt().eq(other.iter_opt())
    }
}

impl<T: RasterNum> std::ops::Index<usize> for MaskedRaster<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: RasterNum> std::ops::IndexMut<usize> for MaskedRaster<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: RasterNum> std::ops::Index<Cell> for MaskedRaster<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.data[cell.index_in_raster(self.meta.cols)]
    }
}

impl<T: RasterNum> std::ops::IndexMut<Cell> for MaskedRaster<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut Self::Output {
        let index = cell.index_in_raster(self.meta.cols);
        &mut self.data[index]
    }
}
