use inf::Result;

use crate::{Cell, CellIterator, RasterMetadata, RasterNum, RasterSize, rasterutil};

/// A trait representing a raster.
/// A raster implementation owns the pixel data and the metadata associated with the raster.
/// The backends differ in how they represent nodata cells (structural value, side mask or absence of a value)
/// but they all expose the same cell based contract.
pub trait Raster: Sized + Send + Sync {
    type Pixel: RasterNum;

    type WithPixelType<U: RasterNum>: Raster<Pixel = U>;

    //
    // Creation functions
    //

    /// Create a new raster with the given metadata.
    /// Backends with a contiguous buffer are filled with zeros, sparse backends start without stored cells.
    fn new(meta: RasterMetadata) -> Result<Self>;

    /// Create a new raster with the given metadata and filled with the provided value.
    fn filled_with(meta: RasterMetadata, value: Self::Pixel) -> Result<Self>;

    /// Create a new raster filled with nodata.
    fn filled_with_nodata(meta: RasterMetadata) -> Result<Self>;

    /// Create a new raster from a row-major data buffer, cells that match the nodata value of the metadata become nodata.
    fn from_vec(meta: RasterMetadata, data: Vec<Self::Pixel>) -> Result<Self>;

    /// Create a new raster where the value of every cell index is provided by the callback, `None` indicates nodata.
    /// Fails if the callback returns `None` and the raster has no means to represent nodata.
    fn from_cells<F>(meta: RasterMetadata, cell_value: F) -> Result<Self>
    where
        F: Fn(usize) -> Option<Self::Pixel> + Sync + Send;

    fn from_iter<Iter>(meta: RasterMetadata, iter: Iter) -> Result<Self>
    where
        Iter: IntoIterator<Item = Option<Self::Pixel>>,
    {
        let values: Vec<Option<Self::Pixel>> = iter.into_iter().collect();
        rasterutil::check_data_size(&meta, values.len())?;
        Self::from_cells(meta, |index| values[index])
    }

    //
    // Trait methods
    //

    fn metadata(&self) -> &RasterMetadata;

    /// Change the nodata value of the raster, fails for NaN values on integral rasters
    fn set_nodata(&mut self, nodata: Option<f64>) -> Result<()>;

    fn rows(&self) -> i32 {
        self.metadata().rows
    }

    fn cols(&self) -> i32 {
        self.metadata().cols
    }

    fn size(&self) -> RasterSize {
        self.metadata().size()
    }

    /// Number of cells in the raster
    fn len(&self) -> usize {
        self.metadata().cell_count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The configured nodata value converted to the pixel type
    fn nodata(&self) -> Option<Self::Pixel> {
        inf::cast::option(self.metadata().nodata)
    }

    /// False when marking a cell as nodata is not possible (integral dense rasters without nodata value)
    fn can_represent_nodata(&self) -> bool {
        true
    }

    fn is_nodata(&self, index: usize) -> bool;

    fn cell_is_nodata(&self, cell: Cell) -> bool {
        self.is_nodata(cell.index_in_raster(self.cols()))
    }

    /// The value of the cell at the given index, `None` for nodata cells
    fn value(&self, index: usize) -> Option<Self::Pixel>;

    fn cell_value(&self, cell: Cell) -> Option<Self::Pixel> {
        self.value(cell.index_in_raster(self.cols()))
    }

    /// Assign a value to the cell, `None` turns the cell into nodata
    fn set_value(&mut self, index: usize, value: Option<Self::Pixel>);

    fn set_cell_value(&mut self, cell: Cell, value: Option<Self::Pixel>) {
        let index = cell.index_in_raster(self.cols());
        self.set_value(index, value);
    }

    fn mark_as_nodata(&mut self, index: usize) {
        self.set_value(index, None);
    }

    fn mark_cell_as_nodata(&mut self, cell: Cell) {
        self.set_cell_value(cell, None);
    }

    fn nodata_count(&self) -> usize {
        (0..self.len()).filter(|&index| self.is_nodata(index)).count()
    }

    fn has_nodata(&self) -> bool {
        (0..self.len()).any(|index| self.is_nodata(index))
    }

    /// Iterate over all the cells of the raster, nodata cells are `None`
    fn iter_opt(&self) -> impl Iterator<Item = Option<Self::Pixel>> + '_ {
        (0..self.len()).map(|index| self.value(index))
    }

    /// Iterate over the values of the data cells in row-major order, nodata cells are skipped
    fn value_iter(&self) -> impl Iterator<Item = Self::Pixel> + '_ {
        self.iter_opt().flatten()
    }

    /// Iterate over all the cell locations of the raster, regardless of their nodata status
    fn cells(&self) -> CellIterator {
        CellIterator::for_raster_with_size(self.size())
    }

    /// Create a raster of the same backend by applying the operation on every data cell.
    /// Cells where the operation returns `None` become nodata, the result raster gets the provided nodata value.
    fn map_values<U, F>(&self, nodata: Option<f64>, op: F) -> Result<Self::WithPixelType<U>>
    where
        U: RasterNum,
        F: Fn(Self::Pixel) -> Option<U> + Sync + Send,
    {
        let meta = self.metadata().clone().with_nodata(nodata);
        Self::WithPixelType::<U>::from_cells(meta, |index| self.value(index).and_then(&op))
    }
}
