//! Windows over a rectangular or circular region of a raster.
//!
//! The regions are clipped to the raster bounds, cells outside of the raster are never visited.
//! The returned iterators skip the nodata cells and report the location of the last value through `cell()`.

use crate::{
    Cell, Raster, RasterSize,
    rasteriterator::{
        AllLocations, CenterCellHandling, CircularArea, ExcludeCell, IterableRaster, LocationFilter, RasterIterator, RasterIteratorMut,
    },
};

/// A rectangular region within a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterArea {
    pub top_left: Cell,
    pub rows: i32,
    pub cols: i32,
}

impl RasterArea {
    pub const fn new(top_left: Cell, rows: i32, cols: i32) -> Self {
        RasterArea { top_left, rows, cols }
    }

    /// The area that covers the full raster
    pub const fn full(size: RasterSize) -> Self {
        RasterArea::new(Cell::from_row_col(0, 0), size.rows, size.cols)
    }

    pub const fn is_empty(&self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// The last cell of the area, invalid for empty areas
    pub const fn bottom_right(&self) -> Cell {
        if self.is_empty() {
            return Cell::invalid();
        }

        Cell::from_row_col(self.top_left.row + self.rows - 1, self.top_left.col + self.cols - 1)
    }

    pub fn cell_count(&self) -> usize {
        if self.is_empty() { 0 } else { self.rows as usize * self.cols as usize }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        !self.is_empty()
            && cell.row >= self.top_left.row
            && cell.col >= self.top_left.col
            && cell.row < self.top_left.row + self.rows
            && cell.col < self.top_left.col + self.cols
    }
}

/// The square around the center cell with the given radius, clipped to the raster bounds.
/// A negative radius results in an empty area.
pub fn clip_area_to_raster(size: RasterSize, center: Cell, radius: i32) -> RasterArea {
    if radius < 0 {
        return RasterArea::new(center, 0, 0);
    }

    let top = (center.row - radius).max(0);
    let left = (center.col - radius).max(0);
    let bottom = (center.row + radius).min(size.rows - 1);
    let right = (center.col + radius).min(size.cols - 1);

    if bottom < top || right < left {
        return RasterArea::new(Cell::from_row_col(top, left), 0, 0);
    }

    RasterArea::new(Cell::from_row_col(top, left), bottom - top + 1, right - left + 1)
}

/// The rectangle starting at the top left cell, clipped to the raster bounds
pub fn clip_rect_to_raster(size: RasterSize, top_left: Cell, rows: i32, cols: i32) -> RasterArea {
    if !top_left.is_in_raster(size) {
        return RasterArea::new(top_left, 0, 0);
    }

    RasterArea::new(
        top_left,
        rows.min(size.rows - top_left.row).max(0),
        cols.min(size.cols - top_left.col).max(0),
    )
}

/// Value iterator over an area of a raster
pub type AreaIterator<'a, R, L> = RasterIterator<'a, <R as Raster>::Pixel, <R as IterableRaster>::Filter<'a>, L>;
pub type AreaIteratorMut<'a, R, L> = RasterIteratorMut<'a, <R as Raster>::Pixel, <R as IterableRaster>::Filter<'a>, L>;

fn area_iter<R: IterableRaster, L: LocationFilter>(raster: &R, area: RasterArea, location_filter: L) -> AreaIterator<'_, R, L> {
    let cols = raster.cols();
    let (data, filter) = raster.filtered_data();
    RasterIterator::new(data, cols, area, filter, location_filter)
}

fn area_iter_mut<R: IterableRaster, L: LocationFilter>(raster: &mut R, area: RasterArea, location_filter: L) -> AreaIteratorMut<'_, R, L> {
    let cols = raster.cols();
    let (data, filter) = raster.filtered_data_mut();
    RasterIteratorMut::new(data, cols, area, filter, location_filter)
}

/// The data values of the cells in the square around the center cell, the center cell itself is excluded
pub fn neighbouring_cells_square<R: IterableRaster>(raster: &R, center: Cell, radius: i32) -> AreaIterator<'_, R, ExcludeCell> {
    let area = clip_area_to_raster(raster.size(), center, radius);
    area_iter(raster, area, ExcludeCell(center))
}

/// The data values of the cells in the square around the center cell, including the center cell
pub fn cells_square<R: IterableRaster>(raster: &R, center: Cell, radius: i32) -> AreaIterator<'_, R, AllLocations> {
    let area = clip_area_to_raster(raster.size(), center, radius);
    area_iter(raster, area, AllLocations)
}

pub fn cells_square_mut<R: IterableRaster>(raster: &mut R, center: Cell, radius: i32) -> AreaIteratorMut<'_, R, AllLocations> {
    let area = clip_area_to_raster(raster.size(), center, radius);
    area_iter_mut(raster, area, AllLocations)
}

/// The data values of the cells within the radius (inclusive) of the center cell, the center cell itself is excluded
pub fn neighbouring_cells_circular<R: IterableRaster>(raster: &R, center: Cell, radius: i32) -> AreaIterator<'_, R, CircularArea> {
    let area = clip_area_to_raster(raster.size(), center, radius);
    area_iter(raster, area, CircularArea::new(center, radius, CenterCellHandling::Exclude))
}

pub fn cells_circular<R: IterableRaster>(raster: &R, center: Cell, radius: i32) -> AreaIterator<'_, R, CircularArea> {
    let area = clip_area_to_raster(raster.size(), center, radius);
    area_iter(raster, area, CircularArea::new(center, radius, CenterCellHandling::Include))
}

/// The data values of a rectangular block of the raster
pub fn sub_area<R: IterableRaster>(raster: &R, top_left: Cell, rows: i32, cols: i32) -> AreaIterator<'_, R, AllLocations> {
    let area = clip_rect_to_raster(raster.size(), top_left, rows, cols);
    area_iter(raster, area, AllLocations)
}

/// Mutable access to the data values of a rectangular block of the raster, nodata cells are not visited
pub fn sub_area_mut<R: IterableRaster>(raster: &mut R, top_left: Cell, rows: i32, cols: i32) -> AreaIteratorMut<'_, R, AllLocations> {
    let area = clip_rect_to_raster(raster.size(), top_left, rows, cols);
    area_iter_mut(raster, area, AllLocations)
}
