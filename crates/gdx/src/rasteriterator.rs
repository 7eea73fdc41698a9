//! Iterators over the cells of a raster buffer.
//!
//! A [`RasterIterator`] walks a rectangular region of a row-major buffer and skips the cells that are
//! rejected by its value filter (e.g. nodata cells) or by its location filter (e.g. cells outside of a circle).
//! When the region is narrower than the raster the iterator jumps over the remainder of each raster row.

use crate::{Cell, Raster, RasterArea, RasterNum, nodata::NodataPolicy};

/// Decides based on the stored value whether a cell is excluded from the iteration
pub trait ValueFilter<T>: Copy {
    fn excludes(&self, index: usize, value: T) -> bool;
}

/// Excludes the cells that contain the structural nodata representation of the policy
#[derive(Debug, Clone, Copy)]
pub struct NodataValueFilter<P> {
    policy: P,
}

impl<P> NodataValueFilter<P> {
    pub fn new(policy: P) -> Self {
        NodataValueFilter { policy }
    }
}

impl<T, P: NodataPolicy<T>> ValueFilter<T> for NodataValueFilter<P> {
    #[inline]
    fn excludes(&self, _index: usize, value: T) -> bool {
        self.policy.is_missing(value)
    }
}

/// Excludes the cells that are flagged in the nodata mask, an empty mask excludes nothing
#[derive(Debug, Clone, Copy)]
pub struct MaskValueFilter<'a> {
    mask: &'a [bool],
}

impl<'a> MaskValueFilter<'a> {
    pub fn new(mask: &'a [bool]) -> Self {
        MaskValueFilter { mask }
    }
}

impl<T> ValueFilter<T> for MaskValueFilter<'_> {
    #[inline]
    fn excludes(&self, index: usize, _value: T) -> bool {
        !self.mask.is_empty() && self.mask[index]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllValues;

impl<T> ValueFilter<T> for AllValues {
    #[inline]
    fn excludes(&self, _index: usize, _value: T) -> bool {
        false
    }
}

/// Decides based on its location whether a cell is excluded from the iteration
pub trait LocationFilter: Copy {
    fn excludes(&self, cell: Cell) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllLocations;

impl LocationFilter for AllLocations {
    #[inline]
    fn excludes(&self, _cell: Cell) -> bool {
        false
    }
}

/// Excludes a single cell
#[derive(Debug, Clone, Copy)]
pub struct ExcludeCell(pub Cell);

impl LocationFilter for ExcludeCell {
    #[inline]
    fn excludes(&self, cell: Cell) -> bool {
        cell == self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterCellHandling {
    Include,
    Exclude,
}

/// Excludes the cells that are further away from the center than the radius
#[derive(Debug, Clone, Copy)]
pub struct CircularArea {
    center: Cell,
    radius: f64,
    center_cell: CenterCellHandling,
}

impl CircularArea {
    pub fn new(center: Cell, radius: i32, center_cell: CenterCellHandling) -> Self {
        CircularArea {
            center,
            radius: radius as f64,
            center_cell,
        }
    }
}

impl LocationFilter for CircularArea {
    #[inline]
    fn excludes(&self, cell: Cell) -> bool {
        if cell == self.center {
            return self.center_cell == CenterCellHandling::Exclude;
        }

        self.center.distance(&cell) > self.radius
    }
}

/// Walks the cells of an area in row-major order
#[derive(Debug, Clone, Copy)]
struct AreaWalker {
    area: RasterArea,
    raster_cols: i32,
    next: Cell,
}

/// The area has to lie within a raster of `raster_cols` columns backed by `len` cells
fn area_fits(area: &RasterArea, raster_cols: i32, len: usize) -> bool {
    if area.is_empty() {
        return true;
    }

    let bottom_right = area.bottom_right();
    area.top_left.row >= 0
        && area.top_left.col >= 0
        && bottom_right.col < raster_cols
        && (bottom_right.row as usize * raster_cols as usize + bottom_right.col as usize) < len
}

impl AreaWalker {
    fn new(area: RasterArea, raster_cols: i32) -> Self {
        let next = if area.is_empty() { Cell::invalid() } else { area.top_left };
        AreaWalker { area, raster_cols, next }
    }

    /// Returns the next cell and its index in the raster buffer
    #[inline]
    fn step(&mut self) -> Option<(Cell, usize)> {
        if !self.next.is_valid() {
            return None;
        }

        let cell = self.next;
        let mut next = cell;
        next.col += 1;
        if next.col >= self.area.top_left.col + self.area.cols {
            next.col = self.area.top_left.col;
            next.row += 1;
        }

        self.next = if next.row >= self.area.top_left.row + self.area.rows {
            Cell::invalid()
        } else {
            next
        };

        Some((cell, cell.index_in_raster(self.raster_cols)))
    }
}

/// Value iterator over a region of a raster buffer, excluded cells are skipped.
/// An exhausted iterator stays exhausted, clone a fresh iterator to restart the iteration.
#[derive(Clone)]
pub struct RasterIterator<'a, T, V, L> {
    data: &'a [T],
    walker: AreaWalker,
    current: Cell,
    value_filter: V,
    location_filter: L,
}

impl<'a, T, V, L> RasterIterator<'a, T, V, L>
where
    T: RasterNum,
    V: ValueFilter<T>,
    L: LocationFilter,
{
    /// # Panics
    /// In debug builds when the area does not fit in the data
    pub fn new(data: &'a [T], raster_cols: i32, area: RasterArea, value_filter: V, location_filter: L) -> Self {
        debug_assert!(area_fits(&area, raster_cols, data.len()), "Raster area {area:?} outside of the raster data");
        RasterIterator {
            data,
            walker: AreaWalker::new(area, raster_cols),
            current: Cell::invalid(),
            value_filter,
            location_filter,
        }
    }

    /// The location of the value that was returned by the last call to `next`
    pub fn cell(&self) -> Cell {
        self.current
    }

    /// Adapt the iterator to also yield the location of every value
    pub fn with_cells(self) -> CellValueIterator<'a, T, V, L> {
        CellValueIterator { iter: self }
    }

    fn next_entry(&mut self) -> Option<(Cell, T)> {
        while let Some((cell, index)) = self.walker.step() {
            if self.location_filter.excludes(cell) {
                continue;
            }

            let value = self.data[index];
            if self.value_filter.excludes(index, value) {
                continue;
            }

            self.current = cell;
            return Some((cell, value));
        }

        self.current = Cell::invalid();
        None
    }
}

impl<T, V, L> Iterator for RasterIterator<'_, T, V, L>
where
    T: RasterNum,
    V: ValueFilter<T>,
    L: LocationFilter,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|(_, value)| value)
    }
}

pub struct CellValueIterator<'a, T, V, L> {
    iter: RasterIterator<'a, T, V, L>,
}

impl<T, V, L> Iterator for CellValueIterator<'_, T, V, L>
where
    T: RasterNum,
    V: ValueFilter<T>,
    L: LocationFilter,
{
    type Item = (Cell, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next_entry()
    }
}

/// Mutable value iterator over a region of a raster buffer, excluded cells are skipped
pub struct RasterIteratorMut<'a, T, V, L> {
    // the part of the buffer that has not been handed out yet, starting at `offset`
    rest: &'a mut [T],
    offset: usize,
    walker: AreaWalker,
    current: Cell,
    value_filter: V,
    location_filter: L,
}

impl<'a, T, V, L> RasterIteratorMut<'a, T, V, L>
where
    T: RasterNum,
    V: ValueFilter<T>,
    L: LocationFilter,
{
    /// # Panics
    /// In debug builds when the area does not fit in the data
    pub fn new(data: &'a mut [T], raster_cols: i32, area: RasterArea, value_filter: V, location_filter: L) -> Self {
        debug_assert!(area_fits(&area, raster_cols, data.len()), "Raster area {area:?} outside of the raster data");
        RasterIteratorMut {
            rest: data,
            offset: 0,
            walker: AreaWalker::new(area, raster_cols),
            current: Cell::invalid(),
            value_filter,
            location_filter,
        }
    }

    pub fn cell(&self) -> Cell {
        self.current
    }
}

impl<'a, T, V, L> Iterator for RasterIteratorMut<'a, T, V, L>
where
    T: RasterNum,
    V: ValueFilter<T>,
    L: LocationFilter,
{
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((cell, index)) = self.walker.step() {
            if self.location_filter.excludes(cell) {
                continue;
            }

            let local_index = index - self.offset;
            if self.value_filter.excludes(index, self.rest[local_index]) {
                continue;
            }

            let rest = std::mem::take(&mut self.rest);
            let (item, tail) = rest[local_index..].split_first_mut()?;
            self.rest = tail;
            self.offset = index + 1;
            self.current = cell;
            return Some(item);
        }

        self.current = Cell::invalid();
        None
    }
}

/// Optional-like view on a cell of a raster that represents nodata structurally
pub struct ValueProxy<'a, T: RasterNum> {
    value: &'a mut T,
    policy: T::Policy,
}

impl<'a, T: RasterNum> ValueProxy<'a, T> {
    pub fn new(value: &'a mut T, policy: T::Policy) -> Self {
        ValueProxy { value, policy }
    }

    pub fn has_value(&self) -> bool {
        !self.policy.is_missing(*self.value)
    }

    pub fn is_nodata(&self) -> bool {
        !self.has_value()
    }

    pub fn value(&self) -> Option<T> {
        self.policy.read(*self.value)
    }

    pub fn set(&mut self, value: T) {
        *self.value = value;
    }

    pub fn assign(&mut self, value: Option<T>) {
        match value {
            Some(v) => self.set(v),
            None => self.reset(),
        }
    }

    /// Turn the cell into nodata
    ///
    /// # Panics
    /// When the raster has no nodata value configured
    pub fn reset(&mut self) {
        match self.policy.missing_value() {
            Some(nodata) => *self.value = nodata,
            None => panic!("Cannot mark a cell as nodata in a raster without nodata value"),
        }
    }
}

impl<T: RasterNum> std::ops::Deref for ValueProxy<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
    }
}

impl<T: RasterNum> std::ops::DerefMut for ValueProxy<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value
    }
}

/// Optional-like view on a cell of a raster that represents nodata with a mask
pub struct MaskValueProxy<'a, T> {
    value: &'a mut T,
    nodata: &'a mut bool,
}

impl<'a, T: RasterNum> MaskValueProxy<'a, T> {
    pub fn new(value: &'a mut T, nodata: &'a mut bool) -> Self {
        MaskValueProxy { value, nodata }
    }

    pub fn has_value(&self) -> bool {
        !*self.nodata
    }

    pub fn is_nodata(&self) -> bool {
        *self.nodata
    }

    pub fn value(&self) -> Option<T> {
        if *self.nodata { None } else { Some(*self.value) }
    }

    /// Assign the value, the cell becomes a data cell
    pub fn set(&mut self, value: T) {
        *self.value = value;
        *self.nodata = false;
    }

    pub fn assign(&mut self, value: Option<T>) {
        match value {
            Some(v) => self.set(v),
            None => self.reset(),
        }
    }

    pub fn reset(&mut self) {
        *self.nodata = true;
    }
}

impl<T> std::ops::Deref for MaskValueProxy<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
    }
}

impl<T> std::ops::DerefMut for MaskValueProxy<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value
    }
}

/// Rasters that store their values in a contiguous row-major buffer with a filter that identifies the nodata cells.
/// Provides the building blocks for the value iterators and the area views.
pub trait IterableRaster: Raster {
    type Filter<'a>: ValueFilter<Self::Pixel>
    where
        Self: 'a;

    fn filtered_data(&self) -> (&[Self::Pixel], Self::Filter<'_>);
    fn filtered_data_mut(&mut self) -> (&mut [Self::Pixel], Self::Filter<'_>);

    /// Iterate over the data values of the raster, nodata cells are skipped
    fn values(&self) -> RasterIterator<'_, Self::Pixel, Self::Filter<'_>, AllLocations> {
        let area = RasterArea::full(self.size());
        let cols = self.cols();
        let (data, filter) = self.filtered_data();
        RasterIterator::new(data, cols, area, filter, AllLocations)
    }

    /// Iterate mutably over the data values of the raster, nodata cells are skipped
    fn values_mut(&mut self) -> RasterIteratorMut<'_, Self::Pixel, Self::Filter<'_>, AllLocations> {
        let area = RasterArea::full(self.size());
        let cols = self.cols();
        let (data, filter) = self.filtered_data_mut();
        RasterIteratorMut::new(data, cols, area, filter, AllLocations)
    }
}
