use inf::{Error, Result};

use crate::{Cell, Raster, RasterMetadata, RasterNum, nodata, rasterutil};

fn sparse_nodata<T: RasterNum>(meta: &RasterMetadata) -> Result<T> {
    nodata::validate_nodata::<T>(meta.nodata)?;
    inf::cast::option(meta.nodata)
        .ok_or_else(|| Error::InvalidConfiguration("Sparse rasters must have a nodata value".into()))
}

/// Raster implementation using a compressed row storage.
/// Only the data cells are stored, a cell without a stored entry is nodata.
/// A stored entry is always data, even when its value equals the nodata value.
#[derive(Debug)]
pub struct SparseRaster<T: RasterNum> {
    meta: RasterMetadata,
    nodata: T,
    // rows + 1 offsets into the entry arrays
    row_offsets: Vec<usize>,
    col_indices: Vec<i32>,
    values: Vec<T>,
}

impl<T: RasterNum> SparseRaster<T> {
    fn empty(meta: RasterMetadata) -> Result<Self> {
        let nodata = sparse_nodata::<T>(&meta)?;
        rasterutil::check_data_size(&meta, meta.cell_count())?;
        let row_offsets = vec![0; meta.rows as usize + 1];

        Ok(SparseRaster {
            meta,
            nodata,
            row_offsets,
            col_indices: Vec::new(),
            values: Vec::new(),
        })
    }

    /// Build the raster from `(index, value)` entries in ascending index order
    fn from_sorted_entries(meta: RasterMetadata, entries: impl Iterator<Item = (usize, T)>) -> Result<Self> {
        let mut raster = Self::empty(meta)?;
        let cols = raster.meta.cols as usize;

        for (index, value) in entries {
            raster.row_offsets[index / cols + 1] += 1;
            raster.col_indices.push((index % cols) as i32);
            raster.values.push(value);
        }

        for row in 1..raster.row_offsets.len() {
            raster.row_offsets[row] += raster.row_offsets[row - 1];
        }

        Ok(raster)
    }

    /// Create a raster from a list of cells with their value, cells that are not listed are nodata.
    /// When a cell is listed multiple times the last value wins.
    pub fn from_triplets(meta: RasterMetadata, mut triplets: Vec<(Cell, T)>) -> Result<Self> {
        if let Some((cell, _)) = triplets.iter().find(|(cell, _)| !meta.contains_cell(*cell)) {
            return Err(Error::InvalidArgument(format!(
                "Cell {} outside of raster {}x{}",
                cell, meta.rows, meta.cols
            )));
        }

        triplets.sort_by_key(|(cell, _)| *cell);
        let mut entries: Vec<(usize, T)> = Vec::with_capacity(triplets.len());
        for (cell, value) in triplets {
            let index = cell.index_in_raster(meta.cols);
            match entries.last_mut() {
                Some(last) if last.0 == index => last.1 = value,
                _ => entries.push((index, value)),
            }
        }

        Self::from_sorted_entries(meta, entries.into_iter())
    }

    pub fn copy(&self) -> Self {
        SparseRaster {
            meta: self.meta.clone(),
            nodata: self.nodata,
            row_offsets: self.row_offsets.clone(),
            col_indices: self.col_indices.clone(),
            values: self.values.clone(),
        }
    }

    fn is_nodata_value(&self, value: T) -> bool {
        value == self.nodata || value.is_nan()
    }

    /// Position of the cell in the entry arrays, or the position where it has to be inserted
    fn position(&self, index: usize) -> (usize, std::result::Result<usize, usize>) {
        let cols = self.meta.cols as usize;
        let (row, col) = (index / cols, (index % cols) as i32);
        let start = self.row_offsets[row];
        let pos = self.col_indices[start..self.row_offsets[row + 1]]
            .binary_search(&col)
            .map(|p| start + p)
            .map_err(|p| start + p);

        (row, pos)
    }

    /// Number of cells that are stored, which equals the number of data cells
    pub fn stored_count(&self) -> usize {
        self.values.len()
    }

    /// The stored values in row-major order
    pub fn stored_values(&self) -> &[T] {
        &self.values
    }

    /// Iterate over the stored cells with their location in row-major order
    pub fn stored_cells(&self) -> impl Iterator<Item = (Cell, T)> + '_ {
        (0..self.meta.rows.max(0) as usize).flat_map(move |row| {
            (self.row_offsets[row]..self.row_offsets[row + 1])
                .map(move |entry| (Cell::from_row_col(row as i32, self.col_indices[entry]), self.values[entry]))
        })
    }

    /// Iterate over all the cells, nodata cells yield the nodata value of the raster
    pub fn iter_with_nodata(&self) -> impl Iterator<Item = T> + '_ {
        let nodata = self.nodata;
        self.iter_opt().map(move |v| v.unwrap_or(nodata))
    }

    /// Only keep the entries that match the predicate
    fn retain(&mut self, keep: impl Fn(T) -> bool) {
        let mut write = 0;
        let mut entry = 0;
        for row in 0..self.row_offsets.len() - 1 {
            let row_end = self.row_offsets[row + 1];
            while entry < row_end {
                if keep(self.values[entry]) {
                    self.col_indices[write] = self.col_indices[entry];
                    self.values[write] = self.values[entry];
                    write += 1;
                }
                entry += 1;
            }

            self.row_offsets[row + 1] = write;
        }

        self.col_indices.truncate(write);
        self.values.truncate(write);
    }

    fn clear(&mut self) {
        self.row_offsets.fill(0);
        self.col_indices.clear();
        self.values.clear();
    }

    /// Assigns the value to all the cells, the raster is empty afterwards if the value is the nodata value
    pub fn fill(&mut self, value: T) {
        if self.is_nodata_value(value) {
            self.clear();
            return;
        }

        let cols = self.meta.cols.max(0) as usize;
        self.row_offsets = (0..=self.meta.rows.max(0) as usize).map(|row| row * cols).collect();
        self.col_indices = (0..self.meta.rows.max(0)).flat_map(|_| 0..cols as i32).collect();
        self.values = vec![value; self.meta.cell_count()];
    }

    /// Assigns the value to the stored cells, nodata cells remain nodata
    pub fn fill_values(&mut self, value: T) {
        self.values.fill(value);
    }

    pub fn fill_with_nodata(&mut self) {
        self.clear();
    }

    /// Removes the stored cells that contain the value
    pub fn turn_value_into_nodata(&mut self, value: T) {
        self.retain(|v| v != value);
    }

    pub fn set_metadata(&mut self, meta: RasterMetadata) -> Result<()> {
        if meta.rows != self.meta.rows || meta.cols != self.meta.cols {
            return Err(Error::InvalidArgument("Cannot change metadata: invalid size".into()));
        }

        self.nodata = sparse_nodata::<T>(&meta)?;
        self.meta = meta;
        Ok(())
    }

    /// Change the dimensions of the raster, all cells are nodata afterwards
    pub fn resize(&mut self, rows: i32, cols: i32) {
        self.meta.rows = rows.max(0);
        self.meta.cols = cols.max(0);
        self.row_offsets = vec![0; self.meta.rows as usize + 1];
        self.col_indices.clear();
        self.values.clear();
    }

    pub fn resize_and_fill(&mut self, rows: i32, cols: i32, value: T) {
        self.resize(rows, cols);
        self.fill(value);
    }
}

/// Iterates over all the cells of a sparse raster in row-major order by merging the stored entries with the grid
pub struct SparseCells<'a, T: RasterNum> {
    raster: &'a SparseRaster<T>,
    index: usize,
    entry: usize,
    entry_row: usize,
}

impl<T: RasterNum> Iterator for SparseCells<'_, T> {
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let raster = self.raster;
        if self.index >= raster.len() {
            return None;
        }

        let cols = raster.meta.cols as usize;
        let (row, col) = (self.index / cols, self.index % cols);
        self.index += 1;

        if self.entry < raster.values.len() {
            while raster.row_offsets[self.entry_row + 1] <= self.entry {
                self.entry_row += 1;
            }

            if self.entry_row == row && raster.col_indices[self.entry] as usize == col {
                self.entry += 1;
                return Some(Some(raster.values[self.entry - 1]));
            }
        }

        Some(None)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.raster.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: RasterNum> ExactSizeIterator for SparseCells<'_, T> {}

impl<T: RasterNum> Raster for SparseRaster<T> {
    type Pixel = T;
    type WithPixelType<U: RasterNum> = SparseRaster<U>;

    fn new(meta: RasterMetadata) -> Result<Self> {
        Self::empty(meta)
    }

    fn filled_with(meta: RasterMetadata, value: T) -> Result<Self> {
        let mut raster = Self::empty(meta)?;
        raster.fill(value);
        Ok(raster)
    }

    fn filled_with_nodata(meta: RasterMetadata) -> Result<Self> {
        Self::empty(meta)
    }

    /// The cells that contain the nodata value (or NaN) are not stored
    fn from_vec(meta: RasterMetadata, data: Vec<T>) -> Result<Self> {
        let nodata = sparse_nodata::<T>(&meta)?;
        rasterutil::check_data_size(&meta, data.len())?;
        let entries = data
            .into_iter()
            .enumerate()
            .filter(|(_, v)| *v != nodata && !v.is_nan());

        Self::from_sorted_entries(meta, entries)
    }

    fn from_cells<F>(meta: RasterMetadata, cell_value: F) -> Result<Self>
    where
        F: Fn(usize) -> Option<T> + Sync + Send,
    {
        let mut raster = Self::empty(meta)?;
        let cols = raster.meta.cols.max(0) as usize;

        // only the data cells of a row are kept in memory
        let rows = rasterutil::map_rows(raster.meta.rows.max(0) as usize, |row| {
            (0..cols)
                .filter_map(|col| cell_value(row * cols + col).map(|v| (col as i32, v)))
                .collect::<Vec<_>>()
        });

        for (row, entries) in rows.into_iter().enumerate() {
            for (col, value) in entries {
                raster.col_indices.push(col);
                raster.values.push(value);
            }

            raster.row_offsets[row + 1] = raster.values.len();
        }

        Ok(raster)
    }

    fn metadata(&self) -> &RasterMetadata {
        &self.meta
    }

    fn set_nodata(&mut self, nodata: Option<f64>) -> Result<()> {
        let meta = self.meta.clone().with_nodata(nodata);
        self.nodata = sparse_nodata::<T>(&meta)?;
        log::debug!("Change raster nodata from {:?} to {:?}", self.meta.nodata, nodata);
        self.meta = meta;
        Ok(())
    }

    fn nodata(&self) -> Option<T> {
        Some(self.nodata)
    }

    fn is_nodata(&self, index: usize) -> bool {
        self.position(index).1.is_err()
    }

    fn value(&self, index: usize) -> Option<T> {
        self.position(index).1.ok().map(|entry| self.values[entry])
    }

    fn set_value(&mut self, index: usize, value: Option<T>) {
        let (row, pos) = self.position(index);
        match (pos, value) {
            (Ok(entry), Some(v)) => self.values[entry] = v,
            (Err(entry), Some(v)) => {
                self.col_indices.insert(entry, (index % self.meta.cols as usize) as i32);
                self.values.insert(entry, v);
                self.row_offsets[row + 1..].iter_mut().for_each(|offset| *offset += 1);
            }
            (Ok(entry), None) => {
                self.col_indices.remove(entry);
                self.values.remove(entry);
                self.row_offsets[row + 1..].iter_mut().for_each(|offset| *offset -= 1);
            }
            (Err(_), None) => {}
        }
    }

    fn nodata_count(&self) -> usize {
        self.len() - self.values.len()
    }

    fn has_nodata(&self) -> bool {
        self.values.len() < self.len()
    }

    fn iter_opt(&self) -> impl Iterator<Item = Option<T>> + '_ {
        SparseCells {
            raster: self,
            index: 0,
            entry: 0,
            entry_row: 0,
        }
    }

    fn value_iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    /// Only the stored cells are visited, the sparsity pattern of the result is a subset of the pattern of the input
    fn map_values<U, F>(&self, nodata: Option<f64>, op: F) -> Result<Self::WithPixelType<U>>
    where
        U: RasterNum,
        F: Fn(T) -> Option<U> + Sync + Send,
    {
        let meta = self.meta.clone().with_nodata(nodata);
        let mapped = rasterutil::collect_cells(self.values.len(), |entry| op(self.values[entry]));

        let cols = self.meta.cols as usize;
        let entries = self
            .stored_cells()
            .zip(mapped)
            .filter_map(|((cell, _), v)| v.map(|v| (cell.row as usize * cols + cell.col as usize, v)));

        SparseRaster::<U>::from_sorted_entries(meta, entries)
    }
}

impl<T: RasterNum> Clone for SparseRaster<T> {
    fn clone(&self) -> Self {
        log::warn!("Raster copy: should not happen");
        self.copy()
    }
}

impl<T: RasterNum> PartialEq for SparseRaster<T> {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta && self.iter_opt().eq(other.iter_opt())
    }
}
