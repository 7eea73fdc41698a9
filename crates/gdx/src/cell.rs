use crate::RasterSize;

/// Represents a point in the raster using row, col coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn from_row_col(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub const fn invalid() -> Self {
        Cell { row: -1, col: -1 }
    }

    pub const fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }

    /// Check if the cell lies within a raster of the given size
    pub const fn is_in_raster(&self, size: RasterSize) -> bool {
        self.is_valid() && self.row < size.rows && self.col < size.cols
    }

    pub fn increment(&mut self, cols_in_grid: i32) {
        self.col += 1;
        if self.col >= cols_in_grid {
            self.col = 0;
            self.row += 1;
        }
    }

    /// Row-major index of the cell in a raster with the given number of columns
    pub fn index_in_raster(&self, cols_in_grid: i32) -> usize {
        assert!(self.is_valid(), "Index requested for invalid cell {self}");
        (self.row as usize) * (cols_in_grid as usize) + self.col as usize
    }

    pub fn from_index(index: usize, cols_in_grid: i32) -> Self {
        let cols = cols_in_grid as usize;
        Cell::from_row_col((index / cols) as i32, (index % cols) as i32)
    }

    pub fn distance(&self, other: &Cell) -> f64 {
        let x = (other.col - self.col) as f64;
        let y = (other.row - self.row) as f64;

        (x * x + y * y).sqrt()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

/// Iterator over the cells in a raster
/// The iterator will yield each cell in the raster based on the specified number of rows and columns.
/// Iteration will occur from the top-left cell to the bottom-right cell in row-major order.
#[derive(Clone)]
pub struct CellIterator {
    rows: i32,
    cols: i32,
    current: Cell,
}

impl CellIterator {
    pub fn for_rows_cols(rows: i32, cols: i32) -> Self {
        CellIterator {
            rows: if cols > 0 { rows } else { 0 },
            cols,
            current: Cell::from_row_col(0, 0),
        }
    }

    pub fn for_raster_with_size(size: RasterSize) -> Self {
        Self::for_rows_cols(size.rows, size.cols)
    }
}

impl Iterator for CellIterator {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.row >= self.rows {
            return None;
        }

        let current = self.current;
        self.current.increment(self.cols);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.current.row >= self.rows {
            0
        } else {
            ((self.rows - self.current.row) * self.cols - self.current.col) as usize
        };

        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellIterator {}
