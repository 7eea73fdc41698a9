/// Raster size represented by rows and columns.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterSize {
    pub rows: i32,
    pub cols: i32,
}

impl RasterSize {
    pub const fn with_rows_cols(rows: i32, cols: i32) -> Self {
        RasterSize { rows, cols }
    }

    pub const fn square(size: i32) -> Self {
        RasterSize { rows: size, cols: size }
    }

    pub fn empty() -> Self {
        Self::with_rows_cols(0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn cell_count(&self) -> usize {
        self.rows.max(0) as usize * self.cols.max(0) as usize
    }

    pub fn max_dimension(&self) -> i32 {
        self.rows.max(self.cols)
    }
}

impl std::fmt::Display for RasterSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(rows: {}, cols: {})", self.rows, self.cols)
    }
}

impl std::fmt::Debug for RasterSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
