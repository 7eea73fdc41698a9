use crate::{Cell, RasterSize};

/// Descriptor of a raster: its dimensions, the optional nodata value and the georeferencing.
/// The origin (`xll`, `yll`) is the lower left corner of the raster.
/// The nodata value is kept as `f64` so it can be carried unchanged between rasters of different pixel types.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterMetadata {
    pub rows: i32,
    pub cols: i32,
    pub nodata: Option<f64>,
    pub cell_size: f64,
    pub xll: f64,
    pub yll: f64,
    /// EPSG code of the projection
    pub projection: Option<i32>,
}

impl Default for RasterMetadata {
    fn default() -> Self {
        Self::with_rows_cols(0, 0)
    }
}

impl RasterMetadata {
    pub const fn with_rows_cols(rows: i32, cols: i32) -> Self {
        RasterMetadata {
            rows,
            cols,
            nodata: None,
            cell_size: 0.0,
            xll: 0.0,
            yll: 0.0,
            projection: None,
        }
    }

    pub const fn sized_with_nodata(size: RasterSize, nodata: Option<f64>) -> Self {
        RasterMetadata {
            nodata,
            ..Self::with_rows_cols(size.rows, size.cols)
        }
    }

    pub fn with_nodata(self, nodata: Option<f64>) -> Self {
        RasterMetadata { nodata, ..self }
    }

    pub fn with_cell_size(self, cell_size: f64) -> Self {
        RasterMetadata { cell_size, ..self }
    }

    pub fn with_origin(self, xll: f64, yll: f64) -> Self {
        RasterMetadata { xll, yll, ..self }
    }

    pub fn with_projection(self, epsg: i32) -> Self {
        RasterMetadata {
            projection: Some(epsg),
            ..self
        }
    }

    pub fn size(&self) -> RasterSize {
        RasterSize::with_rows_cols(self.rows, self.cols)
    }

    pub fn cell_count(&self) -> usize {
        self.size().cell_count()
    }

    pub fn contains_cell(&self, cell: Cell) -> bool {
        cell.is_in_raster(self.size())
    }

    /// X coordinate of the center of the given column
    pub fn center_x(&self, col: i32) -> f64 {
        self.xll + (col as f64 + 0.5) * self.cell_size
    }

    /// Y coordinate of the center of the given row
    pub fn center_y(&self, row: i32) -> f64 {
        self.yll + (self.rows as f64 - row as f64 - 0.5) * self.cell_size
    }
}

fn nodata_eq(lhs: Option<f64>, rhs: Option<f64>) -> bool {
    match (lhs, rhs) {
        (Some(l), Some(r)) => l == r || (l.is_nan() && r.is_nan()),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for RasterMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && nodata_eq(self.nodata, other.nodata)
            && self.cell_size == other.cell_size
            && self.xll == other.xll
            && self.yll == other.yll
            && self.projection == other.projection
    }
}

impl std::fmt::Display for RasterMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Meta rows: {} cols: {} xll: {} yll: {} cellsize: {} nodata: {:?} epsg: {:?}",
            self.rows, self.cols, self.xll, self.yll, self.cell_size, self.nodata, self.projection
        )
    }
}
