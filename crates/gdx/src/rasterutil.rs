//! Data parallel primitives used by the raster backends.
//! Every output cell only depends on the same index of the inputs so the loops can be executed in any order.

use inf::{Error, Result};

use crate::RasterMetadata;

pub fn check_data_size(meta: &RasterMetadata, data_size: usize) -> Result<()> {
    if meta.rows < 0 || meta.cols < 0 || meta.cell_count() != data_size {
        return Err(Error::InvalidArgument(format!(
            "Raster data size does not match provided dimensions {} vs {}x{}",
            data_size, meta.rows, meta.cols
        )));
    }

    Ok(())
}

/// Calculate the value of every cell, `None` is returned as soon as one of the cells has no value
pub fn map_cells<T, F>(len: usize, cell_value: F) -> Option<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Option<T> + Sync + Send,
{
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            (0..len).into_par_iter().map(cell_value).collect()
        } else {
            (0..len).map(cell_value).collect()
        }
    }
}

/// Calculate the optional value of every cell
pub fn collect_cells<T, F>(len: usize, cell_value: F) -> Vec<Option<T>>
where
    T: Send,
    F: Fn(usize) -> Option<T> + Sync + Send,
{
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            (0..len).into_par_iter().map(cell_value).collect()
        } else {
            (0..len).map(cell_value).collect()
        }
    }
}

/// Calculate a result per row, used to process the cells of a row together
pub fn map_rows<T, F>(rows: usize, row_result: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            (0..rows).into_par_iter().map(row_result).collect()
        } else {
            (0..rows).map(row_result).collect()
        }
    }
}

/// Calculate the value of every cell together with its nodata flag,
/// cells without a value are flagged and receive the provided fill value
pub fn map_cells_with_mask<T, F>(len: usize, fill: T, cell_value: F) -> (Vec<T>, Vec<bool>)
where
    T: Copy + Send + Sync,
    F: Fn(usize) -> Option<T> + Sync + Send,
{
    let to_pair = |i: usize| match cell_value(i) {
        Some(v) => (v, false),
        None => (fill, true),
    };

    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            (0..len).into_par_iter().map(to_pair).unzip()
        } else {
            (0..len).map(to_pair).unzip()
        }
    }
}

pub fn for_each_mut<T, F>(data: &mut [T], op: F)
where
    T: Send,
    F: Fn(&mut T) + Sync + Send,
{
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            data.par_iter_mut().for_each(op);
        } else {
            data.iter_mut().for_each(op);
        }
    }
}

/// Sum of the cell values, cells without a value are skipped
pub fn sum_cells<F>(len: usize, cell_value: F) -> f64
where
    F: Fn(usize) -> Option<f64> + Sync + Send,
{
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;
            (0..len).into_par_iter().filter_map(cell_value).sum()
        } else {
            (0..len).filter_map(cell_value).sum()
        }
    }
}
