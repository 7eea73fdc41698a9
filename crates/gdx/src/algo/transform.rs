use inf::{Error, Result};

use crate::Raster;

use super::check_sizes_match;

fn check_nodata_support(output: &impl Raster, nodata_needed: bool) -> Result<()> {
    if nodata_needed && !output.can_represent_nodata() {
        return Err(Error::Runtime("Output raster without nodata value cannot represent the nodata cells".into()));
    }

    Ok(())
}

/// Calculate the output cells from the input cells, nodata input cells result in nodata output cells.
/// Fails without modifying the output when the output cannot represent the nodata cells of the input.
pub fn transform<R1, R2, F>(input: &R1, output: &mut R2, op: F) -> Result<()>
where
    R1: Raster,
    R2: Raster,
    F: Fn(R1::Pixel) -> R2::Pixel,
{
    check_sizes_match(input, output)?;
    check_nodata_support(output, input.has_nodata())?;

    for index in 0..input.len() {
        output.set_value(index, input.value(index).map(&op));
    }

    Ok(())
}

/// Calculate the output cells from the cells of two inputs, the output cell is nodata when one of the input cells is nodata
pub fn transform_binary<R1, R2, R3, F>(input1: &R1, input2: &R2, output: &mut R3, op: F) -> Result<()>
where
    R1: Raster,
    R2: Raster,
    R3: Raster,
    F: Fn(R1::Pixel, R2::Pixel) -> R3::Pixel,
{
    check_sizes_match(input1, input2)?;
    check_sizes_match(input1, output)?;
    check_nodata_support(output, input1.has_nodata() || input2.has_nodata())?;

    for index in 0..input1.len() {
        let value = match (input1.value(index), input2.value(index)) {
            (Some(v1), Some(v2)) => Some(op(v1, v2)),
            _ => None,
        };

        output.set_value(index, value);
    }

    Ok(())
}

/// Calls the operation for every data value of the raster in row-major order
pub fn for_each_data_value<R, F>(raster: &R, op: F)
where
    R: Raster,
    F: FnMut(R::Pixel),
{
    raster.value_iter().for_each(op);
}

/// Calls the operation for every cell where both rasters contain data
pub fn for_each_data_value_pair<R1, R2, F>(input1: &R1, input2: &R2, mut op: F) -> Result<()>
where
    R1: Raster,
    R2: Raster,
    F: FnMut(R1::Pixel, R2::Pixel),
{
    check_sizes_match(input1, input2)?;

    for (v1, v2) in input1.iter_opt().zip(input2.iter_opt()) {
        if let (Some(v1), Some(v2)) = (v1, v2) {
            op(v1, v2);
        }
    }

    Ok(())
}

/// Calls the operation for every cell with the optional values of both rasters.
/// The operation can modify the cell of the first raster, assigning `None` turns the cell into nodata.
pub fn for_each_optional_value<R1, R2, F>(input1: &mut R1, input2: &R2, mut op: F) -> Result<()>
where
    R1: Raster,
    R2: Raster,
    F: FnMut(&mut Option<R1::Pixel>, Option<R2::Pixel>),
{
    check_sizes_match(input1, input2)?;

    let mut updates = Vec::new();
    for index in 0..input1.len() {
        let current = input1.value(index);
        let mut value = current;
        op(&mut value, input2.value(index));

        let modified = match (current, value) {
            (Some(c), Some(v)) => c != v,
            (None, None) => false,
            _ => true,
        };

        if modified {
            updates.push((index, value));
        }
    }

    check_nodata_support(input1, updates.iter().any(|(_, value)| value.is_none()))?;
    for (index, value) in updates {
        input1.set_value(index, value);
    }

    Ok(())
}
