//! Nodata policies decide whether a raw cell value represents missing data
//! and which raw value has to be stored to represent a missing cell.
//!
//! Integral types use a configurable sentinel value, floating point types use NaN.
//! The policy for a pixel type is selected at compile time through [`RasterNum::Policy`].

use inf::{Error, Result};
use num::NumCast;

use crate::RasterNum;

pub trait NodataPolicy<T>: Copy + Send + Sync + std::fmt::Debug {
    fn is_missing(&self, value: T) -> bool;

    /// The raw value that represents a missing cell, `None` if missing cells cannot be represented
    fn missing_value(&self) -> Option<T>;

    #[inline]
    fn read(&self, value: T) -> Option<T>
    where
        T: Copy,
    {
        if self.is_missing(value) { None } else { Some(value) }
    }

    /// Convert an optional value to its raw representation, `None` if the value is missing
    /// and the policy has no way to represent it.
    #[inline]
    fn write(&self, value: Option<T>) -> Option<T> {
        match value {
            Some(v) => Some(v),
            None => self.missing_value(),
        }
    }
}

/// Nodata is represented by a configured sentinel value, compared by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentinelNodata<T> {
    nodata: Option<T>,
}

impl<T> SentinelNodata<T> {
    pub const fn new(nodata: Option<T>) -> Self {
        SentinelNodata { nodata }
    }
}

impl<T: Copy> SentinelNodata<T> {
    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }
}

impl<T: RasterNum> NodataPolicy<T> for SentinelNodata<T> {
    #[inline]
    fn is_missing(&self, value: T) -> bool {
        self.nodata == Some(value)
    }

    #[inline]
    fn missing_value(&self) -> Option<T> {
        self.nodata
    }
}

/// Nodata is represented by NaN, the configured nodata value is only relevant when exporting the data
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NanNodata;

impl<T: RasterNum + num::Float> NodataPolicy<T> for NanNodata {
    #[inline]
    fn is_missing(&self, value: T) -> bool {
        RasterNum::is_nan(value)
    }

    #[inline]
    fn missing_value(&self) -> Option<T> {
        Some(T::nan())
    }
}

/// Check that the nodata value can be used for rasters of pixel type `T`
pub fn validate_nodata<T: RasterNum>(nodata: Option<f64>) -> Result<()> {
    let Some(nod) = nodata else {
        return Ok(());
    };

    if T::HAS_NAN {
        return Ok(());
    }

    if nod.is_nan() {
        return Err(Error::InvalidConfiguration("Nodata value cannot be NaN for integral rasters".into()));
    }

    if !inf::cast::fits_in_type::<T>(nod) {
        return Err(Error::InvalidConfiguration(format!(
            "Nodata value {nod} does not fit in raster type {}",
            T::TYPE
        )));
    }

    Ok(())
}

/// The nodata value of an operation result: the explicit result nodata, else the nodata of the left operand, else the right one
pub fn resolve_nodata(result: Option<f64>, lhs: Option<f64>, rhs: Option<f64>) -> Option<f64> {
    result.or(lhs).or(rhs)
}

/// Apply a binary operation on two optional cell values after converting them to the operation type `W`.
/// The result is missing when either operand is missing or does not fit in `W`.
#[inline]
pub fn combine<A, B, W, U, F>(lhs: Option<A>, rhs: Option<B>, op: F) -> Option<U>
where
    A: RasterNum,
    B: RasterNum,
    W: RasterNum,
    F: Fn(W, W) -> Option<U>,
{
    let lhs = lhs.and_then(|v| <W as NumCast>::from(v))?;
    let rhs = rhs.and_then(|v| <W as NumCast>::from(v))?;
    op(lhs, rhs)
}
