//! Elementwise algebra between rasters and between a raster and a scalar.
//!
//! The pixel type of the result is the widest type of the operands, the result nodata value is the nodata value
//! of the left operand or else the one of the right operand.
//! A result cell is nodata when one of the operand cells is nodata or when the operation is undefined (division by zero).
//! Comparison and logical operations produce `u8` rasters (0 or 1) that use 255 as nodata value when nodata can occur.

use inf::{Error, Result};
use num::{NumCast, Zero};

use crate::{
    Raster, RasterNum,
    algo::check_dimensions,
    nodata,
    widest::{Widest, WidestType},
};

/// Nodata value of the `u8` rasters produced by comparison and logical operations
pub const BOOLEAN_NODATA: f64 = 255.0;

/// Result raster type of a binary operation between `R1` and `R2`
pub type BinaryOutput<R1, R2> = <R1 as Raster>::WithPixelType<WidestType<<R1 as Raster>::Pixel, <R2 as Raster>::Pixel>>;
/// Result raster type of an operation between `R` and a scalar of type `S`
pub type ScalarOutput<R, S> = <R as Raster>::WithPixelType<WidestType<<R as Raster>::Pixel, S>>;
/// Result raster type of comparison and logical operations
pub type BooleanOutput<R> = <R as Raster>::WithPixelType<u8>;

fn may_contain_nodata<R: Raster>(raster: &R) -> bool {
    raster.metadata().nodata.is_some() || <R::Pixel as RasterNum>::HAS_NAN || raster.has_nodata()
}

fn boolean_nodata(may_contain_nodata: bool) -> Option<f64> {
    if may_contain_nodata { Some(BOOLEAN_NODATA) } else { None }
}

fn contains_zero<R: Raster>(raster: &R) -> bool {
    raster.value_iter().any(|v| v.is_zero())
}

#[inline]
fn boolean(value: bool) -> Option<u8> {
    Some(<u8 as From<bool>>::from(value))
}

fn cast_scalar<W: RasterNum, S: RasterNum>(scalar: S) -> Result<W> {
    NumCast::from(scalar).ok_or_else(|| Error::InvalidArgument(format!("Scalar value {scalar} does not fit in raster type {}", W::TYPE)))
}

fn binary_op<R1, R2, W, U, F>(lhs: &R1, rhs: &R2, nodata: Option<f64>, op: F) -> Result<R1::WithPixelType<U>>
where
    R1: Raster,
    R2: Raster,
    W: RasterNum,
    U: RasterNum,
    F: Fn(W, W) -> Option<U> + Sync + Send,
{
    check_dimensions(lhs, rhs)?;

    let meta = lhs.metadata().clone().with_nodata(nodata);
    R1::WithPixelType::<U>::from_cells(meta, |index| nodata::combine::<R1::Pixel, R2::Pixel, W, U, _>(lhs.value(index), rhs.value(index), &op))
}

fn arithmetic_op<R1, R2, F>(lhs: &R1, rhs: &R2, op: F) -> Result<BinaryOutput<R1, R2>>
where
    R1: Raster,
    R2: Raster,
    R1::Pixel: Widest<R2::Pixel>,
    F: Fn(WidestType<R1::Pixel, R2::Pixel>, WidestType<R1::Pixel, R2::Pixel>) -> Option<WidestType<R1::Pixel, R2::Pixel>>
        + Sync
        + Send,
{
    let nodata = nodata::resolve_nodata(None, lhs.metadata().nodata, rhs.metadata().nodata);
    binary_op(lhs, rhs, nodata, op)
}

fn predicate_op<R1, R2, F>(lhs: &R1, rhs: &R2, op: F) -> Result<BooleanOutput<R1>>
where
    R1: Raster,
    R2: Raster,
    R1::Pixel: Widest<R2::Pixel>,
    F: Fn(WidestType<R1::Pixel, R2::Pixel>, WidestType<R1::Pixel, R2::Pixel>) -> Option<u8> + Sync + Send,
{
    let nodata = boolean_nodata(may_contain_nodata(lhs) || may_contain_nodata(rhs));
    binary_op(lhs, rhs, nodata, op)
}

fn scalar_op<R, S, F>(raster: &R, scalar: S, op: F) -> Result<ScalarOutput<R, S>>
where
    R: Raster,
    S: RasterNum,
    R::Pixel: Widest<S>,
    F: Fn(WidestType<R::Pixel, S>, WidestType<R::Pixel, S>) -> Option<WidestType<R::Pixel, S>> + Sync + Send,
{
    let scalar = cast_scalar::<WidestType<R::Pixel, S>, S>(scalar)?;
    raster.map_values(raster.metadata().nodata, |v| op(NumCast::from(v)?, scalar))
}

fn scalar_predicate_op<R, S, F>(raster: &R, scalar: S, op: F) -> Result<BooleanOutput<R>>
where
    R: Raster,
    S: RasterNum,
    R::Pixel: Widest<S>,
    F: Fn(WidestType<R::Pixel, S>, WidestType<R::Pixel, S>) -> bool + Sync + Send,
{
    let scalar = cast_scalar::<WidestType<R::Pixel, S>, S>(scalar)?;
    raster.map_values(boolean_nodata(may_contain_nodata(raster)), |v| boolean(op(NumCast::from(v)?, scalar)))
}

/// Elementwise operations, available on every raster type.
/// The right hand side of a raster operation can be of a different pixel type and a different raster type,
/// the result has the raster type of the left hand side.
pub trait RasterAlgebra: Raster {
    fn add_raster<R2>(&self, rhs: &R2) -> Result<BinaryOutput<Self, R2>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        arithmetic_op(self, rhs, |a, b| Some(a.add_value(b)))
    }

    fn sub_raster<R2>(&self, rhs: &R2) -> Result<BinaryOutput<Self, R2>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        arithmetic_op(self, rhs, |a, b| Some(a.sub_value(b)))
    }

    fn mul_raster<R2>(&self, rhs: &R2) -> Result<BinaryOutput<Self, R2>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        arithmetic_op(self, rhs, |a, b| Some(a.mul_value(b)))
    }

    /// Cells where the divisor is zero become nodata.
    /// Fails when the result raster has no means to represent those nodata cells.
    /// Floating point results without nodata value get NaN as nodata value.
    fn div_raster<R2>(&self, rhs: &R2) -> Result<BinaryOutput<Self, R2>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        let mut nodata = nodata::resolve_nodata(None, self.metadata().nodata, rhs.metadata().nodata);
        if nodata.is_none() && <WidestType<Self::Pixel, R2::Pixel> as RasterNum>::HAS_NAN {
            nodata = Some(f64::NAN);
        }

        binary_op(self, rhs, nodata, |a: WidestType<Self::Pixel, R2::Pixel>, b| a.div_value(b)).map_err(|err| match err {
            Error::Runtime(_) if contains_zero(rhs) => Error::Runtime("Division by zero not possible when resulting raster has no nodata".into()),
            err => err,
        })
    }

    fn equal_to<R2>(&self, rhs: &R2) -> Result<BooleanOutput<Self>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        predicate_op(self, rhs, |a, b| boolean(a == b))
    }

    fn not_equal_to<R2>(&self, rhs: &R2) -> Result<BooleanOutput<Self>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        predicate_op(self, rhs, |a, b| boolean(a != b))
    }

    fn less<R2>(&self, rhs: &R2) -> Result<BooleanOutput<Self>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        predicate_op(self, rhs, |a, b| boolean(a < b))
    }

    fn less_equal<R2>(&self, rhs: &R2) -> Result<BooleanOutput<Self>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        predicate_op(self, rhs, |a, b| boolean(a <= b))
    }

    fn greater<R2>(&self, rhs: &R2) -> Result<BooleanOutput<Self>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        predicate_op(self, rhs, |a, b| boolean(a > b))
    }

    fn greater_equal<R2>(&self, rhs: &R2) -> Result<BooleanOutput<Self>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        predicate_op(self, rhs, |a, b| boolean(a >= b))
    }

    /// 1 where both cells are non zero
    fn logical_and<R2>(&self, rhs: &R2) -> Result<BooleanOutput<Self>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        predicate_op(self, rhs, |a, b| boolean(!a.is_zero() && !b.is_zero()))
    }

    /// 1 where at least one of the cells is non zero
    fn logical_or<R2>(&self, rhs: &R2) -> Result<BooleanOutput<Self>>
    where
        R2: Raster,
        Self::Pixel: Widest<R2::Pixel>,
    {
        predicate_op(self, rhs, |a, b| boolean(!a.is_zero() || !b.is_zero()))
    }

    /// 1 where the cell is zero
    fn logical_not(&self) -> Result<BooleanOutput<Self>> {
        self.map_values(boolean_nodata(may_contain_nodata(self)), |v| boolean(v.is_zero()))
    }

    /// Fails for rasters of an unsigned pixel type
    fn negate(&self) -> Result<Self::WithPixelType<Self::Pixel>> {
        if !<Self::Pixel as RasterNum>::IS_SIGNED {
            return Err(Error::InvalidArgument("Minus operator applied to unsigned value".into()));
        }

        self.map_values(self.metadata().nodata, |v| v.neg_value())
    }

    fn add_scalar<S>(&self, scalar: S) -> Result<ScalarOutput<Self, S>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_op(self, scalar, |v, s| Some(v.add_value(s)))
    }

    fn sub_scalar<S>(&self, scalar: S) -> Result<ScalarOutput<Self, S>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_op(self, scalar, |v, s| Some(v.sub_value(s)))
    }

    fn mul_scalar<S>(&self, scalar: S) -> Result<ScalarOutput<Self, S>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_op(self, scalar, |v, s| Some(v.mul_value(s)))
    }

    fn div_scalar<S>(&self, scalar: S) -> Result<ScalarOutput<Self, S>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        if scalar.is_zero() {
            return Err(Error::InvalidArgument("Division by zero".into()));
        }

        scalar_op(self, scalar, |v, s| v.div_value(s))
    }

    /// Subtract the raster values from the scalar
    fn scalar_sub<S>(&self, scalar: S) -> Result<ScalarOutput<Self, S>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_op(self, scalar, |v, s| Some(s.sub_value(v)))
    }

    /// Divide the scalar by the raster values, cells containing zero become nodata
    fn scalar_div<S>(&self, scalar: S) -> Result<ScalarOutput<Self, S>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_op(self, scalar, |v, s| s.div_value(v)).map_err(|err| match err {
            Error::Runtime(_) if contains_zero(self) => Error::Runtime("Division by raster that contains 0 values".into()),
            err => err,
        })
    }

    fn equal_to_scalar<S>(&self, scalar: S) -> Result<BooleanOutput<Self>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_predicate_op(self, scalar, |v, s| v == s)
    }

    fn not_equal_to_scalar<S>(&self, scalar: S) -> Result<BooleanOutput<Self>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_predicate_op(self, scalar, |v, s| v != s)
    }

    fn less_scalar<S>(&self, scalar: S) -> Result<BooleanOutput<Self>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_predicate_op(self, scalar, |v, s| v < s)
    }

    fn less_equal_scalar<S>(&self, scalar: S) -> Result<BooleanOutput<Self>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_predicate_op(self, scalar, |v, s| v <= s)
    }

    fn greater_scalar<S>(&self, scalar: S) -> Result<BooleanOutput<Self>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_predicate_op(self, scalar, |v, s| v > s)
    }

    fn greater_equal_scalar<S>(&self, scalar: S) -> Result<BooleanOutput<Self>>
    where
        S: RasterNum,
        Self::Pixel: Widest<S>,
    {
        scalar_predicate_op(self, scalar, |v, s| v >= s)
    }
}

impl<R: Raster> RasterAlgebra for R {}
