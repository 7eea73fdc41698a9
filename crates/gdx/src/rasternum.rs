use crate::{
    RasterDataType,
    nodata::{NanNodata, NodataPolicy, SentinelNodata},
};

// Type requirements for data in rasters
pub trait RasterNum:
    Copy
    + Default
    + num::Num
    + num::NumCast
    + num::Bounded
    + num::ToPrimitive
    + std::cmp::PartialOrd
    + std::fmt::Debug
    + std::fmt::Display
    + approx::AbsDiffEq<Epsilon = Self>
    + Send
    + Sync
    + 'static
{
    const TYPE: RasterDataType;
    const IS_SIGNED: bool;
    /// Floating point types represent nodata as NaN, integral types use a sentinel value
    const HAS_NAN: bool;

    type Policy: NodataPolicy<Self>;

    /// The nodata policy for a raster of this type configured with the given nodata value
    fn policy(nodata: Option<f64>) -> Self::Policy;

    fn is_nan(self) -> bool;

    fn add_value(self, other: Self) -> Self;
    fn sub_value(self, other: Self) -> Self;
    fn mul_value(self, other: Self) -> Self;
    /// Returns `None` when dividing by zero
    fn div_value(self, other: Self) -> Option<Self>;
    /// Returns `None` for unsigned types
    fn neg_value(self) -> Option<Self>;
}

macro_rules! int_ops_impl {
    () => {
        #[inline]
        fn add_value(self, other: Self) -> Self {
            self.wrapping_add(other)
        }

        #[inline]
        fn sub_value(self, other: Self) -> Self {
            self.wrapping_sub(other)
        }

        #[inline]
        fn mul_value(self, other: Self) -> Self {
            self.wrapping_mul(other)
        }

        #[inline]
        fn div_value(self, other: Self) -> Option<Self> {
            if other == 0 { None } else { Some(self.wrapping_div(other)) }
        }

        fn policy(nodata: Option<f64>) -> Self::Policy {
            SentinelNodata::new(inf::cast::option(nodata))
        }

        #[inline]
        fn is_nan(self) -> bool {
            false
        }
    };
}

macro_rules! rasternum_signed_impl {
    ($t:ty, $raster_type:ident) => {
        impl RasterNum for $t {
            const TYPE: RasterDataType = RasterDataType::$raster_type;
            const IS_SIGNED: bool = true;
            const HAS_NAN: bool = false;

            type Policy = SentinelNodata<$t>;

            int_ops_impl!();

            #[inline]
            fn neg_value(self) -> Option<Self> {
                Some(self.wrapping_neg())
            }
        }
    };
}

macro_rules! rasternum_unsigned_impl {
    ($t:ty, $raster_type:ident) => {
        impl RasterNum for $t {
            const TYPE: RasterDataType = RasterDataType::$raster_type;
            const IS_SIGNED: bool = false;
            const HAS_NAN: bool = false;

            type Policy = SentinelNodata<$t>;

            int_ops_impl!();

            #[inline]
            fn neg_value(self) -> Option<Self> {
                None
            }
        }
    };
}

macro_rules! rasternum_fp_impl {
    ($t:ty, $raster_type:ident) => {
        impl RasterNum for $t {
            const TYPE: RasterDataType = RasterDataType::$raster_type;
            const IS_SIGNED: bool = true;
            const HAS_NAN: bool = true;

            type Policy = NanNodata;

            fn policy(_nodata: Option<f64>) -> Self::Policy {
                NanNodata
            }

            #[inline]
            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            #[inline]
            fn add_value(self, other: Self) -> Self {
                self + other
            }

            #[inline]
            fn sub_value(self, other: Self) -> Self {
                self - other
            }

            #[inline]
            fn mul_value(self, other: Self) -> Self {
                self * other
            }

            #[inline]
            fn div_value(self, other: Self) -> Option<Self> {
                if other == 0.0 { None } else { Some(self / other) }
            }

            #[inline]
            fn neg_value(self) -> Option<Self> {
                Some(-self)
            }
        }
    };
}

rasternum_signed_impl!(i8, Int8);
rasternum_signed_impl!(i16, Int16);
rasternum_signed_impl!(i32, Int32);
rasternum_signed_impl!(i64, Int64);
rasternum_unsigned_impl!(u8, Uint8);
rasternum_unsigned_impl!(u16, Uint16);
rasternum_unsigned_impl!(u32, Uint32);
rasternum_unsigned_impl!(u64, Uint64);

rasternum_fp_impl!(f32, Float32);
rasternum_fp_impl!(f64, Float64);
