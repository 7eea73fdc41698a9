use crate::RasterNum;

/// The pixel type of the result of a binary operation between rasters of type `Self` and `Rhs`.
/// The result type can represent the values of both operand types, following the usual numeric promotion rules:
/// floating point wins over integral, wider wins over narrower and mixing signedness promotes to the next signed width.
pub trait Widest<Rhs: RasterNum>: RasterNum {
    type Output: RasterNum;
}

pub type WidestType<Lhs, Rhs> = <Lhs as Widest<Rhs>>::Output;

macro_rules! widest_impl {
    ($lhs:ty => [$($rhs:ty : $out:ty),+ $(,)?]) => {
        $(
            impl Widest<$rhs> for $lhs {
                type Output = $out;
            }
        )+
    };
}

widest_impl!(i8 => [i8: i8, i16: i16, i32: i32, i64: i64, u8: i16, u16: i32, u32: i64, u64: i64, f32: f32, f64: f64]);
widest_impl!(i16 => [i8: i16, i16: i16, i32: i32, i64: i64, u8: i16, u16: i32, u32: i64, u64: i64, f32: f32, f64: f64]);
widest_impl!(i32 => [i8: i32, i16: i32, i32: i32, i64: i64, u8: i32, u16: i32, u32: i64, u64: i64, f32: f32, f64: f64]);
widest_impl!(i64 => [i8: i64, i16: i64, i32: i64, i64: i64, u8: i64, u16: i64, u32: i64, u64: i64, f32: f32, f64: f64]);
widest_impl!(u8 => [i8: i16, i16: i16, i32: i32, i64: i64, u8: u8, u16: u16, u32: u32, u64: u64, f32: f32, f64: f64]);
widest_impl!(u16 => [i8: i32, i16: i32, i32: i32, i64: i64, u8: u16, u16: u16, u32: u32, u64: u64, f32: f32, f64: f64]);
widest_impl!(u32 => [i8: i64, i16: i64, i32: i64, i64: i64, u8: u32, u16: u32, u32: u32, u64: u64, f32: f32, f64: f64]);
widest_impl!(u64 => [i8: i64, i16: i64, i32: i64, i64: i64, u8: u64, u16: u64, u32: u64, u64: u64, f32: f32, f64: f64]);
widest_impl!(f32 => [i8: f32, i16: f32, i32: f32, i64: f32, u8: f32, u16: f32, u32: f32, u64: f32, f32: f32, f64: f64]);
widest_impl!(f64 => [i8: f64, i16: f64, i32: f64, i64: f64, u8: f64, u16: f64, u32: f64, u64: f64, f32: f64, f64: f64]);
