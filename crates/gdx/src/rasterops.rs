//! `std::ops` operators for the raster types, the operators panic when the operation fails.
//! Use the [`RasterAlgebra`] methods to handle the errors.

use crate::{
    DenseRaster, MaskedRaster, RasterNum, SparseRaster,
    algebra::RasterAlgebra,
    widest::{Widest, WidestType},
};

macro_rules! raster_op {
    ($raster:ident, $op_trait:ident, $op_fn:ident) => {
        paste::paste! {
            impl<T, U> std::ops::$op_trait<&$raster<U>> for &$raster<T>
            where
                T: RasterNum + Widest<U>,
                U: RasterNum,
            {
                type Output = $raster<WidestType<T, U>>;

                fn $op_fn(self, other: &$raster<U>) -> Self::Output {
                    match self.[<$op_fn _raster>](other) {
                        Ok(raster) => raster,
                        Err(e) => panic!("Error on raster operation: {e}"),
                    }
                }
            }

            impl<T, U> std::ops::$op_trait<$raster<U>> for $raster<T>
            where
                T: RasterNum + Widest<U>,
                U: RasterNum,
            {
                type Output = $raster<WidestType<T, U>>;

                fn $op_fn(self, other: $raster<U>) -> Self::Output {
                    std::ops::$op_trait::$op_fn(&self, &other)
                }
            }

            impl<T> std::ops::$op_trait<T> for &$raster<T>
            where
                T: RasterNum + Widest<T, Output = T>,
            {
                type Output = $raster<T>;

                fn $op_fn(self, scalar: T) -> Self::Output {
                    match self.[<$op_fn _scalar>](scalar) {
                        Ok(raster) => raster,
                        Err(e) => panic!("Error on raster operation: {e}"),
                    }
                }
            }

            impl<T> std::ops::$op_trait<T> for $raster<T>
            where
                T: RasterNum + Widest<T, Output = T>,
            {
                type Output = $raster<T>;

                fn $op_fn(self, scalar: T) -> Self::Output {
                    std::ops::$op_trait::$op_fn(&self, scalar)
                }
            }
        }
    };
}

macro_rules! raster_ops {
    ($raster:ident) => {
        raster_op!($raster, Add, add);
        raster_op!($raster, Sub, sub);
        raster_op!($raster, Mul, mul);
        raster_op!($raster, Div, div);

        impl<T: RasterNum> std::ops::Neg for &$raster<T> {
            type Output = $raster<T>;

            fn neg(self) -> Self::Output {
                match self.negate() {
                    Ok(raster) => raster,
                    Err(e) => panic!("Error on raster operation: {e}"),
                }
            }
        }

        impl<T: RasterNum> std::ops::Neg for $raster<T> {
            type Output = $raster<T>;

            fn neg(self) -> Self::Output {
                -&self
            }
        }
    };
}

raster_ops!(DenseRaster);
raster_ops!(MaskedRaster);
raster_ops!(SparseRaster);
